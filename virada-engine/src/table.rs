use virada_data::models::POOL_SIZE;

/// Poids cumulés par dezena. Toutes les dezenas 1..=60 sont toujours
/// présentes, les absentes pèsent 0.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    weights: Vec<f64>,
}

impl FrequencyTable {
    pub fn zeroed() -> Self {
        Self {
            weights: vec![0.0; POOL_SIZE as usize],
        }
    }

    pub fn add(&mut self, number: u8, weight: f64) {
        let idx = (number - 1) as usize;
        if idx < self.weights.len() {
            self.weights[idx] += weight;
        }
    }

    pub fn get(&self, number: u8) -> f64 {
        self.weights
            .get((number - 1) as usize)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        self.total() / POOL_SIZE as f64
    }

    /// Classement complet des 60 dezenas : poids décroissant, dezena
    /// croissante à égalité. L'ordre est total et reproductible.
    pub fn ranking(&self) -> Vec<(u8, f64)> {
        let mut ranked: Vec<(u8, f64)> = (1..=POOL_SIZE).map(|n| (n, self.get(n))).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked
    }

    pub fn top_n(&self, n: usize) -> Vec<(u8, f64)> {
        self.ranking().into_iter().take(n).collect()
    }
}

pub fn validate_table(table: &FrequencyTable) -> bool {
    table.weights.len() == POOL_SIZE as usize && table.weights.iter().all(|&w| w >= 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for WeightTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightTag::Hot => write!(f, "HOT"),
            WeightTag::Cold => write!(f, "COLD"),
            WeightTag::Normal => write!(f, "-"),
        }
    }
}

/// Marque HOT/COLD les dezenas qui s'écartent de plus de 30% du poids moyen.
pub fn tag_weights(table: &FrequencyTable) -> Vec<(u8, WeightTag)> {
    let mean = table.mean();
    let threshold = 0.3;

    (1..=POOL_SIZE)
        .map(|n| {
            let tag = if mean <= 0.0 {
                WeightTag::Normal
            } else {
                let deviation = (table.get(n) - mean) / mean;
                if deviation > threshold {
                    WeightTag::Hot
                } else if deviation < -threshold {
                    WeightTag::Cold
                } else {
                    WeightTag::Normal
                }
            };
            (n, tag)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_covers_full_pool() {
        let table = FrequencyTable::zeroed();
        assert!(validate_table(&table));
        assert_eq!(table.ranking().len(), 60);
        for n in 1..=POOL_SIZE {
            assert_eq!(table.get(n), 0.0);
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut table = FrequencyTable::zeroed();
        table.add(7, 1.0);
        table.add(7, 2.5);
        assert!((table.get(7) - 3.5).abs() < 1e-12);
        assert_eq!(table.get(8), 0.0);
    }

    #[test]
    fn test_add_out_of_pool_ignored() {
        let mut table = FrequencyTable::zeroed();
        table.add(61, 1.0);
        assert_eq!(table.total(), 0.0);
    }

    #[test]
    fn test_ranking_ties_ascending_number() {
        let mut table = FrequencyTable::zeroed();
        table.add(42, 3.0);
        table.add(9, 3.0);
        table.add(17, 5.0);

        let ranking = table.ranking();
        assert_eq!(ranking[0], (17, 5.0));
        assert_eq!(ranking[1], (9, 3.0));
        assert_eq!(ranking[2], (42, 3.0));
        // Les dezenas à 0 suivent en ordre croissant
        assert_eq!(ranking[3].0, 1);
        assert_eq!(ranking.last().unwrap().0, 60);
    }

    #[test]
    fn test_ranking_reproducible() {
        let mut table = FrequencyTable::zeroed();
        for n in [3u8, 14, 3, 59, 14, 3] {
            table.add(n, 1.0);
        }
        assert_eq!(table.ranking(), table.ranking());
    }

    #[test]
    fn test_top_n() {
        let mut table = FrequencyTable::zeroed();
        table.add(10, 4.0);
        table.add(20, 2.0);
        table.add(30, 1.0);

        let top = table.top_n(2);
        assert_eq!(top, vec![(10, 4.0), (20, 2.0)]);
    }

    #[test]
    fn test_tag_weights() {
        let mut table = FrequencyTable::zeroed();
        // Base uniforme, moyenne proche de 1.0
        for n in 1..=POOL_SIZE {
            table.add(n, 1.0);
        }
        table.add(5, 1.0); // 2.0 -> +100%
        table.add(6, -0.5); // 0.5 -> -50%

        let tags = tag_weights(&table);
        let tag_of = |n: u8| tags.iter().find(|(num, _)| *num == n).unwrap().1;
        assert_eq!(tag_of(5), WeightTag::Hot);
        assert_eq!(tag_of(6), WeightTag::Cold);
        assert_eq!(tag_of(7), WeightTag::Normal);
    }
}
