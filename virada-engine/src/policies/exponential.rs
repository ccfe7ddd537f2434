use std::collections::HashMap;

use super::{EmptyHistory, WeightPolicy};
use crate::table::FrequencyTable;
use virada_data::models::DrawRecord;

/// Le tirage i sur n contribue base^(i/(n-1)) : le plus récent pèse
/// exactement `base` fois le plus ancien.
#[derive(Debug)]
pub struct ExponentialRecency {
    base: f64,
}

impl ExponentialRecency {
    pub fn new(base: f64) -> Self {
        Self { base }
    }
}

impl WeightPolicy for ExponentialRecency {
    fn name(&self) -> &str {
        "Récence exponentielle"
    }

    fn description(&self) -> String {
        format!(
            "Les tirages récents pèsent exponentiellement plus (rapport {}x entre extrêmes)",
            self.base
        )
    }

    fn weigh(&self, history: &[DrawRecord]) -> Result<FrequencyTable, EmptyHistory> {
        if history.is_empty() {
            return Err(EmptyHistory);
        }

        let n = history.len();
        let mut table = FrequencyTable::zeroed();
        for (i, draw) in history.iter().enumerate() {
            let weight = if n == 1 {
                1.0
            } else {
                self.base.powf(i as f64 / (n - 1) as f64)
            };
            for &num in &draw.numbers {
                table.add(num, weight);
            }
        }
        Ok(table)
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([("base".to_string(), self.base)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draw(concurso: u32, day: u32, numbers: [u8; 6]) -> DrawRecord {
        DrawRecord {
            concurso,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            numbers,
        }
    }

    #[test]
    fn test_newest_to_oldest_ratio_is_base() {
        // La dezena 1 ne sort que dans le plus ancien, la 60 que dans le
        // plus récent
        let history = vec![
            draw(1, 1, [1, 11, 12, 13, 14, 15]),
            draw(2, 2, [21, 22, 23, 24, 25, 26]),
            draw(3, 3, [60, 31, 32, 33, 34, 35]),
        ];
        let policy = ExponentialRecency::new(7.0);
        let table = policy.weigh(&history).unwrap();

        let ratio = table.get(60) / table.get(1);
        assert!((ratio - 7.0).abs() < 1e-9, "rapport = {}", ratio);
    }

    #[test]
    fn test_weights_monotonically_increase_with_recency() {
        let history = vec![
            draw(1, 1, [1, 11, 12, 13, 14, 15]),
            draw(2, 2, [2, 21, 22, 23, 24, 25]),
            draw(3, 3, [3, 31, 32, 33, 34, 35]),
        ];
        let table = ExponentialRecency::new(7.0).weigh(&history).unwrap();
        assert!(table.get(1) < table.get(2));
        assert!(table.get(2) < table.get(3));
    }

    #[test]
    fn test_single_draw_weighs_one() {
        let history = vec![draw(1, 1, [5, 10, 15, 20, 25, 30])];
        let table = ExponentialRecency::new(7.0).weigh(&history).unwrap();
        assert_eq!(table.get(5), 1.0);
        assert_eq!(table.total(), 6.0);
    }

    #[test]
    fn test_empty_history_fails() {
        assert_eq!(
            ExponentialRecency::new(7.0).weigh(&[]),
            Err(EmptyHistory)
        );
    }
}
