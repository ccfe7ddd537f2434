use std::collections::HashMap;

use super::{EmptyHistory, WeightPolicy};
use crate::table::FrequencyTable;
use virada_data::models::DrawRecord;

/// Le tirage i sur n contribue 1 + (max_boost-1) * i/(n-1) : progression
/// linéaire de 1 jusqu'à max_boost.
#[derive(Debug)]
pub struct LinearRecency {
    max_boost: f64,
}

impl LinearRecency {
    pub fn new(max_boost: f64) -> Self {
        Self { max_boost }
    }
}

impl WeightPolicy for LinearRecency {
    fn name(&self) -> &str {
        "Récence linéaire"
    }

    fn description(&self) -> String {
        format!(
            "Les tirages récents pèsent linéairement plus (jusqu'à {}x)",
            self.max_boost
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
                1.0 + (self.max_boost - 1.0) * i as f64 / (n - 1) as f64
            };
            for &num in &draw.numbers {
                table.add(num, weight);
            }
        }
        Ok(table)
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([("max_boost".to_string(), self.max_boost)])
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
    fn test_endpoints_and_midpoint() {
        let history = vec![
            draw(1, 1, [1, 11, 12, 13, 14, 15]),
            draw(2, 2, [2, 21, 22, 23, 24, 25]),
            draw(3, 3, [3, 31, 32, 33, 34, 35]),
        ];
        let table = LinearRecency::new(4.0).weigh(&history).unwrap();

        assert!((table.get(1) - 1.0).abs() < 1e-12);
        assert!((table.get(2) - 2.5).abs() < 1e-12);
        assert!((table.get(3) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_draw_weighs_one() {
        let history = vec![draw(1, 1, [5, 10, 15, 20, 25, 30])];
        let table = LinearRecency::new(4.0).weigh(&history).unwrap();
        assert_eq!(table.get(10), 1.0);
    }

    #[test]
    fn test_empty_history_fails() {
        assert_eq!(LinearRecency::new(4.0).weigh(&[]), Err(EmptyHistory));
    }
}
