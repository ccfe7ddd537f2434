use std::collections::HashMap;

use super::{EmptyHistory, WeightPolicy};
use crate::table::FrequencyTable;
use virada_data::models::DrawRecord;

/// Miroir de la récence exponentielle : le tirage i sur n contribue
/// base^((n-1-i)/(n-1)), le plus ancien pèse `base` fois le plus récent.
#[derive(Debug)]
pub struct OlderFavored {
    base: f64,
}

impl OlderFavored {
    pub fn new(base: f64) -> Self {
        Self { base }
    }
}

impl WeightPolicy for OlderFavored {
    fn name(&self) -> &str {
        "Anciens favorisés"
    }

    fn description(&self) -> String {
        format!(
            "Les tirages anciens pèsent exponentiellement plus (stabilité historique, rapport {}x)",
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
                self.base.powf((n - 1 - i) as f64 / (n - 1) as f64)
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
