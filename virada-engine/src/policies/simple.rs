use std::collections::HashMap;

use super::{EmptyHistory, WeightPolicy};
use crate::table::FrequencyTable;
use virada_data::models::DrawRecord;

/// Chaque tirage contribue 1 : le poids d'une dezena est son nombre
/// d'apparitions.
#[derive(Debug, Default)]
pub struct Simple;

impl Simple {
    pub fn new() -> Self {
        Self
    }
}

impl WeightPolicy for Simple {
    fn name(&self) -> &str {
        "Fréquence simple"
    }

    fn description(&self) -> String {
        "Poids identique pour tous les tirages".to_string()
    }

    fn weigh(&self, history: &[DrawRecord]) -> Result<FrequencyTable, EmptyHistory> {
        if history.is_empty() {
            return Err(EmptyHistory);
        }

        let mut table = FrequencyTable::zeroed();
        for draw in history {
            for &n in &draw.numbers {
                table.add(n, 1.0);
            }
        }
        Ok(table)
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::new()
    }
}
