use std::collections::HashMap;

use chrono::Datelike;

use super::{EmptyHistory, WeightPolicy};
use crate::table::FrequencyTable;
use virada_data::models::DrawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowMode {
    Draws(usize),
    Years(i32),
}

/// Seuls les tirages de la fenêtre récente contribuent (poids 1), tout le
/// reste contribue 0. Équivaut à filtrer puis appliquer la fréquence simple.
#[derive(Debug)]
pub struct RecencyWindow {
    mode: WindowMode,
    name: String,
}

impl RecencyWindow {
    pub fn last_draws(n: usize) -> Self {
        Self {
            mode: WindowMode::Draws(n),
            name: format!("{} derniers tirages", n),
        }
    }

    pub fn last_years(k: i32) -> Self {
        Self {
            mode: WindowMode::Years(k),
            name: format!("{} dernières années", k),
        }
    }
}

impl WeightPolicy for RecencyWindow {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        match self.mode {
            WindowMode::Draws(n) => format!("Seuls les {} derniers tirages comptent", n),
            WindowMode::Years(k) => {
                format!("Seuls les tirages des {} dernières années comptent", k)
            }
        }
    }

    fn weigh(&self, history: &[DrawRecord]) -> Result<FrequencyTable, EmptyHistory> {
        if history.is_empty() {
            return Err(EmptyHistory);
        }

        let mut table = FrequencyTable::zeroed();
        match self.mode {
            WindowMode::Draws(n) => {
                for draw in history.iter().skip(history.len().saturating_sub(n)) {
                    for &num in &draw.numbers {
                        table.add(num, 1.0);
                    }
                }
            }
            WindowMode::Years(k) => {
                // La fenêtre est ancrée sur l'année du tirage le plus récent,
                // qui en fait donc toujours partie
                let newest_year = history[history.len() - 1].date.year();
                let cutoff = newest_year - k + 1;
                for draw in history.iter().filter(|d| d.date.year() >= cutoff) {
                    for &num in &draw.numbers {
                        table.add(num, 1.0);
                    }
                }
            }
        }
        Ok(table)
    }

    fn params(&self) -> HashMap<String, f64> {
        match self.mode {
            WindowMode::Draws(n) => HashMap::from([("tirages".to_string(), n as f64)]),
            WindowMode::Years(k) => HashMap::from([("annees".to_string(), k as f64)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draw_on(concurso: u32, year: i32, numbers: [u8; 6]) -> DrawRecord {
        DrawRecord {
            concurso,
            date: NaiveDate::from_ymd_opt(year, 6, 15).unwrap(),
            numbers,
        }
    }

    #[test]
    fn test_last_draws_window() {
        let history = vec![
            draw_on(1, 2020, [1, 2, 3, 4, 5, 6]),
            draw_on(2, 2021, [7, 8, 9, 10, 11, 12]),
            draw_on(3, 2022, [13, 14, 15, 16, 17, 18]),
        ];
        let table = RecencyWindow::last_draws(2).weigh(&history).unwrap();

        assert_eq!(table.get(1), 0.0);
        assert_eq!(table.get(7), 1.0);
        assert_eq!(table.get(13), 1.0);
        assert_eq!(table.total(), 12.0);
    }

    #[test]
    fn test_window_larger_than_history() {
        let history = vec![draw_on(1, 2020, [1, 2, 3, 4, 5, 6])];
        let table = RecencyWindow::last_draws(10).weigh(&history).unwrap();
        assert_eq!(table.total(), 6.0);
    }

    #[test]
    fn test_last_years_window() {
        let history = vec![
            draw_on(1, 2018, [1, 2, 3, 4, 5, 6]),
            draw_on(2, 2021, [7, 8, 9, 10, 11, 12]),
            draw_on(3, 2022, [13, 14, 15, 16, 17, 18]),
        ];
        // Fenêtre 2021-2022
        let table = RecencyWindow::last_years(2).weigh(&history).unwrap();

        assert_eq!(table.get(1), 0.0);
        assert_eq!(table.get(7), 1.0);
        assert_eq!(table.get(13), 1.0);
    }

    #[test]
    fn test_names() {
        assert_eq!(RecencyWindow::last_draws(5).name(), "5 derniers tirages");
        assert_eq!(RecencyWindow::last_years(5).name(), "5 dernières années");
    }

    #[test]
    fn test_empty_history_fails() {
        assert_eq!(RecencyWindow::last_draws(5).weigh(&[]), Err(EmptyHistory));
    }
}
