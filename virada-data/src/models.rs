use anyhow::{bail, Result};
use chrono::{Datelike, Days, NaiveDate};

pub const POOL_SIZE: u8 = 60;
pub const DRAW_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub concurso: u32,
    pub date: NaiveDate,
    pub numbers: [u8; 6],
}

/// Tirages ordonnés par (date, concours) croissants. L'indice 0 est le plus ancien.
pub type DrawHistory = Vec<DrawRecord>;

impl DrawRecord {
    pub fn sorted_numbers(&self) -> [u8; 6] {
        let mut numbers = self.numbers;
        numbers.sort();
        numbers
    }

    pub fn is_mega_virada(&self) -> bool {
        self.date.month() == 12 && self.date.day() == 31
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

pub fn validate_numbers(numbers: &[u8; 6]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("Dezena {} hors limites (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Dezena en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

/// Projette chaque tirage sur ses six numéros, la date est perdue.
pub fn extract_numbers(history: &[DrawRecord]) -> Vec<[u8; 6]> {
    history.iter().map(|d| d.numbers).collect()
}

pub fn make_test_history(n: usize) -> DrawHistory {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let base = (i % 10) as u8;
            DrawRecord {
                concurso: (i + 1) as u32,
                date: start + Days::new((i * 4) as u64),
                numbers: [
                    base * 6 + 1,
                    base * 6 + 2,
                    base * 6 + 3,
                    base * 6 + 4,
                    base * 6 + 5,
                    base * 6 + 6,
                ],
            }
        })
        .collect()
}
