use anyhow::Result;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use virada_data::models::{DRAW_SIZE, POOL_SIZE};
use virada_engine::table::FrequencyTable;

#[derive(Debug, Clone)]
pub struct GridSuggestion {
    pub numbers: [u8; 6],
    pub score: f64,
}

/// Tire `count` grilles de 6 dezenas par échantillonnage pondéré sans
/// remise sur la table de poids. Le score est le rapport de vraisemblance
/// de la grille face au tirage uniforme.
pub fn generate_grids(
    table: &FrequencyTable,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<GridSuggestion>> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let total = table.total();
    let uniform = 1.0 / POOL_SIZE as f64;

    let mut suggestions = Vec::with_capacity(count);
    for _ in 0..count {
        let (numbers, score) = sample_grid(table, total, uniform, &mut rng)?;
        suggestions.push(GridSuggestion { numbers, score });
    }
    Ok(suggestions)
}

fn sample_grid(
    table: &FrequencyTable,
    total: f64,
    uniform: f64,
    rng: &mut StdRng,
) -> Result<([u8; 6], f64)> {
    let mut available: Vec<(u8, f64)> = (1..=POOL_SIZE).map(|n| (n, table.get(n))).collect();
    let mut selected = Vec::with_capacity(DRAW_SIZE);
    let mut score = 1.0f64;

    for _ in 0..DRAW_SIZE {
        let weights: Vec<f64> = available.iter().map(|(_, w)| *w).collect();
        let dist = WeightedIndex::new(&weights)?;
        let idx = dist.sample(rng);

        let (number, weight) = available.remove(idx);
        selected.push(number);
        score *= (weight / total) / uniform;
    }

    let mut numbers = [0u8; 6];
    for (i, &n) in selected.iter().enumerate() {
        numbers[i] = n;
    }
    numbers.sort();

    Ok((numbers, score))
}
