pub mod exponential;
pub mod linear;
pub mod older;
pub mod simple;
pub mod window;

use std::collections::HashMap;
use thiserror::Error;

use crate::table::FrequencyTable;
use virada_data::models::DrawRecord;

/// Historique vide : la pondération n'est pas définie et doit échouer
/// plutôt que de produire une table nulle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("historique vide : aucun tirage à pondérer")]
pub struct EmptyHistory;

pub trait WeightPolicy: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> String;
    /// history[0] = tirage le plus ancien. Retourne une table couvrant
    /// toutes les dezenas 1..=60, poids >= 0.
    fn weigh(&self, history: &[DrawRecord]) -> Result<FrequencyTable, EmptyHistory>;
    fn params(&self) -> HashMap<String, f64>;
}

/// La panoplie des scripts pondérés : simple, exponentielle (x7),
/// linéaire (x4), anciens favorisés (x7), plus la fenêtre fournie.
pub fn default_policies(recency_window: window::RecencyWindow) -> Vec<Box<dyn WeightPolicy>> {
    vec![
        Box::new(simple::Simple::new()),
        Box::new(exponential::ExponentialRecency::new(7.0)),
        Box::new(linear::LinearRecency::new(4.0)),
        Box::new(older::OlderFavored::new(7.0)),
        Box::new(recency_window),
    ]
}
