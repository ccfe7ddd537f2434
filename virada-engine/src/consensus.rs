use virada_data::models::POOL_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusEntry {
    pub number: u8,
    pub methods: u32,
}

/// Pour chaque dezena 1..=60, compte dans combien de stratégies elle figure
/// au top-N. Classement total : méthodes décroissantes, dezena croissante.
pub fn consensus_ranking(picks: &[(String, Vec<u8>)]) -> Vec<ConsensusEntry> {
    let mut entries: Vec<ConsensusEntry> = (1..=POOL_SIZE)
        .map(|number| ConsensusEntry {
            number,
            methods: picks
                .iter()
                .filter(|(_, numbers)| numbers.contains(&number))
                .count() as u32,
        })
        .collect();

    entries.sort_by(|a, b| b.methods.cmp(&a.methods).then(a.number.cmp(&b.number)));
    entries
}

/// Grille consensus : les n premières dezenas du classement, en ordre
/// croissant pour l'affichage.
pub fn consensus_bet(ranking: &[ConsensusEntry], n: usize) -> Vec<u8> {
    let mut bet: Vec<u8> = ranking.iter().take(n).map(|e| e.number).collect();
    bet.sort();
    bet
}
