use std::collections::BTreeMap;

use crate::consensus::ConsensusEntry;
use crate::table::FrequencyTable;
use virada_data::loader::date_range;
use virada_data::models::DrawRecord;

const RULE_WIDTH: usize = 70;

/// Un rapport est une suite ordonnée de blocs de texte. Le rendu concatène
/// les blocs tels quels : mêmes entrées, même sortie, octet pour octet.
#[derive(Debug, Default)]
pub struct Report {
    sections: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: String) {
        self.sections.push(section);
    }

    pub fn render(&self) -> String {
        self.sections.concat()
    }
}

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

pub fn header(title: &str, subtitle: &str) -> String {
    let mut out = String::new();
    out.push_str(&rule('='));
    out.push('\n');
    out.push_str(&format!("  {}\n", title));
    if !subtitle.is_empty() {
        out.push_str(&format!("  {}\n", subtitle));
    }
    out.push_str(&rule('='));
    out.push('\n');
    out
}

pub fn section(title: &str) -> String {
    format!("\n{}\n{}\n{}\n", rule('='), title, rule('='))
}

pub fn subsection(title: &str) -> String {
    format!("\n{}\n{}\n{}\n", rule('-'), title, rule('-'))
}

/// Grille formatée "01 - 02 - ..." : dezenas croissantes, zéro en tête.
pub fn numbers_line(numbers: &[u8]) -> String {
    let mut sorted = numbers.to_vec();
    sorted.sort();
    sorted
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn summary_lines(history: &[DrawRecord]) -> String {
    let mut out = String::from("\nRésumé statistique :\n");
    out.push_str(&format!("   Tirages analysés : {}\n", history.len()));
    if let Some((oldest, newest)) = date_range(history) {
        out.push_str(&format!(
            "   Période : {} à {}\n",
            oldest.format("%d/%m/%Y"),
            newest.format("%d/%m/%Y")
        ));
    }
    out
}

/// Classement complet des 60 dezenas, poids à deux décimales fixes.
pub fn full_ranking_section(title: &str, table: &FrequencyTable) -> String {
    let mut out = section(title);
    out.push('\n');
    out.push_str("Rang | Dezena | Poids\n");
    out.push_str(&"-".repeat(30));
    out.push('\n');
    for (i, (number, weight)) in table.ranking().iter().enumerate() {
        out.push_str(&format!("{:4} | {:6} | {:9.2}\n", i + 1, number, weight));
    }
    out
}

pub fn top_n_section(
    name: &str,
    description: &str,
    top: &[(u8, f64)],
    simple: Option<&FrequencyTable>,
) -> String {
    let mut out = section(name);
    if !description.is_empty() {
        out.push_str(&format!("\nStratégie : {}\n", description));
    }

    out.push_str(&format!("\nTop {} dezenas :\n", top.len()));
    for (i, (number, score)) in top.iter().enumerate() {
        match simple.map(|s| s.get(*number)) {
            Some(freq) => out.push_str(&format!(
                "   {}. Dezena {:2} - score {:6.2} (sortie {}x au total)\n",
                i + 1,
                number,
                score,
                freq as u32
            )),
            None => out.push_str(&format!(
                "   {}. Dezena {:2} - score {:6.2}\n",
                i + 1,
                number,
                score
            )),
        }
    }

    let numbers: Vec<u8> = top.iter().map(|(n, _)| *n).collect();
    out.push_str(&format!(
        "\nGrille recommandée : {}\n{}\n",
        numbers_line(&numbers),
        selection_profile_line(&numbers)
    ));
    out
}

/// Profil d'une sélection : parité, basses/hautes, somme.
pub fn selection_profile_line(selection: &[u8]) -> String {
    let even = selection.iter().filter(|&&n| n % 2 == 0).count();
    let odd = selection.len() - even;
    let low = selection.iter().filter(|&&n| n <= 30).count();
    let high = selection.len() - low;
    let sum: u32 = selection.iter().map(|&n| u32::from(n)).sum();
    format!(
        "Profil : {} paires / {} impaires, {} basses (1-30) / {} hautes (31-60), somme {}",
        even, odd, low, high, sum
    )
}

/// Répartition des motifs sur un historique entier : sommes, parité,
/// basses/hautes.
pub fn history_patterns_section(history: &[DrawRecord]) -> String {
    let mut out = section("ANALYSE DES MOTIFS");

    let mut sums: Vec<u32> = Vec::with_capacity(history.len());
    let mut even_odd: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    let mut low_high: BTreeMap<(usize, usize), u32> = BTreeMap::new();

    for draw in history {
        sums.push(draw.numbers.iter().map(|&n| u32::from(n)).sum());
        let even = draw.numbers.iter().filter(|&&n| n % 2 == 0).count();
        let low = draw.numbers.iter().filter(|&&n| n <= 30).count();
        *even_odd.entry((even, 6 - even)).or_insert(0) += 1;
        *low_high.entry((low, 6 - low)).or_insert(0) += 1;
    }

    if let (Some(&min), Some(&max)) = (sums.iter().min(), sums.iter().max()) {
        let avg = sums.iter().sum::<u32>() as f64 / sums.len() as f64;
        out.push_str(&format!(
            "\nSomme des 6 dezenas :\n   moyenne {:.0}, de {} à {}\n",
            avg, min, max
        ));
    }

    out.push_str("\nRépartition paires/impaires :\n");
    for ((even, odd), count) in sorted_by_count(&even_odd) {
        out.push_str(&format!(
            "   {} paires / {} impaires : {} fois\n",
            even, odd, count
        ));
    }

    out.push_str("\nRépartition basses (1-30) / hautes (31-60) :\n");
    for ((low, high), count) in sorted_by_count(&low_high) {
        out.push_str(&format!(
            "   {} basses / {} hautes : {} fois\n",
            low, high, count
        ));
    }

    out
}

fn sorted_by_count(map: &BTreeMap<(usize, usize), u32>) -> Vec<((usize, usize), u32)> {
    let mut items: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    items
}

pub fn consensus_section(entries: &[ConsensusEntry], bet: &[u8]) -> String {
    let mut out = section("ANALYSE DE CONSENSUS");
    out.push_str("Dezenas présentes dans plusieurs méthodes\n");

    let max_methods = entries.iter().map(|e| e.methods).max().unwrap_or(0);
    for methods in (1..=max_methods).rev() {
        let mut group: Vec<u8> = entries
            .iter()
            .filter(|e| e.methods == methods)
            .map(|e| e.number)
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort();
        out.push_str(&format!(
            "\nDans {} méthode(s) ({} dezenas) :\n   {:?}\n",
            methods,
            group.len(),
            group
        ));
    }

    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str("Classement consensus (par nombre de méthodes) :\n");
    for entry in entries.iter().take(15).filter(|e| e.methods > 0) {
        out.push_str(&format!(
            "   Dezena {:2} - dans {} méthode(s)\n",
            entry.number, entry.methods
        ));
    }

    out.push_str(&format!(
        "\nGRILLE CONSENSUS FINALE (top {}) :\n   {}\n",
        bet.len(),
        numbers_line(bet)
    ));
    out
}

/// Récapitulatif par méthode, tel qu'écrit dans le rapport pondéré.
pub fn strategy_comparison_section(picks: &[(String, Vec<u8>)], bet: &[u8]) -> String {
    let mut out = String::from("\n");
    for (i, (name, numbers)) in picks.iter().enumerate() {
        out.push_str(&format!(
            "MÉTHODE {} - {} :\n   {}\n\n",
            i + 1,
            name,
            numbers_line(numbers)
        ));
    }
    out.push_str(&format!(
        "GRILLE CONSENSUS FINALE :\n   {}\n",
        numbers_line(bet)
    ));
    out
}

pub fn draws_section(title: &str, history: &[DrawRecord]) -> String {
    let mut out = section(title);
    out.push('\n');
    for draw in history {
        out.push_str(&format!(
            "{} (concours {}) : {}\n",
            draw.date.format("%d/%m/%Y"),
            draw.concurso,
            numbers_line(&draw.numbers)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::consensus_ranking;
    use crate::policies::simple::Simple;
    use crate::policies::WeightPolicy;
    use virada_data::models::make_test_history;

    #[test]
    fn test_numbers_line_sorted_and_padded() {
        assert_eq!(numbers_line(&[42, 5, 60, 1, 33, 17]), "01 - 05 - 17 - 33 - 42 - 60");
        assert_eq!(numbers_line(&[]), "");
    }

    #[test]
    fn test_header_and_section_shapes() {
        let h = header("TITRE", "sous-titre");
        assert_eq!(h.lines().count(), 4);
        assert!(h.starts_with(&"=".repeat(70)));
        assert!(h.contains("  TITRE"));
        assert!(h.contains("  sous-titre"));

        let s = section("BLOC");
        assert!(s.contains("BLOC"));
        assert!(subsection("BLOC").contains(&"-".repeat(70)));
    }

    #[test]
    fn test_full_ranking_section_lists_all_60() {
        let history = make_test_history(12);
        let table = Simple::new().weigh(&history).unwrap();
        let text = full_ranking_section("CLASSEMENT COMPLET", &table);

        let rows = text
            .lines()
            .filter(|l| l.contains('|') && !l.contains("Rang"))
            .count();
        assert_eq!(rows, 60);
        // Précision fixe à deux décimales
        assert!(text.contains(".00"));
    }

    #[test]
    fn test_top_n_section_cross_references_simple() {
        let history = make_test_history(12);
        let table = Simple::new().weigh(&history).unwrap();
        let top = table.top_n(8);
        let text = top_n_section("Fréquence simple", "desc", &top, Some(&table));

        assert!(text.contains("Top 8 dezenas"));
        assert!(text.contains("au total)"));
        assert!(text.contains("Grille recommandée"));
        assert!(text.contains("Profil :"));
    }

    #[test]
    fn test_selection_profile_line() {
        let line = selection_profile_line(&[2, 4, 31, 33, 35, 60]);
        assert!(line.contains("3 paires / 3 impaires"));
        assert!(line.contains("2 basses (1-30) / 4 hautes (31-60)"));
        assert!(line.contains("somme 165"));
    }

    #[test]
    fn test_consensus_section_groups_and_bet() {
        let picks = vec![
            ("A".to_string(), vec![1u8, 2, 3]),
            ("B".to_string(), vec![2u8, 3, 4]),
        ];
        let ranking = consensus_ranking(&picks);
        let bet = crate::consensus::consensus_bet(&ranking, 4);
        let text = consensus_section(&ranking, &bet);

        assert!(text.contains("Dans 2 méthode(s) (2 dezenas)"));
        assert!(text.contains("[2, 3]"));
        assert!(text.contains("GRILLE CONSENSUS FINALE (top 4)"));
        assert!(text.contains("01 - 02 - 03 - 04"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let history = make_test_history(20);
        let build = || {
            let table = Simple::new().weigh(&history).unwrap();
            let mut report = Report::new();
            report.push(header("MEGA-SENA", "analyse"));
            report.push(summary_lines(&history));
            report.push(full_ranking_section("CLASSEMENT", &table));
            report.push(history_patterns_section(&history));
            report.render()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_draws_section_format() {
        let history = make_test_history(2);
        let text = draws_section("TIRAGES", &history);
        assert!(text.contains("(concours 1)"));
        assert!(text.contains("01 - 02 - 03 - 04 - 05 - 06"));
    }
}
