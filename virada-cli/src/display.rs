use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::sampler::GridSuggestion;
use virada_data::loader::LoadReport;
use virada_data::models::DrawRecord;
use virada_engine::consensus::ConsensusEntry;
use virada_engine::report::numbers_line;
use virada_engine::table::{tag_weights, FrequencyTable, WeightTag};

pub fn display_draws(draws: &[DrawRecord]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Concours", "Dezenas"]);

    for draw in draws {
        table.add_row(vec![
            draw.date.format("%d/%m/%Y").to_string(),
            draw.concurso.to_string(),
            numbers_line(&draw.numbers),
        ]);
    }

    println!("{table}");
}

pub fn display_load_summary(report: &LoadReport) {
    println!("Chargement terminé :");
    println!("  Lignes lues       : {}", report.total);
    println!("  Tirages chargés   : {}", report.loaded);
    if report.skipped > 0 {
        println!("  Lignes ignorées   : {}", report.skipped);
    }
}

pub fn display_ranking(title: &str, freq: &FrequencyTable, limit: usize) {
    println!("\n── {} ──", title);

    let tags = tag_weights(freq);
    let tag_of = |n: u8| {
        tags.iter()
            .find(|(num, _)| *num == n)
            .map(|(_, t)| *t)
            .unwrap_or(WeightTag::Normal)
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rang", "Dezena", "Poids", "Tag"]);

    for (i, (number, weight)) in freq.ranking().iter().take(limit).enumerate() {
        let tag = tag_of(*number);
        let color = match tag {
            WeightTag::Hot => Color::Green,
            WeightTag::Cold => Color::Red,
            WeightTag::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{}", i + 1)),
            Cell::new(format!("{:2}", number)),
            Cell::new(format!("{:.2}", weight)),
            Cell::new(tag.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_consensus(entries: &[ConsensusEntry], limit: usize) {
    println!("\n🎯 Consensus entre stratégies\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Dezena", "Méthodes"]);

    for entry in entries.iter().take(limit).filter(|e| e.methods > 0) {
        table.add_row(vec![
            Cell::new(format!("{:2}", entry.number)),
            Cell::new("⭐".repeat(entry.methods as usize)),
        ]);
    }
    println!("{table}");
}

pub fn display_suggestions(suggestions: &[GridSuggestion]) {
    println!("\n🎲 Suggestions de grilles\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Dezenas", "Score"]);

    for (i, suggestion) in suggestions.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            numbers_line(&suggestion.numbers),
            format!("{:.4}", suggestion.score),
        ]);
    }
    println!("{table}");
}
