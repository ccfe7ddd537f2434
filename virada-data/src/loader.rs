use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{validate_numbers, DrawHistory, DrawRecord};

/// Comportement face aux lignes invalides du CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Ignorer la ligne, la compter, continuer.
    #[default]
    Lenient,
    /// Abandonner à la première ligne invalide.
    Strict,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ligne {line} : enregistrement invalide : {detail}")]
    MalformedRecord { line: usize, detail: String },

    #[error("ligne {line} : lecture impossible dans {path:?} : {source}")]
    Read {
        line: usize,
        path: PathBuf,
        source: csv::Error,
    },

    #[error("impossible d'ouvrir {path:?} : {source}")]
    Open { path: PathBuf, source: csv::Error },
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total: u32,
    pub loaded: u32,
    pub skipped: u32,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub history: DrawHistory,
    pub report: LoadReport,
}

/// Charge tout l'historique depuis un CSV `Concurso;Data;bola 1;...;bola 6`,
/// puis trie par (date, concours) croissants.
pub fn load_history(path: &Path, strictness: Strictness) -> Result<LoadOutcome, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut history: DrawHistory = Vec::new();
    let mut report = LoadReport::default();

    for (idx, record_result) in reader.records().enumerate() {
        report.total += 1;
        // L'en-tête occupe la ligne 1 du fichier
        let line = idx + 2;

        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(draw) => {
                    history.push(draw);
                    report.loaded += 1;
                }
                Err(e) => {
                    let err = LoadError::MalformedRecord {
                        line,
                        detail: format!("{:#}", e),
                    };
                    if strictness == Strictness::Strict {
                        return Err(err);
                    }
                    eprintln!("{}", err);
                    report.skipped += 1;
                }
            },
            Err(source) => {
                let err = LoadError::Read {
                    line,
                    path: path.to_path_buf(),
                    source,
                };
                if strictness == Strictness::Strict {
                    return Err(err);
                }
                eprintln!("{}", err);
                report.skipped += 1;
            }
        }
    }

    history.sort_by(|a, b| (a.date, a.concurso).cmp(&(b.date, b.concurso)));

    Ok(LoadOutcome { history, report })
}

fn parse_record(record: &csv::StringRecord) -> anyhow::Result<DrawRecord> {
    let get = |idx: usize| -> anyhow::Result<&str> {
        record
            .get(idx)
            .map(str::trim)
            .with_context(|| format!("champ manquant à l'index {}", idx))
    };

    let concurso: u32 = get(0)?
        .parse()
        .with_context(|| format!("numéro de concours invalide : '{}'", record.get(0).unwrap_or_default()))?;

    let date = parse_date(get(1)?)?;

    let mut numbers = [0u8; 6];
    for (i, slot) in numbers.iter_mut().enumerate() {
        let s = get(2 + i)?;
        *slot = s
            .parse()
            .with_context(|| format!("impossible de parser '{}' (index {})", s, 2 + i))?;
    }
    validate_numbers(&numbers)?;

    Ok(DrawRecord {
        concurso,
        date,
        numbers,
    })
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .with_context(|| format!("format de date invalide : '{}'", raw))
}

/// Sous-séquence ordonnée des tirages vérifiant le prédicat.
pub fn filter_by<F>(history: &[DrawRecord], predicate: F) -> DrawHistory
where
    F: Fn(&DrawRecord) -> bool,
{
    history.iter().filter(|d| predicate(d)).cloned().collect()
}

/// Tirages Mega da Virada : ceux du 31 décembre à partir de `start_year`.
pub fn mega_virada_draws(history: &[DrawRecord], start_year: i32) -> DrawHistory {
    filter_by(history, |d| {
        d.is_mega_virada() && d.date.year() >= start_year
    })
}

pub fn year_range_draws(history: &[DrawRecord], start_year: i32, end_year: i32) -> DrawHistory {
    filter_by(history, |d| {
        (start_year..=end_year).contains(&d.date.year())
    })
}

pub fn date_range(history: &[DrawRecord]) -> Option<(NaiveDate, NaiveDate)> {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) => Some((first.date, last.date)),
        _ => None,
    }
}
