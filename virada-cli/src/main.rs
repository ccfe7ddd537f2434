mod display;
mod sampler;
mod writer;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use virada_data::loader::{self, LoadOutcome, Strictness};
use virada_data::models::DrawRecord;
use virada_engine::consensus::{consensus_bet, consensus_ranking};
use virada_engine::policies::exponential::ExponentialRecency;
use virada_engine::policies::linear::LinearRecency;
use virada_engine::policies::older::OlderFavored;
use virada_engine::policies::simple::Simple;
use virada_engine::policies::window::RecencyWindow;
use virada_engine::policies::{default_policies, WeightPolicy};
use virada_engine::report::{self, Report};

const DEFAULT_INPUT: &str = "input/mega_sena_resultados.csv";

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum PolicyKind {
    Simple,
    #[default]
    Exponentielle,
    Lineaire,
    Anciens,
    Fenetre,
}

#[derive(Parser)]
#[command(name = "virada", about = "Analyseur de fréquences Mega-Sena")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les derniers tirages
    List {
        /// Fichier CSV des résultats
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Fréquences simples sur tout l'historique
    Stats {
        /// Fichier CSV des résultats
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Répertoire de sortie des rapports
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Taille de la sélection recommandée
        #[arg(short, long, default_value = "8")]
        top: usize,

        /// Abandonner à la première ligne invalide
        #[arg(long)]
        strict: bool,
    },

    /// Analyse spéciale Mega da Virada (tirages du 31 décembre)
    Virada {
        /// Fichier CSV des résultats
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Répertoire de sortie des rapports
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Taille de la sélection recommandée
        #[arg(short, long, default_value = "8")]
        top: usize,

        /// Première année à considérer
        #[arg(long, default_value = "2008")]
        since: i32,

        /// Abandonner à la première ligne invalide
        #[arg(long)]
        strict: bool,
    },

    /// Comparer les stratégies de pondération sur tout l'historique
    Weighted {
        /// Fichier CSV des résultats
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Répertoire de sortie des rapports
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Taille de la sélection recommandée
        #[arg(short, long, default_value = "8")]
        top: usize,

        /// Abandonner à la première ligne invalide
        #[arg(long)]
        strict: bool,
    },

    /// Comparer les stratégies sur les seuls tirages Mega da Virada
    WeightedVirada {
        /// Fichier CSV des résultats
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Répertoire de sortie des rapports
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Taille de la sélection recommandée
        #[arg(short, long, default_value = "8")]
        top: usize,

        /// Première année à considérer
        #[arg(long, default_value = "2008")]
        since: i32,

        /// Abandonner à la première ligne invalide
        #[arg(long)]
        strict: bool,
    },

    /// Suggérer des grilles par échantillonnage pondéré
    Suggest {
        /// Fichier CSV des résultats
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Stratégie de pondération
        #[arg(short, long, default_value = "exponentielle")]
        policy: PolicyKind,

        /// Nombre de grilles
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Abandonner à la première ligne invalide
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List { file, last } => cmd_list(&file, last),
        Command::Stats {
            file,
            output_dir,
            top,
            strict,
        } => cmd_stats(&file, &output_dir, top, strict),
        Command::Virada {
            file,
            output_dir,
            top,
            since,
            strict,
        } => cmd_virada(&file, &output_dir, top, since, strict),
        Command::Weighted {
            file,
            output_dir,
            top,
            strict,
        } => cmd_weighted(&file, &output_dir, top, strict),
        Command::WeightedVirada {
            file,
            output_dir,
            top,
            since,
            strict,
        } => cmd_weighted_virada(&file, &output_dir, top, since, strict),
        Command::Suggest {
            file,
            policy,
            count,
            seed,
            strict,
        } => cmd_suggest(&file, policy, count, seed, strict),
    }
}

fn load(file: &Path, strict: bool) -> Result<LoadOutcome> {
    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    loader::load_history(file, strictness)
        .with_context(|| format!("échec du chargement de {:?}", file))
}

fn cmd_list(file: &Path, last: usize) -> Result<()> {
    let outcome = load(file, false)?;
    if outcome.history.is_empty() {
        println!("Aucun tirage chargé depuis {:?}.", file);
        return Ok(());
    }

    // Les plus récents d'abord
    let recent: Vec<DrawRecord> = outcome.history.iter().rev().take(last).cloned().collect();
    display::display_draws(&recent);
    Ok(())
}

fn cmd_stats(file: &Path, output_dir: &Path, top: usize, strict: bool) -> Result<()> {
    let outcome = load(file, strict)?;
    display::display_load_summary(&outcome.report);

    let simple = Simple::new();
    let table = simple.weigh(&outcome.history)?;

    println!("\n📊 Fréquences sur tout l'historique Mega-Sena");
    if let Some((oldest, newest)) = loader::date_range(&outcome.history) {
        println!(
            "   Période : {} à {}",
            oldest.format("%d/%m/%Y"),
            newest.format("%d/%m/%Y")
        );
    }
    println!("   Tirages analysés : {}", outcome.history.len());
    println!("   Poids moyen par dezena : {:.2}", table.mean());

    display::display_ranking("Classement complet (1-60)", &table, 60);

    let top_selection = table.top_n(top);
    let numbers: Vec<u8> = top_selection.iter().map(|(n, _)| *n).collect();
    println!("\n💰 Grille recommandée : {}", report::numbers_line(&numbers));
    println!("{}", report::selection_profile_line(&numbers));

    let mut rpt = Report::new();
    rpt.push(report::header(
        "MEGA-SENA - ANALYSE COMPLÈTE DES FRÉQUENCES",
        "Tous les tirages historiques",
    ));
    rpt.push(report::summary_lines(&outcome.history));
    rpt.push(report::top_n_section(
        simple.name(),
        &simple.description(),
        &top_selection,
        Some(&table),
    ));
    rpt.push(report::full_ranking_section(
        "CLASSEMENT COMPLET - LES 60 DEZENAS",
        &table,
    ));

    let path = output_dir.join("number_frequency_analysis.txt");
    writer::write_report(&path, &rpt.render())?;
    println!("\n✓ Rapport enregistré : {}", path.display());

    print_footer();
    Ok(())
}

fn cmd_virada(file: &Path, output_dir: &Path, top: usize, since: i32, strict: bool) -> Result<()> {
    let outcome = load(file, strict)?;
    display::display_load_summary(&outcome.report);

    let virada = loader::mega_virada_draws(&outcome.history, since);
    if virada.is_empty() {
        bail!(
            "aucun tirage Mega da Virada (31 décembre) depuis {} dans {:?}",
            since,
            file
        );
    }

    println!("\n🎇 {} tirages Mega da Virada depuis {}", virada.len(), since);
    display::display_draws(&virada);

    let simple = Simple::new();
    let table = simple.weigh(&virada)?;
    display::display_ranking("Fréquences Mega da Virada", &table, 60);

    let top_selection = table.top_n(top);
    let numbers: Vec<u8> = top_selection.iter().map(|(n, _)| *n).collect();
    println!("\n💰 Grille recommandée : {}", report::numbers_line(&numbers));
    println!("{}", report::selection_profile_line(&numbers));

    let hot: Vec<String> = table
        .ranking()
        .iter()
        .filter(|(_, w)| *w >= 3.0)
        .map(|(n, w)| format!("{}({}x)", n, *w as u32))
        .collect();
    if !hot.is_empty() {
        println!("\n⭐ Dezenas sorties 3 fois ou plus : {}", hot.join(", "));
    }

    let never: Vec<String> = (1..=60u8)
        .filter(|&n| table.get(n) == 0.0)
        .map(|n| n.to_string())
        .collect();
    if !never.is_empty() {
        println!(
            "❌ Jamais sorties à la Virada ({} dezenas) : {}",
            never.len(),
            never.join(", ")
        );
    }

    let mut rpt = Report::new();
    rpt.push(report::header(
        "MEGA DA VIRADA - ANALYSE DÉTAILLÉE",
        &format!("Tirages du 31 décembre depuis {}", since),
    ));
    rpt.push(report::summary_lines(&virada));
    rpt.push(report::draws_section("TOUS LES TIRAGES", &virada));
    rpt.push(report::history_patterns_section(&virada));
    rpt.push(report::top_n_section(
        simple.name(),
        &simple.description(),
        &top_selection,
        Some(&table),
    ));
    rpt.push(report::full_ranking_section(
        "FRÉQUENCES - LES 60 DEZENAS",
        &table,
    ));

    let path = output_dir.join("mega_virada_analysis.txt");
    writer::write_report(&path, &rpt.render())?;
    println!("\n✓ Rapport enregistré : {}", path.display());

    print_footer();
    Ok(())
}

fn cmd_weighted(file: &Path, output_dir: &Path, top: usize, strict: bool) -> Result<()> {
    let outcome = load(file, strict)?;
    display::display_load_summary(&outcome.report);

    run_weighted(
        &outcome.history,
        RecencyWindow::last_years(5),
        "MEGA DA VIRADA - ANALYSE PONDÉRÉE",
        "Tout l'historique Mega-Sena",
        "weighted_analysis_all_draws.txt",
        output_dir,
        top,
    )
}

fn cmd_weighted_virada(
    file: &Path,
    output_dir: &Path,
    top: usize,
    since: i32,
    strict: bool,
) -> Result<()> {
    let outcome = load(file, strict)?;
    display::display_load_summary(&outcome.report);

    let virada = loader::mega_virada_draws(&outcome.history, since);
    if virada.is_empty() {
        bail!(
            "aucun tirage Mega da Virada (31 décembre) depuis {} dans {:?}",
            since,
            file
        );
    }

    println!("\n🎇 {} tirages Mega da Virada depuis {}", virada.len(), since);
    display::display_draws(&virada);

    run_weighted(
        &virada,
        RecencyWindow::last_draws(5),
        "MEGA DA VIRADA - ANALYSE PONDÉRÉE",
        &format!("Tirages du 31 décembre depuis {}", since),
        "weighted_analysis_results.txt",
        output_dir,
        top,
    )
}

fn run_weighted(
    history: &[DrawRecord],
    recency_window: RecencyWindow,
    title: &str,
    subtitle: &str,
    filename: &str,
    output_dir: &Path,
    top: usize,
) -> Result<()> {
    let policies = default_policies(recency_window);
    let simple_table = Simple::new().weigh(history)?;

    let mut rpt = Report::new();
    rpt.push(report::header(title, subtitle));
    rpt.push(report::summary_lines(history));

    let mut picks: Vec<(String, Vec<u8>)> = Vec::new();
    for policy in &policies {
        let table = policy.weigh(history)?;
        let top_selection = table.top_n(top);
        let numbers: Vec<u8> = top_selection.iter().map(|(n, _)| *n).collect();

        println!("\n📊 {}", policy.name());
        println!("   {}", policy.description());
        println!("   Top {} : {}", top, report::numbers_line(&numbers));

        rpt.push(report::top_n_section(
            policy.name(),
            &policy.description(),
            &top_selection,
            Some(&simple_table),
        ));
        picks.push((policy.name().to_string(), numbers));
    }

    let ranking = consensus_ranking(&picks);
    let bet = consensus_bet(&ranking, top);

    display::display_consensus(&ranking, 15);
    println!("💰 GRILLE CONSENSUS FINALE : {}", report::numbers_line(&bet));

    rpt.push(report::consensus_section(&ranking, &bet));
    rpt.push(report::strategy_comparison_section(&picks, &bet));

    let path = output_dir.join(filename);
    writer::write_report(&path, &rpt.render())?;
    println!("\n✓ Rapport enregistré : {}", path.display());

    print_footer();
    Ok(())
}

fn cmd_suggest(
    file: &Path,
    kind: PolicyKind,
    count: usize,
    seed: Option<u64>,
    strict: bool,
) -> Result<()> {
    let outcome = load(file, strict)?;

    let policy: Box<dyn WeightPolicy> = match kind {
        PolicyKind::Simple => Box::new(Simple::new()),
        PolicyKind::Exponentielle => Box::new(ExponentialRecency::new(7.0)),
        PolicyKind::Lineaire => Box::new(LinearRecency::new(4.0)),
        PolicyKind::Anciens => Box::new(OlderFavored::new(7.0)),
        PolicyKind::Fenetre => Box::new(RecencyWindow::last_draws(50)),
    };

    let table = policy.weigh(&outcome.history)?;
    println!("\n🎲 Échantillonnage selon : {}", policy.name());

    let grids = sampler::generate_grids(&table, count, seed)
        .context("impossible d'échantillonner une grille (poids insuffisants)")?;
    display::display_suggestions(&grids);

    Ok(())
}

fn print_footer() {
    println!("\n{}", "=".repeat(70));
    println!("  🍀 BOA SORTE ! 🍀");
    println!("{}", "=".repeat(70));
}
