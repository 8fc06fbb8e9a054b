//! GTO Assistant CLI
//!
//! Cost-optimized poker analysis workflow: run every hand through the
//! solver for free scoring (`gto`), inspect the leaderboard (`list`),
//! then spend AI money only on the hands that earned it (`ai`).

use anyhow::Context;
use clap::ArgGroup;
use clap::Parser;
use gto_assistant::ai::client::OpenAi;
use gto_assistant::config::Config;
use gto_assistant::hands::store::Folder;
use gto_assistant::pipeline;
use gto_assistant::pipeline::select::Selection;
use gto_assistant::solver::client::GtoPlus;
use gto_assistant::solver::client::Solver;
use gto_assistant::store::record::GtoRecord;
use gto_assistant::store::results::Results;
use gto_assistant::Score;

#[derive(Parser)]
#[command(name = "gto", version, about = "Cost-optimized poker analysis")]
enum Command {
    #[command(about = "Run GTO solver analysis over every stored hand")]
    Gto,
    #[command(about = "List GTO results with deviation scores")]
    List {
        #[arg(default_value_t = 0.0, value_name = "MIN")]
        min: Score,
    },
    #[command(about = "Run AI analysis on selected hands")]
    #[command(group(ArgGroup::new("selection").required(true).multiple(false)))]
    Ai {
        #[arg(long, group = "selection", value_name = "N")]
        top: Option<usize>,
        #[arg(long, group = "selection", value_name = "SCORE")]
        min: Option<Score>,
        #[arg(long, group = "selection", value_name = "IDS")]
        hands: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gto_assistant::log();
    let config = Config::load()?;
    match Command::parse() {
        Command::Gto => gto(&config).await,
        Command::List { min } => list(&config, min),
        Command::Ai { top, min, hands } => {
            let selection = match (top, min, hands) {
                (Some(n), _, _) => Selection::TopN(n),
                (_, Some(score), _) => Selection::MinScore(score),
                (_, _, Some(ids)) => Selection::Explicit(
                    ids.split(',')
                        .map(|id| id.trim().to_string())
                        .filter(|id| !id.is_empty())
                        .collect(),
                ),
                _ => unreachable!("clap enforces exactly one selection flag"),
            };
            ai(&config, selection).await
        }
    }
}

/// Phase one: solver only, no AI cost. Ends with the run report and a
/// short leaderboard of candidates for the paid phase.
async fn gto(config: &Config) -> anyhow::Result<()> {
    let url = config.solver_url()?;
    let solver = GtoPlus::new(url, config.solver_timeout);
    anyhow::ensure!(
        solver.health().await,
        "solver not reachable at {}, check the service and GTO_SOLVER_URL",
        url,
    );
    let hands = Folder::from(config.hands.clone());
    let results = Results::from(config.exports.clone());
    let report = pipeline::gto::run(&hands, &solver, &results, config.solver_width)
        .await
        .context("gto run")?;
    println!("{}", report);
    leaderboard(&results)?;
    Ok(())
}

/// Table of persisted results at or above a deviation floor, most
/// interesting first.
fn list(config: &Config, min: Score) -> anyhow::Result<()> {
    let results = Results::from(config.exports.clone());
    let records = ranked(&results)?
        .into_iter()
        .filter(|r| r.deviation >= min)
        .collect::<Vec<_>>();
    if records.is_empty() {
        println!("no results with deviation >= {:.2}", min);
        return Ok(());
    }
    println!(
        "{:<12} {:<12} {:<10} {:<20}",
        "Hand ID", "Stakes", "Deviation", "Processed At"
    );
    println!("{}", "-".repeat(56));
    for record in records {
        println!(
            "{:<12} {:<12} {:<10.2} {:<20}",
            record.hand.hand_id,
            record.hand.stakes,
            record.deviation,
            record.processed_at.format("%Y-%m-%d %H:%M").to_string(),
        );
    }
    Ok(())
}

/// Phase two: AI enrichment of exactly the selected hands.
async fn ai(config: &Config, selection: Selection) -> anyhow::Result<()> {
    let key = config.api_key()?;
    let analyst = OpenAi::new(
        &config.openai_url,
        key,
        &config.model,
        config.temperature,
        config.ai_timeout,
    );
    let results = Results::from(config.exports.clone());
    let selected = selection.apply(&results.latest_gto()?);
    for unknown in &selected.unknown {
        println!("warning: no gto record for #{}, excluded", unknown);
    }
    if selected.ids.is_empty() {
        println!("no hands selected; run `gto gto` first or relax the selection");
        return Ok(());
    }
    let report = pipeline::ai::run(&selected.ids, &analyst, &results).await;
    println!("{}", report);
    Ok(())
}

/// Top hands by deviation, the candidates worth paying to review.
fn leaderboard(results: &Results) -> anyhow::Result<()> {
    let top = ranked(results)?;
    if top.is_empty() {
        println!("no hands processed; drop hand history files into the hands directory");
        return Ok(());
    }
    println!("\ntop hands by deviation (candidates for AI analysis):");
    for (i, record) in top.iter().take(5).enumerate() {
        println!(
            "  {}. Hand #{} - Deviation: {:.2}",
            i + 1,
            record.hand.hand_id,
            record.deviation,
        );
    }
    println!("\nnext steps:");
    println!("  gto ai --top 3");
    println!("  gto ai --min 1.0");
    println!("  gto list");
    Ok(())
}

/// Latest record per hand, descending by deviation, ties by hand id.
fn ranked(results: &Results) -> anyhow::Result<Vec<GtoRecord>> {
    let mut records = results.latest_gto()?;
    records.sort_by(|a, b| {
        b.deviation
            .partial_cmp(&a.deviation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.hand.hand_id.cmp(&b.hand.hand_id))
    });
    Ok(records)
}
