use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secret_santa::{AssignCfg, Assignment};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod input;

#[derive(Parser)]
#[command(name = "santa-cli")]
#[command(about = "Secret-santa roster checks, draws, and note export")]
struct Cmd {
    /// Seed for the draw; a fresh one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Validate a roster file and print a summary
    Check {
        #[arg(long)]
        roster: String,
    },
    /// Draw a matching and write one note per giver under --out
    Draw {
        #[arg(long)]
        roster: String,
        #[arg(long)]
        out: String,
        /// Let participants draw their declared partner
        #[arg(long)]
        allow_partners: bool,
        /// Forbid drawing the same recipient as last round
        #[arg(long)]
        forbid_previous: bool,
    },
    /// Draw a matching and print every pair (spoils the surprise)
    Reveal {
        #[arg(long)]
        roster: String,
        #[arg(long)]
        allow_partners: bool,
        #[arg(long)]
        forbid_previous: bool,
        /// Emit JSON instead of `giver -> recipient` lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Check { roster } => check(roster),
        Action::Draw {
            roster,
            out,
            allow_partners,
            forbid_previous,
        } => draw(roster, out, allow_partners, forbid_previous, cmd.seed),
        Action::Reveal {
            roster,
            allow_partners,
            forbid_previous,
            json,
        } => reveal(roster, allow_partners, forbid_previous, json, cmd.seed),
    }
}

#[derive(serde::Serialize)]
struct RosterSummary<'a> {
    people: usize,
    partners: bool,
    previous: bool,
    names: &'a [String],
}

fn check(roster: String) -> Result<()> {
    let loaded = input::load_roster(&roster)?;
    tracing::info!(
        roster,
        people = loaded.len(),
        partners = loaded.has_partners(),
        previous = loaded.has_previous(),
        "roster ok"
    );
    let summary = RosterSummary {
        people: loaded.len(),
        partners: loaded.has_partners(),
        previous: loaded.has_previous(),
        names: loaded.names(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn draw(
    roster: String,
    out: String,
    allow_partners: bool,
    forbid_previous: bool,
    seed: Option<u64>,
) -> Result<()> {
    let (assignment, _seed) = draw_assignment(&roster, allow_partners, forbid_previous, seed)?;
    let dir = Path::new(&out);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {out}"))?;
    let notes = export::write_notes(dir, &assignment)?;
    tracing::info!(notes = notes.len(), out, "notes written");
    Ok(())
}

fn reveal(
    roster: String,
    allow_partners: bool,
    forbid_previous: bool,
    json: bool,
    seed: Option<u64>,
) -> Result<()> {
    let (assignment, seed) = draw_assignment(&roster, allow_partners, forbid_previous, seed)?;
    if json {
        let pairs: Vec<_> = assignment
            .reveal()
            .iter()
            .map(|pair| serde_json::json!({ "giver": pair.giver, "recipient": pair.recipient }))
            .collect();
        let doc = serde_json::json!({ "seed": seed, "pairs": pairs });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for pair in assignment.reveal() {
            println!("{} -> {}", pair.giver, pair.recipient);
        }
    }
    Ok(())
}

/// Load the roster, derive the exclusion flags and run the draw.
///
/// Partner exclusion follows the data: it is on whenever the roster has a
/// partner column and `--allow-partners` was not passed. A missing seed is
/// drawn fresh and logged, so any run can be replayed later.
fn draw_assignment(
    roster: &str,
    allow_partners: bool,
    forbid_previous: bool,
    seed: Option<u64>,
) -> Result<(Assignment, u64)> {
    let loaded = input::load_roster(roster)?;
    let cfg = AssignCfg {
        prohibit_partners: loaded.has_partners() && !allow_partners,
        prohibit_previous_recipients: forbid_previous,
    };
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(
        roster,
        people = loaded.len(),
        seed,
        prohibit_partners = cfg.prohibit_partners,
        prohibit_previous = cfg.prohibit_previous_recipients,
        "draw"
    );
    let assignment = loaded
        .assign(cfg, seed)
        .with_context(|| format!("drawing from roster {roster}"))?;
    tracing::info!(passes = assignment.passes(), "drawn");
    Ok((assignment, seed))
}
