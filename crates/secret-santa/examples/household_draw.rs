//! Minimal end-to-end draw for a small household roster.
//!
//! Purpose
//! - Show the construct, draw, reveal flow without any file I/O.
//! - Make it easy to eyeball restart behavior: pass different seeds on the
//!   command line and compare the reported pass counts.
//!
//! Usage: `cargo run --example household_draw -- [seed]`

use secret_santa::{AssignCfg, Roster};

fn main() {
    let names = vec!["Adam", "Eve", "Jack", "Jill", "John"];
    let partners = vec!["Eve", "Adam", "Jill", "Jack", ""];
    let roster = Roster::new(
        names.into_iter().map(String::from).collect(),
        Some(partners.into_iter().map(String::from).collect()),
        None,
    )
    .expect("roster is valid");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2025);
    let assignment = roster
        .assign(AssignCfg::default(), seed)
        .expect("roster admits a matching");

    println!("seed={seed} passes={}", assignment.passes());
    for pair in assignment.reveal() {
        println!("{} -> {}", pair.giver, pair.recipient);
    }
}
