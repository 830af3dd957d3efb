//! Secret-santa draws over a validated roster.
//!
//! Purpose
//! - Validate a gift-exchange roster once, at construction: unique names plus
//!   optional partner and previous-recipient columns aligned by position.
//! - Draw a self-avoiding bijection from givers to recipients with a
//!   randomized greedy pass that restarts on dead ends, so a fixed seed
//!   replays the exact same matching.
//!
//! The drawn pairs sit behind [`Assignment::reveal`]: printing or logging an
//! [`Assignment`] shows counts only, and disclosure is an explicit call.

pub mod assign;
pub mod roster;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use assign::{AssignCfg, AssignError, Assignment, MAX_PASSES, Pair};
pub use roster::{Roster, RosterError};
