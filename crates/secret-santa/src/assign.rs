//! Randomized matching over a roster.
//!
//! Purpose
//! - Draw a bijection from givers to recipients in which nobody draws
//!   themselves, and the active exclusions (declared partner, last round's
//!   recipient) are honored.
//! - Greedy with full restart: walk the roster in order, pick uniformly
//!   among the eligible recipients still available, and abandon the whole
//!   pass on the first participant left without a candidate.
//!
//! Why this shape
//! - Dead ends are cheap to hit and cheap to retry; for household-sized
//!   rosters almost every pass succeeds, and a hard pass budget turns an
//!   over-constrained roster into an error instead of a spin.
//! - Replays are part of the contract: the pick sequence is a pure function
//!   of the roster, the flags and the entropy stream, so a seeded draw can
//!   be reproduced exactly.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::roster::Roster;

/// Pass budget for the retry loop. One more pass than this is attempted
/// before the draw is declared unsatisfiable.
pub const MAX_PASSES: u32 = 100;

/// Exclusion flags for a draw.
#[derive(Clone, Copy, Debug)]
pub struct AssignCfg {
    /// Nobody draws their declared partner.
    pub prohibit_partners: bool,
    /// Nobody draws the recipient they drew last round.
    pub prohibit_previous_recipients: bool,
}

impl Default for AssignCfg {
    fn default() -> Self {
        Self {
            prohibit_partners: true,
            prohibit_previous_recipients: false,
        }
    }
}

/// Failures raised by [`Roster::assign`].
#[derive(Debug)]
pub enum AssignError {
    /// Partner exclusion requested, but the roster has no partner column.
    MissingPartners,
    /// History exclusion requested, but the roster has no previous-recipient
    /// column.
    MissingPrevious,
    /// Every pass dead-ended within the pass budget.
    NoSolution { passes: u32 },
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPartners => write!(
                f,
                "partner exclusion requested, but the roster has no partner column"
            ),
            Self::MissingPrevious => write!(
                f,
                "previous-recipient exclusion requested, but the roster has no history"
            ),
            Self::NoSolution { passes } => write!(
                f,
                "no valid matching found in {passes} passes; the exclusions may admit no solution"
            ),
        }
    }
}

impl std::error::Error for AssignError {}

/// One giver/recipient pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    pub giver: String,
    pub recipient: String,
}

/// A drawn matching, one pair per participant in roster order.
///
/// The pairs are not reachable through fields or `Debug`; disclosure goes
/// through [`Assignment::reveal`] so it always happens on purpose.
#[derive(Clone)]
pub struct Assignment {
    pairs: Vec<Pair>,
    passes: u32,
}

impl Assignment {
    /// Number of pairings; equals the roster size.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Passes the draw needed, counting the successful one.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Disclose the pairings, in roster order.
    pub fn reveal(&self) -> &[Pair] {
        &self.pairs
    }
}

impl fmt::Debug for Assignment {
    // Keeps the drawn recipients out of logs and panic messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("people", &self.pairs.len())
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl Roster {
    /// Draw a matching with a [`StdRng`] seeded from `seed`, so the result
    /// can be replayed from the seed alone.
    pub fn assign(&self, cfg: AssignCfg, seed: u64) -> Result<Assignment, AssignError> {
        self.assign_with(cfg, &mut StdRng::seed_from_u64(seed))
    }

    /// Draw a matching using the caller's generator.
    ///
    /// An empty roster yields an empty assignment. A roster whose exclusions
    /// admit no matching (or starve the greedy loop) fails with
    /// [`AssignError::NoSolution`] once the pass budget runs out.
    pub fn assign_with<R: Rng>(
        &self,
        cfg: AssignCfg,
        rng: &mut R,
    ) -> Result<Assignment, AssignError> {
        if cfg.prohibit_partners && !self.has_partners() {
            return Err(AssignError::MissingPartners);
        }
        if cfg.prohibit_previous_recipients && !self.has_previous() {
            return Err(AssignError::MissingPrevious);
        }
        let mut passes = 0;
        loop {
            passes += 1;
            if let Some(recipients) = self.one_pass(cfg, rng) {
                let pairs = self
                    .names
                    .iter()
                    .zip(recipients)
                    .map(|(giver, r)| Pair {
                        giver: giver.clone(),
                        recipient: self.names[r].clone(),
                    })
                    .collect();
                return Ok(Assignment { pairs, passes });
            }
            if passes > MAX_PASSES {
                return Err(AssignError::NoSolution { passes });
            }
        }
    }

    /// One greedy pass over the whole roster; `None` on the first dead end.
    fn one_pass<R: Rng>(&self, cfg: AssignCfg, rng: &mut R) -> Option<Vec<usize>> {
        let n = self.names.len();
        let mut available: Vec<usize> = (0..n).collect();
        let mut recipients = Vec::with_capacity(n);
        for giver in 0..n {
            let candidates: Vec<usize> = (0..available.len())
                .filter(|&slot| !self.excludes(cfg, giver, available[slot]))
                .collect();
            if candidates.is_empty() {
                return None;
            }
            let slot = candidates[rng.gen_range(0..candidates.len())];
            recipients.push(available.remove(slot));
        }
        Some(recipients)
    }

    fn excludes(&self, cfg: AssignCfg, giver: usize, recipient: usize) -> bool {
        if recipient == giver {
            return true;
        }
        if cfg.prohibit_partners && self.partner_of(giver) == Some(recipient) {
            return true;
        }
        cfg.prohibit_previous_recipients && self.previous_of(giver) == Some(recipient)
    }
}
