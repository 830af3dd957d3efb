//! Roster construction and validation.
//!
//! Purpose
//! - Hold the participant list plus the optional partner and
//!   previous-recipient columns, all validated up front.
//! - Resolve partner and history names to participant indices once, so the
//!   matching loop in [`crate::assign`] works on integers only.
//!
//! The two optional columns are positional: entry `i` belongs to participant
//! `i`, and an empty string marks "none" in either column. Previous
//! recipients are checked against the declared partner values, not against
//! the participant list, so a roster can only carry history for people who
//! appear somewhere in the partner column.

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Validation failures raised by [`Roster::new`].
#[derive(Debug)]
pub enum RosterError {
    /// The same name appears twice in the participant list.
    DuplicateName { name: String },
    /// The partner column has a different length than the participant list.
    PartnerLengthMismatch { names: usize, partners: usize },
    /// The same partner is declared for two participants.
    DuplicatePartner { name: String },
    /// A non-empty partner entry names someone outside the roster.
    UnknownPartner { name: String },
    /// The previous-recipient column has a different length than the
    /// participant list.
    PreviousLengthMismatch { names: usize, previous: usize },
    /// The same previous recipient (or the empty marker) appears twice.
    DuplicatePreviousRecipient { name: String },
    /// A previous recipient does not appear among the declared partners.
    UnknownPreviousRecipient { name: String },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "participant `{name}` is listed more than once")
            }
            Self::PartnerLengthMismatch { names, partners } => write!(
                f,
                "partner column has {partners} entries for {names} participants"
            ),
            Self::DuplicatePartner { name } => {
                write!(f, "partner `{name}` is declared for more than one participant")
            }
            Self::UnknownPartner { name } => {
                write!(f, "partner `{name}` is not in the participant list")
            }
            Self::PreviousLengthMismatch { names, previous } => write!(
                f,
                "previous-recipient column has {previous} entries for {names} participants"
            ),
            Self::DuplicatePreviousRecipient { name } => {
                write!(f, "previous recipient `{name}` is listed more than once")
            }
            Self::UnknownPreviousRecipient { name } => write!(
                f,
                "previous recipient `{name}` does not appear in the partner column"
            ),
        }
    }
}

impl std::error::Error for RosterError {}

/// One optional participant index per roster entry.
type Resolved = Vec<Option<usize>>;

/// A validated gift-exchange roster.
///
/// Invariants (checked in [`Roster::new`]):
/// - participant names are unique;
/// - each optional column, when present, has one entry per participant;
/// - non-empty partners are distinct roster members, each claimed once;
/// - previous recipients are distinct (empty markers included) and drawn
///   from the declared partner values.
#[derive(Clone, Debug)]
pub struct Roster {
    pub(crate) names: Vec<String>,
    /// Partner of participant `i`, as an index into `names`.
    pub(crate) partners: Option<Resolved>,
    /// Recipient participant `i` drew last round, as an index into `names`.
    pub(crate) previous: Option<Resolved>,
}

impl Roster {
    /// Build a roster from raw columns, validating everything up front.
    ///
    /// Empty strings in the optional columns mean "no partner" / "no
    /// history" for that participant.
    pub fn new(
        names: Vec<String>,
        partners: Option<Vec<String>>,
        previous: Option<Vec<String>>,
    ) -> Result<Self, RosterError> {
        let (partners, previous) =
            Self::validate(&names, partners.as_deref(), previous.as_deref())?;
        Ok(Self {
            names,
            partners,
            previous,
        })
    }

    fn validate(
        names: &[String],
        partners: Option<&[String]>,
        previous: Option<&[String]>,
    ) -> Result<(Option<Resolved>, Option<Resolved>), RosterError> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.as_str(), i).is_some() {
                return Err(RosterError::DuplicateName { name: name.clone() });
            }
        }
        let partner_idx = partners
            .map(|column| resolve_partners(names.len(), &index, column))
            .transpose()?;
        let previous_idx = previous
            .map(|column| resolve_previous(names.len(), &index, column, partners))
            .transpose()?;
        Ok((partner_idx, previous_idx))
    }

    /// Participant names, in roster order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the roster was built with a partner column.
    pub fn has_partners(&self) -> bool {
        self.partners.is_some()
    }

    /// Whether the roster was built with a previous-recipient column.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub(crate) fn partner_of(&self, giver: usize) -> Option<usize> {
        self.partners.as_ref().and_then(|column| column[giver])
    }

    pub(crate) fn previous_of(&self, giver: usize) -> Option<usize> {
        self.previous.as_ref().and_then(|column| column[giver])
    }
}

fn resolve_partners(
    names: usize,
    index: &HashMap<&str, usize>,
    column: &[String],
) -> Result<Resolved, RosterError> {
    if column.len() != names {
        return Err(RosterError::PartnerLengthMismatch {
            names,
            partners: column.len(),
        });
    }
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(column.len());
    for entry in column {
        if entry.is_empty() {
            resolved.push(None);
            continue;
        }
        if !seen.insert(entry.as_str()) {
            return Err(RosterError::DuplicatePartner {
                name: entry.clone(),
            });
        }
        match index.get(entry.as_str()) {
            Some(&i) => resolved.push(Some(i)),
            None => {
                return Err(RosterError::UnknownPartner {
                    name: entry.clone(),
                })
            }
        }
    }
    Ok(resolved)
}

fn resolve_previous(
    names: usize,
    index: &HashMap<&str, usize>,
    column: &[String],
    partners: Option<&[String]>,
) -> Result<Resolved, RosterError> {
    if column.len() != names {
        return Err(RosterError::PreviousLengthMismatch {
            names,
            previous: column.len(),
        });
    }
    // Previous recipients must come from the partner column as written,
    // empty markers included. Without a partner column nothing qualifies.
    let declared: HashSet<&str> = partners
        .unwrap_or(&[])
        .iter()
        .map(String::as_str)
        .collect();
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(column.len());
    for entry in column {
        if !seen.insert(entry.as_str()) {
            return Err(RosterError::DuplicatePreviousRecipient {
                name: entry.clone(),
            });
        }
        if !declared.contains(entry.as_str()) {
            return Err(RosterError::UnknownPreviousRecipient {
                name: entry.clone(),
            });
        }
        if entry.is_empty() {
            resolved.push(None);
        } else {
            resolved.push(index.get(entry.as_str()).copied());
        }
    }
    Ok(resolved)
}
