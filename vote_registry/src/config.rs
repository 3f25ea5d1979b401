// ********* Configuration **********

use std::error::Error;
use std::fmt::Display;

/// The limits that govern a registry.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RegistryRules {
    /// Maximum number of candidates. Adding past it is rejected, the
    /// registry never grows beyond this bound.
    pub capacity: usize,
    /// Names longer than this (in characters) are silently truncated.
    pub max_name_length: usize,
}

impl RegistryRules {
    pub const DEFAULT_RULES: RegistryRules = RegistryRules {
        capacity: 10,
        max_name_length: 63,
    };
}

impl Default for RegistryRules {
    fn default() -> Self {
        RegistryRules::DEFAULT_RULES
    }
}

// ******** Output data structures *********

/// One row of a listing: 1-based index, name and current votes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateEntry<'a> {
    pub index: usize,
    pub name: &'a str,
    pub votes: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VoteOutcome {
    /// The vote was recorded for the candidate at this 1-based index.
    Cast { index: usize, name: String },
    /// The voter chose 0. Nothing changed.
    Cancelled,
}

/// Tally for one candidate.
#[derive(PartialEq, Debug, Clone)]
pub struct CandidateResult {
    pub index: usize,
    pub name: String,
    pub votes: u64,
    /// Share of the total in percent, not rounded.
    /// 0.0 when no votes have been cast.
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ResultsReport {
    pub total: u64,
    pub max_votes: u64,
    /// All the candidates, in registration order.
    pub results: Vec<CandidateResult>,
    /// Every candidate holding `max_votes`, in registration order.
    /// Ties are all reported, never broken.
    pub winners: Vec<CandidateResult>,
}

impl ResultsReport {
    /// When nothing has been cast, every candidate is a (trivial) winner.
    pub fn no_votes_cast(&self) -> bool {
        self.total == 0
    }
}

/// Recoverable failures of the registry operations.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RegistryError {
    RegistryFull { capacity: usize },
    EmptyName,
    NoCandidates,
    InvalidCandidate { choice: i64, count: usize },
}

impl Error for RegistryError {}

impl Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::RegistryFull { capacity } => {
                write!(f, "Maximum number of candidates reached ({}).", capacity)
            }
            RegistryError::EmptyName => write!(f, "Name cannot be empty."),
            RegistryError::NoCandidates => write!(f, "No candidates registered."),
            RegistryError::InvalidCandidate { .. } => write!(f, "Invalid candidate number."),
        }
    }
}
