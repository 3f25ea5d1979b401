mod config;
pub mod manual;
use log::{debug, info, warn};

use std::{
    iter::Enumerate,
    ops::AddAssign,
    slice,
};

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
struct VoteCount(u64);

impl VoteCount {
    const EMPTY: VoteCount = VoteCount(0);
    const ONE: VoteCount = VoteCount(1);
}

impl std::iter::Sum for VoteCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteCount(iter.map(|vc| vc.0).sum())
    }
}

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct CandidateSlot {
    name: String,
    votes: VoteCount,
}

/// The ordered, bounded collection of candidates.
///
/// The position of a candidate is its identity: names may repeat, and the
/// 1-based index shown by [`Registry::list_candidates`] is the one expected
/// by [`Registry::cast_vote`]. Indices only change on [`Registry::reset_election`].
///
/// ```
/// use vote_registry::{Registry, RegistryRules};
/// # use vote_registry::RegistryError;
///
/// let mut registry = Registry::new(&RegistryRules::DEFAULT_RULES);
/// registry.add_candidate("Alice")?;
/// registry.add_candidate("Bob\n")?;
/// registry.cast_vote(1)?;
///
/// let report = registry.compute_results()?;
/// assert_eq!(report.total, 1);
/// assert_eq!(report.winners[0].name, "Alice");
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Registry {
    rules: RegistryRules,
    candidates: Vec<CandidateSlot>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(&RegistryRules::DEFAULT_RULES)
    }
}

impl Registry {
    pub fn new(rules: &RegistryRules) -> Registry {
        // The capacity is only a limit, storage grows with the registrations.
        let reserved = rules.capacity.min(RegistryRules::DEFAULT_RULES.capacity);
        Registry {
            rules: *rules,
            candidates: Vec::with_capacity(reserved),
        }
    }

    pub fn rules(&self) -> &RegistryRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.rules.capacity
    }

    /// Registers a new candidate with no votes and returns its 1-based index.
    ///
    /// A single trailing line terminator is removed from `name`; nothing else
    /// is trimmed. Names over the length bound are truncated.
    pub fn add_candidate(&mut self, name: &str) -> Result<usize, RegistryError> {
        if self.is_full() {
            debug!(
                "add_candidate: registry full ({} candidates)",
                self.rules.capacity
            );
            return Err(RegistryError::RegistryFull {
                capacity: self.rules.capacity,
            });
        }
        let stripped = strip_line_terminator(name);
        if stripped.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let name = truncate_name(stripped, self.rules.max_name_length);
        self.candidates.push(CandidateSlot {
            name,
            votes: VoteCount::EMPTY,
        });
        let index = self.candidates.len();
        info!("Candidate {}: {:?} registered", index, stripped);
        Ok(index)
    }

    /// The candidates in registration order, or `NoCandidates`.
    pub fn list_candidates(&self) -> Result<Listing<'_>, RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::NoCandidates);
        }
        debug!("list_candidates: {} candidates", self.len());
        Ok(Listing {
            inner: self.candidates.iter().enumerate(),
        })
    }

    /// The candidate at the 1-based `index`, if any.
    pub fn candidate(&self, index: usize) -> Option<CandidateEntry<'_>> {
        let slot = self.candidates.get(index.checked_sub(1)?)?;
        Some(CandidateEntry {
            index,
            name: slot.name.as_str(),
            votes: slot.votes.0,
        })
    }

    /// Records one vote for the candidate at the 1-based position `choice`.
    ///
    /// 0 cancels the vote. Anything else outside `[1, len]` is rejected
    /// without touching any counter.
    pub fn cast_vote(&mut self, choice: i64) -> Result<VoteOutcome, RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::NoCandidates);
        }
        if choice == 0 {
            debug!("cast_vote: cancelled");
            return Ok(VoteOutcome::Cancelled);
        }
        let count = self.len();
        let slot = usize::try_from(choice)
            .ok()
            .and_then(|idx| self.candidates.get_mut(idx.wrapping_sub(1)))
            .ok_or(RegistryError::InvalidCandidate { choice, count })?;
        slot.votes += VoteCount::ONE;
        info!(
            "Vote cast for {}: {:?} (now {} votes)",
            choice, slot.name, slot.votes.0
        );
        Ok(VoteOutcome::Cast {
            index: choice as usize,
            name: slot.name.clone(),
        })
    }

    /// Computes the tally, the share of every candidate and the winners.
    pub fn compute_results(&self) -> Result<ResultsReport, RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::NoCandidates);
        }
        let total: VoteCount = self.candidates.iter().map(|c| c.votes).sum();
        let max_votes: VoteCount = self
            .candidates
            .iter()
            .map(|c| c.votes)
            .max()
            .unwrap_or(VoteCount::EMPTY);
        debug!(
            "compute_results: total: {:?} max_votes: {:?}",
            total, max_votes
        );

        let results: Vec<CandidateResult> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| CandidateResult {
                index: idx + 1,
                name: c.name.clone(),
                votes: c.votes.0,
                percentage: percentage(c.votes, total),
            })
            .collect();

        // With no vote at all, max_votes is 0 and everybody ties.
        let winners: Vec<CandidateResult> = results
            .iter()
            .filter(|r| r.votes == max_votes.0)
            .cloned()
            .collect();

        Ok(ResultsReport {
            total: total.0,
            max_votes: max_votes.0,
            results,
            winners,
        })
    }

    /// Removes every candidate and vote.
    pub fn reset_election(&mut self) {
        info!(
            "Election reset: dropping {} candidates",
            self.candidates.len()
        );
        self.candidates.clear();
    }
}

/// Lazy view over the registered candidates, see [`Registry::list_candidates`].
pub struct Listing<'a> {
    inner: Enumerate<slice::Iter<'a, CandidateSlot>>,
}

impl<'a> Iterator for Listing<'a> {
    type Item = CandidateEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(idx, c)| CandidateEntry {
            index: idx + 1,
            name: c.name.as_str(),
            votes: c.votes.0,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Listing<'a> {}

fn strip_line_terminator(s: &str) -> &str {
    match s.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => s,
    }
}

fn truncate_name(name: &str, max_len: usize) -> String {
    match name.char_indices().nth(max_len) {
        Some((cut, _)) => {
            warn!(
                "Candidate name truncated to {} characters: {:?}",
                max_len, name
            );
            name[..cut].to_string()
        }
        None => name.to_string(),
    }
}

fn percentage(votes: VoteCount, total: VoteCount) -> f64 {
    if total == VoteCount::EMPTY {
        0.0
    } else {
        votes.0 as f64 * 100.0 / total.0 as f64
    }
}
