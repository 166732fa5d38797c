//! The axiom filters deciding which committees remain admissible for each profile.

use crate::elections::{Ballot, Committee, Party, Profile};
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// The algorithm used to enforce weak representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakRepresentationMode {
    /// Requires every deserving party to be a committee member.
    Naive,
    /// Requires, for every ballot of the profile, a minimal number of approved committee
    /// members derived from the nested-ballot structure of the profile.
    Refined,
}

impl TryFrom<&str> for WeakRepresentationMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "naive" => Ok(WeakRepresentationMode::Naive),
            "refined" => Ok(WeakRepresentationMode::Refined),
            _ => Err(anyhow!(r#"undefined weak representation mode "{}""#, value)),
        }
    }
}

/// Decides, profile by profile, which committees are admissible outcomes under the
/// configured axioms.
///
/// Weak representation is always enforced (in one of the two [`WeakRepresentationMode`]
/// variants); Pareto-optimality is enforced on demand. A profile for which no committee
/// survives the filters is a legal degenerate outcome: it is kept with an empty
/// admissible set, which later turns into an always-false clause of the formula.
pub struct AxiomChecker {
    committee_size: usize,
    n_parties: usize,
    n_voters: usize,
    pareto_optimality: bool,
    weak_representation: WeakRepresentationMode,
}

impl AxiomChecker {
    /// Builds a checker for the given election parameters and axiom set.
    pub fn new(
        committee_size: usize,
        n_parties: usize,
        n_voters: usize,
        pareto_optimality: bool,
        weak_representation: WeakRepresentationMode,
    ) -> Self {
        Self {
            committee_size,
            n_parties,
            n_voters,
            pareto_optimality,
            weak_representation,
        }
    }

    /// Computes the feasible-committee table.
    ///
    /// Entry `i` of the result holds the positions (in `committees`) of the committees
    /// admissible for `profiles[i]`, in increasing order.
    pub fn feasible_committees(
        &self,
        profiles: &[Profile],
        committees: &[Committee],
    ) -> Vec<Vec<usize>> {
        profiles
            .iter()
            .map(|profile| {
                let candidates = (0..committees.len()).collect::<Vec<usize>>();
                let candidates = match self.weak_representation {
                    WeakRepresentationMode::Naive => {
                        self.filter_weak_representation_naive(profile, committees, candidates)
                    }
                    WeakRepresentationMode::Refined => {
                        self.filter_weak_representation_refined(profile, committees, candidates)
                    }
                };
                if self.pareto_optimality {
                    self.filter_pareto_optimality(profile, committees, candidates)
                } else {
                    candidates
                }
            })
            .collect()
    }

    /// Computes, for each party, the number of voters whose ballot approves exactly that
    /// party.
    pub fn unique_approval_scores(&self, profile: &Profile) -> Vec<usize> {
        (0..self.n_parties)
            .map(|party: Party| {
                profile
                    .ballots()
                    .iter()
                    .filter(|b| b.is_singleton_of(party))
                    .count()
            })
            .collect()
    }

    /// The parties whose unique approval score reaches the Hare quota `n / k`, as a
    /// bitmask. The quota comparison is a real-number comparison, with no rounding.
    fn deserving_parties_mask(&self, profile: &Profile) -> u32 {
        let quota = self.n_voters as f64 / self.committee_size as f64;
        self.unique_approval_scores(profile)
            .iter()
            .enumerate()
            .filter(|(_, score)| **score as f64 >= quota)
            .fold(0u32, |mask, (party, _)| mask | 1 << party)
    }

    fn filter_weak_representation_naive(
        &self,
        profile: &Profile,
        committees: &[Committee],
        mut candidates: Vec<usize>,
    ) -> Vec<usize> {
        let deserving = self.deserving_parties_mask(profile);
        candidates.retain(|c| deserving & !committees[*c].party_mask() == 0);
        candidates
    }

    fn filter_weak_representation_refined(
        &self,
        profile: &Profile,
        committees: &[Committee],
        mut candidates: Vec<usize>,
    ) -> Vec<usize> {
        let deserving = self.deserving_parties_mask(profile);
        let mut required: HashMap<Ballot, usize> = HashMap::new();
        for ballot in profile.ballots() {
            let requirement = usize::from(ballot.n_approved() == 1 && ballot.mask() & deserving != 0);
            required.entry(*ballot).or_insert(requirement);
        }
        // Voters covered by deserving parties alone cannot extend a chain.
        let mut reduced = profile
            .ballots()
            .iter()
            .filter(|b| b.mask() & !deserving != 0)
            .copied()
            .collect::<Vec<Ballot>>();
        reduced.reverse();
        let chain_len = (self.n_voters + self.committee_size - 1) / self.committee_size - 1;
        for i in 0..reduced.len() {
            if Self::contains_subset_chain(&reduced, &reduced[i], i + 1, chain_len) {
                let n_deserving_approved = (reduced[i].mask() & deserving).count_ones() as usize;
                required.insert(reduced[i], n_deserving_approved + 1);
            }
        }
        candidates.retain(|c| {
            profile
                .ballots()
                .iter()
                .all(|b| committees[*c].approval_score(b) >= required[b])
        });
        candidates
    }

    /// Searches for `len` ballots at positions `start..`, each one a subset of the
    /// previous one (the first being a subset of `head`).
    ///
    /// The ballots being sorted in non-increasing mask order, candidate chain extensions
    /// for a ballot always lie at later positions.
    fn contains_subset_chain(ballots: &[Ballot], head: &Ballot, start: usize, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        for i in start..ballots.len() {
            if ballots[i].is_subset_of(head)
                && Self::contains_subset_chain(ballots, &ballots[i], i + 1, len - 1)
            {
                return true;
            }
        }
        false
    }

    /// Checks whether `party1` Pareto-dominates `party2`: every voter approving `party2`
    /// also approves `party1`, and at least one voter approves `party1` but not `party2`.
    fn pareto_dominates(&self, party1: Party, party2: Party, profile: &Profile) -> bool {
        let mut strict_preference = false;
        for ballot in profile.ballots() {
            if ballot.approves(party2) && !ballot.approves(party1) {
                return false;
            }
            if ballot.approves(party1) && !ballot.approves(party2) {
                strict_preference = true;
            }
        }
        strict_preference
    }

    fn filter_pareto_optimality(
        &self,
        profile: &Profile,
        committees: &[Committee],
        mut candidates: Vec<usize>,
    ) -> Vec<usize> {
        let mut dominated = 0u32;
        for party1 in 0..self.n_parties {
            for party2 in 0..self.n_parties {
                if self.pareto_dominates(party1, party2, profile) {
                    dominated |= 1 << party2;
                }
            }
        }
        candidates.retain(|c| committees[*c].party_mask() & dominated == 0);
        candidates
    }
}
