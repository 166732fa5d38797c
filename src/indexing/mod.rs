//! The index tables giving every domain object a stable integer identity.

use crate::elections::{Ballot, Committee, Profile};
use crate::sat::Variable;
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// The read-only tables shared by the clause generators.
///
/// An index is built once, from the output of the
/// [`ElectionBuilder`](crate::elections::ElectionBuilder) and the feasible-committee
/// table of the [`AxiomChecker`](crate::axioms::AxiomChecker), and is immutable
/// afterwards. It maps every ballot, committee and canonical profile to its position in
/// its universe, derives the SAT variable of each (profile, committee) pair, and serves
/// the precomputed pairwise committee preferences of each ballot.
///
/// Lookups of objects that do not belong to the universes return an error: a missing
/// object at encoding time reveals an enumeration inconsistency and must abort the run.
pub struct ElectionIndex {
    ballots: Vec<Ballot>,
    committees: Vec<Committee>,
    ballot_ids: HashMap<Ballot, usize>,
    committee_ids: HashMap<Committee, usize>,
    profile_ids: HashMap<Vec<usize>, usize>,
    feasible: Vec<Vec<usize>>,
    preferences: Vec<bool>,
}

impl ElectionIndex {
    /// Builds the index from the three universes and the feasible-committee table.
    ///
    /// The position of each object in the provided lists becomes its identity;
    /// `feasible` must be indexed by profile position and hold committee positions.
    pub fn new(
        ballots: Vec<Ballot>,
        committees: Vec<Committee>,
        profiles: &[Profile],
        feasible: Vec<Vec<usize>>,
    ) -> Result<Self> {
        let ballot_ids = ballots
            .iter()
            .enumerate()
            .map(|(i, b)| (*b, i))
            .collect::<HashMap<Ballot, usize>>();
        let committee_ids = committees
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect::<HashMap<Committee, usize>>();
        let preferences = Self::compute_preferences(&ballots, &committees);
        let mut index = Self {
            ballots,
            committees,
            ballot_ids,
            committee_ids,
            profile_ids: HashMap::with_capacity(profiles.len()),
            feasible,
            preferences,
        };
        for (i, profile) in profiles.iter().enumerate() {
            let ids = index.canonical_ballot_ids(profile)?;
            index.profile_ids.insert(ids, i);
        }
        Ok(index)
    }

    /// The table stating, for each (ballot, committee, committee) triple, whether a voter
    /// holding the ballot strictly prefers the first committee to the second one, i.e.
    /// approves strictly more of its seats.
    fn compute_preferences(ballots: &[Ballot], committees: &[Committee]) -> Vec<bool> {
        let mut preferences = Vec::with_capacity(ballots.len() * committees.len().pow(2));
        for ballot in ballots {
            let scores = committees
                .iter()
                .map(|c| c.approval_score(ballot))
                .collect::<Vec<usize>>();
            for score1 in &scores {
                for score2 in &scores {
                    preferences.push(score1 > score2);
                }
            }
        }
        preferences
    }

    /// Returns the number of ballots in the universe.
    pub fn n_ballots(&self) -> usize {
        self.ballots.len()
    }

    /// Returns the number of committees in the universe.
    pub fn n_committees(&self) -> usize {
        self.committees.len()
    }

    /// Returns the number of canonical profiles in the universe.
    pub fn n_profiles(&self) -> usize {
        self.profile_ids.len()
    }

    /// Returns the committees of the universe, in index order.
    pub fn committees(&self) -> &[Committee] {
        &self.committees
    }

    /// Returns the position of the ballot in the ballot universe.
    pub fn ballot_id(&self, ballot: &Ballot) -> Result<usize> {
        self.ballot_ids
            .get(ballot)
            .copied()
            .ok_or_else(|| anyhow!("unknown ballot: {}", ballot))
    }

    /// Returns the position of the committee in the committee universe.
    pub fn committee_id(&self, committee: &Committee) -> Result<usize> {
        self.committee_ids
            .get(committee)
            .copied()
            .ok_or_else(|| anyhow!("unknown committee: {}", committee))
    }

    /// Returns the position of the profile in the profile universe.
    ///
    /// The profile is canonicalized first, so any ballot order is accepted.
    pub fn profile_id(&self, profile: &Profile) -> Result<usize> {
        let ids = self.canonical_ballot_ids(profile)?;
        self.profile_ids
            .get(&ids)
            .copied()
            .ok_or_else(|| anyhow!("unknown profile: {}", profile))
    }

    fn canonical_ballot_ids(&self, profile: &Profile) -> Result<Vec<usize>> {
        let mut ids = profile
            .ballots()
            .iter()
            .map(|b| self.ballot_id(b))
            .collect::<Result<Vec<usize>>>()?;
        ids.sort_unstable();
        Ok(ids)
    }

    /// Returns the canonical representative of the profile: its ballots sorted by ballot
    /// index.
    pub fn canonicalize(&self, profile: &Profile) -> Result<Profile> {
        let ids = self.canonical_ballot_ids(profile)?;
        Ok(Profile::new(
            ids.into_iter().map(|id| self.ballots[id]).collect(),
        ))
    }

    /// Checks whether the canonical representative of the profile belongs to the profile
    /// universe.
    ///
    /// Replacing the ballot of a single voter may leave the enumerated (possibly
    /// restricted) domain; such profiles are simply not part of the encoding.
    pub fn is_known(&self, profile: &Profile) -> bool {
        match self.canonical_ballot_ids(profile) {
            Ok(ids) => self.profile_ids.contains_key(&ids),
            Err(_) => false,
        }
    }

    pub(crate) fn profile_id_for_sorted_ballot_ids(&self, ids: &[usize]) -> Option<usize> {
        self.profile_ids.get(ids).copied()
    }

    /// Returns the SAT variable encoding the selection of the committee as the outcome of
    /// the profile.
    pub fn variable(&self, profile: &Profile, committee: &Committee) -> Result<Variable> {
        let profile_id = self.profile_id(profile)?;
        let committee_id = self.committee_id(committee)?;
        Ok(self.variable_for_ids(profile_id, committee_id))
    }

    /// Returns the SAT variable of a (profile, committee) pair given by positions.
    ///
    /// The mapping `n_committees * (1 + profile_id) + committee_id` is injective over the
    /// cross product of the two universes and its values start at `n_committees`, so every
    /// variable id is positive.
    pub fn variable_for_ids(&self, profile_id: usize, committee_id: usize) -> Variable {
        debug_assert!(profile_id < self.n_profiles());
        debug_assert!(committee_id < self.committees.len());
        Variable::from(self.committees.len() * (1 + profile_id) + committee_id)
    }

    /// Returns the (profile position, committee position) pair a variable encodes.
    ///
    /// This is the inverse of [`variable_for_ids`](Self::variable_for_ids).
    pub fn decode_variable(&self, variable: Variable) -> Result<(usize, usize)> {
        let v = usize::from(variable);
        let profile_id = (v / self.committees.len()).wrapping_sub(1);
        let committee_id = v % self.committees.len();
        if profile_id >= self.n_profiles() {
            return Err(anyhow!("variable {} encodes no (profile, committee) pair", v));
        }
        Ok((profile_id, committee_id))
    }

    /// Checks whether a voter holding the ballot strictly prefers the first committee to
    /// the second one. All arguments are positions in their respective universes.
    pub fn prefers(&self, ballot_id: usize, committee1_id: usize, committee2_id: usize) -> bool {
        let n = self.committees.len();
        self.preferences[ballot_id * n * n + committee1_id * n + committee2_id]
    }

    /// Returns the positions of the committees admissible for the profile at the given
    /// position.
    pub fn feasible_committee_ids(&self, profile_id: usize) -> &[usize] {
        &self.feasible[profile_id]
    }
}
