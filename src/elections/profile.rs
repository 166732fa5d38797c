use super::Ballot;
use std::fmt::Display;

/// A preference profile: the sequence of the ballots cast by the voters.
///
/// Voting rules built by this crate are anonymous, so two profiles made of the same
/// ballots in different orders describe the same electorate. The canonical representative
/// of a profile (its ballots sorted by ballot index) is computed by
/// [`ElectionIndex::canonicalize`](crate::indexing::ElectionIndex::canonicalize);
/// profiles enumerated by
/// [`ElectionBuilder::approval_profiles`](crate::elections::ElectionBuilder::approval_profiles)
/// are canonical by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile(Vec<Ballot>);

impl Profile {
    /// Builds a profile from the ballots of the voters.
    pub fn new(ballots: Vec<Ballot>) -> Self {
        Self(ballots)
    }

    /// Returns the ballots of the voters.
    pub fn ballots(&self) -> &[Ballot] {
        &self.0
    }

    /// Returns the number of voters.
    pub fn n_voters(&self) -> usize {
        self.0.len()
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str_ballots = self.0.iter().map(|b| b.to_string()).collect::<Vec<String>>();
        write!(f, "[{}]", str_ballots.join(","))
    }
}
