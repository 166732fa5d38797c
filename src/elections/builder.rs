use super::{Ballot, Committee, Party, Profile};
use itertools::Itertools;

/// Heuristic bounds keeping the restricted profile domain tractable: a profile is kept
/// iff no party has an approval score above `MAX_PARTY_APPROVAL_SCORE` and the approval
/// scores of all parties sum up to at most `MAX_TOTAL_APPROVAL_SCORE`.
const MAX_PARTY_APPROVAL_SCORE: usize = 4;
const MAX_TOTAL_APPROVAL_SCORE: usize = 11;

/// Enumerates the ballot, committee and profile universes of an election.
///
/// The three universes are produced in a fixed deterministic order; the position of an
/// object in its universe is its identity for the rest of the encoding pipeline (see
/// [`ElectionIndex`](crate::indexing::ElectionIndex)).
pub struct ElectionBuilder {
    committee_size: usize,
    n_parties: usize,
    n_voters: usize,
    all_profiles: bool,
}

impl ElectionBuilder {
    /// Builds an enumerator for elections with committees of `committee_size` seats,
    /// `n_parties` parties and `n_voters` voters.
    ///
    /// If `all_profiles` is `false`, the all-parties ballot is dropped from the ballot
    /// universe and the profile universe is restricted to the profiles with low approval
    /// scores; if it is `true`, the full domain is enumerated.
    pub fn new(
        committee_size: usize,
        n_parties: usize,
        n_voters: usize,
        all_profiles: bool,
    ) -> Self {
        Self {
            committee_size,
            n_parties,
            n_voters,
            all_profiles,
        }
    }

    /// Enumerates the ballot universe: every non-empty set of parties, in binary counter
    /// order over the party bitmasks.
    pub fn approval_ballots(&self) -> Vec<Ballot> {
        let mut ballots = (1..1u32 << self.n_parties)
            .map(Ballot::from_mask)
            .collect::<Vec<Ballot>>();
        if !self.all_profiles {
            ballots.pop();
        }
        ballots
    }

    /// Enumerates the committee universe: every multiset of `committee_size` parties, in
    /// lexicographic order of their non-decreasing seat sequences.
    pub fn all_committees(&self) -> Vec<Committee> {
        (0..self.n_parties)
            .combinations_with_replacement(self.committee_size)
            .map(Committee::new)
            .collect()
    }

    /// Enumerates the profile universe: every non-decreasing sequence of `n_voters`
    /// ballot indices, mapped back to ballots.
    ///
    /// The produced profiles are thus exactly the canonical representatives of the
    /// anonymous profiles over the ballot universe. When the restricted domain is
    /// selected, the profiles with a party approval score above 4 or a total approval
    /// score above 11 are dropped.
    pub fn approval_profiles(&self, ballots: &[Ballot]) -> Vec<Profile> {
        let profiles = ballots
            .iter()
            .copied()
            .combinations_with_replacement(self.n_voters)
            .map(Profile::new);
        if self.all_profiles {
            profiles.collect()
        } else {
            profiles.filter(|p| self.has_low_approval_scores(p)).collect()
        }
    }

    fn approval_scores(&self, profile: &Profile) -> Vec<usize> {
        (0..self.n_parties)
            .map(|party: Party| {
                profile
                    .ballots()
                    .iter()
                    .filter(|b| b.approves(party))
                    .count()
            })
            .collect()
    }

    fn has_low_approval_scores(&self, profile: &Profile) -> bool {
        let scores = self.approval_scores(profile);
        scores.iter().max().copied().unwrap_or_default() <= MAX_PARTY_APPROVAL_SCORE
            && scores.iter().sum::<usize>() <= MAX_TOTAL_APPROVAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ballots_full_domain() {
        let builder = ElectionBuilder::new(1, 3, 1, true);
        let ballots = builder.approval_ballots();
        assert_eq!(7, ballots.len());
        assert_eq!(Ballot::singleton(0), ballots[0]);
        assert_eq!(Ballot::from_parties(&[0, 1, 2]).unwrap(), ballots[6]);
    }

    #[test]
    fn test_ballots_restricted_domain_drop_full_approval() {
        let builder = ElectionBuilder::new(1, 3, 1, false);
        let ballots = builder.approval_ballots();
        assert_eq!(6, ballots.len());
        assert_eq!(Ballot::from_parties(&[1, 2]).unwrap(), ballots[5]);
    }

    #[test]
    fn test_committees() {
        let builder = ElectionBuilder::new(3, 4, 6, true);
        let committees = builder.all_committees();
        assert_eq!(20, committees.len());
        assert_eq!(&[0, 0, 0], committees[0].members());
        assert_eq!(&[3, 3, 3], committees[19].members());
        for c in &committees {
            assert_eq!(3, c.size());
            assert!(c.members().iter().all(|p| *p < 4));
            assert!(c.members().windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_profiles_full_domain() {
        let builder = ElectionBuilder::new(1, 2, 2, true);
        let ballots = builder.approval_ballots();
        let profiles = builder.approval_profiles(&ballots);
        assert_eq!(6, profiles.len());
        for p in &profiles {
            assert_eq!(2, p.n_voters());
            assert!(p.ballots().windows(2).all(|w| w[0].mask() <= w[1].mask()));
        }
        assert_eq!(
            Profile::new(vec![Ballot::singleton(0), Ballot::singleton(0)]),
            profiles[0]
        );
    }

    #[test]
    fn test_profiles_restricted_domain() {
        let builder = ElectionBuilder::new(3, 4, 6, false);
        let ballots = builder.approval_ballots();
        let profiles = builder.approval_profiles(&ballots);
        for p in &profiles {
            let scores = builder.approval_scores(p);
            assert!(scores.iter().all(|s| *s <= MAX_PARTY_APPROVAL_SCORE));
            assert!(scores.iter().sum::<usize>() <= MAX_TOTAL_APPROVAL_SCORE);
        }
        let unanimous_high_score = Profile::new(vec![Ballot::singleton(0); 6]);
        assert!(!profiles.contains(&unanimous_high_score));
    }

    #[test]
    fn test_profile_ballots_belong_to_the_universe() {
        let builder = ElectionBuilder::new(2, 3, 2, false);
        let ballots = builder.approval_ballots();
        for p in builder.approval_profiles(&ballots) {
            assert!(p.ballots().iter().all(|b| ballots.contains(b)));
        }
    }
}
