use crate::elections::Party;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// The hand-tuned constants of a symmetry-breaking clause: a profile (given by the
/// parties of its ballots) and the committees it may elect.
pub(crate) struct SymmetryBreakingEntry {
    pub(crate) profile: &'static [&'static [Party]],
    pub(crate) committees: &'static [&'static [Party]],
}

lazy_static! {
    /// The known symmetry-breaking clauses, keyed by (committee size, parties, voters).
    ///
    /// The constants encode facts which only hold for the parameter set they are keyed
    /// by; generalizing them is not possible without a dedicated proof, so requesting
    /// symmetry breaking for any other parameter set is rejected at configuration time.
    static ref SYMMETRY_BREAKING_TABLE: HashMap<(usize, usize, usize), SymmetryBreakingEntry> = {
        let mut table = HashMap::new();
        table.insert(
            (3, 4, 6),
            SymmetryBreakingEntry {
                profile: &[&[0], &[0, 1], &[1], &[2], &[2, 3], &[3]],
                committees: &[&[0, 0, 2], &[0, 1, 2]],
            },
        );
        table
    };
}

pub(crate) fn entry_for(
    committee_size: usize,
    n_parties: usize,
    n_voters: usize,
) -> Option<&'static SymmetryBreakingEntry> {
    SYMMETRY_BREAKING_TABLE.get(&(committee_size, n_parties, n_voters))
}

/// Checks whether a symmetry-breaking clause is known for the given parameters.
pub fn has_symmetry_breaking_clause(
    committee_size: usize,
    n_parties: usize,
    n_voters: usize,
) -> bool {
    entry_for(committee_size, n_parties, n_voters).is_some()
}
