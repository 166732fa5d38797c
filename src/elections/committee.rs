use super::{Ballot, Party};
use std::fmt::Display;

/// A committee: a multiset of parties, one per seat.
///
/// A party may hold several seats. Committees are stored as a non-decreasing sequence of
/// party ids; the constructor sorts its input, making two committees equal iff they
/// assign the same number of seats to every party.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Committee(Vec<Party>);

impl Committee {
    /// Builds a committee from the parties holding its seats.
    pub fn new(mut members: Vec<Party>) -> Self {
        members.sort_unstable();
        Self(members)
    }

    /// Returns the seats of the committee, as a non-decreasing sequence of party ids.
    pub fn members(&self) -> &[Party] {
        &self.0
    }

    /// Returns the number of seats.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Checks whether the party holds at least one seat.
    pub fn contains(&self, party: Party) -> bool {
        self.0.contains(&party)
    }

    /// Returns the number of seats held by parties the ballot approves.
    pub fn approval_score(&self, ballot: &Ballot) -> usize {
        self.0.iter().filter(|p| ballot.approves(**p)).count()
    }

    pub(crate) fn party_mask(&self) -> u32 {
        self.0.iter().fold(0u32, |mask, p| mask | 1 << *p)
    }
}

impl Display for Committee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str_members = self.0.iter().map(|p| p.to_string()).collect::<Vec<String>>();
        write!(f, "[{}]", str_members.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_members() {
        let c = Committee::new(vec![2, 0, 0]);
        assert_eq!(&[0, 0, 2], c.members());
        assert_eq!(c, Committee::new(vec![0, 2, 0]));
    }

    #[test]
    fn test_contains() {
        let c = Committee::new(vec![0, 0, 2]);
        assert!(c.contains(0));
        assert!(!c.contains(1));
        assert!(c.contains(2));
    }

    #[test]
    fn test_approval_score_counts_seats() {
        let c = Committee::new(vec![0, 0, 2]);
        assert_eq!(2, c.approval_score(&Ballot::singleton(0)));
        assert_eq!(0, c.approval_score(&Ballot::singleton(1)));
        assert_eq!(3, c.approval_score(&Ballot::from_parties(&[0, 2]).unwrap()));
    }

    #[test]
    fn test_display() {
        assert_eq!("[0,0,2]", format!("{}", Committee::new(vec![0, 0, 2])));
    }
}
