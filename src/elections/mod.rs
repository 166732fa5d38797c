//! The party-approval election domain: ballots, committees and profiles.

mod ballot;
pub use ballot::Ballot;
pub use ballot::Party;

mod builder;
pub use builder::ElectionBuilder;

mod committee;
pub use committee::Committee;

mod profile;
pub use profile::Profile;
