use super::{symmetry, CnfFormula, EncodingConfig};
use crate::axioms::AxiomChecker;
use crate::elections::{Ballot, Committee, ElectionBuilder, Profile};
use crate::indexing::ElectionIndex;
use crate::sat::Literal;
use anyhow::{anyhow, Result};
use itertools::Itertools;
use log::info;
use std::collections::HashSet;

/// Builds the CNF formula which models are exactly the anonymous voting rules satisfying
/// the configured axioms and strategy-proofness.
///
/// The builder is a batch pipeline: the constructor enumerates the domain, applies the
/// axiom filters and freezes the index tables; [`build`](Self::build) then emits the
/// clauses. Nothing is mutated in between, so building the formula twice yields the same
/// result.
pub struct FormulaBuilder {
    config: EncodingConfig,
    profiles: Vec<Profile>,
    index: ElectionIndex,
}

impl FormulaBuilder {
    /// Enumerates the election domain, applies the axiom filters and builds the index
    /// tables for the provided configuration.
    ///
    /// An invalid configuration is rejected before any enumeration happens.
    pub fn new(config: EncodingConfig) -> Result<Self> {
        config.validate()?;
        let builder = ElectionBuilder::new(
            config.committee_size,
            config.n_parties,
            config.n_voters,
            config.all_profiles,
        );
        let ballots = builder.approval_ballots();
        let committees = builder.all_committees();
        let profiles = builder.approval_profiles(&ballots);
        info!(
            "the election domain counts {} ballot(s), {} committee(s) and {} profile(s)",
            ballots.len(),
            committees.len(),
            profiles.len(),
        );
        let checker = AxiomChecker::new(
            config.committee_size,
            config.n_parties,
            config.n_voters,
            config.pareto_optimality,
            config.weak_representation,
        );
        let feasible = checker.feasible_committees(&profiles, &committees);
        info!("computed the admissible committees of {} profile(s)", profiles.len());
        let index = ElectionIndex::new(ballots, committees, &profiles, feasible)?;
        Ok(Self {
            config,
            profiles,
            index,
        })
    }

    /// Returns the index tables of the enumerated domain.
    pub fn index(&self) -> &ElectionIndex {
        &self.index
    }

    /// Returns the canonical profiles of the enumerated domain.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Builds the formula.
    ///
    /// The clauses are emitted in a fixed order: the symmetry-breaking clause when it is
    /// enabled, then the selection constraints, then the strategy-proofness constraints.
    pub fn build(&self) -> Result<CnfFormula> {
        let mut formula = CnfFormula::new();
        if self.config.symmetry_breaking_enabled() {
            formula.add_clause(self.symmetry_breaking_clause()?);
        }
        self.add_selection_constraints(&mut formula);
        self.add_strategyproofness_constraints(&mut formula)?;
        Ok(formula)
    }

    /// Emits, for each profile, a clause requiring at least one of its admissible
    /// committees to be selected and a binary clause per admissible committee pair
    /// forbidding both to be selected.
    ///
    /// Together these select exactly one committee per profile, among the committees the
    /// axiom filters left; a profile with no admissible committee yields an empty,
    /// always-false clause.
    fn add_selection_constraints(&self, formula: &mut CnfFormula) {
        for profile_id in 0..self.profiles.len() {
            let feasible = self.index.feasible_committee_ids(profile_id);
            formula.add_clause(
                feasible
                    .iter()
                    .map(|c| self.index.variable_for_ids(profile_id, *c).positive())
                    .collect(),
            );
            for (c1, c2) in feasible.iter().tuple_combinations() {
                formula.add_clause(vec![
                    self.index.variable_for_ids(profile_id, *c1).negative(),
                    self.index.variable_for_ids(profile_id, *c2).negative(),
                ]);
            }
        }
    }

    /// Emits the clauses forbidding profitable single-voter deviations.
    ///
    /// For each profile, each voter and each alternative ballot, the deviated profile is
    /// canonicalized and, when it belongs to the enumerated domain, every committee pair
    /// (admissible at the profile, admissible at the deviation) the alternative ballot
    /// strictly orders yields a binary clause. The same pair of literals can be reached
    /// through many deviations; a clause is emitted only the first time.
    fn add_strategyproofness_constraints(&self, formula: &mut CnfFormula) -> Result<()> {
        let mut written: HashSet<(isize, isize)> = HashSet::new();
        for (profile_id, profile) in self.profiles.iter().enumerate() {
            let ballot_ids = profile
                .ballots()
                .iter()
                .map(|b| self.index.ballot_id(b))
                .collect::<Result<Vec<usize>>>()?;
            let feasible = self.index.feasible_committee_ids(profile_id);
            for voter in 0..profile.n_voters() {
                for other_ballot_id in 0..self.index.n_ballots() {
                    if other_ballot_id == ballot_ids[voter] {
                        continue;
                    }
                    let mut deviated = ballot_ids.clone();
                    deviated[voter] = other_ballot_id;
                    deviated.sort_unstable();
                    let deviated_id = match self.index.profile_id_for_sorted_ballot_ids(&deviated) {
                        Some(id) => id,
                        None => continue,
                    };
                    for c1 in feasible {
                        for c2 in self.index.feasible_committee_ids(deviated_id) {
                            if !self.index.prefers(other_ballot_id, *c1, *c2) {
                                continue;
                            }
                            let lit1 = self.index.variable_for_ids(profile_id, *c1).negative();
                            let lit2 = self.index.variable_for_ids(deviated_id, *c2).negative();
                            if written.insert((isize::from(lit1), isize::from(lit2))) {
                                formula.add_clause(vec![lit1, lit2]);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Builds the symmetry-breaking clause for the configured parameters.
    fn symmetry_breaking_clause(&self) -> Result<Vec<Literal>> {
        let entry = symmetry::entry_for(
            self.config.committee_size,
            self.config.n_parties,
            self.config.n_voters,
        )
        .ok_or_else(|| {
            anyhow!(
                "no symmetry-breaking clause is known for committees of {} seats, {} parties and {} voters",
                self.config.committee_size,
                self.config.n_parties,
                self.config.n_voters,
            )
        })?;
        let ballots = entry
            .profile
            .iter()
            .map(|parties| Ballot::from_parties(parties))
            .collect::<Result<Vec<Ballot>>>()?;
        let profile = self.index.canonicalize(&Profile::new(ballots))?;
        entry
            .committees
            .iter()
            .map(|members| {
                let committee = Committee::new(members.to_vec());
                Ok(self.index.variable(&profile, &committee)?.positive())
            })
            .collect()
    }
}
