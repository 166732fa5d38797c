use super::symmetry;
use crate::axioms::WeakRepresentationMode;
use crate::elections::Ballot;
use anyhow::{anyhow, Result};

/// Controls the addition of the symmetry-breaking clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryBreaking {
    /// Adds the clause iff one is known for the configured parameters.
    Auto,
    /// Adds the clause; rejected at validation time if none is known.
    On,
    /// Never adds the clause.
    Off,
}

impl TryFrom<&str> for SymmetryBreaking {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Ok(SymmetryBreaking::Auto),
            "on" => Ok(SymmetryBreaking::On),
            "off" => Ok(SymmetryBreaking::Off),
            _ => Err(anyhow!(r#"undefined symmetry breaking mode "{}""#, value)),
        }
    }
}

/// The parameters of an encoding run.
#[derive(Debug, Clone)]
pub struct EncodingConfig {
    /// The number of seats of the committees.
    pub committee_size: usize,
    /// The number of parties.
    pub n_parties: usize,
    /// The number of voters.
    pub n_voters: usize,
    /// Whether Pareto-optimality is enforced in addition to weak representation.
    pub pareto_optimality: bool,
    /// The algorithm used to enforce weak representation.
    pub weak_representation: WeakRepresentationMode,
    /// Whether the full profile domain is enumerated instead of the restricted one.
    pub all_profiles: bool,
    /// Whether the symmetry-breaking clause is added to the formula.
    pub symmetry_breaking: SymmetryBreaking,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            committee_size: 3,
            n_parties: 4,
            n_voters: 6,
            pareto_optimality: false,
            weak_representation: WeakRepresentationMode::Refined,
            all_profiles: false,
            symmetry_breaking: SymmetryBreaking::Auto,
        }
    }
}

impl EncodingConfig {
    /// Checks the consistency of the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.committee_size == 0 || self.n_parties == 0 || self.n_voters == 0 {
            return Err(anyhow!(
                "the committee size and the numbers of parties and voters must be positive"
            ));
        }
        if self.n_parties > Ballot::MAX_PARTIES {
            return Err(anyhow!(
                "the number of parties cannot exceed {}",
                Ballot::MAX_PARTIES
            ));
        }
        if self.symmetry_breaking == SymmetryBreaking::On
            && !symmetry::has_symmetry_breaking_clause(
                self.committee_size,
                self.n_parties,
                self.n_voters,
            )
        {
            return Err(anyhow!(
                "no symmetry-breaking clause is known for committees of {} seats, {} parties and {} voters",
                self.committee_size,
                self.n_parties,
                self.n_voters,
            ));
        }
        Ok(())
    }

    /// Checks whether the symmetry-breaking clause must be added for this configuration.
    pub fn symmetry_breaking_enabled(&self) -> bool {
        match self.symmetry_breaking {
            SymmetryBreaking::Auto => symmetry::has_symmetry_breaking_clause(
                self.committee_size,
                self.n_parties,
                self.n_voters,
            ),
            SymmetryBreaking::On => true,
            SymmetryBreaking::Off => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EncodingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.symmetry_breaking_enabled());
    }

    #[test]
    fn test_zero_parameters_are_rejected() {
        let config = EncodingConfig {
            n_voters: 0,
            ..EncodingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_too_many_parties_are_rejected() {
        let config = EncodingConfig {
            n_parties: 32,
            symmetry_breaking: SymmetryBreaking::Off,
            ..EncodingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_symmetry_breaking_off_default_instance() {
        let config = EncodingConfig {
            symmetry_breaking: SymmetryBreaking::Off,
            ..EncodingConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.symmetry_breaking_enabled());
    }

    #[test]
    fn test_symmetry_breaking_outside_default_instance() {
        let auto = EncodingConfig {
            n_voters: 5,
            ..EncodingConfig::default()
        };
        assert!(auto.validate().is_ok());
        assert!(!auto.symmetry_breaking_enabled());
        let forced = EncodingConfig {
            n_voters: 5,
            symmetry_breaking: SymmetryBreaking::On,
            ..EncodingConfig::default()
        };
        assert!(forced.validate().is_err());
    }

    #[test]
    fn test_modes_from_str() {
        assert_eq!(
            SymmetryBreaking::Auto,
            SymmetryBreaking::try_from("auto").unwrap()
        );
        assert_eq!(
            SymmetryBreaking::On,
            SymmetryBreaking::try_from("ON").unwrap()
        );
        assert!(SymmetryBreaking::try_from("maybe").is_err());
        assert_eq!(
            WeakRepresentationMode::Naive,
            WeakRepresentationMode::try_from("naive").unwrap()
        );
        assert!(WeakRepresentationMode::try_from("clever").is_err());
    }
}
