//! The objects used to encode voting rule axioms into CNF formulas.

mod cnf_formula;
pub use cnf_formula::CnfFormula;

mod config;
pub use config::EncodingConfig;
pub use config::SymmetryBreaking;

mod formula_builder;
pub use formula_builder::FormulaBuilder;

mod symmetry;
pub use symmetry::has_symmetry_breaking_clause;
