//! Pappenc encodes the existence of anonymous, strategyproof party-approval
//! committee voting rules as propositional CNF formulas.

#![warn(missing_docs)]

pub mod axioms;

pub mod elections;

pub mod encodings;

pub mod indexing;

pub mod io;

pub mod sat;
