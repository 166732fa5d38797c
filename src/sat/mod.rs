//! SAT level types and solver interfaces.

mod cadical_solver;
pub use cadical_solver::CadicalSolver;

mod external_sat_solver;
pub use external_sat_solver::ExternalSatSolver;

mod sat_solver;
pub use sat_solver::default_solver;
pub use sat_solver::Literal;
pub use sat_solver::SatSolver;
pub use sat_solver::SolvingResult;
pub use sat_solver::Variable;
