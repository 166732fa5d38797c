use super::{Literal, SatSolver, SolvingResult};
use log::error;
use std::{
    io::{BufRead, BufReader, Write},
    process::{Command, Stdio},
};

/// A SAT solver which execution is made by a system command.
///
/// The system command is composed by an executable program and a potential list of CLI arguments.
/// The solver must read a DIMACS instance from its standard input and answer with a
/// SAT competition status line (`s SATISFIABLE` or `s UNSATISFIABLE`) on its standard output.
///
/// Clauses are buffered in DIMACS text form; the child process is spawned when
/// [`solve`](SatSolver::solve) is called. A solver that cannot be executed or answers with no
/// status line yields [`SolvingResult::Unknown`].
pub struct ExternalSatSolver {
    program: String,
    options: Vec<String>,
    n_vars: usize,
    n_clauses: usize,
    clauses: String,
}

impl ExternalSatSolver {
    /// Builds a new external SAT solver.
    ///
    /// The `program` argument is the path from a directory in the execution path to the software
    /// to execute. The `options` parameter is the CLI options to provide to it.
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            program,
            options,
            n_vars: 0,
            n_clauses: 0,
            clauses: String::new(),
        }
    }

    fn exec_solver(&self) -> std::io::Result<SolvingResult> {
        let mut child = Command::new(&self.program)
            .args(&self.options)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let mut stdin = child.stdin.take().expect("child stdin must be piped");
        let instance = format!("p cnf {} {}\n{}", self.n_vars, self.n_clauses, self.clauses);
        let feeder = std::thread::spawn(move || {
            let _ = stdin.write_all(instance.as_bytes());
            let _ = stdin.flush();
        });
        let stdout = child.stdout.take().expect("child stdout must be piped");
        let mut result = SolvingResult::Unknown;
        for line in BufReader::new(stdout).lines() {
            match line?.as_str() {
                "s SATISFIABLE" => result = SolvingResult::Satisfiable,
                "s UNSATISFIABLE" => result = SolvingResult::Unsatisfiable,
                _ => {}
            }
        }
        feeder.join().expect("the writing thread must not panic");
        child.wait()?;
        Ok(result)
    }
}

impl SatSolver for ExternalSatSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        cl.iter().for_each(|l| {
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
            self.clauses.push_str(&format!("{} ", l));
        });
        self.clauses.push('0');
        self.clauses.push('\n');
        self.n_clauses += 1;
    }

    fn solve(&mut self) -> SolvingResult {
        match self.exec_solver() {
            Ok(result) => result,
            Err(e) => {
                error!(r#"while executing the SAT solver "{}": {}"#, self.program, e);
                SolvingResult::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;

    fn get_echo_command(content: &str) -> Option<(String, Vec<String>)> {
        if cfg!(target_family = "unix") {
            Some(("echo".to_string(), vec![content.to_string()]))
        } else {
            None
        }
    }

    #[test]
    fn test_solve_sat_output() {
        let (program, options) = match get_echo_command("s SATISFIABLE\nv 1 2 0") {
            Some(cmd) => cmd,
            None => return,
        };
        let mut s = ExternalSatSolver::new(program, options);
        s.add_clause(clause![1, 2]);
        assert_eq!(SolvingResult::Satisfiable, s.solve());
    }

    #[test]
    fn test_solve_unsat_output() {
        let (program, options) = match get_echo_command("s UNSATISFIABLE") {
            Some(cmd) => cmd,
            None => return,
        };
        let mut s = ExternalSatSolver::new(program, options);
        s.add_clause(clause![1]);
        s.add_clause(clause![-1]);
        assert_eq!(SolvingResult::Unsatisfiable, s.solve());
    }

    #[test]
    fn test_solver_not_found() {
        let mut s = ExternalSatSolver::new("/does/not/exist".to_string(), vec![]);
        s.add_clause(clause![1]);
        assert_eq!(SolvingResult::Unknown, s.solve());
    }

    #[test]
    fn test_dimacs_buffer() {
        let mut s = ExternalSatSolver::new("unused".to_string(), vec![]);
        s.add_clause(clause![1, -3]);
        s.add_clause(clause![2]);
        assert_eq!(3, s.n_vars);
        assert_eq!(2, s.n_clauses);
        assert_eq!("1 -3 0\n2 0\n", s.clauses);
    }
}
