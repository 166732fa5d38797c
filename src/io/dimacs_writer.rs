use crate::encodings::CnfFormula;
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the DIMACS CNF format.
///
/// The format is the one expected by the solvers of the SAT competitions: a header line
/// `p cnf <n-vars> <n-clauses>` followed by one line per clause giving its signed
/// variable ids, terminated by a literal `0`.
#[derive(Default)]
pub struct DimacsWriter;

impl DimacsWriter {
    /// Writes the formula using the DIMACS CNF format to the provided writer.
    pub fn write(&self, formula: &CnfFormula, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing a CNF formula";
        writeln!(writer, "p cnf {} {}", formula.n_vars(), formula.n_clauses())
            .context(context)?;
        for clause in formula.iter() {
            for literal in clause {
                write!(writer, "{} ", literal).context(context)?;
            }
            writeln!(writer, "0").context(context)?;
        }
        writer.flush().context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;

    fn write_to_string(formula: &CnfFormula) -> String {
        let mut buffer = Vec::new();
        DimacsWriter.write(formula, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write() {
        let mut formula = CnfFormula::new();
        formula.add_clause(clause![1, -3]);
        formula.add_clause(clause![2]);
        assert_eq!("p cnf 3 2\n1 -3 0\n2 0\n", write_to_string(&formula));
    }

    #[test]
    fn test_write_empty_formula() {
        assert_eq!("p cnf 0 0\n", write_to_string(&CnfFormula::new()));
    }

    #[test]
    fn test_write_empty_clause() {
        let mut formula = CnfFormula::new();
        formula.add_clause(clause![]);
        assert_eq!("p cnf 0 1\n0\n", write_to_string(&formula));
    }
}
