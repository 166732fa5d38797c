use assert_cmd::Command;
use assert_fs::NamedTempFile;
use pappenc::{
    axioms::WeakRepresentationMode,
    elections::{Ballot, Committee, Profile},
    encodings::{EncodingConfig, FormulaBuilder, SymmetryBreaking},
    sat::Variable,
};
use predicates::prelude::predicate;

fn encode_args(output: &NamedTempFile, tail: &[&str]) -> Vec<String> {
    let mut args = vec![
        "encode".to_string(),
        "-o".to_string(),
        output.path().to_str().unwrap().to_string(),
    ];
    args.extend(tail.iter().map(|a| a.to_string()));
    args
}

#[test]
fn test_two_voter_instance_formula_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("formula.cnf")?;
    let mut cmd = Command::cargo_bin("pappenc")?;
    cmd.args(encode_args(
        &file,
        &[
            "-k",
            "1",
            "-m",
            "2",
            "-n",
            "2",
            "--all-profiles",
            "--weak-representation",
            "naive",
            "--symmetry-breaking",
            "off",
        ],
    ));
    cmd.assert().success();
    let expected = "p cnf 13 16\n\
        2 0\n\
        4 5 0\n\
        -4 -5 0\n\
        6 7 0\n\
        -6 -7 0\n\
        9 0\n\
        10 11 0\n\
        -10 -11 0\n\
        12 13 0\n\
        -12 -13 0\n\
        -7 -10 0\n\
        -7 -4 0\n\
        -10 -7 0\n\
        -10 -5 0\n\
        -12 -7 0\n\
        -13 -10 0\n";
    assert_eq!(expected, std::fs::read_to_string(file.path())?);
    file.close()?;
    Ok(())
}

#[test]
fn test_solve_reports_satisfiability() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("formula.cnf")?;
    let mut cmd = Command::cargo_bin("pappenc")?;
    cmd.args(encode_args(
        &file,
        &[
            "-k",
            "1",
            "-m",
            "2",
            "-n",
            "1",
            "--all-profiles",
            "--symmetry-breaking",
            "off",
            "--solve",
        ],
    ));
    cmd.assert()
        .success()
        .stdout(predicate::eq("satisfiable\n"));
    file.close()?;
    Ok(())
}

#[test]
fn test_symmetry_breaking_rejected_outside_default_instance(
) -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("formula.cnf")?;
    let mut cmd = Command::cargo_bin("pappenc")?;
    cmd.args(encode_args(
        &file,
        &["-n", "5", "--symmetry-breaking", "on"],
    ));
    cmd.assert().failure();
    file.close()?;
    Ok(())
}

#[test]
fn test_default_instance_formula() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("formula.cnf")?;
    let mut cmd = Command::cargo_bin("pappenc")?;
    cmd.args(encode_args(
        &file,
        &["--weak-representation", "naive", "--symmetry-breaking", "on"],
    ));
    cmd.assert().success();
    let content = std::fs::read_to_string(file.path())?;
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    let header_fields = header.split_whitespace().collect::<Vec<&str>>();
    assert_eq!("p", header_fields[0]);
    assert_eq!("cnf", header_fields[1]);
    let n_vars = header_fields[2].parse::<usize>()?;
    let n_clauses = header_fields[3].parse::<usize>()?;
    assert_eq!(n_clauses, content.lines().count() - 1);

    // the same domain, re-indexed through the library, must explain the file
    let config = EncodingConfig {
        weak_representation: WeakRepresentationMode::Naive,
        symmetry_breaking: SymmetryBreaking::On,
        ..EncodingConfig::default()
    };
    let builder = FormulaBuilder::new(config)?;
    let index = builder.index();
    assert!(n_vars >= index.n_profiles() * index.n_committees());
    assert!(n_vars < (index.n_profiles() + 1) * index.n_committees());

    // the first clause is the symmetry-breaking one
    let symmetry_clause = lines
        .next()
        .unwrap()
        .split_whitespace()
        .map(|w| w.parse::<isize>().unwrap())
        .collect::<Vec<isize>>();
    assert_eq!(vec![0], symmetry_clause[2..].to_vec());
    let expected_profile = index.canonicalize(&Profile::new(vec![
        Ballot::singleton(0),
        Ballot::from_parties(&[0, 1])?,
        Ballot::singleton(1),
        Ballot::singleton(2),
        Ballot::from_parties(&[2, 3])?,
        Ballot::singleton(3),
    ]))?;
    let expected_committees = [Committee::new(vec![0, 0, 2]), Committee::new(vec![0, 1, 2])];
    for (literal, expected_committee) in symmetry_clause[..2].iter().zip(expected_committees.iter())
    {
        assert!(*literal > 0);
        let (profile_id, committee_id) =
            index.decode_variable(Variable::from(*literal as usize))?;
        assert_eq!(expected_profile, builder.profiles()[profile_id]);
        assert_eq!(*expected_committee, index.committees()[committee_id]);
    }
    file.close()?;
    Ok(())
}
