use super::{app_helper, command::Command};
use anyhow::{Context, Result};
use clap::{AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use pappenc::{
    axioms::WeakRepresentationMode,
    encodings::{CnfFormula, EncodingConfig, FormulaBuilder, SymmetryBreaking},
    io::DimacsWriter,
    sat::{self, ExternalSatSolver, SatSolver, SolvingResult},
};
use std::{fs::File, io::BufWriter};

const CMD_NAME: &str = "encode";

const ARG_OUT: &str = "OUT";
const ARG_COMMITTEE_SIZE: &str = "COMMITTEE_SIZE";
const ARG_N_PARTIES: &str = "N_PARTIES";
const ARG_N_VOTERS: &str = "N_VOTERS";
const ARG_PARETO: &str = "PARETO";
const ARG_WEAK_REPRESENTATION: &str = "WEAK_REPRESENTATION";
const ARG_ALL_PROFILES: &str = "ALL_PROFILES";
const ARG_SYMMETRY_BREAKING: &str = "SYMMETRY_BREAKING";
const ARG_SOLVE: &str = "SOLVE";
const ARG_EXTERNAL_SAT_SOLVER: &str = "EXTERNAL_SAT_SOLVER";
const ARG_EXTERNAL_SAT_SOLVER_OPTIONS: &str = "EXTERNAL_SAT_SOLVER_OPTIONS";

pub(crate) struct EncodeCommand;

impl EncodeCommand {
    pub(crate) fn new() -> Self {
        EncodeCommand
    }
}

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> clap::App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Encodes the search for a strategyproof party-approval voting rule as a CNF formula")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name(ARG_OUT)
                    .short("o")
                    .long("output")
                    .empty_values(false)
                    .multiple(false)
                    .help("the output file for the formula")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_COMMITTEE_SIZE)
                    .short("k")
                    .long("committee-size")
                    .empty_values(false)
                    .multiple(false)
                    .default_value("3")
                    .help("the number of seats of the committees"),
            )
            .arg(
                Arg::with_name(ARG_N_PARTIES)
                    .short("m")
                    .long("parties")
                    .empty_values(false)
                    .multiple(false)
                    .default_value("4")
                    .help("the number of parties"),
            )
            .arg(
                Arg::with_name(ARG_N_VOTERS)
                    .short("n")
                    .long("voters")
                    .empty_values(false)
                    .multiple(false)
                    .default_value("6")
                    .help("the number of voters"),
            )
            .arg(
                Arg::with_name(ARG_PARETO)
                    .long("pareto")
                    .help("additionally encodes that the voting rule satisfies Pareto-optimality"),
            )
            .arg(
                Arg::with_name(ARG_WEAK_REPRESENTATION)
                    .long("weak-representation")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&["naive", "refined"])
                    .default_value("refined")
                    .help("the algorithm used to enforce weak representation"),
            )
            .arg(
                Arg::with_name(ARG_ALL_PROFILES)
                    .long("all-profiles")
                    .help("considers the domain of all the profiles instead of the restricted one"),
            )
            .arg(
                Arg::with_name(ARG_SYMMETRY_BREAKING)
                    .long("symmetry-breaking")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(&["auto", "on", "off"])
                    .default_value("auto")
                    .help("adds the symmetry-breaking clause (only available at the default parameters)"),
            )
            .arg(
                Arg::with_name(ARG_SOLVE)
                    .long("solve")
                    .help("checks the satisfiability of the formula after writing it"),
            )
            .arg(
                Arg::with_name(ARG_EXTERNAL_SAT_SOLVER)
                    .long("external-sat-solver")
                    .empty_values(false)
                    .multiple(false)
                    .help("a path to an external SAT solver to replace the embedded one")
                    .required(false),
            )
            .arg(
                Arg::with_name(ARG_EXTERNAL_SAT_SOLVER_OPTIONS)
                    .long("external-sat-solver-opt")
                    .requires(ARG_EXTERNAL_SAT_SOLVER)
                    .empty_values(false)
                    .multiple(true)
                    .help("an option to give to the external SAT solver")
                    .required(false),
            )
            .arg(app_helper::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let config = read_config(arg_matches)?;
        let builder = FormulaBuilder::new(config)?;
        let formula = builder.build()?;
        info!(
            "the formula counts {} variable(s) and {} clause(s)",
            formula.n_vars(),
            formula.n_clauses(),
        );
        let file_path = arg_matches.value_of(ARG_OUT).unwrap();
        let file = File::create(file_path)
            .with_context(|| format!(r#"while creating the output file "{}""#, file_path))?;
        DimacsWriter.write(&formula, &mut BufWriter::new(file))?;
        info!("formula written to {}", file_path);
        if arg_matches.is_present(ARG_SOLVE) {
            solve(&formula, arg_matches);
        }
        Ok(())
    }
}

fn read_config(arg_matches: &ArgMatches<'_>) -> Result<EncodingConfig> {
    Ok(EncodingConfig {
        committee_size: usize_arg(arg_matches, ARG_COMMITTEE_SIZE)?,
        n_parties: usize_arg(arg_matches, ARG_N_PARTIES)?,
        n_voters: usize_arg(arg_matches, ARG_N_VOTERS)?,
        pareto_optimality: arg_matches.is_present(ARG_PARETO),
        weak_representation: WeakRepresentationMode::try_from(
            arg_matches.value_of(ARG_WEAK_REPRESENTATION).unwrap(),
        )?,
        all_profiles: arg_matches.is_present(ARG_ALL_PROFILES),
        symmetry_breaking: SymmetryBreaking::try_from(
            arg_matches.value_of(ARG_SYMMETRY_BREAKING).unwrap(),
        )?,
    })
}

fn usize_arg(arg_matches: &ArgMatches<'_>, arg_name: &str) -> Result<usize> {
    let str_value = arg_matches.value_of(arg_name).unwrap();
    str_value
        .parse::<usize>()
        .with_context(|| format!(r#"while parsing "{}" as a CLI argument value"#, str_value))
}

fn solve(formula: &CnfFormula, arg_matches: &ArgMatches<'_>) {
    let mut solver: Box<dyn SatSolver> =
        match arg_matches.value_of(ARG_EXTERNAL_SAT_SOLVER) {
            Some(program) => {
                info!("checking the satisfiability of the formula with {}", program);
                let options = arg_matches
                    .values_of(ARG_EXTERNAL_SAT_SOLVER_OPTIONS)
                    .map(|v| v.map(str::to_string).collect())
                    .unwrap_or_default();
                Box::new(ExternalSatSolver::new(program.to_string(), options))
            }
            None => {
                info!("checking the satisfiability of the formula with the embedded solver");
                sat::default_solver()
            }
        };
    formula.iter().for_each(|cl| solver.add_clause(cl.to_vec()));
    match solver.solve() {
        SolvingResult::Satisfiable => println!("satisfiable"),
        SolvingResult::Unsatisfiable => println!("unsatisfiable"),
        SolvingResult::Unknown => println!("unknown"),
    }
}
