//! Ristretto — command-line two-level logic minimizer
//!
//! Reads a PLA file, minimizes it (heuristically by default), and prints the
//! result as PLA text.

use clap::{Parser, ValueEnum};
use ristretto_logic::espresso::{CheckOutcome, Strategy};
use ristretto_logic::{Cover, CoverType, EspressoConfig, Minimizable, PLAReader, PLAWriter};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Command {
    /// Heuristic minimization (default)
    Minimize,
    /// Exact minimization (guaranteed minimum cube count)
    Exact,
    /// One expand/irredundant pass only
    Simplify,
    /// Verify that the PLA's sets partition the space
    Check,
    /// Echo the PLA without modification
    Echo,
    /// Print statistics about the PLA
    Stats,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputType {
    /// ON-set only
    F,
    /// ON-set and don't-care set
    Fd,
    /// ON-set and OFF-set
    Fr,
    /// ON-set, don't-care set, and OFF-set
    Fdr,
}

impl From<OutputType> for CoverType {
    fn from(val: OutputType) -> Self {
        match val {
            OutputType::F => CoverType::F,
            OutputType::Fd => CoverType::FD,
            OutputType::Fr => CoverType::FR,
            OutputType::Fdr => CoverType::FDR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ristretto")]
#[command(about = "Two-level logic minimizer in the Espresso tradition", long_about = None)]
#[command(version)]
struct Args {
    /// Input PLA file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// What to do with the PLA
    #[arg(short = 'D', long = "do", value_enum, default_value = "minimize")]
    command: Command,

    /// Output cover type
    #[arg(short = 'o', long = "output", value_enum, default_value = "f")]
    output_format: OutputType,

    /// Fast mode: one single-pass expand, no iteration
    #[arg(long = "fast", conflicts_with = "strong")]
    fast: bool,

    /// Strong mode: iterate the gasp phase until it stops improving
    #[arg(long = "strong")]
    strong: bool,

    /// Wall-clock budget in seconds (soft: returns the best cover found)
    #[arg(short = 'T', long = "timeout", value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Print a summary to stderr
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Print phase traces to stderr
    #[arg(short = 't', long = "trace")]
    trace: bool,

    /// With --trace, also dump cubes after each phase
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Suppress printing of the solution
    #[arg(short = 'x', long = "no-output")]
    no_output: bool,

    /// Output file (stdout if not given)
    #[arg(short = 'O', long = "out-file")]
    output_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let cover = match Cover::from_pla_file(&args.input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ristretto: {}: {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if args.summary {
        eprintln!(
            "# input: {} inputs, {} outputs, {} cubes",
            cover.num_inputs(),
            cover.num_outputs(),
            cover.num_cubes()
        );
    }

    let config = EspressoConfig {
        strategy: if args.fast {
            Strategy::Fast
        } else if args.strong {
            Strategy::Strong
        } else {
            Strategy::Default
        },
        deadline: args.timeout.map(Duration::from_secs),
        trace: args.trace,
        debug: args.debug,
        summary: args.summary,
        ..Default::default()
    };

    let result = match args.command {
        Command::Minimize => cover.minimize_with_config(&config),
        Command::Exact => cover.minimize_exact_with_config(&config),
        Command::Simplify => cover.simplify(),
        Command::Check => {
            match cover.check() {
                Ok(CheckOutcome::Ok) => {
                    eprintln!("# check: consistent");
                    process::exit(0);
                }
                Ok(CheckOutcome::CoverageGap(cube)) => {
                    eprintln!("# check: coverage gap at {:?}", cube);
                    process::exit(1);
                }
                Ok(CheckOutcome::OffsetConflict(cube)) => {
                    eprintln!("# check: ON/OFF conflict at {:?}", cube);
                    process::exit(1);
                }
                Err(e) => {
                    eprintln!("ristretto: check failed: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::Echo | Command::Stats => Ok(cover.clone()),
    };

    let result = match result {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ristretto: {}", e);
            process::exit(1);
        }
    };

    if args.command == Command::Stats {
        println!("inputs:  {}", result.num_inputs());
        println!("outputs: {}", result.num_outputs());
        println!("cubes:   {}", result.num_cubes());
        process::exit(0);
    }

    if args.summary {
        eprintln!(
            "# output: {} inputs, {} outputs, {} cubes",
            result.num_inputs(),
            result.num_outputs(),
            result.num_cubes()
        );
    }

    if !args.no_output {
        let output_type = CoverType::from(args.output_format);
        let outcome = match &args.output_file {
            Some(path) => result.to_pla_file(path, output_type),
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                result.write_pla(&mut handle, output_type)
            }
        };
        if let Err(e) = outcome {
            eprintln!("ristretto: {}", e);
            process::exit(1);
        }
    }
}
