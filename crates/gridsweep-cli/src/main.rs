use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    inspect::{self, InspectArgs},
    run::{self, RunArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "gridsweep", about = "Parameter grid sweep driver", version)]
struct Cli {
    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a built-in observable over every point of a sweep plan.
    Run(RunArgs),
    /// Print the reduced grid of a sweep plan without evaluating it.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    logging::init_logging(&cli.log_level)?;
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}
