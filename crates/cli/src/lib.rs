pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "ratecard",
    about = "Ratecard operator CLI",
    long_about = "Compute quotes, inspect the active rate card and configuration, and drive the estimator assistant from the command line.",
    after_help = "Examples:\n  ratecard estimate --selection demo.json\n  ratecard catalog\n  ratecard doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute a quote from a selection JSON file and print the document")]
    Estimate {
        #[arg(long, help = "Path to a project selection JSON file")]
        selection: PathBuf,
        #[arg(long, help = "Emit the quote and payment schedule as JSON")]
        json: bool,
    },
    #[command(about = "Print the active rate card catalog and pricing constants")]
    Catalog,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, rate card resolution, and pricing determinism")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Ask the assistant to draft a project description from a selection file")]
    Describe {
        #[arg(long, help = "Path to a project selection JSON file")]
        selection: PathBuf,
    },
    #[command(about = "Ask the assistant to parse a description into estimator selections")]
    Autofill {
        #[arg(long, conflicts_with = "file", help = "Project description text")]
        description: Option<String>,
        #[arg(long, help = "Path to a file containing the project description")]
        file: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Estimate { selection, json } => commands::estimate::run(&selection, json),
        Command::Catalog => {
            commands::CommandResult { exit_code: 0, output: commands::catalog::run() }
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Describe { selection } => commands::describe::run(&selection),
        Command::Autofill { description, file } => {
            commands::autofill::run(description, file.as_deref())
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
