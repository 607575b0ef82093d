mod commands;
mod diagnostics;
mod info;
mod report;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::report::Format;

/// Exit code for runtime errors.
const EXIT_ERROR: u8 = 3;

/// Command-line interface.
#[derive(Parser)]
#[command(name = "doccomment", version, about = "Find code references and code blocks in documentation comments")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the reference document (syntax, languages, config state)
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse the text between one pair of brackets
    Resolve {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Absolute offset of the text, used for reported positions
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Bracket contents, e.g. `new a.A` or `Object.operator ==`
        text: String,
    },
    /// List documentation comments, references, and code blocks under a path
    Scan {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// File or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Scan, then re-scan on every file change
    Watch {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Directory to watch
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new("doccomment=info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { json } => {
            info::run(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Resolve { format, offset, text } => commands::resolve(&text, offset, format),
        Commands::Scan { format, path } => commands::scan(&path, format),
        Commands::Watch { format, path } => watch::run(&path, format),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(EXIT_ERROR)
        },
    };
}
