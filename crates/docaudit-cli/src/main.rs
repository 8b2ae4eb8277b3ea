//! Docaudit CLI: the `docaudit` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

const LOG_ENV: &str = "DOCAUDIT_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Audit {
            root,
            properties,
            min_body_chars,
            strict_calendar,
            json,
        } => commands::audit::run(commands::audit::Args {
            root,
            properties,
            min_body_chars,
            strict_calendar,
            json,
        }),

        Commands::Properties { json } => commands::properties::run(json),

        Commands::Inspect { file, root, json } => commands::inspect::run(file, root, json),
    }
}

/// Logs go to stderr so stdout stays the report.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: failed to initialize tracing subscriber: {err}");
    }
}
