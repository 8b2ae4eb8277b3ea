use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docaudit",
    about = "Docaudit: read-only quality audit of viewpoint/perspective documentation trees",
    version
)]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a documentation root against the property table
    Audit {
        /// Documentation root containing viewpoints/ and perspectives/
        #[arg(default_value = ".")]
        root: String,

        /// Property id to run (repeatable; default: all 17)
        #[arg(
            long = "property",
            short = 'p',
            action = ArgAction::Append,
            value_parser = clap::value_parser!(u8).range(1..=17)
        )]
        properties: Vec<u8>,

        /// Minimum body length of consolidated READMEs
        #[arg(long)]
        min_body_chars: Option<usize>,

        /// Reject dates that do not exist on the calendar (e.g. 2025-02-30)
        #[arg(long)]
        strict_calendar: bool,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// List the audited properties
    Properties {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what the audit extracts from one markdown document
    Inspect {
        /// Markdown file, relative to --root
        file: String,

        /// Documentation root used to resolve links
        #[arg(long, default_value = ".")]
        root: String,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}
