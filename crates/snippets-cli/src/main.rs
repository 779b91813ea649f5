//! Snippets CLI
//!
//! Drives the snippet request handlers from the command line. Every request
//! prints the JSON response; the exit status is 1 unless the response is a
//! success or a redirect.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use snippets_core::logging_facility::{self, Profile};
use snippets_engine::Response;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "snippets")]
#[command(about = "Snippets - share code snippets with access control", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "SNIPPETS_DB", default_value = ".snippets/store.db")]
    db: PathBuf,

    /// Act as this user; omit to act anonymously
    #[arg(long, global = true, env = "SNIPPETS_USER")]
    user: Option<String>,

    /// Engine configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Trace id of the calling system, echoed in error responses
    #[arg(long, global = true, env = "SNIPPETS_TRACE_ID")]
    trace_id: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = LogProfile::Dev)]
    log: LogProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    Dev,
    Prod,
}

impl From<LogProfile> for Profile {
    fn from(value: LogProfile) -> Self {
        match value {
            LogProfile::Dev => Profile::Development,
            LogProfile::Prod => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Snippet(commands::snippet::SnippetCommand),
    /// Operator commands
    Admin(commands::admin::AdminArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log.into());

    let global = commands::GlobalArgs {
        db: cli.db,
        user: cli.user,
        config: cli.config,
        trace_id: cli.trace_id,
    };

    let result = match cli.command {
        Commands::Snippet(command) => commands::snippet::execute(command, &global),
        Commands::Admin(args) => commands::admin::execute(args, &global),
    };

    match result {
        Ok(response) => {
            print_response(&response);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_response(response: &Response) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}
