mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use homelab_memory::identity::resolve_user;
use homelab_memory::tracing_init::init_tracing;
use homelab_memory::{Config, Error, MemoryStore};

use commands::Commands;
use output::{ErrorResponse, print_json};

/// homelab-memory - Per-user semantic memory for a homelab assistant
#[derive(Parser, Debug)]
#[command(name = "homelab-memory", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// User to act for (default: $HOMELAB_MEMORY_USER, then $USER)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log store activity at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/homelab-memory/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => report_error(&e, cli.json),
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    if !cli.command.needs_store() {
        return commands::handle_version(cli.json);
    }

    let config = Config::load_from(cli.config.as_deref())?;
    config.ensure_directories()?;
    init_tracing(config.log_file.as_deref(), cli.verbose)?;

    let store = MemoryStore::from_config(&config)?;
    let user_id = resolve_user(cli.user.as_deref());
    tracing::debug!(
        user_id = %user_id,
        provider = %config.embedding_provider,
        database = %config.database_path.display(),
        "memory store opened"
    );

    commands::execute(&cli.command, store.for_user(&user_id), cli.json)
}

/// Print `error` and turn it into the process exit code.
fn report_error(error: &Error, json: bool) -> ExitCode {
    if json {
        print_json(&ErrorResponse {
            error: error.to_string(),
        });
    } else {
        eprintln!("Error: {}", error);
    }

    ExitCode::from(exit_status(error))
}

/// 2 for a missing memory, 1 for every other failure.
fn exit_status(error: &Error) -> u8 {
    match error {
        Error::NotFound(_) => 2,
        _ => 1,
    }
}
