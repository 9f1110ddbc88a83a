/// Binary entry point for the Habit Journal MCP server
///
/// Parses the command line, wires logging to stderr (stdout belongs to the
/// JSON-RPC stream), picks a database location and hands control to the
/// server loop.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_journal_mcp::HabitJournalServer;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, a writable default location is chosen
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

/// Pick a writable default location for the database
///
/// Candidates are tried in order: a dot directory in the home directory,
/// the platform data and config directories, then the working directory.
/// Each candidate must survive a small write probe before it is accepted,
/// because MCP servers are often launched from read-only install trees.
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|mut p| {
            p.push(".habit_journal");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("habit_journal");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("habit_journal");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit_journal");
            p
        }),
    ];

    for dir in candidates.iter().flatten() {
        if std::fs::create_dir_all(dir).is_err() {
            continue;
        }

        let probe = dir.join(".write_probe");
        if std::fs::write(&probe, "ok").is_ok() {
            let _ = std::fs::remove_file(&probe);
            return Ok(dir.join("habits.db"));
        }
    }

    // Last resort when nothing persistent is writable
    let mut temp_path = std::env::temp_dir();
    temp_path.push("habit_journal");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.db");

    tracing::warn!(
        "No persistent location writable, using temporary database: {}",
        temp_path.display()
    );
    Ok(temp_path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // stdout carries JSON-RPC responses, so every log line goes to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_journal_mcp={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Habit Journal MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = HabitJournalServer::new(db_path).await?;
    server.run().await?;

    info!("Habit Journal MCP server shutdown complete");
    Ok(())
}
