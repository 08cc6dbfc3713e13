//! Codescout CLI - saved searches and repository contributor statistics

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use codescout::config;
use codescout::SavedQueryId;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "codescout")]
#[command(version)]
#[command(about = "Saved searches and repository contributor statistics")]
#[command(long_about = r#"
Codescout keeps saved search queries (owned by a user or an organization,
with notification preferences) in a local SQLite database, and reports
per-author commit counts for git repositories.

Example usage:
  codescout init
  codescout saved create --description "errors" --query "lang:go panic(" --owner-kind user --user-id 42 --notify
  codescout saved list
  codescout contributors --repo . --range v1.0..HEAD --first 10
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default codescout.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Manage saved searches
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Show per-author commit counts for a git repository
    Contributors {
        /// Path to the repository checkout
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Revision range (e.g. v1.0..HEAD)
        #[arg(long)]
        range: Option<String>,

        /// Show only the first N contributors
        #[arg(short, long)]
        first: Option<usize>,
    },

    /// Print the version
    Version,
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List every saved search
    List,

    /// Show one saved search
    Show {
        id: SavedQueryId,
    },

    /// Create a saved search
    Create(SavedSearchArgs),

    /// Replace every field of a saved search
    Update {
        id: SavedQueryId,

        #[command(flatten)]
        fields: SavedSearchArgs,
    },

    /// Delete a saved search
    Delete {
        id: SavedQueryId,
    },
}

#[derive(Args)]
pub struct SavedSearchArgs {
    /// Human-readable description
    #[arg(long)]
    pub description: String,

    /// Search query
    #[arg(short, long)]
    pub query: String,

    /// Notify the owner about new results
    #[arg(long)]
    pub notify: bool,

    /// Post new results to Slack
    #[arg(long)]
    pub notify_slack: bool,

    /// Owner kind: user or org
    #[arg(long)]
    pub owner_kind: String,

    /// Owning user id (owner kind user)
    #[arg(long)]
    pub user_id: Option<i32>,

    /// Owning organization id (owner kind org)
    #[arg(long)]
    pub org_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        *self == OutputMode::Human
    }
}

/// Print `{"ok": true, "command": ..., "data": ...}` in JSON mode
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

/// Top-level message only; library errors already embed their source
fn error_message(err: &anyhow::Error) -> String {
    err.to_string()
}

fn error_envelope(err: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "error": error_message(err),
    })
}

fn emit_error(output_mode: OutputMode, err: &anyhow::Error) {
    match output_mode {
        OutputMode::Human => codescout::ui::error(&error_message(err)),
        OutputMode::Json => println!("{}", error_envelope(err)),
    }
}

/// Database path: `--database`, else the config's, else the default under
/// the config file's directory
fn resolve_database(cli_database: Option<PathBuf>, config_path: Option<&Path>) -> anyhow::Result<(PathBuf, config::CodescoutConfig)> {
    let loaded = config::load_config(config_path)?.unwrap_or_default();
    if let Some(db) = cli_database {
        return Ok((db, loaded));
    }

    let base = config_path
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((loaded.database_path_in(&base), loaded))
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            commands::run_init(&path, force, output_mode)
        }

        Commands::Saved { action } => {
            let (database, _) = resolve_database(cli.database, cli.config.as_deref())?;
            tracing::debug!("Using database {:?}", database);
            commands::run_saved(action, &database, output_mode)
        }

        Commands::Contributors { repo, range, first } => {
            let (_, loaded) = resolve_database(cli.database, cli.config.as_deref())?;
            let first = first.or(loaded.default_first);
            commands::run_contributors(&repo, range, first, output_mode)
        }

        Commands::Version => commands::run_version(output_mode),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    if let Err(err) = run(cli, output_mode) {
        emit_error(output_mode, &err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codescout::VcsError;

    #[test]
    fn test_error_message_names_cause_once() {
        let err = anyhow::Error::from(codescout::Error::UpstreamCompute(
            VcsError::NotARepository("/tmp/plain".to_string()),
        ));
        assert_eq!(
            error_message(&err),
            "Version control error: not a git repository: /tmp/plain"
        );
    }

    #[test]
    fn test_error_envelope_keeps_store_message() {
        let err = anyhow::Error::from(codescout::Error::NotFound(SavedQueryId(7)));
        let envelope = error_envelope(&err);
        assert_eq!(envelope["ok"], false);
        assert_eq!(envelope["error"], "Saved search not found: 7");
    }

    #[test]
    fn test_first_zero_is_accepted() {
        let cli = Cli::try_parse_from(["codescout", "contributors", "--first", "0"]).unwrap();
        match cli.command {
            Commands::Contributors { first, .. } => assert_eq!(first, Some(0)),
            _ => panic!("expected contributors command"),
        }
    }
}
