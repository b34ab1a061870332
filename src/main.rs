//! Quizdeck CLI - Command-line interface for local quiz authoring and transfer

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use quizdeck::config::{self, ResolvedSettings};
use quizdeck::output::{emit_error, OutputMode};
use quizdeck::{QuizStore, SqliteStorage};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "quizdeck")]
#[command(version)]
#[command(about = "Create, edit, export and import quizzes stored locally")]
#[command(long_about = r#"
Quizdeck keeps single-choice, multiple-choice and true/false quizzes in a
local store and moves them between machines as copy/paste-safe strings.

Example usage:
  quizdeck create --file capitals.json
  quizdeck list
  quizdeck export --all > backup.txt
  quizdeck import --file backup.txt
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a quizdeck.toml with the current settings
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// List all quizzes
    List,

    /// Show one quiz with its questions
    Show {
        /// Quiz id
        id: String,
    },

    /// Create a quiz from a draft JSON file
    Create {
        /// Draft file, `-` for stdin
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace the content of an existing quiz from a draft JSON file
    Edit {
        /// Quiz id
        id: String,

        /// Draft file, `-` for stdin
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete a quiz
    Delete {
        /// Quiz id
        id: String,
    },

    /// Print an export string for one quiz or the whole collection
    Export {
        /// Quiz id (omit with --all)
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<String>,

        /// Export every quiz
        #[arg(short, long)]
        all: bool,
    },

    /// Import quizzes from an export string or raw JSON
    Import {
        /// Payload text
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the payload from a file, `-` for stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List quiz types and their selector values
    Types,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::List => "list",
            Commands::Show { .. } => "show",
            Commands::Create { .. } => "create",
            Commands::Edit { .. } => "edit",
            Commands::Delete { .. } => "delete",
            Commands::Export { .. } => "export",
            Commands::Import { .. } => "import",
            Commands::Types => "types",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so export payloads on stdout stay clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_flag(cli.json);
    let command_name = cli.command.name();

    let result = run(cli, output_mode);
    if let Err(e) = &result {
        emit_error(output_mode, command_name, &e.to_string());
    }
    result
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let base = std::env::current_dir()?;
    let file_config = config::load_config(cli.config.as_deref())?;
    let settings = config::resolve_settings(file_config.as_ref(), cli.database.clone(), &base);

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            commands::run_init(&path, &settings, force, output_mode)
        }
        Commands::Types => commands::run_types(output_mode),
        Commands::List => commands::run_list(&open_store(&settings)?, output_mode),
        Commands::Show { id } => commands::run_show(&open_store(&settings)?, &id, output_mode),
        Commands::Create { file } => {
            commands::run_create(&open_store(&settings)?, &file, output_mode)
        }
        Commands::Edit { id, file } => {
            commands::run_edit(&open_store(&settings)?, &id, &file, output_mode)
        }
        Commands::Delete { id } => commands::run_delete(&open_store(&settings)?, &id, output_mode),
        Commands::Export { id, all } => {
            commands::run_export(&open_store(&settings)?, id.as_deref(), all, output_mode)
        }
        Commands::Import { text, file } => {
            commands::run_import(&open_store(&settings)?, text, file.as_deref(), output_mode)
        }
    }
}

fn open_store(settings: &ResolvedSettings) -> anyhow::Result<QuizStore<SqliteStorage>> {
    config::ensure_db_dir(&settings.database)?;
    tracing::debug!(database = %settings.database.display(), key = %settings.storage_key, "opening store");
    let storage = SqliteStorage::open(&settings.database)?;
    Ok(QuizStore::with_key(storage, settings.storage_key.clone()))
}
