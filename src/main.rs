//! Widget Board - CLI entry point
//!
//! This binary drives a widget board from the command line: it mounts the
//! configured tab (local store first, remote when a token is stored),
//! applies one change, and persists it.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::*;
use widget_board::config::loader::ConfigLoader;
use widget_board::{logging, WidgetKind};

/// Widget board: dashboard widgets and their grid layout
#[derive(Parser)]
#[command(name = "wb")]
#[command(version, about = "Manage dashboard widgets and their grid layout")]
struct Cli {
    /// Configuration file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Local store file (overrides the config file)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Never contact the remote settings endpoint
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the wb CLI
#[derive(Subcommand)]
enum Commands {
    /// Show the widgets on the board
    Show {
        /// Print the stored widget and layout arrays as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a widget at the top-left cell
    Add {
        /// Widget kind (see `wb kinds`)
        kind: WidgetKind,
    },

    /// Delete a widget
    Delete {
        /// Widget identifier
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Apply a full layout (JSON array of {i,x,y,w,h})
    Layout {
        /// Layout file, or `-` for stdin
        file: PathBuf,
    },

    /// Move or resize one widget
    Move {
        /// Widget identifier
        id: String,
        /// Column
        #[arg(long)]
        x: u32,
        /// Row
        #[arg(long)]
        y: u32,
        /// Width in cells (default: unchanged)
        #[arg(long)]
        w: Option<u32>,
        /// Height in cells (default: unchanged)
        #[arg(long)]
        h: Option<u32>,
    },

    /// List widget kinds
    Kinds,

    /// Store the bearer token for the remote settings endpoint
    Login {
        /// Bearer token
        token: String,
    },

    /// Remove the stored token
    Logout,

    /// Per-widget settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `settings` subcommand.
#[derive(Subcommand)]
enum SettingsAction {
    /// Show a widget's settings (stored values over kind defaults)
    Show {
        /// Widget identifier
        id: String,
    },
    /// Set one settings field
    Set {
        /// Widget identifier
        id: String,
        /// Field name
        key: String,
        /// Value; parsed as JSON, otherwise taken as a string
        value: String,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config commands must work even when the file is broken.
    if let Commands::Config { action } = &cli.command {
        return run_config_command(action, cli.config.as_deref());
    }
    if let Commands::Kinds = cli.command {
        return run_kinds_command();
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.log.level);

    let ctx = Context::new(config, cli.store, cli.offline);

    match cli.command {
        Commands::Show { json } => run_show_command(&ctx, json),
        Commands::Add { kind } => run_add_command(&ctx, kind),
        Commands::Delete { id, yes } => run_delete_command(&ctx, &id, yes),
        Commands::Layout { file } => run_layout_command(&ctx, &file),
        Commands::Move { id, x, y, w, h } => run_move_command(&ctx, &id, x, y, w, h),
        Commands::Login { token } => run_login_command(&ctx, &token),
        Commands::Logout => run_logout_command(&ctx),
        Commands::Settings { action } => match action {
            SettingsAction::Show { id } => run_settings_show_command(&ctx, &id),
            SettingsAction::Set { id, key, value } => run_settings_set_command(&ctx, &id, &key, &value),
        },
        Commands::Kinds | Commands::Config { .. } => ExitCode::SUCCESS,
    }
}
