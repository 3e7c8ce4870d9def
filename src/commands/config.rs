//! Configuration file commands.

use std::path::Path;
use std::process::ExitCode;

use widget_board::config::{default, loader::ConfigLoader, xdg};

use crate::ConfigAction;

/// Runs a `config` subcommand against `path`, or the default location.
pub(crate) fn run_config_command(action: &ConfigAction, path: Option<&Path>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => {
            let created = match path {
                Some(p) => default::create_default_config_at(p, *force).map(|()| p.to_path_buf()),
                None => default::create_default_config(*force),
            };
            created.map(|p| println!("Created configuration at {}", p.display()))
        }
        ConfigAction::Path => {
            match path {
                Some(p) => println!("{}", p.display()),
                None => println!("{}", xdg::config_path().display()),
            }
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(path).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };

    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
