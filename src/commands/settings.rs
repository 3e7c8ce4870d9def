//! Token and per-widget settings commands.
//!
//! These only touch the local store; nothing here calls the remote.

use std::process::ExitCode;

use widget_board::store::TOKEN_KEY;
use widget_board::widgets::settings::parse_value;
use widget_board::WidgetSettings;

use super::{finish, CommandError, Context};

/// Stores the bearer token used for the remote endpoint.
pub(crate) fn run_login_command(ctx: &Context, token: &str) -> ExitCode {
    finish(login(ctx, token))
}

/// Removes the stored token. Later commands use the local store only.
pub(crate) fn run_logout_command(ctx: &Context) -> ExitCode {
    finish(logout(ctx))
}

/// Prints `id`'s effective settings as JSON.
pub(crate) fn run_settings_show_command(ctx: &Context, id: &str) -> ExitCode {
    finish(show_settings(ctx, id))
}

/// Sets one settings field for `id`. `value` is parsed as JSON when it can be.
pub(crate) fn run_settings_set_command(ctx: &Context, id: &str, key: &str, value: &str) -> ExitCode {
    finish(set_setting(ctx, id, key, value))
}

fn login(ctx: &Context, token: &str) -> Result<(), CommandError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CommandError::EmptyToken);
    }
    ctx.open_store()?.set(TOKEN_KEY, token)?;
    println!("Token saved");
    Ok(())
}

fn logout(ctx: &Context) -> Result<(), CommandError> {
    match ctx.open_store()?.remove(TOKEN_KEY)? {
        Some(_) => println!("Token removed"),
        None => println!("No token stored"),
    }
    Ok(())
}

fn show_settings(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let settings = WidgetSettings::load(&ctx.open_store()?);
    let text =
        serde_json::to_string_pretty(&settings.get(id)).map_err(|e| CommandError::Output(e.to_string()))?;
    println!("{text}");
    Ok(())
}

fn set_setting(ctx: &Context, id: &str, key: &str, raw: &str) -> Result<(), CommandError> {
    let mut store = ctx.open_store()?;
    let mut settings = WidgetSettings::load(&store);
    let value = parse_value(raw);
    settings.set(id, key, value.clone());
    settings.save(&mut store)?;
    println!("{id}.{key} = {value}");
    Ok(())
}
