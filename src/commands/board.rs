//! Board command implementations.
//!
//! Each command mounts the configured tab, applies one change, and waits for
//! the remote save it started before returning.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use board_api::{GridRect, LayoutRecord, SaveTabRequest};
use widget_board::prompt::{AssumeYes, Confirm, TerminalConfirm};
use widget_board::{DeleteOutcome, GridSpec, WidgetKind};

use super::{block_on, finish, CommandError, Context};

/// Prints every placement, or the tab's wire arrays as JSON.
pub(crate) fn run_show_command(ctx: &Context, json: bool) -> ExitCode {
    finish(block_on(async {
        let dashboard = ctx.mount().await?;
        let board = dashboard.board();

        if json {
            let (user_widgets, user_layout) = board.to_parts();
            let wire = SaveTabRequest {
                tab: dashboard.tab(),
                user_widgets,
                user_layout,
            };
            let text = serde_json::to_string_pretty(&wire).map_err(|e| CommandError::Output(e.to_string()))?;
            println!("{text}");
            return Ok(());
        }

        if board.is_empty() {
            println!("No widgets on tab {}.", dashboard.tab());
            return Ok(());
        }

        let grid = GridSpec::from(&ctx.config.grid);
        for placement in board {
            let r = placement.rect;
            let px = grid.pixel_rect(r);
            let kind = placement.kind().map_or("?", WidgetKind::as_str);
            println!(
                "{:<24} {:<10} cell ({},{}) {}x{}  px ({},{}) {}x{}",
                placement.wid(),
                kind,
                r.x,
                r.y,
                r.w,
                r.h,
                px.left,
                px.top,
                px.width,
                px.height
            );
        }
        Ok(())
    }))
}

/// Adds a widget of `kind` and prints its identifier.
pub(crate) fn run_add_command(ctx: &Context, kind: WidgetKind) -> ExitCode {
    finish(block_on(async {
        let mut dashboard = ctx.mount().await?;
        let added = dashboard.add_widget(Some(kind))?;
        dashboard.flush().await;
        if let Some(wid) = added {
            println!("{wid}");
        }
        Ok(())
    }))
}

/// Deletes `id` after confirmation. Unknown identifiers change nothing.
pub(crate) fn run_delete_command(ctx: &Context, id: &str, yes: bool) -> ExitCode {
    let confirm: &dyn Confirm = if yes { &AssumeYes } else { &TerminalConfirm };
    finish(block_on(async {
        let mut dashboard = ctx.mount().await?;
        match dashboard.delete_widget(id, confirm)? {
            DeleteOutcome::Removed(_) => println!("Deleted {id}"),
            DeleteOutcome::Missing => eprintln!("No widget with id '{id}', nothing to delete"),
            DeleteOutcome::Declined => println!("Cancelled"),
        }
        dashboard.flush().await;
        Ok(())
    }))
}

/// Applies a full layout array read from `source` (`-` for stdin).
pub(crate) fn run_layout_command(ctx: &Context, source: &Path) -> ExitCode {
    finish(read_layout(source).and_then(|layout| {
        let grid = GridSpec::from(&ctx.config.grid);
        let fitted: Vec<LayoutRecord> = layout
            .into_iter()
            .map(|r| LayoutRecord::new(r.i, grid.fit(r.rect)))
            .collect();

        block_on(async {
            let mut dashboard = ctx.mount().await?;
            let applied = dashboard.on_layout_change(&fitted)?;
            dashboard.flush().await;
            println!("Applied {applied} of {} layout records", fitted.len());
            Ok(())
        })
    }))
}

/// Moves or resizes one widget, keeping every other rect.
pub(crate) fn run_move_command(
    ctx: &Context,
    id: &str,
    x: u32,
    y: u32,
    w: Option<u32>,
    h: Option<u32>,
) -> ExitCode {
    finish(block_on(async {
        let mut dashboard = ctx.mount().await?;
        let current = dashboard
            .board()
            .get(id)
            .map(|p| p.rect)
            .ok_or_else(|| CommandError::UnknownWidget(id.to_string()))?;

        let grid = GridSpec::from(&ctx.config.grid);
        let rect = grid.fit(GridRect::new(x, y, w.unwrap_or(current.w), h.unwrap_or(current.h)));
        let layout = moved_layout(dashboard.board().iter().map(|p| p.layout_record()), id, rect);

        dashboard.on_layout_change(&layout)?;
        dashboard.flush().await;
        println!("{id} -> cell ({},{}) {}x{}", rect.x, rect.y, rect.w, rect.h);
        Ok(())
    }))
}

/// Lists every widget kind with its description.
pub(crate) fn run_kinds_command() -> ExitCode {
    for kind in WidgetKind::ALL {
        println!("{:<10} {}", kind.as_str(), kind.description());
    }
    ExitCode::SUCCESS
}

/// The full layout with `id`'s rect replaced.
pub(crate) fn moved_layout(
    records: impl IntoIterator<Item = LayoutRecord>,
    id: &str,
    rect: GridRect,
) -> Vec<LayoutRecord> {
    records
        .into_iter()
        .map(|r| if r.i == id { LayoutRecord::new(r.i, rect) } else { r })
        .collect()
}

fn read_layout(source: &Path) -> Result<Vec<LayoutRecord>, CommandError> {
    let text = if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CommandError::Input {
                what: "stdin".to_string(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(source).map_err(|e| CommandError::Input {
            what: source.display().to_string(),
            source: e,
        })?
    };
    parse_layout(&text)
}

/// Parse a JSON array of layout records.
pub(crate) fn parse_layout(text: &str) -> Result<Vec<LayoutRecord>, CommandError> {
    serde_json::from_str(text).map_err(|e| CommandError::Layout(e.to_string()))
}
