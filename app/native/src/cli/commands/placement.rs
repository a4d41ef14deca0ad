//! Placement CLI commands.
//!
//! Commands that read or change the owner's grid. Each mutating command goes
//! through [`crate::dashboard::Dashboard`], so every rule the engine enforces
//! applies here too.

use std::io::Read;
use std::path::Path;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::Session;
use super::types::{CellPosition, ReflowDocument, SizeArg, parse_json, resolve_placement_id};
use crate::cli::output;
use crate::dashboard::{DashboardError, NewWidget};
use crate::error::WidgetboxError;
use crate::grid::{GridError, GridRect, MoveRequest, Placement, PlacementId, PlacementSet};

// ============================================================================
// Arguments
// ============================================================================

/// Arguments of `widgetbox add`.
#[derive(Debug, Args)]
#[command(after_long_help = r#"Examples:
  widgetbox add system.time.simple                 # First free slot, default size
  widgetbox add system.weather.simple --at 3,0     # Explicit position
  widgetbox add system.notes.simple --size 2x3     # Explicit span
  widgetbox add system.weather.simple --settings '{"city":"Oslo"}'"#)]
pub struct AddArgs {
    /// Widget id, see `widgetbox widgets`.
    pub widget_id: String,

    /// Top-left cell as `X,Y`. Defaults to the first free slot.
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub at: Option<CellPosition>,

    /// Size class name or `WxH`. Defaults to the widget's size class.
    #[arg(long, value_name = "SIZE")]
    pub size: Option<SizeArg>,

    /// Initial widget settings as JSON.
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub settings: Option<serde_json::Value>,
}

/// Arguments of `widgetbox move`.
#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("target").required(true).multiple(true).args(["to", "size"])))]
#[command(after_long_help = r#"Examples:
  widgetbox move 0190a3 --to 3,1          # Move
  widgetbox move 0190a3 --size large      # Resize in place
  widgetbox move 0190a3 --to 0,3 --size 2x2
  widgetbox move 0190a3 --to 4,4 --check  # Only report whether it would fit"#)]
pub struct MoveArgs {
    /// Placement id (or a unique prefix).
    pub id: String,

    /// New top-left cell as `X,Y`.
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub to: Option<CellPosition>,

    /// New size class name or `WxH`.
    #[arg(long, value_name = "SIZE")]
    pub size: Option<SizeArg>,

    /// Report whether the move would be accepted without applying it.
    #[arg(long)]
    pub check: bool,
}

/// Arguments of `widgetbox drag`.
#[derive(Debug, Args)]
#[command(after_long_help = r#"Examples:
  widgetbox drag 0190a3 --dx 210 --dy -95            # Drop one cell up, two right
  widgetbox drag 0190a3 --dx 210 --dy 0 --preview    # Only show where it would land"#)]
pub struct DragArgs {
    /// Placement id (or a unique prefix).
    pub id: String,

    /// Horizontal pointer movement in pixels.
    #[arg(long, allow_negative_numbers = true)]
    pub dx: f64,

    /// Vertical pointer movement in pixels.
    #[arg(long, allow_negative_numbers = true)]
    pub dy: f64,

    /// Report the drop target without moving the widget.
    #[arg(long)]
    pub preview: bool,
}

/// Arguments of `widgetbox reflow`.
#[derive(Debug, Args)]
#[command(after_long_help = r#"Input is a JSON array of { "id", "x", "y", "w"?, "h"? } objects,
or an object with such an array under "positions".

Examples:
  widgetbox reflow layout.json
  echo '[{"id":"...","x":0,"y":0}]' | widgetbox reflow -"#)]
pub struct ReflowArgs {
    /// JSON file with the proposed positions, or `-` for stdin.
    pub input: String,
}

/// Arguments of `widgetbox set-config`.
#[derive(Debug, Args)]
pub struct SetConfigArgs {
    /// Placement id (or a unique prefix).
    pub id: String,

    /// New widget settings as JSON. Replaces the previous ones.
    #[arg(value_name = "JSON", value_parser = parse_json)]
    pub payload: serde_json::Value,
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Tabled)]
struct PlacementRow {
    #[tabled(rename = "")]
    label: char,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Widget")]
    widget: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Config")]
    config: String,
}

/// `widgetbox show`
///
/// # Errors
///
/// Returns an error if the placements cannot be loaded.
pub fn show(session: &Session) -> Result<(), WidgetboxError> {
    let set = load(session)?;

    if session.json {
        output::print_json(&set);
        return Ok(());
    }

    let bounds = session.dashboard.bounds();
    println!(
        "{}",
        format!("Dashboard '{}' ({}x{})", session.owner, bounds.columns, bounds.rows).bold()
    );
    if let Some(path) = &session.loaded.path {
        println!("{}", format!("Config: {}", path.display()).dimmed());
    }
    println!("{}", format!("Data: {}", session.dashboard.store().dir().display()).dimmed());

    if set.is_empty() {
        println!("{}", "No widgets placed. Add one with 'widgetbox add <WIDGET>'.".dimmed());
        return Ok(());
    }

    let catalog = session.dashboard.catalog();
    let rows: Vec<PlacementRow> = set
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let span = p.rect.span();
            PlacementRow {
                label: output::map_label(index),
                id: p.id.to_string(),
                widget: p.widget_id.clone(),
                position: output::format_position(&p.rect),
                size: catalog
                    .name_for(span)
                    .map_or_else(|| span.to_string(), |name| format!("{span} ({name})")),
                config: if p.config.is_null() {
                    String::new()
                } else {
                    output::truncate(&p.config.to_string(), 32)
                },
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::center()))
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .to_string();

    println!("{table}");
    output::print_grid_map(&set, bounds);
    println!("{}", format!("{} free cell(s)", set.free_cells(bounds)).dimmed());
    Ok(())
}

/// `widgetbox add`
///
/// # Errors
///
/// Returns an error if the widget cannot be placed.
pub fn add(session: &Session, args: &AddArgs) -> Result<(), WidgetboxError> {
    let request = NewWidget {
        widget_id: args.widget_id.clone(),
        size: args.size.clone().map(|s| s.0),
        position: args.at.map(|p| (p.x, p.y)),
        config: args.settings.clone(),
    };

    let placement = session
        .dashboard
        .create_widget(&session.owner, request)
        .map_err(|err| report(session, err))?;

    print_placement(session, "Added", &placement);
    Ok(())
}

/// `widgetbox move`
///
/// # Errors
///
/// Returns an error if the placement is unknown or the move is rejected.
pub fn move_placement(session: &Session, args: &MoveArgs) -> Result<(), WidgetboxError> {
    let id = resolve(session, &args.id)?;
    let request = MoveRequest {
        position: args.to.map(|p| (p.x, p.y)),
        span: args.size.clone().map(|s| s.0),
    };

    if args.check {
        let set = load(session)?;
        let current = set
            .get(id)
            .ok_or(GridError::NotFound { id })
            .and_then(|p| request.apply_to(&p.rect, session.dashboard.catalog()))
            .map_err(|err| report(session, err.into()))?;

        return match session.dashboard.check(&session.owner, &current, Some(id)) {
            Ok(()) => {
                print_drop_check(session, current, Ok(()));
                Ok(())
            }
            Err(DashboardError::Grid(err)) => {
                print_drop_check(session, current, Err(&err));
                Ok(())
            }
            Err(err) => Err(report(session, err)),
        };
    }

    let placement = session
        .dashboard
        .move_or_resize(&session.owner, id, &request)
        .map_err(|err| report(session, err))?;

    print_placement(session, "Moved", &placement);
    Ok(())
}

/// `widgetbox drag`
///
/// # Errors
///
/// Returns an error if the placement is unknown or the drop is rejected.
pub fn drag(session: &Session, args: &DragArgs) -> Result<(), WidgetboxError> {
    let id = resolve(session, &args.id)?;
    let dashboard = &session.dashboard;
    let drag = dashboard.start_drag(&session.owner, id).map_err(|err| report(session, err))?;

    if args.preview {
        let preview = dashboard
            .preview_drag(&session.owner, &drag, args.dx, args.dy)
            .map_err(|err| report(session, err))?;

        print_drop_check(session, preview.rect, preview.result.as_ref().map(|&()| ()));
        return Ok(());
    }

    let placement = dashboard
        .finish_drag(&session.owner, drag, args.dx, args.dy)
        .map_err(|err| report(session, err))?;

    print_placement(session, "Dropped", &placement);
    Ok(())
}

/// `widgetbox reflow`
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if the batch
/// is rejected. Nothing changes on error.
pub fn reflow(session: &Session, args: &ReflowArgs) -> Result<(), WidgetboxError> {
    let input = read_input(&args.input)?;
    let document: ReflowDocument = serde_json::from_str(&input)
        .map_err(|e| WidgetboxError::InvalidArguments(format!("Invalid reflow input: {e}")))?;
    let set = load(session)?;
    let proposals = document.into_proposals(&set).map_err(|err| report(session, err.into()))?;

    let outcome = session
        .dashboard
        .apply_batch(&session.owner, &proposals)
        .map_err(|err| report(session, err))?;

    if session.json {
        output::print_json(&outcome);
    } else if outcome.changed.is_empty() {
        println!("{}", "Layout unchanged.".dimmed());
    } else {
        println!(
            "{} {} of {} widgets moved",
            "✓".green(),
            outcome.changed.len(),
            outcome.accepted
        );
    }
    Ok(())
}

/// `widgetbox remove`
///
/// # Errors
///
/// Returns an error if the placement does not exist.
pub fn remove(session: &Session, id: &str) -> Result<(), WidgetboxError> {
    let id = resolve(session, id)?;
    let placement = session
        .dashboard
        .remove_widget(&session.owner, id)
        .map_err(|err| report(session, err))?;

    print_placement(session, "Removed", &placement);
    Ok(())
}

/// `widgetbox set-config`
///
/// # Errors
///
/// Returns an error if the placement does not exist.
pub fn set_config(session: &Session, args: &SetConfigArgs) -> Result<(), WidgetboxError> {
    let id = resolve(session, &args.id)?;
    let placement = session
        .dashboard
        .update_config(&session.owner, id, args.payload.clone())
        .map_err(|err| report(session, err))?;

    print_placement(session, "Updated", &placement);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn load(session: &Session) -> Result<PlacementSet, WidgetboxError> {
    session.dashboard.placements(&session.owner).map_err(|err| report(session, err))
}

fn resolve(session: &Session, input: &str) -> Result<PlacementId, WidgetboxError> {
    let set = load(session)?;
    resolve_placement_id(&set, input).map_err(WidgetboxError::InvalidArguments)
}

fn read_input(source: &str) -> Result<String, WidgetboxError> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(Path::new(source))
            .map_err(|e| WidgetboxError::IoError(format!("Failed to read {source}: {e}")))
    }
}

/// Result of a dry run, as printed by `move --check` and `drag --preview`.
#[derive(Serialize)]
struct DropCheck<'a> {
    rect: GridRect,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a GridError>,
}

fn print_drop_check(session: &Session, rect: GridRect, result: Result<(), &GridError>) {
    if session.json {
        output::print_json(&DropCheck {
            rect,
            valid: result.is_ok(),
            error: result.err(),
        });
        return;
    }

    match result {
        Ok(()) => println!("{} would fit at {rect}", "✓".green()),
        Err(err) => println!("{} {rect} is not allowed: {err}", "✗".red()),
    }
}

fn print_placement(session: &Session, verb: &str, placement: &Placement) {
    if session.json {
        output::print_json(placement);
    } else {
        println!(
            "{} {verb} {} at {} {}",
            "✓".green(),
            placement.widget_id.bold(),
            placement.rect,
            format!("[{}]", placement.id).dimmed()
        );
    }
}

/// Converts a dashboard error for the CLI, printing the structured engine
/// error first when JSON output is requested.
fn report(session: &Session, err: DashboardError) -> WidgetboxError {
    if let Some(grid) = err.as_grid() {
        if session.json {
            output::print_json(&serde_json::json!({ "error": grid }));
        } else if grid.is_conflict() {
            for id in grid.conflicting_ids() {
                eprintln!("{} {id}", "conflicts with".dimmed());
            }
        } else if grid.is_not_found() {
            eprintln!("{}", "See `widgetbox show` for placements and `widgetbox sizes`.".dimmed());
        }
    }
    err.into()
}
