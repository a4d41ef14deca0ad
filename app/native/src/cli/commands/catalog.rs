//! Widget and size class listings.

use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::Session;
use crate::cli::output;
use crate::error::WidgetboxError;
use crate::grid::Span;

#[derive(Tabled)]
struct WidgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Refresh")]
    refresh: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled, Serialize)]
struct SizeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Width")]
    w: i32,
    #[tabled(rename = "Height")]
    h: i32,
    #[tabled(rename = "Fits")]
    #[serde(skip)]
    fits: String,
}

/// `widgetbox widgets`
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn list_widgets(session: &Session) -> Result<(), WidgetboxError> {
    let registry = session.dashboard.registry();

    if session.json {
        output::print_json(registry.list());
        return Ok(());
    }

    let catalog = session.dashboard.catalog();
    let rows: Vec<WidgetRow> = registry
        .list()
        .iter()
        .map(|w| WidgetRow {
            id: w.id.clone(),
            name: w.name.clone(),
            size: catalog
                .resolve(&w.size)
                .map_or_else(
                    |_| format!("{} (unknown)", w.size),
                    |span| format!("{} ({span})", w.size),
                ),
            refresh: output::format_interval(w.refresh_interval_seconds),
            description: output::truncate(w.description.as_deref().unwrap_or_default(), 40),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Widgets ({})", registry.len()).bold());
    println!("{table}");
    Ok(())
}

/// `widgetbox sizes`
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn list_sizes(session: &Session) -> Result<(), WidgetboxError> {
    let catalog = session.dashboard.catalog();
    let bounds = session.dashboard.bounds();
    let fits = |span: Span| span.w <= bounds.columns && span.h <= bounds.rows;

    let rows: Vec<SizeRow> = catalog
        .iter()
        .map(|(name, span)| SizeRow {
            name: name.to_string(),
            w: span.w,
            h: span.h,
            fits: output::format_bool(fits(span)),
        })
        .collect();

    if session.json {
        output::print_json(&rows);
        return Ok(());
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Size classes ({})", catalog.len()).bold());
    println!("{table}");
    Ok(())
}
