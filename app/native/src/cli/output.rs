//! CLI output formatting utilities.
//!
//! - JSON syntax highlighting
//! - ASCII map of a placement grid
//! - Small cell formatters shared by the table views

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::grid::{GridBounds, GridRect, PlacementSet};

/// Characters used to label placements on the grid map, in storage order.
const MAP_LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Marker for an empty cell on the grid map.
const EMPTY_CELL: char = '.';

// ============================================================================
// JSON
// ============================================================================

/// Prints any serializable value as highlighted, pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json));
}

/// Colors a pretty-printed JSON document.
///
/// Keys are cyan, string values green, numbers yellow, booleans and null
/// magenta, and punctuation bold white.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut token = String::new();
    let mut containers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;
    let mut after_colon = false;
    let mut is_key = false;

    for ch in json.chars() {
        if in_string {
            token.push(ch);
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                let colored = if is_key { token.cyan() } else { token.green() };
                let _ = write!(out, "{colored}");
                token.clear();
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                flush_scalar(&mut out, &mut token);
                token.push(ch);
                in_string = true;
                is_key = containers.last() == Some(&'{') && !after_colon;
                after_colon = false;
            }
            ':' => {
                flush_scalar(&mut out, &mut token);
                let _ = write!(out, "{}", ":".white());
                after_colon = true;
            }
            ',' | '{' | '}' | '[' | ']' => {
                flush_scalar(&mut out, &mut token);
                match ch {
                    '{' | '[' => containers.push(ch),
                    '}' | ']' => {
                        containers.pop();
                    }
                    _ => {}
                }
                let _ = write!(out, "{}", ch.to_string().white().bold());
                after_colon = false;
            }
            _ => token.push(ch),
        }
    }

    flush_scalar(&mut out, &mut token);
    out
}

/// Writes a pending unquoted token, coloring the scalar it contains.
fn flush_scalar(out: &mut String, token: &mut String) {
    if token.is_empty() {
        return;
    }

    let value = token.trim();
    if value.is_empty() {
        out.push_str(token);
    } else {
        let start = token.len() - token.trim_start().len();
        let end = start + value.len();
        let colored = if matches!(value, "true" | "false" | "null") {
            value.magenta()
        } else if value.parse::<f64>().is_ok() {
            value.yellow()
        } else {
            value.normal()
        };
        let _ = write!(out, "{}{colored}{}", &token[..start], &token[end..]);
    }

    token.clear();
}

// ============================================================================
// Grid map
// ============================================================================

/// Returns the map label of the placement at `index` in storage order.
#[must_use]
pub fn map_label(index: usize) -> char { MAP_LABELS.get(index).map_or('#', |&b| char::from(b)) }

/// Renders the grid as text, one row per line, with placements drawn using
/// their [`map_label`]. Only cells inside `bounds` are visited, whatever the
/// stored rectangles claim.
///
/// ```text
///    0 1 2 3 4
/// 0  A A B . .
/// 1  A A . . .
/// ```
#[must_use]
pub fn grid_map(set: &PlacementSet, bounds: &GridBounds) -> String {
    let mut out = String::from("  ");
    for col in 0..bounds.columns.max(0) {
        let _ = write!(out, " {}", col % 10);
    }

    for row in 0..bounds.rows.max(0) {
        let _ = write!(out, "\n{:<2}", row % 100);
        for col in 0..bounds.columns.max(0) {
            let cell = set
                .iter()
                .rposition(|p| p.rect.contains_cell(col, row))
                .map_or(EMPTY_CELL, map_label);
            let _ = write!(out, " {cell}");
        }
    }
    out
}

/// Prints the grid map with occupied cells highlighted.
pub fn print_grid_map(set: &PlacementSet, bounds: &GridBounds) {
    for line in grid_map(set, bounds).lines() {
        let colored: String = line
            .chars()
            .map(|c| match c {
                EMPTY_CELL => c.to_string().dimmed().to_string(),
                c if c.is_ascii_alphabetic() || c == '#' => c.to_string().cyan().bold().to_string(),
                c => c.to_string(),
            })
            .collect();
        println!("{colored}");
    }
}

// ============================================================================
// Formatters
// ============================================================================

/// Formats a rectangle's position as `x,y`.
#[must_use]
pub fn format_position(rect: &GridRect) -> String { format!("{},{}", rect.x, rect.y) }

/// Formats a refresh interval, `0` meaning manual refresh only.
#[must_use]
pub fn format_interval(seconds: u32) -> String {
    match seconds {
        0 => "manual".to_string(),
        s if s % 3600 == 0 => format!("{}h", s / 3600),
        s if s % 60 == 0 => format!("{}m", s / 60),
        s => format!("{s}s"),
    }
}

/// Formats a boolean as a colored check mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}

/// Truncates a string to a maximum number of characters, adding an ellipsis.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        let cut = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
        format!("{}…", &s[..cut])
    }
}
