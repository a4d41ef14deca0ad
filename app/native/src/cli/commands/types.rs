//! Shared argument types for CLI commands.

use std::str::FromStr;

use serde::Deserialize;

use crate::grid::{GridError, GridResult, PlacementId, PlacementSet, Proposal, Span, SpanRequest};

/// A `X,Y` cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl FromStr for CellPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid position '{s}'. Expected 'X,Y', e.g. '2,0'.");
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            x: x.trim().parse().map_err(|_| invalid())?,
            y: y.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// A size given as a class name (`medium`) or as `WxH` (`2x3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeArg(pub SpanRequest);

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Size must not be empty.".to_string());
        }

        let dims = s
            .split_once(['x', 'X'])
            .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)));
        Ok(Self(match dims {
            Some((w, h)) => SpanRequest::Cells(Span::new(w, h)),
            None => SpanRequest::Named(s.to_string()),
        }))
    }
}

/// Parses a JSON argument for `set-config` and `add --settings`.
///
/// # Errors
///
/// Returns a message if the input is not valid JSON.
pub fn parse_json(s: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(s).map_err(|e| format!("Invalid JSON: {e}"))
}

/// Resolves a full placement id or a unique prefix of one.
///
/// # Errors
///
/// Returns a message if nothing or more than one placement matches.
pub fn resolve_placement_id(set: &PlacementSet, input: &str) -> Result<PlacementId, String> {
    if let Ok(id) = input.parse::<PlacementId>() {
        return Ok(id);
    }

    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Err("Placement id must not be empty.".to_string());
    }

    let mut matches = set.iter().filter(|p| p.id.to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(placement), None) => Ok(placement.id),
        (Some(_), Some(_)) => Err(format!("Placement id '{input}' is ambiguous.")),
        (None, _) => Err(format!("No placement matches '{input}'.")),
    }
}

/// Body of a `reflow` request: a bare array, or `{ "positions": [...] }`.
///
/// Entries stay raw JSON until [`Self::into_proposals`] so that a bad entry
/// is reported with its index instead of failing the whole document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReflowDocument {
    /// `[{ "id": ..., "x": 0, "y": 0 }, ...]`
    List(Vec<serde_json::Value>),
    /// `{ "positions": [...] }`
    Wrapped {
        /// The raw entries.
        positions: Vec<serde_json::Value>,
    },
}

/// One entry as written by the user. Ids may be prefixes.
#[derive(Debug, Default, Deserialize)]
struct ReflowEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    x: Option<serde_json::Value>,
    #[serde(default)]
    y: Option<serde_json::Value>,
    #[serde(default)]
    w: Option<serde_json::Value>,
    #[serde(default)]
    h: Option<serde_json::Value>,
}

impl ReflowDocument {
    /// Converts the entries to proposals, resolving id prefixes against `set`.
    ///
    /// Missing fields are left for the engine to report.
    ///
    /// # Errors
    ///
    /// Returns `MalformedProposal` with the entry's index if it is not an
    /// object, its id matches no single placement, or a coordinate is not an
    /// integer.
    pub fn into_proposals(self, set: &PlacementSet) -> GridResult<Vec<Proposal>> {
        let (Self::List(entries) | Self::Wrapped { positions: entries }) = self;

        entries
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let entry: ReflowEntry = serde_json::from_value(raw)
                    .map_err(|e| GridError::malformed(index, format!("unreadable entry: {e}")))?;

                let id = entry
                    .id
                    .as_deref()
                    .map(|id| resolve_placement_id(set, id))
                    .transpose()
                    .map_err(|reason| GridError::malformed(index, reason))?;

                Ok(Proposal {
                    id,
                    x: coordinate(index, "x", entry.x)?,
                    y: coordinate(index, "y", entry.y)?,
                    w: coordinate(index, "w", entry.w)?,
                    h: coordinate(index, "h", entry.h)?,
                })
            })
            .collect()
    }
}

fn coordinate(
    index: usize,
    field: &str,
    value: Option<serde_json::Value>,
) -> GridResult<Option<i32>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                GridError::malformed(index, format!("'{field}' must be an integer, got {value}"))
            }),
    }
}
