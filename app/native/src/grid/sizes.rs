//! Size catalog: symbolic size classes resolved to cell spans.
//!
//! The catalog is injected configuration. The engine never hard-codes what
//! "small" or "large" means; it asks the catalog it was given.

use std::collections::BTreeMap;

use super::error::{GridError, GridResult};
use super::geometry::Span;

/// Built-in size classes used when the configuration does not define any.
pub const DEFAULT_SIZES: &[(&str, Span)] = &[
    ("small", Span::new(1, 1)),
    ("medium", Span::new(2, 2)),
    ("large", Span::new(3, 2)),
];

/// Maps size names to canonical spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeCatalog {
    sizes: BTreeMap<String, Span>,
}

impl SizeCatalog {
    /// Creates a catalog from name/span pairs.
    ///
    /// Names are matched case-insensitively. Spans smaller than one cell are
    /// dropped with a warning.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Span)>,
        S: AsRef<str>,
    {
        let sizes = entries
            .into_iter()
            .filter_map(|(name, span)| {
                let name = name.as_ref().trim().to_lowercase();
                if name.is_empty() || !span.is_valid() {
                    tracing::warn!(size = %name, span = %span, "grid: ignoring invalid size class");
                    return None;
                }
                Some((name, span))
            })
            .collect();

        Self { sizes }
    }

    /// Resolves a size name to its span.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSize` if the name is not registered.
    pub fn resolve(&self, name: &str) -> GridResult<Span> {
        self.sizes.get(&name.trim().to_lowercase()).copied().ok_or_else(|| {
            GridError::UnknownSize {
                name: name.to_string(),
            }
        })
    }

    /// Returns the size class whose span matches exactly, if any.
    #[must_use]
    pub fn name_for(&self, span: Span) -> Option<&str> {
        self.sizes.iter().find(|(_, s)| **s == span).map(|(name, _)| name.as_str())
    }

    /// Iterates all size classes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Span)> {
        self.sizes.iter().map(|(name, span)| (name.as_str(), *span))
    }

    /// Number of registered size classes.
    #[must_use]
    pub fn len(&self) -> usize { self.sizes.len() }

    /// Returns `true` if no size classes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.sizes.is_empty() }
}

impl Default for SizeCatalog {
    fn default() -> Self { Self::new(DEFAULT_SIZES.iter().copied()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = SizeCatalog::default();
        assert_eq!(catalog.resolve("small").unwrap(), Span::new(1, 1));
        assert_eq!(catalog.resolve("medium").unwrap(), Span::new(2, 2));
        assert_eq!(catalog.resolve("large").unwrap(), Span::new(3, 2));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = SizeCatalog::default();
        assert_eq!(catalog.resolve(" Large ").unwrap(), Span::new(3, 2));
    }

    #[test]
    fn test_unknown_size() {
        let err = SizeCatalog::default().resolve("huge").unwrap_err();
        assert_eq!(err, GridError::UnknownSize { name: "huge".into() });
    }

    #[test]
    fn test_custom_catalog_drops_invalid_spans() {
        let catalog = SizeCatalog::new([("wide", Span::new(4, 1)), ("broken", Span::new(0, 2))]);
        assert_eq!(catalog.resolve("wide").unwrap(), Span::new(4, 1));
        assert!(catalog.resolve("broken").is_err());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_name_for_span() {
        let catalog = SizeCatalog::default();
        assert_eq!(catalog.name_for(Span::new(2, 2)), Some("medium"));
        assert_eq!(catalog.name_for(Span::new(4, 4)), None);
    }
}
