//! Widget definition registry.
//!
//! The registry answers "which widget kinds exist and what size do they
//! default to". It is constructed explicitly and handed to the
//! [`crate::dashboard::Dashboard`]; there is no process-wide instance.
//!
//! The registry only describes widgets. What a widget displays and how it
//! fetches its data is up to the front end.

mod system;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use system::system_widgets;

use crate::grid::SizeCatalog;

/// Descriptive metadata of a widget kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMetadata {
    /// Stable registry key (e.g. `system.time.simple`).
    pub id: String,
    /// Canonical slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Who provides the widget (`system` or a vendor).
    pub provider: String,
    /// Author, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Default size class.
    pub size: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default refresh interval for widget content, `0` = never.
    #[serde(default)]
    pub refresh_interval_seconds: u32,
}

/// Registry of widget kinds, keyed by id and kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: Vec<WidgetMetadata>,
    index: HashMap<String, usize>,
    system_registered: bool,
}

impl WidgetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a registry holding the built-in system widgets.
    #[must_use]
    pub fn with_system_widgets() -> Self {
        let mut registry = Self::new();
        registry.register_system_widgets();
        registry
    }

    /// Registers the built-in system widgets.
    ///
    /// Only the first call has an effect; later calls are no-ops, so this
    /// can be invoked from every entry point without re-registering.
    pub fn register_system_widgets(&mut self) {
        if self.system_registered {
            return;
        }
        for widget in system_widgets() {
            self.register(widget);
        }
        self.system_registered = true;
        tracing::debug!(count = self.widgets.len(), "widgets: system widgets registered");
    }

    /// Registers a widget, replacing any existing widget with the same id.
    ///
    /// Returns the replaced definition. Replacement keeps the original
    /// registration slot.
    pub fn register(&mut self, widget: WidgetMetadata) -> Option<WidgetMetadata> {
        if let Some(&slot) = self.index.get(&widget.id) {
            return Some(std::mem::replace(&mut self.widgets[slot], widget));
        }
        self.index.insert(widget.id.clone(), self.widgets.len());
        self.widgets.push(widget);
        None
    }

    /// Looks up a widget by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetMetadata> {
        self.index.get(id).map(|&slot| &self.widgets[slot])
    }

    /// Returns all widgets in registration order.
    #[must_use]
    pub fn list(&self) -> &[WidgetMetadata] { &self.widgets }

    /// Number of registered widgets.
    #[must_use]
    pub fn len(&self) -> usize { self.widgets.len() }

    /// Returns `true` if no widgets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.widgets.is_empty() }

    /// Returns the widgets whose default size class is missing from `catalog`.
    #[must_use]
    pub fn unresolved_sizes<'a>(&'a self, catalog: &SizeCatalog) -> Vec<&'a WidgetMetadata> {
        self.widgets.iter().filter(|w| catalog.resolve(&w.size).is_err()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Span;

    fn widget(id: &str, size: &str) -> WidgetMetadata {
        WidgetMetadata {
            id: id.to_string(),
            slug: id.to_string(),
            name: id.to_string(),
            provider: "test".to_string(),
            creator: None,
            size: size.to_string(),
            description: None,
            refresh_interval_seconds: 0,
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = WidgetRegistry::new();
        assert!(registry.register(widget("a", "small")).is_none());
        assert!(registry.register(widget("b", "large")).is_none());

        assert_eq!(registry.get("b").unwrap().size, "large");
        assert!(registry.get("c").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = WidgetRegistry::new();
        registry.register(widget("a", "small"));
        registry.register(widget("b", "small"));

        let previous = registry.register(widget("a", "medium")).unwrap();
        assert_eq!(previous.size, "small");
        assert_eq!(registry.list()[0].size, "medium");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_system_registration_is_idempotent() {
        let mut registry = WidgetRegistry::with_system_widgets();
        let count = registry.len();
        assert!(count > 0);

        registry.register_system_widgets();
        assert_eq!(registry.len(), count);
        assert!(registry.get("system.time.simple").is_some());
    }

    #[test]
    fn test_unresolved_sizes() {
        let registry = WidgetRegistry::with_system_widgets();
        assert!(registry.unresolved_sizes(&SizeCatalog::default()).is_empty());

        let only_small = SizeCatalog::new([("small", Span::new(1, 1))]);
        assert!(!registry.unresolved_sizes(&only_small).is_empty());
    }
}
