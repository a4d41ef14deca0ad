//! JSON Schema for the configuration file.

use crate::config::WidgetboxConfig;

/// Generates the JSON Schema of [`WidgetboxConfig`].
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(WidgetboxConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!("widgetbox.schema.json"));
    }

    schema
}

/// Returns the schema as pretty-printed JSON.
#[must_use]
pub fn print_schema() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json_with_sections() {
        let parsed: serde_json::Value = serde_json::from_str(&print_schema()).unwrap();

        assert_eq!(parsed["$id"], "widgetbox.schema.json");
        assert_eq!(parsed["title"], "WidgetboxConfig");
        for section in ["grid", "sizes", "storage", "drag"] {
            assert!(parsed["properties"][section].is_object(), "missing {section}");
        }
    }
}
