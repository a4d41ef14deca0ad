//! Built-in system widgets.

use super::WidgetMetadata;

const PROVIDER: &str = "system";
const CREATOR: &str = "widget-box";

fn system_widget(
    id: &str,
    name: &str,
    size: &str,
    description: &str,
    refresh_interval_seconds: u32,
) -> WidgetMetadata {
    WidgetMetadata {
        id: id.to_string(),
        slug: id.trim_start_matches("system.").to_string(),
        name: name.to_string(),
        provider: PROVIDER.to_string(),
        creator: Some(CREATOR.to_string()),
        size: size.to_string(),
        description: Some(description.to_string()),
        refresh_interval_seconds,
    }
}

/// Returns the definitions of the widgets shipped with the application.
#[must_use]
pub fn system_widgets() -> Vec<WidgetMetadata> {
    vec![
        system_widget(
            "system.time.simple",
            "Simple Clock",
            "small",
            "A clean digital clock display",
            60,
        ),
        system_widget(
            "system.weather.simple",
            "Weather",
            "medium",
            "Current weather conditions",
            300,
        ),
        system_widget(
            "system.calendar.simple",
            "Calendar",
            "large",
            "Today's date and upcoming events",
            3600,
        ),
        system_widget(
            "system.notes.simple",
            "Quick Notes",
            "medium",
            "Take quick notes and reminders",
            0,
        ),
        system_widget(
            "system.stats.simple",
            "System Stats",
            "small",
            "CPU, memory, and system information",
            30,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_widget_ids_are_unique() {
        let widgets = system_widgets();
        let mut ids: Vec<_> = widgets.iter().map(|w| w.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), widgets.len());
    }

    #[test]
    fn test_slug_drops_provider_prefix() {
        let clock = &system_widgets()[0];
        assert_eq!(clock.slug, "time.simple");
        assert_eq!(clock.provider, "system");
    }
}
