//! Path helpers: tilde expansion and the default data directory.

use std::path::{Path, PathBuf};

use crate::constants::{APP_NAME, PLACEMENTS_DIR};

/// Expands a leading `~` to the user's home directory.
///
/// Absolute and relative paths are returned unchanged.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}

/// Expands `path` and resolves it against `base_dir` if it is still relative.
///
/// ```ignore
/// use std::path::Path;
/// use widgetbox_lib::paths::expand_and_resolve;
///
/// let resolved = expand_and_resolve("data", Path::new("/etc/widgetbox"));
/// assert_eq!(resolved, Path::new("/etc/widgetbox/data"));
/// ```
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

/// Default directory for placement files: `<data dir>/widgetbox/placements`.
///
/// Falls back to `./placements` when the platform has no data directory.
#[must_use]
pub fn default_placements_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(PLACEMENTS_DIR),
        |dir| dir.join(APP_NAME).join(PLACEMENTS_DIR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_empty_and_whitespace() {
        assert_eq!(expand(""), PathBuf::new());
        assert_eq!(expand("   "), PathBuf::new());
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand("~/widgets"), home.join("widgets"));
        }
    }

    #[test]
    fn test_expand_keeps_absolute_and_relative() {
        assert_eq!(expand("/var/lib/widgetbox"), PathBuf::from("/var/lib/widgetbox"));
        assert_eq!(expand("data/placements"), PathBuf::from("data/placements"));
    }

    #[test]
    fn test_expand_and_resolve() {
        let base = Path::new("/etc/widgetbox");
        assert_eq!(expand_and_resolve("data", base), PathBuf::from("/etc/widgetbox/data"));
        assert_eq!(expand_and_resolve("/srv/data", base), PathBuf::from("/srv/data"));
        assert_eq!(expand_and_resolve("", base), PathBuf::new());
    }

    #[test]
    fn test_default_placements_dir_ends_with_app_dirs() {
        let dir = default_placements_dir();
        assert!(dir.ends_with(PLACEMENTS_DIR));
    }
}
