//! Filesystem utility functions used across the crate.

use std::path::Path;

/// Directory that holds `path`. A bare file name lives in `.`.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
