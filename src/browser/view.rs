// src/browser/view.rs
// =============================================================================
// Read-time views over the browser state: breadcrumbs, display order and
// human-readable sizes. Nothing here is stored; callers derive these on
// demand from the current path and listing.
// =============================================================================

use serde::Serialize;
use std::cmp::Ordering;

use crate::github::DirectoryEntry;

/// One element of the breadcrumb row. Jumping to it means navigating to
/// `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

/// "a/b" -> [Root "", a "a", b "a/b"]
pub fn breadcrumbs(current_path: &str) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb {
        label: "Root".to_string(),
        path: String::new(),
    }];

    let mut prefix = String::new();
    for segment in current_path.split('/').filter(|s| !s.is_empty()) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        crumbs.push(Breadcrumb {
            label: segment.to_string(),
            path: prefix.clone(),
        });
    }

    crumbs
}

/// Sort entries: directories first, then by name ignoring case.
///
/// Names that differ only in case put the lowercase spelling first, the way
/// locale collation does.
pub fn sorted(entries: &[DirectoryEntry]) -> Vec<DirectoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name()
            .to_lowercase()
            .cmp(&b.name().to_lowercase())
            .then_with(|| b.name().cmp(a.name())),
    });
    sorted
}

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with 1024-based units, at most two decimals.
///
/// 0 -> "0 Bytes", 1536 -> "1.5 KB", 1048576 -> "1 MB"
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
