//! Public types for the visualization module.

use std::path::Path;

/// What a render call writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Single SVG of one metric.
    Svg,
    /// Self-contained HTML dashboard with one view per metric and switch buttons.
    Html,
}

impl OutputKind {
    /// Infer from the file extension; anything that is not `.svg` becomes HTML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => OutputKind::Svg,
            _ => OutputKind::Html,
        }
    }
}
