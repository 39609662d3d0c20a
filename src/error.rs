use thiserror::Error;

/// Errors raised by this crate before anything is drawn.
///
/// Rendering and I/O failures are reported through `anyhow` with context attached;
/// these variants cover the cases callers may want to match on.
#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("unknown metric `{0}` (expected mean, min or max)")]
    UnknownMetric(String),

    #[error("input is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
