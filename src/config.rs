//! Layout and style settings for the dashboard.
//!
//! Every constant the renderer needs lives in [`DashboardConfig`]. The defaults give
//! the 4×3 layout (280 px panels, July 2014 to June 2015). A JSON file can
//! override any subset of fields:
//!
//! ```no_run
//! let cfg = wxsm_rs::config::load_config("layout.json")?;
//! assert!(cfg.full_width() > 0);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::DashboardError;
use crate::models::{CityName, MonthKey};
use crate::viz::util::Rgb8;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// d3 `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 150,
            right: 100,
            bottom: 20,
            left: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub margin: Margin,
    /// Size of one grid cell (panel plus its gutters).
    pub grid_size: u32,
    pub columns: u32,
    pub start: MonthKey,
    pub months: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub point_radius: u32,
    /// Tick count hints, d3 semantics.
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// Legend column x, measured from `margin.left + margin.right`.
    pub legend_offset_x: i32,
    /// First legend row y, measured from `margin.top`.
    pub legend_top: i32,
    pub legend_spacing: i32,
    pub legend_dot_radius: u32,
    pub transition_ms: u32,
    /// Tick label locale tag, see [`map_locale`](crate::viz::util::map_locale).
    pub locale: String,
    pub cities: Vec<CityName>,
    pub palette: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            grid_size: 280,
            columns: 4,
            start: MonthKey::new(2014, 7),
            months: 12,
            title: "Temperature and Precipitation Trends from July 2014 to June 2015".into(),
            x_label: "Precipitation (in)".into(),
            y_label: "Temperature (°F)".into(),
            point_radius: 4,
            x_ticks: 3,
            y_ticks: 3,
            legend_offset_x: 900,
            legend_top: 110,
            legend_spacing: 25,
            legend_dot_radius: 7,
            transition_ms: 500,
            locale: "en".into(),
            cities: vec![
                CityName::new("CLT", "Charlotte"),
                CityName::new("CQT", "Los Angeles"),
                CityName::new("IND", "Indianapolis"),
                CityName::new("JAX", "Jacksonville"),
            ],
            palette: CATEGORY10.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Number of grid rows needed for `months` panels.
    pub fn rows(&self) -> u32 {
        self.months.div_ceil(self.columns.max(1))
    }

    pub fn panel_width(&self) -> i32 {
        self.grid_size as i32 - self.margin.left as i32 - self.margin.right as i32
    }

    pub fn panel_height(&self) -> i32 {
        self.grid_size as i32 - self.margin.top as i32 - self.margin.bottom as i32
    }

    pub fn full_width(&self) -> u32 {
        self.grid_size * self.columns + self.margin.left + self.margin.right
    }

    pub fn full_height(&self) -> u32 {
        self.grid_size * self.rows() + self.margin.top + self.margin.bottom
    }

    /// Palette parsed into colors; fails on the first malformed entry.
    pub fn palette_colors(&self) -> Result<Vec<Rgb8>, DashboardError> {
        self.palette.iter().map(|s| Rgb8::from_hex(s)).collect()
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.columns == 0 {
            return Err(DashboardError::InvalidConfig("columns must be > 0".into()));
        }
        if self.months == 0 {
            return Err(DashboardError::InvalidConfig("months must be > 0".into()));
        }
        if !(1..=12).contains(&self.start.month) {
            return Err(DashboardError::InvalidConfig(format!(
                "start month {} is outside 1..=12",
                self.start.month
            )));
        }
        if self.panel_width() <= 0 || self.panel_height() <= 0 {
            return Err(DashboardError::InvalidConfig(
                "grid_size is too small for the margins".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(DashboardError::InvalidConfig("palette is empty".into()));
        }
        self.palette_colors()?;
        Ok(())
    }
}

/// Read a (possibly partial) JSON config and validate it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: DashboardConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()?;
    log::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
