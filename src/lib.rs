//! wxsm_rs
//!
//! Monthly weather small multiples: one scatter panel per month plotting precipitation
//! against a selectable temperature metric (mean/min/max) for several cities, with a
//! shared color legend. Pairs with the `wxsm` CLI.
//!
//! ### Features
//! - Load the combined monthly CSV (`city, year, month, actual_*`)
//! - Aggregate per-city daily CSVs into that monthly table
//! - Project the data into a backend-free [`viz::Scene`] and redraw it per metric
//! - Write a single-metric SVG or a self-contained HTML dashboard with metric buttons
//!
//! ### Example
//! ```no_run
//! use wxsm_rs::{AppState, DashboardConfig, Metric};
//!
//! let records = wxsm_rs::storage::load_csv("data/weather_data.csv")?;
//! let cfg = DashboardConfig::default();
//! wxsm_rs::viz::plot_to_path(&records, "dashboard.html", &AppState::default(), &cfg)?;
//! wxsm_rs::viz::plot_to_path(&records, "max.svg", &AppState::new(Metric::Max), &cfg)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod combine;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::DashboardConfig;
pub use error::DashboardError;
pub use models::{AppState, Metric, MonthKey, WeatherRecord};
