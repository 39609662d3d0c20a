use crate::error::DashboardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temperature variant mapped to the vertical axis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Mean,
    Min,
    Max,
}

impl Metric {
    /// Button order of the dashboard.
    pub const ALL: [Metric; 3] = [Metric::Mean, Metric::Min, Metric::Max];

    /// Column name in the input CSV.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Mean => "actual_mean_temp",
            Metric::Min => "actual_min_temp",
            Metric::Max => "actual_max_temp",
        }
    }

    /// Human label: `actual_` prefix stripped, first underscore turned into a space.
    pub fn label(self) -> String {
        let col = self.column();
        col.strip_prefix("actual_").unwrap_or(col).replacen('_', " ", 1)
    }

    pub fn value(self, record: &WeatherRecord) -> f64 {
        match self {
            Metric::Mean => record.actual_mean_temp,
            Metric::Min => record.actual_min_temp,
            Metric::Max => record.actual_max_temp,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    /// Accepts `mean`, `mean temp`, `mean_temp` or the full column name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(' ', "_");
        let norm = norm.strip_prefix("actual_").unwrap_or(&norm);
        let norm = norm.strip_suffix("_temp").unwrap_or(norm);
        match norm {
            "mean" => Ok(Metric::Mean),
            "min" => Ok(Metric::Min),
            "max" => Ok(Metric::Max),
            _ => Err(DashboardError::UnknownMetric(s.to_string())),
        }
    }
}

/// One row of the combined monthly dataset.
///
/// `year`/`month` that failed to parse are stored as `0`, which matches no panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    pub year: i32,
    pub month: u32,
    pub actual_mean_temp: f64,
    pub actual_min_temp: f64,
    pub actual_max_temp: f64,
    pub actual_precipitation: f64,
}

impl WeatherRecord {
    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }
}

/// A (year, month) panel bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The following calendar month.
    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Panel caption such as `July 2014`.
    pub fn caption(self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.year, self.month),
        }
    }
}

/// City code and display name used by the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityName {
    pub code: String,
    pub name: String,
}

impl CityName {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Mutable view state; changed only by a metric button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub selected_metric: Metric,
}

impl AppState {
    pub fn new(selected_metric: Metric) -> Self {
        Self { selected_metric }
    }

    pub fn select(&mut self, metric: Metric) {
        self.selected_metric = metric;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_labels_match_buttons() {
        let labels: Vec<String> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["mean temp", "min temp", "max temp"]);
    }

    #[test]
    fn metric_parses_loose_names() {
        assert_eq!("actual_min_temp".parse::<Metric>().unwrap(), Metric::Min);
        assert_eq!("Max Temp".parse::<Metric>().unwrap(), Metric::Max);
        assert_eq!("mean".parse::<Metric>().unwrap(), Metric::Mean);
        assert!(matches!(
            "median".parse::<Metric>(),
            Err(DashboardError::UnknownMetric(_))
        ));
    }

    #[test]
    fn month_key_rolls_over_year() {
        assert_eq!(MonthKey::new(2014, 12).succ(), MonthKey::new(2015, 1));
        assert_eq!(MonthKey::new(2014, 7).caption(), "July 2014");
    }
}
