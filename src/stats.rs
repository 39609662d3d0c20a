use crate::models::{Metric, MonthKey, WeatherRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records of one panel bucket, in input order.
pub fn filter_month(records: &[WeatherRecord], key: MonthKey) -> Vec<&WeatherRecord> {
    records.iter().filter(|r| r.month_key() == key).collect()
}

/// Indices (into `records`) of one panel bucket, in input order.
pub fn month_indices(records: &[WeatherRecord], key: MonthKey) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.month_key() == key)
        .map(|(i, _)| i)
        .collect()
}

/// Largest finite value of `metric` over the whole dataset. NaN rows are skipped.
pub fn metric_max(records: &[WeatherRecord], metric: Metric) -> Option<f64> {
    records
        .iter()
        .map(|r| metric.value(r))
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// (min, max) of precipitation over the whole dataset. NaN rows are skipped.
pub fn precipitation_extent(records: &[WeatherRecord]) -> Option<(f64, f64)> {
    records
        .iter()
        .map(|r| r.actual_precipitation)
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Summary statistics for one city and metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub city: String,
    pub metric: Metric,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Per-city statistics of `metric`, sorted by city code.
pub fn city_summary(records: &[WeatherRecord], metric: Metric) -> Vec<Summary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut missing: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        let v = metric.value(r);
        let vals = groups.entry(r.city.as_str()).or_default();
        if v.is_nan() {
            *missing.entry(r.city.as_str()).or_default() += 1;
        } else {
            vals.push(v);
        }
    }

    let mut out = Vec::new();
    for (city, mut vals) in groups {
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            city: city.to_string(),
            metric,
            count,
            missing: missing.get(city).cloned().unwrap_or(0),
            min,
            max,
            mean,
            median,
        });
    }
    out
}
