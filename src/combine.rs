//! Daily-to-monthly preprocessing.
//!
//! Each input is one city's daily observations (`date`, `actual_mean_temp`,
//! `actual_min_temp`, `actual_max_temp`, `actual_precipitation`). Rows are grouped by
//! calendar month and averaged; the city code is taken from the file stem, so
//! `data/CLT.csv` yields records for `CLT`.

use crate::error::DashboardError;
use crate::models::{MonthKey, WeatherRecord};
use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DAILY_COLUMNS: [&str; 5] = [
    "date",
    "actual_mean_temp",
    "actual_min_temp",
    "actual_max_temp",
    "actual_precipitation",
];

/// Running sums of one month; NaN observations are left out of both sum and count.
#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: [f64; 4],
    n: [usize; 4],
}

impl MeanAcc {
    fn push(&mut self, values: [f64; 4]) {
        for (i, v) in values.into_iter().enumerate() {
            if !v.is_nan() {
                self.sum[i] += v;
                self.n[i] += 1;
            }
        }
    }

    fn mean(&self, i: usize) -> f64 {
        if self.n[i] == 0 {
            f64::NAN
        } else {
            self.sum[i] / self.n[i] as f64
        }
    }
}

/// Parse `2014-7-1` / `2014-07-01`, falling back to `7/1/2014`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

/// Daily observation; blank and unparseable cells are missing (NaN) and stay out of the mean.
fn parse_daily(text: &str, column: &str, line: usize) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return f64::NAN;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::warn!("line {line}: `{column}` value {t:?} is not a number");
            f64::NAN
        }
    }
}

/// Monthly means of one city's daily file.
pub fn monthly_means<P: AsRef<Path>>(path: P) -> Result<Vec<WeatherRecord>> {
    let path = path.as_ref();
    let city = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("cannot derive a city code from {}", path.display()))?
        .to_string();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let out = monthly_means_from_reader(file, &city)
        .with_context(|| format!("aggregating {}", path.display()))?;
    log::info!("{city}: {} monthly rows from {}", out.len(), path.display());
    Ok(out)
}

/// Monthly means of daily rows read from `rdr`, labelled with `city`.
pub fn monthly_means_from_reader<R: Read>(rdr: R, city: &str) -> Result<Vec<WeatherRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    let headers = rdr.headers()?.clone();
    let mut idx = [0usize; 5];
    for (slot, name) in DAILY_COLUMNS.iter().enumerate() {
        idx[slot] = headers
            .iter()
            .position(|h| h == *name)
            .ok_or(DashboardError::MissingColumn(*name))?;
    }

    let mut months: BTreeMap<MonthKey, MeanAcc> = BTreeMap::new();
    for (row_no, row) in rdr.records().enumerate() {
        let row = row?;
        let line = row_no + 2;
        let field = |i: usize| row.get(idx[i]).unwrap_or("");
        let Some(date) = parse_date(field(0)) else {
            log::warn!("{city} line {line}: skipping unparseable date {:?}", field(0));
            continue;
        };
        let values = [
            parse_daily(field(1), DAILY_COLUMNS[1], line),
            parse_daily(field(2), DAILY_COLUMNS[2], line),
            parse_daily(field(3), DAILY_COLUMNS[3], line),
            parse_daily(field(4), DAILY_COLUMNS[4], line),
        ];
        months
            .entry(MonthKey::new(date.year(), date.month()))
            .or_default()
            .push(values);
    }

    Ok(months
        .into_iter()
        .map(|(key, acc)| WeatherRecord {
            city: city.to_string(),
            year: key.year,
            month: key.month,
            actual_mean_temp: acc.mean(0),
            actual_min_temp: acc.mean(1),
            actual_max_temp: acc.mean(2),
            actual_precipitation: acc.mean(3),
        })
        .collect())
}

/// Aggregate several city files and concatenate them in input order.
pub fn combine_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<WeatherRecord>> {
    let mut all = Vec::new();
    for p in paths {
        all.extend(monthly_means(p)?);
    }
    Ok(all)
}
