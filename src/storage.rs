use crate::error::DashboardError;
use crate::models::WeatherRecord;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Columns every input file must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "city",
    "year",
    "month",
    "actual_mean_temp",
    "actual_min_temp",
    "actual_max_temp",
    "actual_precipitation",
];

/// Load the combined monthly dataset from a CSV file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<WeatherRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records =
        load_reader(file).with_context(|| format!("reading weather data {}", path.display()))?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse CSV text from any reader. Column order is free.
pub fn load_reader<R: Read>(rdr: R) -> Result<Vec<WeatherRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    let headers = rdr.headers()?.clone();
    let idx = column_indices(&headers)?;

    let mut out = Vec::new();
    for (row_no, row) in rdr.records().enumerate() {
        let row = row?;
        let line = row_no + 2; // header is line 1
        let field = |i: usize| row.get(idx[i]).unwrap_or("");
        out.push(WeatherRecord {
            city: field(0).to_string(),
            year: parse_int(field(1), "year", line),
            month: parse_int(field(2), "month", line).max(0) as u32,
            actual_mean_temp: parse_number(field(3), REQUIRED_COLUMNS[3], line),
            actual_min_temp: parse_number(field(4), REQUIRED_COLUMNS[4], line),
            actual_max_temp: parse_number(field(5), REQUIRED_COLUMNS[5], line),
            actual_precipitation: parse_number(field(6), REQUIRED_COLUMNS[6], line),
        });
    }
    Ok(out)
}

fn column_indices(headers: &StringRecord) -> Result<[usize; 7], DashboardError> {
    let mut idx = [0usize; 7];
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        idx[slot] = headers
            .iter()
            .position(|h| h == *name)
            .ok_or(DashboardError::MissingColumn(*name))?;
    }
    Ok(idx)
}

/// Text to number the way a unary `+` coerces: blank is 0, garbage is NaN.
pub fn parse_number(text: &str, column: &str, line: usize) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() || is_infinity_literal(t) => v,
        _ => {
            log::warn!("line {line}: `{column}` value {t:?} is not a number");
            f64::NAN
        }
    }
}

/// `f64::from_str` also takes `inf`/`nan` in any case. Only `Infinity` (optionally signed)
/// or a numeric literal that overflows, such as `1e400`, may yield an infinity.
fn is_infinity_literal(t: &str) -> bool {
    let body = t.strip_prefix(['+', '-']).unwrap_or(t);
    body == "Infinity" || body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Non-finite values are written as empty cells.
fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Integer field; accepts `7` and `7.0`. Anything else becomes 0 and never matches a panel.
pub fn parse_int(text: &str, column: &str, line: usize) -> i32 {
    let t = text.trim();
    if let Ok(v) = t.parse::<i32>() {
        return v;
    }
    let v = parse_number(t, column, line);
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 {
        v as i32
    } else {
        if v.is_finite() {
            log::warn!("line {line}: `{column}` value {t:?} is not an integer");
        }
        0
    }
}

/// Save records as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[WeatherRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.serialize((
        "year",
        "month",
        "actual_precipitation",
        "actual_mean_temp",
        "actual_min_temp",
        "actual_max_temp",
        "city",
    ))?;
    for r in records {
        wtr.serialize((
            r.year,
            r.month,
            finite(r.actual_precipitation),
            finite(r.actual_mean_temp),
            finite(r.actual_min_temp),
            finite(r.actual_max_temp),
            &r.city,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[WeatherRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let recs = vec![WeatherRecord {
            city: "CLT".into(),
            year: 2014,
            month: 7,
            actual_mean_temp: 80.0,
            actual_min_temp: 70.0,
            actual_max_temp: 90.0,
            actual_precipitation: 1.2,
        }];
        save_csv(&recs, &csvp).unwrap();
        save_json(&recs, &jsonp).unwrap();
        assert_eq!(load_csv(&csvp).unwrap(), recs);
        assert!(jsonp.exists());
    }

    #[test]
    fn missing_means_are_written_as_empty_cells() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let recs = vec![WeatherRecord {
            city: "JAX".into(),
            year: 2014,
            month: 8,
            actual_mean_temp: 77.0,
            actual_min_temp: 66.0,
            actual_max_temp: f64::NAN,
            actual_precipitation: f64::NAN,
        }];
        save_csv(&recs, &csvp).unwrap();
        let text = std::fs::read_to_string(&csvp).unwrap();
        assert!(text.contains("2014,8,,77.0,66.0,,JAX"), "{text}");
        // Read back the way the chart reads them: blank becomes 0.
        let back = load_csv(&csvp).unwrap();
        assert_eq!(back[0].actual_max_temp, 0.0);
        assert_eq!(back[0].actual_precipitation, 0.0);
    }

    #[test]
    fn blank_and_garbage_numbers() {
        assert_eq!(parse_number("  ", "x", 2), 0.0);
        assert_eq!(parse_number("1.25", "x", 2), 1.25);
        assert!(parse_number("n/a", "x", 2).is_nan());
        assert!(parse_number("inf", "x", 2).is_nan());
        assert!(parse_number("NaN", "x", 2).is_nan());
        assert!(parse_number("infinity", "x", 2).is_nan());
        assert_eq!(parse_number("Infinity", "x", 2), f64::INFINITY);
        assert_eq!(parse_number("-Infinity", "x", 2), f64::NEG_INFINITY);
        assert_eq!(parse_number("1e400", "x", 2), f64::INFINITY);
        assert_eq!(parse_int("7.0", "month", 2), 7);
        assert_eq!(parse_int("7.5", "month", 2), 0);
        assert_eq!(parse_int("July", "month", 2), 0);
    }
}
