use std::fs;
use wxsm_rs::viz::{self, OutputKind};
use wxsm_rs::{AppState, DashboardConfig, Metric, WeatherRecord};

fn sample_records() -> Vec<WeatherRecord> {
    let mut out = Vec::new();
    for (city, mean, precip) in [("CLT", 80.0, 1.2), ("IND", 75.0, 0.5), ("JAX", 83.0, 2.4)] {
        for month in [7, 8] {
            out.push(WeatherRecord {
                city: city.into(),
                year: 2014,
                month,
                actual_mean_temp: mean,
                actual_min_temp: mean - 10.0,
                actual_max_temp: mean + 10.0,
                actual_precipitation: precip,
            });
        }
    }
    out
}

#[test]
fn svg_has_points_captions_and_legend() {
    let records = sample_records();
    let cfg = DashboardConfig::default();
    let svg = viz::render_svg(&records, &AppState::default(), &cfg).unwrap();

    assert!(svg.contains("<svg"));
    // 6 data points + 4 legend dots
    assert_eq!(svg.matches("<circle").count(), 10);
    assert!(svg.contains("July 2014"));
    assert!(svg.contains("June 2015"));
    assert!(svg.contains("Charlotte"));
    assert!(svg.contains("Jacksonville"));
    assert!(svg.contains("Precipitation (in)"));
    assert!(svg.contains(&cfg.title));
    assert!(svg.to_lowercase().contains("#1f77b4"));
}

#[test]
fn nan_points_are_skipped() {
    let mut records = sample_records();
    records[0].actual_mean_temp = f64::NAN;
    let svg = viz::render_svg(&records, &AppState::default(), &DashboardConfig::default()).unwrap();
    assert_eq!(svg.matches("<circle").count(), 9);
}

#[test]
fn dashboard_embeds_one_view_per_metric() {
    let records = sample_records();
    let html = viz::render_dashboard(&records, &AppState::new(Metric::Max), &DashboardConfig::default())
        .unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("id=\"my_dataviz\""));
    assert_eq!(html.matches("<svg").count(), 3);
    for label in ["mean temp", "min temp", "max temp"] {
        assert!(html.contains(&format!(">{label}</button>")));
    }
    assert!(html.contains("class=\"view active\" data-metric=\"actual_max_temp\""));

    // Same circles in every view, so the switch can slide points between them.
    let counts: Vec<usize> = html
        .split("<div class=\"view")
        .skip(2) // page head, then the `views` wrapper
        .map(|view| view.matches("<circle").count())
        .collect();
    assert_eq!(counts, vec![10, 10, 10]);
}

#[test]
fn output_kind_follows_extension() {
    let records = sample_records();
    let cfg = DashboardConfig::default();
    let dir = tempfile::tempdir().unwrap();

    let svg_path = dir.path().join("mean.SVG");
    let kind = viz::plot_to_path(&records, &svg_path, &AppState::default(), &cfg).unwrap();
    assert_eq!(kind, OutputKind::Svg);
    assert!(fs::read_to_string(&svg_path).unwrap().contains("<svg"));

    let html_path = dir.path().join("dash.html");
    let kind = viz::plot_to_path(&records, &html_path, &AppState::default(), &cfg).unwrap();
    assert_eq!(kind, OutputKind::Html);
    assert!(fs::metadata(&html_path).unwrap().len() > 0);
}

#[test]
fn bad_config_is_rejected_before_drawing() {
    let cfg = DashboardConfig {
        columns: 0,
        ..Default::default()
    };
    assert!(viz::render_svg(&sample_records(), &AppState::default(), &cfg).is_err());
}
