use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

const MONTHLY: &str = "\
city,year,month,actual_mean_temp,actual_min_temp,actual_max_temp,actual_precipitation
CLT,2014,7,80,70,90,1.2
IND,2014,7,75,65,85,0.5
";

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wxsm"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn render_writes_dashboard_scene_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("weather_data.csv");
    let out = dir.path().join("index.html");
    let scene = dir.path().join("scene.json");
    fs::write(&data, MONTHLY).unwrap();

    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--out")
        .arg(&out)
        .arg("--metric")
        .arg("min temp")
        .arg("--scene-json")
        .arg(&scene)
        .arg("--stats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CLT • min temp  count=1"));

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("<button").count(), 3);

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&scene).unwrap()).unwrap();
    assert_eq!(v["metric"], "min");
    assert_eq!(v["panels"].as_array().unwrap().len(), 12);
    assert_eq!(v["y_scale"]["domain"][1], 70.0);
}

#[test]
fn render_applies_config_file_and_locale() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("weather_data.csv");
    let layout = dir.path().join("layout.json");
    let out = dir.path().join("mean.svg");
    let scene = dir.path().join("scene.json");
    fs::write(&data, MONTHLY).unwrap();
    fs::write(&layout, r#"{ "columns": 3, "months": 6 }"#).unwrap();

    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--out")
        .arg(&out)
        .arg("--config")
        .arg(&layout)
        .arg("--locale")
        .arg("de")
        .arg("--scene-json")
        .arg(&scene);
    cmd.assert().success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&scene).unwrap()).unwrap();
    let panels = v["panels"].as_array().unwrap();
    assert_eq!(panels.len(), 6);
    assert_eq!(panels[3]["row"], 1);
    assert_eq!(panels[3]["col"], 0);
    // precipitation 0.5..1.2 -> ticks 0.6, 0.8, 1.0, 1.2 with a comma separator
    let labels: Vec<&str> = panels[0]["x_ticks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["0,6", "0,8", "1,0", "1,2"]);
    assert!(fs::read_to_string(&out).unwrap().contains("0,6"));
}

#[test]
fn render_rejects_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("weather_data.csv");
    let layout = dir.path().join("layout.json");
    fs::write(&data, MONTHLY).unwrap();
    fs::write(&layout, r#"{ "columns": 0 }"#).unwrap();

    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--out")
        .arg(dir.path().join("x.svg"))
        .arg("--config")
        .arg(&layout);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("columns must be > 0"));
    assert!(!dir.path().join("x.svg").exists());
}

#[test]
fn render_fails_on_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(dir.path().join("absent.csv"))
        .arg("--out")
        .arg(dir.path().join("x.svg"));
    cmd.assert().failure();
    assert!(!dir.path().join("x.svg").exists());
}

#[test]
fn render_rejects_unknown_metric() {
    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.args(["render", "--data", "d.csv", "--out", "o.svg", "--metric", "median"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown metric"));
}

#[test]
fn combine_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let daily = dir.path().join("JAX.csv");
    fs::write(
        &daily,
        "date,actual_mean_temp,actual_min_temp,actual_max_temp,actual_precipitation\n\
         2014-7-1,80,70,90,0.2\n2014-7-2,82,72,92,0.4\n",
    )
    .unwrap();
    let out = dir.path().join("combined.json");

    let mut cmd = Command::cargo_bin("wxsm").unwrap();
    cmd.arg("combine").arg("--inputs").arg(&daily).arg("--out").arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved 1 rows"));

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["city"], "JAX");
    assert_eq!(rows[0]["actual_mean_temp"], 81.0);
}
