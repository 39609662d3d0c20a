//! Pure projection of the dataset onto canvas geometry.
//!
//! [`project`] turns `(records, state, config)` into a [`Scene`]: every panel, point,
//! tick and legend row with its pixel position. Nothing here touches a drawing
//! backend, so the scene can be inspected, serialized or handed to any renderer.
//!
//! Switching the metric goes through [`Scene::redraw`], which only rewrites the
//! y-domain, the y-ticks and each point's `cy`. Points keep the record index they were
//! bound to, so each panel keeps its own subset across redraws.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::layout::{grid_position, month_sequence, panel_origin};
use super::legend::{CityPalette, LegendEntry, legend_entries};
use super::scale::LinearScale;
use super::util::{Rgb8, format_tick};
use crate::config::DashboardConfig;
use crate::models::{AppState, Metric, MonthKey, WeatherRecord};
use crate::stats::{metric_max, month_indices, precipitation_extent};

/// Axis tick: data value, label, and pixel offset along the axis (panel-local).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
    pub pos: f64,
}

/// A plotted record. `cx`/`cy` are panel-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Index into the record slice the scene was projected from.
    pub record: usize,
    pub city: String,
    pub cx: f64,
    pub cy: f64,
    pub color: Rgb8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub key: MonthKey,
    pub caption: String,
    pub row: usize,
    pub col: usize,
    /// Canvas pixel of the plotting area's top-left corner.
    pub origin: (i32, i32),
    pub points: Vec<PlotPoint>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub title_pos: (i32, i32),
    pub metric: Metric,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub panel_width: i32,
    pub panel_height: i32,
    pub x_label: String,
    pub y_label: String,
    /// Gap between a panel's top edge and its caption.
    pub caption_offset: i32,
    pub point_radius: u32,
    pub legend_dot_radius: u32,
    pub panels: Vec<Panel>,
    pub legend: Vec<LegendEntry>,
    y_ticks_hint: usize,
    locale: String,
}

/// Project `records` for the metric selected in `state`.
pub fn project(
    records: &[WeatherRecord],
    state: &AppState,
    cfg: &DashboardConfig,
) -> Result<Scene> {
    cfg.validate()?;
    let palette = CityPalette::new(cfg, records)?;
    let pw = cfg.panel_width();
    let ph = cfg.panel_height();

    let x_domain = precipitation_extent(records).unwrap_or_else(|| {
        log::warn!("no finite precipitation values; using x domain [0, 1]");
        (0.0, 1.0)
    });
    let x_scale = LinearScale::new(x_domain, (0.0, pw as f64));
    let x_step = x_scale.tick_step(cfg.x_ticks);
    let x_ticks: Vec<Tick> = x_scale
        .ticks(cfg.x_ticks)
        .into_iter()
        .map(|v| Tick {
            value: v,
            label: format_tick(v, x_step, &cfg.locale),
            pos: x_scale.map(v),
        })
        .collect();

    let panels = month_sequence(cfg.start, cfg.months)
        .into_iter()
        .enumerate()
        .map(|(i, key)| {
            let (row, col) = grid_position(i, cfg.columns as usize);
            let points = month_indices(records, key)
                .into_iter()
                .map(|ri| {
                    let r = &records[ri];
                    PlotPoint {
                        record: ri,
                        city: r.city.clone(),
                        cx: x_scale.map(r.actual_precipitation),
                        cy: f64::NAN,
                        color: palette.color(&r.city),
                    }
                })
                .collect();
            Panel {
                key,
                caption: key.caption(),
                row,
                col,
                origin: panel_origin(cfg, i),
                points,
                x_ticks: x_ticks.clone(),
                y_ticks: Vec::new(),
            }
        })
        .collect();

    let mut scene = Scene {
        width: cfg.full_width(),
        height: cfg.full_height(),
        title: cfg.title.clone(),
        title_pos: ((cfg.full_width() / 2) as i32, (cfg.margin.top / 2) as i32),
        metric: state.selected_metric,
        x_scale,
        y_scale: LinearScale::new((0.0, 1.0), (ph as f64, 0.0)),
        panel_width: pw,
        panel_height: ph,
        x_label: cfg.x_label.clone(),
        y_label: cfg.y_label.clone(),
        caption_offset: (cfg.margin.top / 4) as i32,
        point_radius: cfg.point_radius,
        legend_dot_radius: cfg.legend_dot_radius,
        panels,
        legend: legend_entries(cfg, &palette),
        y_ticks_hint: cfg.y_ticks,
        locale: cfg.locale.clone(),
    };
    scene.apply_metric(records, state.selected_metric);
    log::debug!(
        "projected {} panels, {} points, metric {}",
        scene.panels.len(),
        scene.point_count(),
        scene.metric
    );
    Ok(scene)
}

impl Scene {
    /// A copy of this scene re-projected for `state.selected_metric`.
    ///
    /// `records` must be the slice the scene was projected from.
    pub fn redraw(&self, records: &[WeatherRecord], state: &AppState) -> Scene {
        let mut next = self.clone();
        next.apply_metric(records, state.selected_metric);
        next
    }

    fn apply_metric(&mut self, records: &[WeatherRecord], metric: Metric) {
        let max = metric_max(records, metric).unwrap_or_else(|| {
            log::warn!("no finite `{}` values; using y domain [0, 1]", metric.column());
            1.0
        });
        self.metric = metric;
        self.y_scale = LinearScale::new((0.0, max), (self.panel_height as f64, 0.0));

        let step = self.y_scale.tick_step(self.y_ticks_hint);
        let y_ticks: Vec<Tick> = self
            .y_scale
            .ticks(self.y_ticks_hint)
            .into_iter()
            .map(|v| Tick {
                value: v,
                label: format_tick(v, step, &self.locale),
                pos: self.y_scale.map(v),
            })
            .collect();

        let y_scale = self.y_scale;
        for panel in &mut self.panels {
            for p in &mut panel.points {
                p.cy = records
                    .get(p.record)
                    .map(|r| y_scale.map(metric.value(r)))
                    .unwrap_or(f64::NAN);
            }
            panel.y_ticks = y_ticks.clone();
        }
    }

    /// Upper bound of the current vertical domain.
    pub fn y_max(&self) -> f64 {
        self.y_scale.domain.1
    }

    pub fn point_count(&self) -> usize {
        self.panels.iter().map(|p| p.points.len()).sum()
    }

    pub fn panel(&self, key: MonthKey) -> Option<&Panel> {
        self.panels.iter().find(|p| p.key == key)
    }
}
