//! Visualization: project the dataset into a [`Scene`] and paint it as **SVG**, or wrap
//! one SVG per metric into an **HTML** dashboard with metric buttons.
//!
//! - One panel per month in a fixed grid (4 columns by default)
//! - Shared x domain (precipitation extent) and y domain (`[0, max(metric)]`)
//! - d3-style tick values and locale-aware tick labels
//! - City colors from an ordinal Category10 mapping, shared legend column

pub mod html;
pub mod layout;
pub mod legend;
pub mod scale;
pub mod scene;
pub mod text;
pub mod types;
pub mod util;

pub use scene::{Panel, PlotPoint, Scene, Tick, project};
pub use types::OutputKind;

use crate::config::DashboardConfig;
use crate::models::{AppState, Metric, WeatherRecord};
use anyhow::{Context, Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};

use plotters_svg::SVGBackend;

use std::fs;
use std::path::Path;

use legend::draw_legend;

const TITLE_FONT_PX: u32 = 24;
const CAPTION_FONT_PX: u32 = 12;
const TICK_FONT_PX: u32 = 10;
/// Distance of the x-axis title below the axis, and of the y-axis title left of it.
const AXIS_TITLE_OFFSET_PX: i32 = 35;
const Y_TITLE_OFFSET_PX: i32 = 45;

/// Render the metric selected in `state` as an SVG document.
pub fn render_svg(
    records: &[WeatherRecord],
    state: &AppState,
    cfg: &DashboardConfig,
) -> Result<String> {
    let scene = project(records, state, cfg)?;
    scene_to_svg(&scene)
}

/// Render the full dashboard: one view per metric, `state` picks the one shown first.
pub fn render_dashboard(
    records: &[WeatherRecord],
    state: &AppState,
    cfg: &DashboardConfig,
) -> Result<String> {
    let base = project(records, state, cfg)?;
    let mut views = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        let mut view_state = *state;
        view_state.select(metric);
        let scene = base.redraw(records, &view_state);
        views.push((metric, scene_to_svg(&scene)?));
    }
    Ok(html::dashboard_page(
        &cfg.title,
        &views,
        state.selected_metric,
        cfg.transition_ms,
    ))
}

/// Write an SVG (`.svg`) or the HTML dashboard (any other extension) to `out_path`.
pub fn plot_to_path<P: AsRef<Path>>(
    records: &[WeatherRecord],
    out_path: P,
    state: &AppState,
    cfg: &DashboardConfig,
) -> Result<OutputKind> {
    let out_path = out_path.as_ref();
    let kind = OutputKind::from_path(out_path);
    let doc = match kind {
        OutputKind::Svg => render_svg(records, state, cfg)?,
        OutputKind::Html => render_dashboard(records, state, cfg)?,
    };
    fs::write(out_path, doc).with_context(|| format!("writing {}", out_path.display()))?;
    log::info!("wrote {:?} output to {}", kind, out_path.display());
    Ok(kind)
}

/// Paint a projected scene into an SVG string.
pub fn scene_to_svg(scene: &Scene) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (scene.width, scene.height)).into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(buf)
}

/// Paint a scene onto any Plotters backend.
pub fn draw_scene<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let title_style = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(scene.title.clone(), scene.title_pos, title_style))
        .map_err(|e| anyhow!("{:?}", e))?;

    for panel in &scene.panels {
        draw_panel(root, scene, panel)?;
    }

    draw_legend(root, &scene.legend, scene.legend_dot_radius)
}

fn line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    from: (i32, i32),
    to: (i32, i32),
    style: ShapeStyle,
) -> Result<()> {
    area.draw(&PathElement::new(vec![from, to], style))
        .map_err(|e| anyhow!("{:?}", e))
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene,
    panel: &Panel,
) -> Result<()> {
    let (ox, oy) = panel.origin;
    let (w, h) = (scene.panel_width, scene.panel_height);
    let grid = BLACK.mix(0.15).stroke_width(1);
    let axis = BLACK.stroke_width(1);

    // Grid lines span the panel like d3's negative tick size.
    for t in &panel.x_ticks {
        let x = ox + t.pos.round() as i32;
        line(area, (x, oy), (x, oy + h), grid)?;
    }
    for t in &panel.y_ticks {
        let y = oy + t.pos.round() as i32;
        line(area, (ox, y), (ox + w, y), grid)?;
    }
    line(area, (ox, oy + h), (ox + w, oy + h), axis)?;
    line(area, (ox, oy), (ox, oy + h), axis)?;

    let x_tick_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Top));
    for t in &panel.x_ticks {
        let at = (ox + t.pos.round() as i32, oy + h + 6);
        area.draw(&Text::new(t.label.clone(), at, x_tick_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    let y_tick_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX))
        .pos(Pos::new(HPos::Right, VPos::Center));
    for t in &panel.y_ticks {
        let at = (ox - 6, oy + t.pos.round() as i32);
        area.draw(&Text::new(t.label.clone(), at, y_tick_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let bold = FontDesc::new(FontFamily::SansSerif, TICK_FONT_PX as f64, FontStyle::Bold);
    let x_title = TextStyle::from(bold.clone()).pos(Pos::new(HPos::Right, VPos::Center));
    area.draw(&Text::new(
        scene.x_label.clone(),
        (ox + w, oy + h + AXIS_TITLE_OFFSET_PX),
        x_title,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    let y_title = TextStyle::from(bold.transform(FontTransform::Rotate270))
        .pos(Pos::new(HPos::Right, VPos::Center));
    area.draw(&Text::new(
        scene.y_label.clone(),
        (ox - Y_TITLE_OFFSET_PX, oy),
        y_title,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let caption_style = TextStyle::from((FontFamily::SansSerif, CAPTION_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Top));
    area.draw(&Text::new(
        panel.caption.clone(),
        (ox + w / 2, oy - scene.caption_offset),
        caption_style,
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    for p in &panel.points {
        if !(p.cx.is_finite() && p.cy.is_finite()) {
            log::debug!("{}: skipping point of record {} without a position", panel.caption, p.record);
            continue;
        }
        let at = (ox + p.cx.round() as i32, oy + p.cy.round() as i32);
        area.draw(&Circle::new(
            at,
            scene.point_radius,
            p.color.to_plotters().filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
