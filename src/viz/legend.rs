//! City color assignment and the legend column.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};

use super::text::truncate_to_width;
use super::util::Rgb8;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::WeatherRecord;

const LABEL_FONT_PX: u32 = 14;
const LABEL_GAP_PX: i32 = 20;

/// Ordinal mapping from city code to palette color.
///
/// Configured cities take the first slots in legend order. Codes that only show up in
/// the data are appended in first-seen order, so a color never depends on the metric.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPalette {
    codes: Vec<String>,
    colors: Vec<Rgb8>,
}

impl CityPalette {
    pub fn new(cfg: &DashboardConfig, records: &[WeatherRecord]) -> Result<Self, DashboardError> {
        let colors = cfg.palette_colors()?;
        if colors.is_empty() {
            return Err(DashboardError::InvalidConfig("palette is empty".into()));
        }
        let mut codes: Vec<String> = cfg.cities.iter().map(|c| c.code.clone()).collect();
        for r in records {
            if !codes.iter().any(|c| c == &r.city) {
                codes.push(r.city.clone());
            }
        }
        Ok(Self { codes, colors })
    }

    pub fn color(&self, code: &str) -> Rgb8 {
        let idx = self
            .codes
            .iter()
            .position(|c| c == code)
            .unwrap_or(self.codes.len());
        self.colors[idx % self.colors.len()]
    }
}

/// One legend row, positioned in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub code: String,
    pub name: String,
    pub color: Rgb8,
    pub dot: (i32, i32),
    pub label: (i32, i32),
}

/// Legend rows for the configured cities.
pub fn legend_entries(cfg: &DashboardConfig, palette: &CityPalette) -> Vec<LegendEntry> {
    let x = (cfg.margin.left + cfg.margin.right) as i32 + cfg.legend_offset_x;
    let y0 = cfg.margin.top as i32 + cfg.legend_top;
    cfg.cities
        .iter()
        .enumerate()
        .map(|(i, city)| {
            let y = y0 + i as i32 * cfg.legend_spacing;
            LegendEntry {
                code: city.code.clone(),
                name: city.name.clone(),
                color: palette.color(&city.code),
                dot: (x, y),
                label: (x + LABEL_GAP_PX, y),
            }
        })
        .collect()
}

/// Draw the dot + label column.
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    dot_radius: u32,
) -> Result<()> {
    let (w, _) = area.dim_in_pixel();
    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    for e in entries {
        area.draw(&Circle::new(
            e.dot,
            dot_radius,
            e.color.to_plotters().filled(),
        ))
        .map_err(|err| anyhow!("{:?}", err))?;

        let max_px = (w as i32 - e.label.0 - 4).max(40) as u32;
        let text = truncate_to_width(&e.name, LABEL_FONT_PX, max_px);
        area.draw(&Text::new(text, e.label, label_style.clone()))
            .map_err(|err| anyhow!("{:?}", err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(city: &str) -> WeatherRecord {
        WeatherRecord {
            city: city.into(),
            year: 2014,
            month: 7,
            actual_mean_temp: 70.0,
            actual_min_temp: 60.0,
            actual_max_temp: 80.0,
            actual_precipitation: 1.0,
        }
    }

    #[test]
    fn configured_cities_take_first_slots() {
        let cfg = DashboardConfig::default();
        let pal = CityPalette::new(&cfg, &[rec("JAX"), rec("SEA")]).unwrap();
        assert_eq!(pal.color("CLT").hex(), "#1f77b4");
        assert_eq!(pal.color("JAX").hex(), "#d62728");
        assert_eq!(pal.color("SEA").hex(), "#9467bd");
    }

    #[test]
    fn entries_stack_down_the_column() {
        let cfg = DashboardConfig::default();
        let pal = CityPalette::new(&cfg, &[]).unwrap();
        let entries = legend_entries(&cfg, &pal);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].dot, (1090, 260));
        assert_eq!(entries[3].dot, (1090, 335));
        assert_eq!(entries[1].label, (1110, 285));
    }
}
