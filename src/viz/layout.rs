//! Grid placement of the monthly panels.

use crate::config::DashboardConfig;
use crate::models::MonthKey;

/// `count` consecutive months starting at `start`.
pub fn month_sequence(start: MonthKey, count: u32) -> Vec<MonthKey> {
    std::iter::successors(Some(start), |m| Some(m.succ()))
        .take(count as usize)
        .collect()
}

/// (row, column) of panel `index` in a grid `columns` wide.
pub fn grid_position(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index / columns, index % columns)
}

/// Top-left pixel of the plotting area of panel `index`, in canvas coordinates.
pub fn panel_origin(cfg: &DashboardConfig, index: usize) -> (i32, i32) {
    let (row, col) = grid_position(index, cfg.columns as usize);
    let step = cfg.grid_size as i32;
    (
        cfg.margin.left as i32 + col as i32 * step,
        cfg.margin.top as i32 + row as i32 * step,
    )
}
