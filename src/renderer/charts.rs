//! End-of-run charts
//!
//! Each function renders one PNG into the output directory and returns the
//! path it wrote.

use std::path::{Path, PathBuf};

use glam::DVec2;

use super::canvas::{AXIS, BACKGROUND, Canvas, Color, GRID_LINE, heat_color};
use crate::consts::WATCH_LIST;
use crate::error::SimResult;
use crate::sim::{CompositionHistory, DensityField};

/// Pixels per lattice cell in density maps
const CELL_PX: u32 = 24;
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 500;
const MARGIN: f64 = 50.0;

/// Line colours for H, He, C, N, O
const ELEMENT_COLORS: [Color; WATCH_LIST.len()] = [
    [230, 80, 70],
    [240, 200, 60],
    [90, 200, 90],
    [80, 160, 240],
    [190, 110, 230],
];
const ELEMENT_LABELS: [&str; WATCH_LIST.len()] = ["H", "HE", "C", "N", "O"];
const RATE_COLOR: Color = [240, 140, 50];

const LABEL_SCALE: u32 = 2;
/// Legend sits in the top margin, one swatch and symbol per element
const LEGEND_X: i64 = 560;
const LEGEND_Y: i64 = 16;
const LEGEND_STEP: i64 = 46;
const SWATCH_PX: u32 = 10;

/// Plot area mapping data coordinates to pixels (y grows upward)
struct Frame {
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn new(x_max: f64, y_max: f64) -> Self {
        Self {
            x_max: if x_max > 0.0 { x_max } else { 1.0 },
            y_max: if y_max > 0.0 { y_max } else { 1.0 },
        }
    }

    fn to_pixel(&self, x: f64, y: f64) -> DVec2 {
        let w = CHART_WIDTH as f64 - 2.0 * MARGIN;
        let h = CHART_HEIGHT as f64 - 2.0 * MARGIN;
        DVec2::new(
            MARGIN + w * x / self.x_max,
            CHART_HEIGHT as f64 - MARGIN - h * y / self.y_max,
        )
    }

    /// Axes plus four horizontal guide lines
    fn draw_axes(&self, canvas: &mut Canvas) {
        for i in 1..=4 {
            let y = self.y_max * i as f64 / 4.0;
            canvas.line(self.to_pixel(0.0, y), self.to_pixel(self.x_max, y), 1, GRID_LINE);
        }
        let origin = self.to_pixel(0.0, 0.0);
        canvas.line(origin, self.to_pixel(self.x_max, 0.0), 1, AXIS);
        canvas.line(origin, self.to_pixel(0.0, self.y_max), 1, AXIS);
    }

    /// X label centred under the axis, y label above the plot's top-left
    fn draw_labels(&self, canvas: &mut Canvas, x_label: &str, y_label: &str) {
        let x = (CHART_WIDTH as i64 - Canvas::text_width(x_label, LABEL_SCALE)) / 2;
        let y = CHART_HEIGHT as i64 - MARGIN as i64 + 20;
        canvas.text(x, y, x_label, LABEL_SCALE, AXIS);
        canvas.text(MARGIN as i64, LEGEND_Y, y_label, LABEL_SCALE, AXIS);
    }

    fn draw_series(&self, canvas: &mut Canvas, points: &[(f64, f64)], color: Color) {
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            canvas.line(self.to_pixel(a.0, a.1), self.to_pixel(b.0, b.1), 2, color);
        }
        if let [(x, y)] = points {
            let p = self.to_pixel(*x, *y);
            canvas.fill_rect(p.x as i64 - 1, p.y as i64 - 1, 3, 3, color);
        }
    }
}

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

fn write(canvas: &Canvas, dir: &Path, name: &str) -> SimResult<PathBuf> {
    let path = dir.join(name);
    canvas.save(&path)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

/// Heat map of the density field, `density_<label>.png`
pub fn plot_density(density: &DensityField, label: &str, dir: &Path) -> SimResult<PathBuf> {
    let dim = density.dim() as u32;
    let mut canvas = Canvas::new(dim * CELL_PX, dim * CELL_PX, BACKGROUND);
    let peak = density.max();
    for row in 0..density.dim() {
        for col in 0..density.dim() {
            let t = if peak > 0.0 {
                density.at((row, col)) / peak
            } else {
                0.0
            };
            canvas.fill_rect(
                col as i64 * CELL_PX as i64,
                row as i64 * CELL_PX as i64,
                CELL_PX,
                CELL_PX,
                heat_color(t),
            );
        }
    }
    write(&canvas, dir, &format!("density_{}.png", label))
}

/// Radial density profile around the centre of mass, `density_profile.png`
pub fn plot_profile(density: &DensityField, centre: DVec2, dir: &Path) -> SimResult<PathBuf> {
    let profile = density.radial_profile(centre);
    let x_max = profile.last().map(|p| p.0).unwrap_or(1.0);
    let y_max = profile.iter().map(|p| p.1).fold(0.0, f64::max);
    let frame = Frame::new(x_max, y_max * 1.1);

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);
    frame.draw_axes(&mut canvas);
    frame.draw_labels(&mut canvas, "Radius", "Density");
    frame.draw_series(&mut canvas, &profile, heat_color(0.9));
    write(&canvas, dir, "density_profile.png")
}

/// Watch-list composition over the run, `composition.png`
pub fn plot_composition(
    history: &CompositionHistory,
    iterations: usize,
    dir: &Path,
) -> SimResult<PathBuf> {
    let rows = iterations.min(history.len());
    let frame = Frame::new(rows.saturating_sub(1) as f64, 100.0);

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);
    frame.draw_axes(&mut canvas);
    frame.draw_labels(&mut canvas, "Iterations", "Percent");
    for (slot, color) in ELEMENT_COLORS.iter().enumerate() {
        let series = history.series(slot);
        frame.draw_series(&mut canvas, &indexed(&series[..rows]), *color);

        let x = LEGEND_X + slot as i64 * LEGEND_STEP;
        canvas.fill_rect(x, LEGEND_Y, SWATCH_PX, SWATCH_PX, *color);
        canvas.text(x + SWATCH_PX as i64 + 4, LEGEND_Y, ELEMENT_LABELS[slot], LABEL_SCALE, AXIS);
    }
    write(&canvas, dir, "composition.png")
}

/// Reactions per iteration, `fusion_rate.png`
pub fn plot_rate(rate: &[u32], iterations: usize, dir: &Path) -> SimResult<PathBuf> {
    let rows = iterations.min(rate.len());
    let values: Vec<f64> = rate[..rows].iter().map(|&r| r as f64).collect();
    let y_max = values.iter().copied().fold(0.0, f64::max);
    let frame = Frame::new(rows.saturating_sub(1) as f64, y_max * 1.1);

    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);
    frame.draw_axes(&mut canvas);
    frame.draw_labels(&mut canvas, "Iterations", "Number of nuclear reactions");
    frame.draw_series(&mut canvas, &indexed(&values), RATE_COLOR);
    write(&canvas, dir, "fusion_rate.png")
}
