//! Chart rendering
//!
//! Charts are drawn with Plotters into an in-memory RGB buffer and then
//! encoded as PNG with `image`. Each chart type implements [`Chart`];
//! [`render_chart`] owns the buffer, the output directory and the file write.

pub mod bar;
pub mod line;
pub mod options;

pub use bar::BarChart;
pub use line::LineChart;
pub use options::{ChartOptions, ChartOptionsBuilder};

use crate::error::{ReportError, Result};
use image::{ImageFormat, RgbImage};
use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for chart types
///
/// Each chart type names the data it draws and draws it onto an already
/// cleared drawing area.
pub trait Chart {
    /// The data this chart accepts
    type Data: ?Sized;

    fn draw(
        &self,
        data: &Self::Data,
        options: &ChartOptions,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<()>;
}

/// Location of the image for chart `name` inside `out_dir`
pub fn chart_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.png"))
}

/// Draw `data` and write it to `<out_dir>/<name>.png`, creating `out_dir` if needed
pub fn render_chart<C: Chart>(
    chart: &C,
    data: &C::Data,
    options: &ChartOptions,
    out_dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let (width, height) = (options.width, options.height);
    let mut pixel_buffer = vec![255; buffer_len(width, height)?];

    {
        let root = BitMapBackend::with_buffer(&mut pixel_buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| plot_error("Failed to fill background", e))?;

        chart.draw(data, options, &root)?;

        root.present()
            .map_err(|e| plot_error("Failed to present plot", e))?;
    }

    std::fs::create_dir_all(out_dir).map_err(|e| ReportError::io(out_dir, e))?;
    let path = chart_path(out_dir, name);

    let img: RgbImage = image::ImageBuffer::from_vec(width, height, pixel_buffer)
        .ok_or_else(|| ReportError::PlotError("plot image buffer had unexpected size".into()))?;
    img.save_with_format(&path, ImageFormat::Png)
        .map_err(|e| ReportError::PlotError(format!("Failed to write {}: {e}", path.display())))?;

    debug!("Rendered {} ({}x{})", name, width, height);
    println!("Wrote {}", path.display());
    Ok(path)
}

/// Bytes needed for an RGB buffer of the given size
fn buffer_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ReportError::Options(format!(
            "image size must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| ReportError::Options(format!("image size {width}x{height} is too large")))
}

pub(crate) fn plot_error(context: &str, e: impl std::fmt::Debug) -> ReportError {
    ReportError::PlotError(format!("{context}: {e:?}"))
}

/// Value axis for bars: from zero to a little above the tallest bar
pub(crate) fn bar_value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { 0.0..max * 1.1 } else { 0.0..1.0 }
}

/// Value axis for lines: data range padded by 5% each side, never below zero
pub(crate) fn line_value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match values.minmax() {
        MinMaxResult::NoElements => 0.0..1.0,
        MinMaxResult::OneElement(v) => (v * 0.5)..(v * 1.5).max(v + 1e-9),
        MinMaxResult::MinMax(lo, hi) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            (lo - pad).max(0.0)..(hi + pad)
        }
        MinMaxResult::MinMax(lo, _) => (lo * 0.5)..(lo * 1.5).max(lo + 1e-9),
    }
}

/// Log axis bounds covering every positive x with a factor of two of slack
pub(crate) fn log_range(xs: impl Iterator<Item = f64>) -> Range<f64> {
    match xs.filter(|x| *x > 0.0).minmax() {
        MinMaxResult::NoElements => 1.0..10.0,
        MinMaxResult::OneElement(x) => (x / 2.0)..(x * 2.0),
        MinMaxResult::MinMax(lo, hi) => (lo / 2.0)..(hi * 2.0),
    }
}

/// Tick label for a duration in seconds
pub(crate) fn format_seconds(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() < 1e-2 {
        format!("{value:.1e}")
    } else {
        format!("{value:.3}")
    }
}
