use super::{Chart, ChartOptions, bar_value_range, format_seconds, plot_error};
use crate::case::Series;
use crate::error::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// One bar per case, category axis in series order
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChart;

/// Category name under integer tick `x`, empty between categories
fn category_label(names: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.3 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

impl Chart for BarChart {
    type Data = Series<String>;

    fn draw(
        &self,
        data: &Series<String>,
        options: &ChartOptions,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<()> {
        let names: Vec<String> = data.keys().cloned().collect();
        let n_bars = names.len().max(1);
        let y_range = bar_value_range(data.values());

        let mut chart = ChartBuilder::on(root)
            .caption(&options.title, ("sans-serif", options.title_font_size))
            .margin(options.margin)
            .x_label_area_size(options.x_label_area_size)
            .y_label_area_size(options.y_label_area_size)
            .build_cartesian_2d(-0.5..(n_bars as f64 - 0.5), y_range)
            .map_err(|e| plot_error("Failed to build chart", e))?;

        let x_formatter = |x: &f64| category_label(&names, *x);
        let y_formatter = |y: &f64| format_seconds(*y);

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(n_bars)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .y_desc(options.y_desc.as_str());
        if let Some(ref x_desc) = options.x_desc {
            mesh.x_desc(x_desc.as_str());
        }
        mesh.draw()
            .map_err(|e| plot_error("Failed to draw mesh", e))?;

        chart
            .draw_series(data.values().enumerate().map(|(i, seconds)| {
                let x = i as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, seconds)], BAR_COLOR.filled())
            }))
            .map_err(|e| plot_error("Failed to draw bars", e))?;

        Ok(())
    }
}
