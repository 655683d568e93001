use super::{Chart, ChartOptions, format_seconds, line_value_range, log_range, plot_error};
use crate::case::{Series, SweepKey};
use crate::error::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

/// Line colors, cycled when there are more series than entries
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

const POSITIONAL_NOTE: &str = "hollow = position, not parameter value";

/// Swept-parameter lines on a shared logarithmic x-axis.
///
/// A single series draws one line; several series overlay on the same axes
/// with a legend. Points whose key is a positional stand-in are drawn hollow.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChart;

fn series_color(idx: usize) -> RGBColor {
    COLORS[idx % COLORS.len()]
}

/// Plottable (x, seconds) points; a log axis cannot show x <= 0
fn plottable(series: &Series<SweepKey>) -> Vec<(SweepKey, f64, f64)> {
    series
        .points
        .iter()
        .filter_map(|(key, seconds)| {
            let x = key.value as f64;
            if x > 0.0 {
                Some((*key, x, *seconds))
            } else {
                warn!(
                    "Dropping {} point at x = 0 from log-scale chart",
                    series.label
                );
                None
            }
        })
        .collect()
}

fn format_size(x: f64) -> String {
    format!("{}", x.round() as u64)
}

impl Chart for LineChart {
    type Data = [Series<SweepKey>];

    fn draw(
        &self,
        data: &[Series<SweepKey>],
        options: &ChartOptions,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> Result<()> {
        let lines: Vec<Vec<(SweepKey, f64, f64)>> = data.iter().map(plottable).collect();

        let x_range = log_range(lines.iter().flatten().map(|(_, x, _)| *x));
        let y_range = line_value_range(lines.iter().flatten().map(|(_, _, y)| *y));
        let any_positional = lines.iter().flatten().any(|(key, _, _)| key.positional);

        let mut chart = ChartBuilder::on(root)
            .caption(&options.title, ("sans-serif", options.title_font_size))
            .margin(options.margin)
            .x_label_area_size(options.x_label_area_size)
            .y_label_area_size(options.y_label_area_size)
            .build_cartesian_2d(x_range.log_scale(), y_range)
            .map_err(|e| plot_error("Failed to build chart", e))?;

        let x_formatter = |x: &f64| format_size(*x);
        let y_formatter = |y: &f64| format_seconds(*y);

        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .y_desc(options.y_desc.as_str());
        if let Some(ref x_desc) = options.x_desc {
            mesh.x_desc(x_desc.as_str());
        }
        mesh.draw()
            .map_err(|e| plot_error("Failed to draw mesh", e))?;

        for (idx, (series, points)) in data.iter().zip(&lines).enumerate() {
            let color = series_color(idx);

            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|(_, x, y)| (*x, *y)),
                    color.stroke_width(2),
                ))
                .map_err(|e| plot_error("Failed to draw line series", e))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart
                .draw_series(points.iter().map(|(key, x, y)| {
                    let style = if key.positional {
                        color.stroke_width(2)
                    } else {
                        color.filled()
                    };
                    Circle::new((*x, *y), 4, style)
                }))
                .map_err(|e| plot_error("Failed to draw markers", e))?;
        }

        if any_positional {
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
                .map_err(|e| plot_error("Failed to draw legend entry", e))?
                .label(POSITIONAL_NOTE)
                .legend(|(x, y)| Circle::new((x + 10, y), 4, BLACK.stroke_width(2)));
        }

        if data.len() > 1 || any_positional {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| plot_error("Failed to draw legend", e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plottable_drops_zero() {
        let mut series = Series::new("s");
        series.push(SweepKey::size(0), 1.0);
        series.push(SweepKey::size(10), 2.0);
        series.push(SweepKey::position(2), 3.0);

        let points = plottable(&series);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].1, 10.0);
        assert!(points[1].0.positional);
    }

    #[test]
    fn test_series_color_cycles() {
        assert_eq!(series_color(0).rgb(), series_color(COLORS.len()).rgb());
        assert_ne!(series_color(0).rgb(), series_color(1).rgb());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(200_000.0), "200000");
        assert_eq!(format_size(9_999.6), "10000");
    }
}
