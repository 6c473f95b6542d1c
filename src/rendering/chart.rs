// src/rendering/chart.rs

use plotters::coord::Shift;
use plotters::drawing::DrawingArea; // This is the Plotters canvas
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::plot::PlotData;
use crate::model::LineStyle;

fn rgb(c: (u8, u8, u8)) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

// --- Draws the diagram to ANY backend (window, SVG, PNG or PDF) ---
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &PlotData,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let (x0, x1) = plot.x_range;
    let (y0, y1) = plot.y_range;
    let y_span = y1 - y0;

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc(plot.y_label.as_str())
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    // 1. Steel melting band (behind the curves)
    if let Some((lo, hi)) = plot.steel_band {
        let grey = RGBColor(128, 128, 128);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(lo, y0), (hi, y1)],
            grey.mix(0.12).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            "Steel melting".to_string(),
            ((lo + hi) / 2.0 - 40.0, y0 + 0.08 * y_span),
            ("sans-serif", 12).into_font().color(&grey),
        )))?;
    }

    // 2. Curves
    for s in &plot.series {
        let style = rgb(s.color).stroke_width(plot.line_width);
        let points = s.points.iter().copied();
        match s.line {
            LineStyle::Solid => {
                chart.draw_series(LineSeries::new(points, style))?;
            }
            LineStyle::Dashed => {
                chart.draw_series(DashedLineSeries::new(points, 10, 6, style))?;
            }
            LineStyle::Dotted => {
                chart.draw_series(DashedLineSeries::new(points, 3, 4, style))?;
            }
        }
    }

    // 3. Direct labels at the right edge
    for l in &plot.labels {
        chart.draw_series(std::iter::once(Text::new(
            l.text.clone(),
            (plot.label_x, l.text_y),
            ("sans-serif", 13).into_font().color(&rgb(l.color)),
        )))?;
    }

    // 4. Temperature marker (last, so it sits on top)
    let m = plot.marker_c;
    if m >= x0 && m <= x1 {
        chart.draw_series(LineSeries::new(vec![(m, y0), (m, y1)], RED.stroke_width(2)))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.0}°C", m),
            (m + 5.0, y1 - 0.04 * y_span),
            ("sans-serif", 13).into_font().color(&RED),
        )))?;
    }

    if let Some(w) = &plot.warning {
        chart.draw_series(std::iter::once(Text::new(
            format!("⚠ {:.0} K outside {:.0}-{:.0} K", w.temperature_k, w.window.min_k, w.window.max_k),
            (x0 + 0.02 * (x1 - x0), y0 + 0.03 * y_span),
            ("sans-serif", 13).into_font().color(&RGBColor(0xEE, 0x77, 0x33)),
        )))?;
    }

    Ok(())
}
