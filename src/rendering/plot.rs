// src/rendering/plot.rs

//! Pull-based plot model. `render` turns (dataset, temperature, selection)
//! into plain data; drawing it is a separate step, so any front end
//! (window, CLI export, tests) can call it whenever its inputs change.

use crate::config::ChartStyle;
use crate::model::{library, Dataset, LineStyle, Oxidant};
use crate::physics::{kelvin_to_celsius, sweep, RangeWarning, TemperatureRange, ValidityWindow};

/// Steelmaking melt range, °C
pub const STEEL_MELTING_C: (f64, f64) = (1400.0, 1600.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub label: String,
    pub color: (u8, u8, u8),
    pub line: LineStyle,
    /// (°C, kJ per mol oxidant)
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub text: String,
    pub color: (u8, u8, u8),
    /// y of the curve's last point
    pub anchor_y: f64,
    /// y after pushing overlapping labels apart
    pub text_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub title: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<Series>,
    pub labels: Vec<EdgeLabel>,
    pub label_x: f64,
    pub marker_c: f64,
    pub steel_band: Option<(f64, f64)>,
    pub line_width: u32,
    pub warning: Option<RangeWarning>,
}

pub struct RenderOptions<'a> {
    pub range: TemperatureRange,
    pub window: ValidityWindow,
    pub style: &'a ChartStyle,
}

pub fn render(
    dataset: &Dataset,
    temperature_k: f64,
    selection: &[String],
    opts: &RenderOptions,
) -> PlotData {
    let curves = dataset.select(selection);

    let series: Vec<Series> = curves
        .iter()
        .map(|c| Series {
            name: c.name().to_string(),
            label: library::pretty_formula(c.name()),
            color: c.style().color,
            line: c.style().line,
            points: sweep(*c, &opts.range)
                .map(|(t, g)| (kelvin_to_celsius(t), g))
                .collect(),
        })
        .collect();

    let x_lo = kelvin_to_celsius(opts.range.start());
    let x_hi = kelvin_to_celsius(opts.range.stop());
    let span = (x_hi - x_lo).max(1.0);

    let (y_min, y_max) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let (y_min, y_max) = if y_min.is_finite() { (y_min, y_max) } else { (-1.0, 0.0) };
    let pad = (0.05 * (y_max - y_min)).max(50.0);
    let y_top = if y_max <= 0.0 { 0.0 } else { y_max + pad };

    let labels = spread_labels(&series, opts.style.label_spacing);

    let oxidant = curves
        .first()
        .map(|c| c.oxidant())
        .unwrap_or(Oxidant::O2);

    let steel_band = if opts.style.show_steel_band
        && STEEL_MELTING_C.0 < x_hi
        && STEEL_MELTING_C.1 > x_lo
    {
        Some(STEEL_MELTING_C)
    } else {
        None
    };

    PlotData {
        title: format!("Ellingham Diagram: {}", dataset.source),
        y_label: format!("ΔG° (kJ/mol {})", oxidant.label()),
        x_range: (x_lo, x_hi + 0.12 * span),
        y_range: (y_min - pad, y_top),
        series,
        labels,
        label_x: x_hi + 0.01 * span,
        marker_c: kelvin_to_celsius(temperature_k),
        steel_band,
        line_width: opts.style.line_width,
        warning: opts.window.check(temperature_k),
    }
}

/// Labels sit at each curve's right end, top to bottom; any label closer
/// than `spacing` to the one above is pushed down.
fn spread_labels(series: &[Series], spacing: f64) -> Vec<EdgeLabel> {
    let mut labels: Vec<EdgeLabel> = series
        .iter()
        .filter_map(|s| {
            s.points.last().map(|&(_, y)| EdgeLabel {
                text: s.label.clone(),
                color: s.color,
                anchor_y: y,
                text_y: y,
            })
        })
        .collect();

    labels.sort_by(|a, b| b.anchor_y.total_cmp(&a.anchor_y));

    let mut prev: Option<f64> = None;
    for l in &mut labels {
        if let Some(p) = prev {
            if (l.text_y - p).abs() < spacing {
                l.text_y = p - spacing;
            }
        }
        prev = Some(l.text_y);
    }
    labels
}
