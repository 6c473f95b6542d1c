// src/rendering/export.rs

use plotters::prelude::*;
use std::path::Path;

use super::chart::draw_chart;
use super::plot::PlotData;
use crate::config::{ChartStyle, ExportFormat};
use crate::error::{Result, ScreeningError};

// --- File Export Entry Point ---
pub fn export(plot: &PlotData, path: &Path, format: ExportFormat, style: &ChartStyle) -> Result<()> {
    let size = (style.width, style.height);

    match format {
        ExportFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(export_err)?;
            draw_chart(&root, plot).map_err(export_err)?;
            root.present().map_err(export_err)?;
        }
        ExportFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(export_err)?;
            draw_chart(&root, plot).map_err(export_err)?;
            root.present().map_err(export_err)?;
        }
        ExportFormat::Pdf => export_pdf(plot, path, size)?,
    }

    log::info!("Diagram exported to {}", path.display());
    Ok(())
}

#[cfg(feature = "gui")]
fn export_pdf(plot: &PlotData, path: &Path, (width, height): (u32, u32)) -> Result<()> {
    use plotters_cairo::CairoBackend;

    // 1. Create PDF Surface
    let surface = cairo::PdfSurface::new(width as f64, height as f64, path).map_err(export_err)?;
    {
        // 2. Create Context
        let ctx = cairo::Context::new(&surface).map_err(export_err)?;

        // 3. Create Plotters Backend
        let backend = CairoBackend::new(&ctx, (width, height)).map_err(export_err)?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(export_err)?;

        // 4. Draw
        draw_chart(&root, plot).map_err(export_err)?;
        root.present().map_err(export_err)?;
    }

    // 5. Finish (ensure write)
    surface.finish();
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn export_pdf(_plot: &PlotData, _path: &Path, _size: (u32, u32)) -> Result<()> {
    Err(ScreeningError::Export(
        "PDF export needs the `gui` feature (cairo)".to_string(),
    ))
}

fn export_err<E: std::fmt::Display>(e: E) -> ScreeningError {
    ScreeningError::Export(e.to_string())
}
