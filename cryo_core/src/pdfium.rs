//! In-process PDF rasterization with PDFium.
//!
//! Needs the PDFium shared library at runtime (`libpdfium.so`,
//! `pdfium.dll`, ...). Selected with `"rasterizer": "pdfium"` in the report
//! settings.

use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::images::{PdfRasterizer, PDFIUM};

/// PDF user space units per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Renders pages as `{prefix}-1.png`, `{prefix}-2.png`, ... like `pdftoppm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumRasterizer;

fn pdfium_error(e: PdfiumError) -> CalcError {
    CalcError::external_tool(PDFIUM, format!("{:?}", e))
}

impl PdfRasterizer for PdfiumRasterizer {
    fn rasterize(&self, pdf: &Path, output_prefix: &Path, dpi: u32) -> CalcResult<()> {
        let pdfium = Pdfium::new(Pdfium::bind_to_system_library().map_err(pdfium_error)?);
        let document = pdfium.load_pdf_from_file(pdf, None).map_err(pdfium_error)?;
        let config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);

        for (index, page) in document.pages().iter().enumerate() {
            let mut name = output_prefix.as_os_str().to_owned();
            name.push(format!("-{}.png", index + 1));
            let path = PathBuf::from(name);

            page.render_with_config(&config)
                .map_err(pdfium_error)?
                .as_image()
                .save(&path)
                .map_err(|e| CalcError::file_error("write page", path.display().to_string(), e.to_string()))?;
            debug!(page = index + 1, path = %path.display(), "Rendered page");
        }
        Ok(())
    }
}
