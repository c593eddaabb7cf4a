//! # Diagram Inclusion
//!
//! Turns a PDF diagram (usually the P&ID) into Org-mode image directives for
//! a LaTeX export. Pages already rasterized as `{fname}*.png` in the images
//! directory are reused; otherwise `{fname}.pdf` is rasterized first.
//!
//! Missing inputs do not abort report generation. They show up in the
//! output as a red `\colorbox` so the gap is obvious in the final PDF:
//!
//! ```text
//! \colorbox{red}{Missing P&ID file}
//! ```
//!
//! ## Output
//!
//! ```text
//! #+ATTR_LATEX: :width \textwidth
//! [[./images/PID_page-1.png]]
//! #+ATTR_LATEX: :width \textwidth
//! [[./images/PID_page-2.png]]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};

/// Default rasterization resolution
pub const DEFAULT_DPI: u32 = 200;

const ATTR_LATEX: &str = r"#+ATTR_LATEX: :width \textwidth";

/// Converts PDF pages to PNG files.
pub trait PdfRasterizer {
    /// Rasterize every page of `pdf` to PNG files whose names start with
    /// `output_prefix`.
    fn rasterize(&self, pdf: &Path, output_prefix: &Path, dpi: u32) -> CalcResult<()>;
}

/// Poppler's `pdftoppm`, run as an external process.
///
/// Pages are written as `{prefix}-1.png`, `{prefix}-2.png`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdftoppm {
    program: String,
}

impl Pdftoppm {
    /// Use a specific executable name or path
    pub fn new(program: impl Into<String>) -> Self {
        Pdftoppm { program: program.into() }
    }
}

impl PdfRasterizer for Pdftoppm {
    fn rasterize(&self, pdf: &Path, output_prefix: &Path, dpi: u32) -> CalcResult<()> {
        debug!(program = %self.program, pdf = %pdf.display(), dpi, "Running rasterizer");

        let output = Command::new(&self.program)
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(output_prefix)
            .output()
            .map_err(|e| CalcError::external_tool(&self.program, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CalcError::external_tool(
                &self.program,
                format!("{} ({})", stderr.trim(), output.status),
            ));
        }
        Ok(())
    }
}

/// Settings name that selects the in-process PDFium rasterizer
pub const PDFIUM: &str = "pdfium";

/// Rasterizer named in report settings.
///
/// "pdfium" selects `pdfium::PdfiumRasterizer` when built with the
/// `pdfium` feature; any other name is run as a `pdftoppm`-compatible program.
pub fn rasterizer_for(name: &str) -> Box<dyn PdfRasterizer> {
    #[cfg(feature = "pdfium")]
    {
        if name == PDFIUM {
            return Box::new(crate::pdfium::PdfiumRasterizer);
        }
    }
    Box::new(Pdftoppm::new(name))
}

/// Which input was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingResource {
    /// The images directory itself
    ImagesFolder,
    /// The PDF to rasterize
    Pdf,
}

/// Wrap text in a red LaTeX box. Underscores become spaces.
pub fn format_err_msg(text: &str) -> String {
    format!(r"\colorbox{{red}}{{{}}}", text.replace('_', " "))
}

/// Marker text for a missing folder or PDF.
pub fn missing_file_error(missing: MissingResource, images_dir: &Path, fname: &str) -> String {
    match missing {
        MissingResource::ImagesFolder => {
            let folder = images_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| images_dir.display().to_string());
            format_err_msg(&format!(
                "Missing \"{}\" folder when processing {} file",
                folder, fname
            ))
        }
        MissingResource::Pdf => format_err_msg(&format!("Missing {} file", fname)),
    }
}

/// Sorted names of `{fname}*.png` files in `dir`.
fn list_pngs(dir: &Path, fname: &str) -> io::Result<Vec<String>> {
    let mut pics: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            name.len() >= fname.len() + ".png".len() && name.starts_with(fname) && name.ends_with(".png")
        })
        .collect();
    pics.sort();
    Ok(pics)
}

/// Rasterize `{fname}.pdf` into `{fname}_page*.png`, returning a marker on failure.
fn rasterize_pdf(images_dir: &Path, fname: &str, rasterizer: &dyn PdfRasterizer, dpi: u32) -> Option<String> {
    let pdf = images_dir.join(format!("{}.pdf", fname));
    if !pdf.is_file() {
        warn!(pdf = %pdf.display(), "Diagram PDF not found");
        return Some(missing_file_error(MissingResource::Pdf, images_dir, fname));
    }

    let prefix = images_dir.join(format!("{}_page", fname));
    match rasterizer.rasterize(&pdf, &prefix, dpi) {
        Ok(()) => {
            info!(pdf = %pdf.display(), dpi, "Rasterized diagram");
            None
        }
        Err(e) => {
            warn!(pdf = %pdf.display(), error = %e, "Rasterization failed");
            Some(missing_file_error(MissingResource::Pdf, images_dir, fname))
        }
    }
}

fn link_path(images_dir: &Path, png: &str) -> PathBuf {
    Path::new(".").join(images_dir).join(png)
}

/// Org-mode image directives for every page of diagram `fname`.
///
/// Reuses existing `{fname}*.png` pages in `images_dir`; when there are none,
/// rasterizes `{fname}.pdf` at `dpi`. Problems are reported inline as red
/// markers and whatever pages exist are still emitted.
pub fn make_pics(images_dir: &Path, fname: &str, rasterizer: &dyn PdfRasterizer, dpi: u32) -> String {
    let mut out = String::new();

    let mut pics = match list_pngs(images_dir, fname) {
        Ok(pics) => pics,
        Err(e) => {
            warn!(dir = %images_dir.display(), error = %e, "Images folder not readable");
            out.push_str(&missing_file_error(MissingResource::ImagesFolder, images_dir, fname));
            out.push('\n');
            return out;
        }
    };

    if pics.is_empty() {
        if let Some(marker) = rasterize_pdf(images_dir, fname, rasterizer, dpi) {
            out.push_str(&marker);
            out.push('\n');
        }
        pics = list_pngs(images_dir, fname).unwrap_or_default();
    }

    for png in &pics {
        out.push_str(ATTR_LATEX);
        out.push('\n');
        out.push_str(&format!("[[{}]]\n", link_path(images_dir, png).display()));
    }
    out
}
