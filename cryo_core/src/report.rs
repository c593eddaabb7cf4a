//! # Report Rendering
//!
//! Text blocks for a piping system writeup, in Org-mode (exported to LaTeX
//! later) or plain LaTeX:
//!
//! - [`component_table`] - one row per component with its pressure rating
//! - [`compliance_paragraph`] - low stress qualification statement
//! - [`render_system_report`] - full section: heading, material summary,
//!   table, compliance paragraph and the P&ID pages
//!
//! User-supplied text (names, sizes, sources) is escaped for the target
//! format.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::low_stress::LowStressResult;
use crate::errors::{CalcError, CalcResult};
use crate::images::{make_pics, PdfRasterizer};
use crate::materials::{get_materials, summarize_materials};
use crate::piping::{pressure_rating, Component, RatingFactors};
use crate::system::PipingSystem;
use crate::units::{Celsius, Psi};

/// Output markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Org,
    Latex,
}

impl FromStr for ReportFormat {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "org" => Ok(ReportFormat::Org),
            "latex" | "tex" => Ok(ReportFormat::Latex),
            _ => Err(CalcError::invalid_input("format", s, "Expected org or latex")),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Org => write!(f, "org"),
            ReportFormat::Latex => write!(f, "latex"),
        }
    }
}

const TABLE_HEADER: [&str; 6] = ["Name", "Size", "Source", "Type", "Material", "Rating (psi)"];

const STANDARD: &str = "FESHM 5031.1";

/// Escape LaTeX special characters
fn escape_latex(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "\\&".to_string(),
            '%' => "\\%".to_string(),
            '$' => "\\$".to_string(),
            '#' => "\\#".to_string(),
            '_' => "\\_".to_string(),
            '{' => "\\{".to_string(),
            '}' => "\\}".to_string(),
            '~' => "\\textasciitilde{}".to_string(),
            '^' => "\\textasciicircum{}".to_string(),
            '\\' => "\\textbackslash{}".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Org table cells cannot contain a bare `|`
fn escape_org(s: &str) -> String {
    s.replace('|', "\\vert{}")
}

fn escape(s: &str, format: ReportFormat) -> String {
    match format {
        ReportFormat::Org => escape_org(s),
        ReportFormat::Latex => escape_latex(s),
    }
}

/// Table of components and their pressure ratings.
///
/// Fails if any component cannot be rated.
pub fn component_table(
    components: &[Component<'_>],
    factors: &RatingFactors,
    format: ReportFormat,
) -> CalcResult<String> {
    let rows = components
        .iter()
        .map(|c| {
            let rating = pressure_rating(c, factors)?;
            Ok([
                escape(&c.name, format),
                escape(&c.size, format),
                escape(&c.source, format),
                escape(c.component_type.tag(), format),
                escape(c.material.name(), format),
                format!("{:.0}", rating.value()),
            ])
        })
        .collect::<CalcResult<Vec<[String; 6]>>>()?;

    let mut out = String::new();
    match format {
        ReportFormat::Org => {
            out.push_str(&format!("| {} |\n", TABLE_HEADER.join(" | ")));
            out.push_str(&format!("|{}|\n", vec!["---"; TABLE_HEADER.len()].join("+")));
            for row in &rows {
                out.push_str(&format!("| {} |\n", row.join(" | ")));
            }
        }
        ReportFormat::Latex => {
            out.push_str("\\begin{tabular}{lllllr}\n\\hline\n");
            out.push_str(&format!("{} \\\\\n", TABLE_HEADER.join(" & ")));
            out.push_str("\\hline\n");
            for row in &rows {
                out.push_str(&format!("{} \\\\\n", row.join(" & ")));
            }
            out.push_str("\\hline\n\\end{tabular}\n");
        }
    }
    Ok(out)
}

/// Statement of whether the system qualifies as low stress piping.
pub fn compliance_paragraph(result: &LowStressResult, format: ReportFormat) -> String {
    let temperature_c = Celsius::from(result.design_temperature_k).value();
    let conditions = format!(
        "Design pressure is {:.0} psid and design temperature is {:.0} K ({:.0} °C).",
        result.design_pressure_psi.value(),
        result.design_temperature_k.value(),
        temperature_c,
    );

    let verdict = match (&result.violation, result.max_stress_ratio) {
        (None, Some(ratio)) => format!(
            "The system qualifies as low stress piping per {}. The highest ratio of design pressure to component rating is {:.3}.",
            STANDARD, ratio
        ),
        (None, None) => format!("The system qualifies as low stress piping per {}.", STANDARD),
        (Some(violation), _) => format!(
            "The system does not qualify as low stress piping per {}. {}",
            STANDARD,
            violation.message()
        ),
    };

    let text = format!("{} {}", conditions, verdict);
    match format {
        ReportFormat::Org => text,
        ReportFormat::Latex => escape_latex(&text),
    }
}

/// Convert Org image directives to `\includegraphics`. Markers pass through.
fn org_images_to_latex(org: &str) -> String {
    org.lines()
        .filter(|line| !line.starts_with("#+ATTR_LATEX"))
        .map(|line| match line.strip_prefix("[[").and_then(|l| l.strip_suffix("]]")) {
            Some(path) => format!("\\includegraphics[width=\\textwidth]{{{}}}\n", path),
            None => format!("{}\n", line),
        })
        .collect()
}

/// Complete report section for a piping system, in `settings.format`.
///
/// Includes the diagram pages when `settings.diagram` names one. Missing
/// diagram files show up as red markers rather than errors.
pub fn render_system_report(system: &PipingSystem, rasterizer: &dyn PdfRasterizer) -> CalcResult<String> {
    let format = system.settings.format;
    let components = system.resolve_components()?;
    let summary = summarize_materials(&get_materials(&components))?;
    let result = system.check_components(&components)?;
    let table = component_table(&components, &system.factors, format)?;
    debug!(%format, components = components.len(), passes = result.passes(), "Rendering report");

    let meta = &system.meta;
    let date = meta.created.format("%Y-%m-%d");
    let mut out = String::new();

    match format {
        ReportFormat::Org => {
            out.push_str(&format!("* {}\n", meta.title));
            out.push_str(&format!("Job {}, {}, {}.\n\n", meta.job_id, meta.engineer, date));
        }
        ReportFormat::Latex => {
            out.push_str(&format!("\\section{{{}}}\n", escape_latex(&meta.title)));
            out.push_str(&format!(
                "Job {}, {}, {}.\n\n",
                escape_latex(&meta.job_id),
                escape_latex(&meta.engineer),
                date
            ));
        }
    }

    let summary_sentence = format!("Piping components are made of {}.", summary);
    out.push_str(&format!("{}\n\n", escape(&summary_sentence, format)));
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!("{}\n", compliance_paragraph(&result, format)));

    if let Some(diagram) = &system.settings.diagram {
        let pics = make_pics(
            &system.settings.images_dir,
            diagram,
            rasterizer,
            system.settings.image_dpi,
        );
        out.push('\n');
        match format {
            ReportFormat::Org => out.push_str(&pics),
            ReportFormat::Latex => out.push_str(&org_images_to_latex(&pics)),
        }
    }

    Ok(out)
}

/// Stress ratio helper for callers building their own tables
pub fn stress_ratio(design_pressure: Psi, component: &Component<'_>, factors: &RatingFactors) -> CalcResult<f64> {
    Ok(design_pressure / pressure_rating(component, factors)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::low_stress::check_low_stress;
    use crate::images::DEFAULT_DPI;
    use crate::materials::{lookup, SS304L};
    use crate::system::{ComponentSpec, DesignConditions};
    use crate::units::Kelvin;
    use std::path::Path;

    const FACTORS: RatingFactors = RatingFactors { e: 1.0, w: 1.0, y: 0.4 };

    struct NoRasterizer;

    impl PdfRasterizer for NoRasterizer {
        fn rasterize(&self, _pdf: &Path, _prefix: &Path, _dpi: u32) -> CalcResult<()> {
            Err(CalcError::external_tool("none", "not available"))
        }
    }

    fn two_valves() -> Vec<Component<'static>> {
        let ss = lookup(SS304L).unwrap();
        vec![
            Component::fitting("V-1", "1/2\"", "Swagelok", Psi(500.0), ss),
            Component::fitting("V_2", "1/2\"", "R&D shop", Psi(1000.0), ss),
        ]
    }

    fn system(format: ReportFormat) -> PipingSystem {
        let mut system = PipingSystem::new(
            "Fill line",
            "J. Engineer",
            "25-042",
            DesignConditions::new(Psi(100.0), Kelvin(293.15)),
            FACTORS,
        );
        system.components.push(ComponentSpec::fitting("V-1", "304L SS", Psi(500.0)));
        system.components.push(ComponentSpec::fitting("V-2", "copper", Psi(600.0)));
        system.settings.format = format;
        system
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("org".parse::<ReportFormat>().unwrap(), ReportFormat::Org);
        assert_eq!("LaTeX".parse::<ReportFormat>().unwrap(), ReportFormat::Latex);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_org_table() {
        let table = component_table(&two_valves(), &FACTORS, ReportFormat::Org).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "| Name | Size | Source | Type | Material | Rating (psi) |");
        assert_eq!(lines[1], "|---+---+---+---+---+---|");
        assert_eq!(lines[2], "| V-1 | 1/2\" | Swagelok | Fitting | 304L SS | 500 |");
    }

    #[test]
    fn test_latex_table_escapes() {
        let table = component_table(&two_valves(), &FACTORS, ReportFormat::Latex).unwrap();
        assert!(table.starts_with("\\begin{tabular}"));
        assert!(table.contains("V\\_2 & 1/2\" & R\\&D shop & Fitting & 304L SS & 1000 \\\\"));
        assert!(table.trim_end().ends_with("\\end{tabular}"));
    }

    #[test]
    fn test_compliance_paragraph() {
        let parts = two_valves();
        let pass = check_low_stress(Psi(100.0), Celsius(20.0), &parts, &FACTORS).unwrap();
        let text = compliance_paragraph(&pass, ReportFormat::Org);
        assert!(text.contains("qualifies as low stress piping per FESHM 5031.1"));
        assert!(text.contains("0.200"));

        let fail = check_low_stress(Psi(200.0), Celsius(20.0), &parts, &FACTORS).unwrap();
        let text = compliance_paragraph(&fail, ReportFormat::Org);
        assert!(text.contains("does not qualify"));
        assert!(text.ends_with("Pressure too high for low stress category."));
    }

    #[test]
    fn test_stress_ratio() {
        let parts = two_valves();
        let ratio = stress_ratio(Psi(100.0), &parts[1], &FACTORS).unwrap();
        assert!((ratio - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_org_report() {
        let report = render_system_report(&system(ReportFormat::Org), &NoRasterizer).unwrap();
        assert!(report.starts_with("* Fill line\n"));
        assert!(report.contains("Piping components are made of 304L SS, and copper."));
        assert!(report.contains("| V-2 |"));
        assert!(report.contains("qualifies as low stress piping"));
        assert!(!report.contains("colorbox"));
    }

    #[test]
    fn test_latex_report_with_missing_diagram() {
        let dir = tempfile::tempdir().unwrap();
        let mut system = system(ReportFormat::Latex);
        system.settings.images_dir = dir.path().to_path_buf();
        system.settings.diagram = Some("P_ID".to_string());
        assert_eq!(system.settings.image_dpi, DEFAULT_DPI);

        let report = render_system_report(&system, &NoRasterizer).unwrap();
        assert!(report.starts_with("\\section{Fill line}"));
        assert!(report.contains("\\begin{tabular}"));
        assert!(report.trim_end().ends_with("\\colorbox{red}{Missing P ID file}"));
    }

    #[test]
    fn test_org_images_to_latex() {
        let org = "#+ATTR_LATEX: :width \\textwidth\n[[./images/PID_page-1.png]]\n";
        assert_eq!(
            org_images_to_latex(org),
            "\\includegraphics[width=\\textwidth]{./images/PID_page-1.png}\n"
        );
    }

    #[test]
    fn test_report_propagates_resolution_errors() {
        let mut system = system(ReportFormat::Org);
        system.components[0].component_type = "Flange".to_string();
        let err = render_system_report(&system, &NoRasterizer).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COMPONENT_TYPE");
    }
}
