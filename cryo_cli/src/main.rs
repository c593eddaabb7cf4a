//! # Cryopipe CLI
//!
//! Command line front end for `cryo_core`.
//!
//! Commands: materials, summary, check, report, pics.
//! Report text goes to stdout, logs to stderr. `check` exits 0 when the
//! system qualifies as low stress piping, 2 when a rule fails and 1 on error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use cryo_core::images::{make_pics, rasterizer_for, DEFAULT_DPI};
use cryo_core::materials::{catalog, Material};
use cryo_core::report::{render_system_report, stress_ratio, ReportFormat};
use cryo_core::units::{Celsius, Fahrenheit, Kelvin};
use cryo_core::{load_system, logging, write_atomic, CalcError, CalcResult, PipingSystem};

/// Exit code for a system that fails a low stress rule
const EXIT_RULE_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "cryo")]
#[command(about = "Cryogenic piping documentation helpers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the material catalog
    Materials {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Describe the materials used in a system
    Summary {
        /// System description file (JSON)
        system: PathBuf,
    },

    /// Run the FESHM 5031.1 low stress check
    Check {
        /// System description file (JSON)
        system: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the system report
    Report {
        /// System description file (JSON)
        system: PathBuf,

        /// Output format, overrides the system file (org or latex)
        #[arg(short, long)]
        format: Option<ReportFormat>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Images directory, overrides the system file
        #[arg(long)]
        images_dir: Option<PathBuf>,

        /// Rasterization resolution, overrides the system file
        #[arg(long)]
        dpi: Option<u32>,
    },

    /// Print image directives for a PDF diagram
    Pics {
        /// Diagram base name, without extension
        fname: String,

        /// Directory holding the PDF and PNG pages
        #[arg(long, default_value = "images")]
        images_dir: PathBuf,

        /// Rasterization resolution
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// PDF rasterizer: a pdftoppm-compatible program, or "pdfium"
        #[arg(long, default_value = "pdftoppm")]
        rasterizer: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            if let Ok(json) = serde_json::to_string(&e) {
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CalcResult<ExitCode> {
    match command {
        Commands::Materials { json } => {
            let materials = catalog::all();
            if json {
                println!("{}", to_json(materials)?);
            } else {
                print_materials(materials);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Summary { system } => {
            let system = load_system(&system)?;
            println!("{}", system.material_summary()?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { system, json } => check(&system, json),

        Commands::Report {
            system,
            format,
            output,
            images_dir,
            dpi,
        } => {
            let mut system = load_system(&system)?;
            if let Some(format) = format {
                system.settings.format = format;
            }
            if let Some(dir) = images_dir {
                system.settings.images_dir = dir;
            }
            if let Some(dpi) = dpi {
                system.settings.image_dpi = dpi;
            }

            let rasterizer = rasterizer_for(&system.settings.rasterizer);
            let report = render_system_report(&system, rasterizer.as_ref())?;
            match output {
                Some(path) => write_atomic(&path, &report)?,
                None => print!("{}", report),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Pics {
            fname,
            images_dir,
            dpi,
            rasterizer,
        } => {
            let rasterizer = rasterizer_for(&rasterizer);
            print!("{}", make_pics(&images_dir, &fname, rasterizer.as_ref(), dpi));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(path: &Path, json: bool) -> CalcResult<ExitCode> {
    let system: PipingSystem = load_system(path)?;
    let components = system.resolve_components()?;
    let result = system.check_components(&components)?;
    info!(title = %system.meta.title, passes = result.passes(), "Low stress check complete");

    if json {
        println!("{}", to_json(&result)?);
    } else {
        println!("{}", system.meta.title);
        println!(
            "  Design: {:.1} psid, {:.2} K ({:.1} °C)",
            result.design_pressure_psi.value(),
            result.design_temperature_k.value(),
            Celsius::from(result.design_temperature_k).value(),
        );
        if result.violation.is_none() {
            for component in &components {
                let ratio = stress_ratio(system.design.pressure_psi, component, &system.factors)?;
                println!("  {:<24} {:>8.3}", component.name, ratio);
            }
        }
        match result.reason() {
            None => println!("PASS: qualifies as low stress piping (FESHM 5031.1)"),
            Some(reason) => println!("FAIL: {}", reason),
        }
    }

    debug!(violation = ?result.violation, "Check result");
    if result.passes() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_RULE_FAILURE))
    }
}

fn print_materials(materials: &[Material]) {
    println!(
        "{:<10} {:>14} {:>12} {:>8} {:>16}",
        "Name", "Density kg/m3", "S (psi)", "Poisson", "T min (K / °F)"
    );
    for m in materials {
        let density = m.density().map(|d| format!("{:.0}", d.value())).unwrap_or_else(|_| "-".into());
        let stress = m
            .allowable_stress()
            .map(|s| format!("{:.0}", s.value()))
            .unwrap_or_else(|_| "-".into());
        let nu = m.poisson_ratio().map(|n| format!("{:.2}", n)).unwrap_or_else(|_| "-".into());
        let t_min = m
            .min_temperature()
            .map(|t: Kelvin| format!("{:.1} / {:.0}", t.value(), Fahrenheit::from(t).value()))
            .unwrap_or_else(|_| "-".into());
        println!("{:<10} {:>14} {:>12} {:>8} {:>16}", m.name(), density, stress, nu, t_min);
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}
