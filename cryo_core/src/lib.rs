//! # cryo_core - Cryogenic Piping Documentation Helpers
//!
//! `cryo_core` backs the engineering notes written for cryogenic piping
//! systems: which materials the components are made of, whether the system
//! qualifies as "low stress" piping under FESHM 5031.1, and the report text
//! that goes with it. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Typed quantities**: Pressures, temperatures and lengths are unit
//!   newtypes, never bare floats at the API surface
//! - **Rule failures are results**: A system that does not qualify is an
//!   `Ok` with a violation; `Err` means the check could not run
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cryo_core::materials::{get_materials, lookup, summarize_materials, SS304L};
//! use cryo_core::piping::{Component, RatingFactors};
//! use cryo_core::calculations::check_low_stress;
//! use cryo_core::units::{Celsius, Psi};
//!
//! let ss = lookup(SS304L).unwrap();
//! let parts = vec![
//!     Component::fitting("V-1", "1/2\"", "Swagelok", Psi(500.0), ss),
//!     Component::fitting("V-2", "1/2\"", "Swagelok", Psi(500.0), ss),
//! ];
//!
//! assert_eq!(summarize_materials(&get_materials(&parts)).unwrap(), "304L SS");
//!
//! let factors = RatingFactors { e: 1.0, w: 1.0, y: 0.4 };
//! let result = check_low_stress(Psi(100.0), Celsius(20.0), &parts, &factors).unwrap();
//! assert!(result.passes());
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Material catalog and material summaries
//! - [`piping`] - Component types, pipe sizes and pressure ratings
//! - [`calculations`] - Low stress qualification
//! - [`system`] - System description files
//! - [`images`] - Diagram pages for reports
//! - `pdfium` - In-process rasterizer (feature `pdfium`)
//! - [`report`] - Org/LaTeX report text
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading systems and atomic writes
//! - [`logging`] - `tracing` subscriber setup

pub mod calculations;
pub mod errors;
pub mod file_io;
mod generated;
pub mod images;
pub mod logging;
pub mod materials;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod piping;
pub mod report;
pub mod system;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{check_low_stress, LowStressResult, LowStressViolation};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_system, save_system, write_atomic};
pub use materials::Material;
pub use piping::{Component, ComponentType, RatingFactors};
pub use system::{ComponentSpec, PipingSystem};
