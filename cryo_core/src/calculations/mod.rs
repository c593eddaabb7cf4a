//! # Piping Calculations
//!
//! Checks run over a piping assembly. Each check takes plain inputs and
//! returns a JSON-serializable `*Result`; rule failures live in the result,
//! while `Err(CalcError)` is reserved for inputs the check cannot evaluate.
//!
//! ## Available Calculations
//!
//! - [`low_stress`] - FESHM 5031.1 low stress piping qualification

pub mod low_stress;

pub use low_stress::{check_low_stress, LowStressResult, LowStressViolation};
