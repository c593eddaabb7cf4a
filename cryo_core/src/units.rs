//! # Unit Types
//!
//! Type-safe wrappers for the physical quantities used in piping checks.
//! Each unit is a plain `f64` newtype, so values serialize as bare numbers
//! while the compiler still refuses to compare a pressure with a temperature.
//!
//! ## Units
//!
//! - Pressure / stress: psi (differential, "psid")
//! - Temperature: kelvin, degrees Celsius, degrees Fahrenheit
//! - Length: inches
//! - Density: kilograms per cubic meter
//!
//! Temperatures are compared in [`Kelvin`]; convert with `.into()` first.
//!
//! ## Example
//!
//! ```rust
//! use cryo_core::units::{Celsius, Fahrenheit, Kelvin, Psi};
//!
//! let t_des: Kelvin = Celsius(20.0).into();
//! let t_min: Kelvin = Fahrenheit(-425.0).into();
//! assert!(t_min < t_des);
//!
//! // Dividing two pressures gives a dimensionless ratio
//! let ratio = Psi(100.0) / Psi(500.0);
//! assert!((ratio - 0.2).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Offset between the Celsius and Kelvin scales
const CELSIUS_OFFSET_K: f64 = 273.15;

// ============================================================================
// Pressure / Stress Units
// ============================================================================

/// Pressure or stress in pounds per square inch.
///
/// Design pressures are differential (psid); allowable stresses are plain psi.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Pressure ratio, e.g. design pressure over pressure rating
impl Div<Psi> for Psi {
    type Output = f64;
    fn div(self, rhs: Psi) -> f64 {
        self.0 / rhs.0
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + CELSIUS_OFFSET_K)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - CELSIUS_OFFSET_K)
    }
}

impl From<Fahrenheit> for Kelvin {
    fn from(f: Fahrenheit) -> Self {
        Kelvin((f.0 - 32.0) * 5.0 / 9.0 + CELSIUS_OFFSET_K)
    }
}

impl From<Kelvin> for Fahrenheit {
    fn from(k: Kelvin) -> Self {
        Fahrenheit((k.0 - CELSIUS_OFFSET_K) * 9.0 / 5.0 + 32.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Kelvin::from(c).into()
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Kelvin::from(f).into()
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

// ============================================================================
// Density
// ============================================================================

/// Density in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM3(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_value {
    ($type:ty) => {
        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl_value!($type);
    };
}

impl_arithmetic!(Psi);
impl_arithmetic!(Inches);
impl_arithmetic!(KgPerM3);

// Adding two absolute temperatures is meaningless, so no arithmetic here.
impl_value!(Kelvin);
impl_value!(Celsius);
impl_value!(Fahrenheit);

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_celsius_to_kelvin() {
        let k: Kelvin = Celsius(20.0).into();
        assert!(close(k.0, 293.15));

        let c: Celsius = Kelvin(77.0).into();
        assert!(close(c.0, -196.15));
    }

    #[test]
    fn test_fahrenheit_to_kelvin() {
        let k: Kelvin = Fahrenheit(32.0).into();
        assert!(close(k.0, 273.15));

        // -425 °F is the stainless steel floor in the catalog
        let k: Kelvin = Fahrenheit(-425.0).into();
        assert!((k.0 - 19.261).abs() < 1e-3);
    }

    #[test]
    fn test_celsius_fahrenheit_roundtrip() {
        let f: Fahrenheit = Celsius(100.0).into();
        assert!(close(f.0, 212.0));
        let c: Celsius = f.into();
        assert!(close(c.0, 100.0));
    }

    #[test]
    fn test_pressure_ratio() {
        assert_eq!(Psi(100.0) / Psi(500.0), 0.2);
        assert_eq!(Psi(150.0) / Psi(300.0), 0.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Inches(1.315);
        let b = Inches(0.133);
        assert!(close((a - b * 2.0).0, 1.049));
        assert!(close((a + b).0, 1.448));
        assert!(close((a / 2.0).0, 0.6575));
    }

    #[test]
    fn test_serialization() {
        let p = Psi(150.0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "150.0");

        let roundtrip: Psi = serde_json::from_str(&json).unwrap();
        assert_eq!(p, roundtrip);
    }
}
