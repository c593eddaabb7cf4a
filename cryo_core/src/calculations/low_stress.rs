//! # Low Stress Piping Check
//!
//! Decides whether a piping assembly qualifies for the simplified "low
//! stress" category of FESHM 5031.1. Four rules are evaluated in order and
//! the first failure is reported:
//!
//! 1. Design pressure below 150 psid
//! 2. Design pressure / pressure rating ≤ 0.2 for every component
//! 3. Design temperature at or below 366 °C
//! 4. Design temperature at or above every material's minimum temperature
//!
//! A failed rule is a normal outcome, returned as a [`LowStressViolation`]
//! inside `Ok`. `Err` means the check could not be evaluated: a component
//! could not be rated, or a material lacks a property a rule needs.
//!
//! ## Example
//!
//! ```rust
//! use cryo_core::calculations::low_stress::check_low_stress;
//! use cryo_core::materials::{lookup, SS304L};
//! use cryo_core::piping::{Component, RatingFactors};
//! use cryo_core::units::{Celsius, Psi};
//!
//! let ss = lookup(SS304L).unwrap();
//! let parts = vec![
//!     Component::fitting("Valve", "1/2\"", "Swagelok", Psi(500.0), ss),
//!     Component::fitting("Tee", "1/2\"", "Swagelok", Psi(500.0), ss),
//! ];
//! let factors = RatingFactors { e: 1.0, w: 1.0, y: 0.4 };
//!
//! let result = check_low_stress(Psi(100.0), Celsius(20.0), &parts, &factors).unwrap();
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::piping::{pressure_rating, Component, RatingFactors};
use crate::units::{Celsius, Kelvin, Psi};

/// Design pressure must be strictly below this (differential)
pub const MAX_DESIGN_PRESSURE: Psi = Psi(150.0);

/// Largest allowed design pressure / rating ratio
pub const MAX_STRESS_RATIO: f64 = 0.2;

/// Design temperature must not exceed this
pub const MAX_DESIGN_TEMPERATURE: Celsius = Celsius(366.0);

/// The rule that disqualified an assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum LowStressViolation {
    /// Rule 1
    PressureTooHigh {
        design_pressure_psi: Psi,
        limit_psi: Psi,
    },
    /// Rule 2, first component over the limit
    StressRatioTooHigh {
        component: String,
        stress_ratio: f64,
        limit: f64,
    },
    /// Rule 3
    TemperatureTooHigh {
        design_temperature_k: Kelvin,
        limit_k: Kelvin,
    },
    /// Rule 4, first component whose material is not listed this cold
    MaterialNotRated {
        component: String,
        material: String,
        min_temperature_k: Kelvin,
    },
}

impl LowStressViolation {
    /// Operator-facing reason
    pub fn message(&self) -> &'static str {
        match self {
            LowStressViolation::PressureTooHigh { .. } => "Pressure too high for low stress category.",
            LowStressViolation::StressRatioTooHigh { .. } => "Stress ratio too high for low stress category.",
            LowStressViolation::TemperatureTooHigh { .. } => {
                "Design temperature too high for low stress category."
            }
            LowStressViolation::MaterialNotRated { .. } => "Material is not listed for this temperature.",
        }
    }

    /// Rule number (1-4)
    pub fn rule(&self) -> u8 {
        match self {
            LowStressViolation::PressureTooHigh { .. } => 1,
            LowStressViolation::StressRatioTooHigh { .. } => 2,
            LowStressViolation::TemperatureTooHigh { .. } => 3,
            LowStressViolation::MaterialNotRated { .. } => 4,
        }
    }
}

impl std::fmt::Display for LowStressViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of [`check_low_stress`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "design_pressure_psi": 200.0,
///   "design_temperature_k": 293.15,
///   "max_stress_ratio": null,
///   "violation": {
///     "rule": "PressureTooHigh",
///     "design_pressure_psi": 200.0,
///     "limit_psi": 150.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStressResult {
    /// Design pressure checked
    pub design_pressure_psi: Psi,

    /// Design temperature checked
    pub design_temperature_k: Kelvin,

    /// Largest design/rating ratio seen, if rule 2 was reached
    pub max_stress_ratio: Option<f64>,

    /// First failed rule; `None` when the assembly qualifies
    pub violation: Option<LowStressViolation>,
}

impl LowStressResult {
    /// Check if the assembly qualifies as low stress piping
    pub fn passes(&self) -> bool {
        self.violation.is_none()
    }

    /// Reason the assembly does not qualify
    pub fn reason(&self) -> Option<&'static str> {
        self.violation.as_ref().map(LowStressViolation::message)
    }
}

/// Rule 2. Returns the largest ratio, or the first component over the limit.
fn check_stress_ratios(
    design_pressure: Psi,
    components: &[Component<'_>],
    factors: &RatingFactors,
) -> CalcResult<(Option<f64>, Option<LowStressViolation>)> {
    let mut max_ratio: Option<f64> = None;
    for component in components {
        let rating = pressure_rating(component, factors)?;
        let ratio = design_pressure / rating;
        debug!(component = %component.name, rating_psi = rating.value(), ratio, "stress ratio");

        max_ratio = Some(max_ratio.map_or(ratio, |m| m.max(ratio)));
        // NaN (zero rating with zero pressure) must not slip through
        if !(ratio <= MAX_STRESS_RATIO) {
            return Ok((
                max_ratio,
                Some(LowStressViolation::StressRatioTooHigh {
                    component: component.name.clone(),
                    stress_ratio: ratio,
                    limit: MAX_STRESS_RATIO,
                }),
            ));
        }
    }
    Ok((max_ratio, None))
}

/// Rule 4. Every material must define its minimum temperature, even when an
/// earlier component already fails the floor.
fn check_material_floor(
    design_temperature: Kelvin,
    components: &[Component<'_>],
) -> CalcResult<Option<LowStressViolation>> {
    let floors = components
        .iter()
        .map(|c| c.material.min_temperature())
        .collect::<CalcResult<Vec<Kelvin>>>()?;

    Ok(components
        .iter()
        .zip(floors)
        .find(|(_, t_min)| design_temperature < *t_min)
        .map(|(component, t_min)| LowStressViolation::MaterialNotRated {
            component: component.name.clone(),
            material: component.material.name().to_string(),
            min_temperature_k: t_min,
        }))
}

/// Check whether a piping assembly satisfies the FESHM 5031.1 low stress
/// piping requirements.
///
/// # Arguments
///
/// * `design_pressure` - Differential design pressure
/// * `design_temperature` - Design temperature, any temperature unit
/// * `components` - Components of the assembly; an empty list trivially
///   satisfies the per-component rules
/// * `factors` - E, W and Y for rating tube-like components
///
/// # Returns
///
/// * `Ok(LowStressResult)` - Evaluated; see [`LowStressResult::passes`]
/// * `Err(CalcError)` - Non-finite inputs, a component that cannot be rated,
///   or a material without a required property
pub fn check_low_stress(
    design_pressure: Psi,
    design_temperature: impl Into<Kelvin>,
    components: &[Component<'_>],
    factors: &RatingFactors,
) -> CalcResult<LowStressResult> {
    let design_temperature: Kelvin = design_temperature.into();

    if !design_pressure.value().is_finite() {
        return Err(CalcError::invalid_input(
            "design_pressure",
            design_pressure.value().to_string(),
            "Design pressure must be a finite number",
        ));
    }
    if !design_temperature.value().is_finite() {
        return Err(CalcError::invalid_input(
            "design_temperature",
            design_temperature.value().to_string(),
            "Design temperature must be a finite number",
        ));
    }

    let mut result = LowStressResult {
        design_pressure_psi: design_pressure,
        design_temperature_k: design_temperature,
        max_stress_ratio: None,
        violation: None,
    };

    let violation = 'rules: {
        if design_pressure >= MAX_DESIGN_PRESSURE {
            break 'rules Some(LowStressViolation::PressureTooHigh {
                design_pressure_psi: design_pressure,
                limit_psi: MAX_DESIGN_PRESSURE,
            });
        }

        let (max_ratio, violation) = check_stress_ratios(design_pressure, components, factors)?;
        result.max_stress_ratio = max_ratio;
        if violation.is_some() {
            break 'rules violation;
        }

        let limit: Kelvin = MAX_DESIGN_TEMPERATURE.into();
        if design_temperature > limit {
            break 'rules Some(LowStressViolation::TemperatureTooHigh {
                design_temperature_k: design_temperature,
                limit_k: limit,
            });
        }

        check_material_floor(design_temperature, components)?
    };
    result.violation = violation;

    match &result.violation {
        Some(violation) => warn!(rule = violation.rule(), "{}", violation.message()),
        None => info!(
            components = components.len(),
            max_stress_ratio = ?result.max_stress_ratio,
            "assembly qualifies as low stress piping"
        ),
    }

    Ok(result)
}
