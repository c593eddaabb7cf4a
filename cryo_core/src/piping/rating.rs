//! Pressure Ratings
//!
//! Maximum allowable internal pressure of a component.
//!
//! Straight pipe and tube are rated with the ASME B31.3 §304.1.2 pressure
//! design equation for `t < D/6`, solved for pressure:
//!
//! ```text
//! P = 2 S E W t / (D - 2 Y t)
//! ```
//!
//! where `t` is the pressure design thickness (minimum wall less allowances,
//! see [`PipeGeometry::pressure_design_thickness`]). Fittings carry their
//! manufacturer rating and are not computed.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::piping::{Component, ComponentType, PipeGeometry};
use crate::units::Psi;

/// Code factors for the pressure design equation.
///
/// There are no defaults: every check states its factors explicitly.
///
/// ## JSON Example
///
/// ```json
/// { "e": 1.0, "w": 1.0, "y": 0.4 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingFactors {
    /// Longitudinal weld joint quality factor E (1.0 for seamless)
    pub e: f64,

    /// Weld joint strength reduction factor W
    pub w: f64,

    /// Temperature coefficient Y (0.4 below 900 °F for austenitic steels)
    pub y: f64,
}

impl RatingFactors {
    /// Validate factor ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.e > 0.0 && self.e <= 1.0) {
            return Err(CalcError::invalid_input("e", self.e.to_string(), "E must be in (0, 1]"));
        }
        if !(self.w > 0.0 && self.w <= 1.0) {
            return Err(CalcError::invalid_input("w", self.w.to_string(), "W must be in (0, 1]"));
        }
        if !(0.0..1.0).contains(&self.y) {
            return Err(CalcError::invalid_input("y", self.y.to_string(), "Y must be in [0, 1)"));
        }
        Ok(())
    }
}

/// Rate a straight pipe or tube from its geometry and allowable stress.
pub fn straight_pipe_rating(geometry: &PipeGeometry, stress: Psi, factors: &RatingFactors) -> CalcResult<Psi> {
    geometry.validate()?;
    factors.validate()?;

    let t = geometry.pressure_design_thickness().value();
    if t <= 0.0 {
        return Err(CalcError::invalid_input(
            "allowance",
            geometry.allowance.value().to_string(),
            "Allowances consume the whole wall",
        ));
    }

    let d = geometry.outside_diameter.value();
    let denominator = d - 2.0 * factors.y * t;
    Ok(Psi(2.0 * stress.value() * factors.e * factors.w * t / denominator))
}

/// Pressure rating of a single component.
///
/// Fittings return their stored rating. Tube-like components are computed
/// from geometry and need both a geometry and an allowable stress on the
/// material.
pub fn pressure_rating(component: &Component<'_>, factors: &RatingFactors) -> CalcResult<Psi> {
    match component.component_type {
        ComponentType::Fitting => Ok(component.rated_pressure),
        ComponentType::Tube | ComponentType::NpsPipe | ComponentType::CopperTubeTypeK => {
            let geometry = component
                .geometry
                .as_ref()
                .ok_or_else(|| CalcError::missing_field(format!("{}.geometry", component.name)))?;
            let stress = component.material.allowable_stress()?;
            straight_pipe_rating(geometry, stress, factors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{lookup, Material, COPPER, SS304L};
    use crate::piping::Schedule;
    use crate::units::Inches;

    const SEAMLESS: RatingFactors = RatingFactors { e: 1.0, w: 1.0, y: 0.4 };

    #[test]
    fn test_fitting_uses_stored_rating() {
        let ss = lookup(SS304L).unwrap();
        let c = Component::fitting("Tee", "1\"", "Swagelok", Psi(500.0), ss);
        assert_eq!(pressure_rating(&c, &SEAMLESS).unwrap(), Psi(500.0));
    }

    #[test]
    fn test_nps_pipe_rating() {
        let ss = lookup(SS304L).unwrap();
        let geometry = PipeGeometry::nps("1", Schedule::Sch10).unwrap();
        let c = Component::straight("Line", "NPS 1", "", ComponentType::NpsPipe, geometry, ss);

        // t = 0.109 * 0.875 = 0.095375 in
        // P = 2 * 16700 * 0.095375 / (1.315 - 2 * 0.4 * 0.095375) = 2571.67 psi
        let p = pressure_rating(&c, &SEAMLESS).unwrap();
        assert!((p.0 - 2571.67).abs() < 0.1, "got {}", p.0);
    }

    #[test]
    fn test_copper_tube_rating() {
        let cu = lookup(COPPER).unwrap();
        let geometry = PipeGeometry::copper_type_k("1/2").unwrap();
        let c = Component::straight("Drain", "1/2\"", "", ComponentType::CopperTubeTypeK, geometry, cu);

        // t = 0.049 * 0.9 = 0.0441 in
        // P = 2 * 6000 * 0.0441 / (0.625 - 0.8 * 0.0441) = 897.38 psi
        let p = pressure_rating(&c, &SEAMLESS).unwrap();
        assert!((p.0 - 897.38).abs() < 0.1, "got {}", p.0);
    }

    #[test]
    fn test_factors_scale_rating() {
        let geometry = PipeGeometry::tube(Inches(0.5), Inches(0.035)).unwrap();
        let full = straight_pipe_rating(&geometry, Psi(16_700.0), &SEAMLESS).unwrap();
        let welded = straight_pipe_rating(
            &geometry,
            Psi(16_700.0),
            &RatingFactors { e: 0.8, w: 1.0, y: 0.4 },
        )
        .unwrap();
        assert!((welded.0 / full.0 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_tube_without_geometry() {
        let ss = lookup(SS304L).unwrap();
        let mut c = Component::fitting("Bare tube", "1/4\"", "", Psi(0.0), ss);
        c.component_type = ComponentType::Tube;
        let err = pressure_rating(&c, &SEAMLESS).unwrap_err();
        assert_eq!(err, CalcError::missing_field("Bare tube.geometry"));
    }

    #[test]
    fn test_tube_without_allowable_stress() {
        let mystery = Material::new("mystery alloy");
        let geometry = PipeGeometry::tube(Inches(0.5), Inches(0.035)).unwrap();
        let c = Component::straight("Tube", "1/2\"", "", ComponentType::Tube, geometry, &mystery);
        let err = pressure_rating(&c, &SEAMLESS).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_PROPERTY");
    }

    #[test]
    fn test_invalid_factors() {
        assert!(RatingFactors { e: 0.0, w: 1.0, y: 0.4 }.validate().is_err());
        assert!(RatingFactors { e: 1.0, w: 1.2, y: 0.4 }.validate().is_err());
        assert!(RatingFactors { e: 1.0, w: 1.0, y: 1.0 }.validate().is_err());
        assert!(SEAMLESS.validate().is_ok());
    }

    #[test]
    fn test_allowance_consumes_wall() {
        let geometry = PipeGeometry::tube(Inches(0.5), Inches(0.035))
            .unwrap()
            .with_allowance(Inches(0.05));
        assert!(straight_pipe_rating(&geometry, Psi(16_700.0), &SEAMLESS).is_err());
    }
}
