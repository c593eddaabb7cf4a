//! # Piping Components
//!
//! Components of a piping assembly (fittings, tube, pipe) and how each one
//! gets its pressure rating.
//!
//! A [`Component`] borrows its [`Material`] rather than owning it: materials
//! normally come from the process-wide [`catalog`](crate::materials::catalog),
//! so components built from the catalog are `Component<'static>`.
//!
//! ## Example
//!
//! ```rust
//! use cryo_core::materials::{lookup, SS304L};
//! use cryo_core::piping::{Component, ComponentType, PipeGeometry, Schedule};
//! use cryo_core::units::Psi;
//!
//! let ss = lookup(SS304L).unwrap();
//!
//! let valve = Component::fitting("V-1 ball valve", "1\"", "Swagelok", Psi(1000.0), ss);
//!
//! let line = Component {
//!     name: "Supply line".to_string(),
//!     size: "NPS 1 Sch 10S".to_string(),
//!     source: "McMaster".to_string(),
//!     rated_pressure: Psi(0.0),
//!     material: ss,
//!     component_type: ComponentType::NpsPipe,
//!     geometry: Some(PipeGeometry::nps("1", Schedule::Sch10).unwrap()),
//! };
//! assert!(line.component_type.is_tube_like());
//! ```

pub mod rating;
pub mod sizes;

pub use rating::{pressure_rating, RatingFactors};
pub use sizes::{PipeGeometry, Schedule};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;
use crate::units::Psi;

/// Kind of piping component.
///
/// Only these kinds can be rated. Tags outside the set fail to parse with
/// [`CalcError::UnknownComponentType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    /// Valve, tee, elbow, flex hose... rated by its manufacturer
    #[serde(rename = "Fitting")]
    Fitting,
    /// Straight tube with explicit OD and wall
    #[serde(rename = "Tube")]
    Tube,
    /// Nominal pipe size (ASME B36.10/B36.19)
    #[serde(rename = "NPS pipe")]
    NpsPipe,
    /// ASTM B88 Type K copper water tube
    #[serde(rename = "Copper tube Type K")]
    CopperTubeTypeK,
}

impl ComponentType {
    /// All component types
    pub const ALL: [ComponentType; 4] = [
        ComponentType::Fitting,
        ComponentType::Tube,
        ComponentType::NpsPipe,
        ComponentType::CopperTubeTypeK,
    ];

    /// Tag used in system files and reports
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentType::Fitting => "Fitting",
            ComponentType::Tube => "Tube",
            ComponentType::NpsPipe => "NPS pipe",
            ComponentType::CopperTubeTypeK => "Copper tube Type K",
        }
    }

    /// Whether the rating comes from the pressure design formula
    /// rather than a manufacturer rating
    pub fn is_tube_like(&self) -> bool {
        matches!(
            self,
            ComponentType::Tube | ComponentType::NpsPipe | ComponentType::CopperTubeTypeK
        )
    }
}

impl FromStr for ComponentType {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == s.trim())
            .ok_or_else(|| CalcError::unknown_component_type(s))
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One component of a piping assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Component<'m> {
    /// Description, e.g. "Relief valve RV-2"
    pub name: String,

    /// Nominal size as written on the drawing, e.g. "1/2\""
    pub size: String,

    /// Vendor or part source
    pub source: String,

    /// Manufacturer pressure rating P (used for fittings)
    pub rated_pressure: Psi,

    /// Material the component is made of
    pub material: &'m Material,

    /// Kind of component
    pub component_type: ComponentType,

    /// Cross-section; required to rate tube-like components
    pub geometry: Option<PipeGeometry>,
}

impl<'m> Component<'m> {
    /// Create a fitting rated by its manufacturer
    pub fn fitting(
        name: impl Into<String>,
        size: impl Into<String>,
        source: impl Into<String>,
        rated_pressure: Psi,
        material: &'m Material,
    ) -> Self {
        Component {
            name: name.into(),
            size: size.into(),
            source: source.into(),
            rated_pressure,
            material,
            component_type: ComponentType::Fitting,
            geometry: None,
        }
    }

    /// Create a straight tube-like component rated from its geometry.
    ///
    /// The manufacturer rating is left at zero; only the geometry is used.
    pub fn straight(
        name: impl Into<String>,
        size: impl Into<String>,
        source: impl Into<String>,
        component_type: ComponentType,
        geometry: PipeGeometry,
        material: &'m Material,
    ) -> Self {
        Component {
            name: name.into(),
            size: size.into(),
            source: source.into(),
            rated_pressure: Psi(0.0),
            material,
            component_type,
            geometry: Some(geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{lookup, SS304L};

    #[test]
    fn test_parse_known_types() {
        assert_eq!("Fitting".parse::<ComponentType>().unwrap(), ComponentType::Fitting);
        assert_eq!("Tube".parse::<ComponentType>().unwrap(), ComponentType::Tube);
        assert_eq!("NPS pipe".parse::<ComponentType>().unwrap(), ComponentType::NpsPipe);
        assert_eq!(
            "Copper tube Type K".parse::<ComponentType>().unwrap(),
            ComponentType::CopperTubeTypeK
        );
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let err = "Flange".parse::<ComponentType>().unwrap_err();
        assert_eq!(err, CalcError::unknown_component_type("Flange"));
        assert!("fitting".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_tube_like() {
        assert!(!ComponentType::Fitting.is_tube_like());
        assert!(ComponentType::Tube.is_tube_like());
        assert!(ComponentType::NpsPipe.is_tube_like());
        assert!(ComponentType::CopperTubeTypeK.is_tube_like());
    }

    #[test]
    fn test_type_serialization() {
        let json = serde_json::to_string(&ComponentType::CopperTubeTypeK).unwrap();
        assert_eq!(json, "\"Copper tube Type K\"");
        let parsed: ComponentType = serde_json::from_str("\"NPS pipe\"").unwrap();
        assert_eq!(parsed, ComponentType::NpsPipe);
        assert!(serde_json::from_str::<ComponentType>("\"Flange\"").is_err());
    }

    #[test]
    fn test_fitting_constructor() {
        let ss = lookup(SS304L).unwrap();
        let c = Component::fitting("Elbow", "1/2\"", "Swagelok", Psi(500.0), ss);
        assert_eq!(c.component_type, ComponentType::Fitting);
        assert_eq!(c.rated_pressure, Psi(500.0));
        assert_eq!(c.material.name(), SS304L);
        assert!(c.geometry.is_none());
    }
}
