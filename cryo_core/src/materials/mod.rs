//! # Materials
//!
//! Piping materials and the properties the low stress check needs.
//!
//! A [`Material`] is identified by its name: two values with the same name
//! compare equal and hash the same, whatever their properties. Properties are
//! optional at the data level because not every catalog entry defines every
//! property; the accessors turn a missing value into
//! [`CalcError::MissingProperty`] so a check never silently skips a rule.
//!
//! ## Example
//!
//! ```rust
//! use cryo_core::materials::Material;
//! use cryo_core::units::{Fahrenheit, Psi};
//!
//! let monel = Material::new("Monel 400")
//!     .with_allowable_stress(Psi(23_300.0))
//!     .with_min_temperature(Fahrenheit(-325.0));
//!
//! assert_eq!(monel.allowable_stress().unwrap(), Psi(23_300.0));
//! assert!(monel.density().is_err());
//! ```

pub mod catalog;
pub mod summary;

pub use catalog::{lookup, BRASS, COPPER, SS304, SS304L, SS316, SS316L};
pub use summary::{get_materials, is_300_series, summarize_materials};

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KgPerM3, Kelvin, Psi};

/// A piping material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "304L SS",
///   "density_kg_m3": 7859.0,
///   "allowable_stress_psi": 16700.0,
///   "poisson_ratio": 0.3,
///   "min_temperature_k": 19.26
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    density_kg_m3: Option<KgPerM3>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowable_stress_psi: Option<Psi>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    poisson_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_temperature_k: Option<Kelvin>,
}

impl Material {
    /// Start a material with only a name. Chain the `with_*` methods to
    /// attach properties.
    pub fn new(name: impl Into<String>) -> Self {
        Material {
            name: name.into(),
            density_kg_m3: None,
            allowable_stress_psi: None,
            poisson_ratio: None,
            min_temperature_k: None,
        }
    }

    /// Set the density
    pub fn with_density(mut self, density: KgPerM3) -> Self {
        self.density_kg_m3 = Some(density);
        self
    }

    /// Set the basic allowable stress S
    pub fn with_allowable_stress(mut self, stress: impl Into<Psi>) -> Self {
        self.allowable_stress_psi = Some(stress.into());
        self
    }

    /// Set Poisson's ratio
    pub fn with_poisson_ratio(mut self, nu: f64) -> Self {
        self.poisson_ratio = Some(nu);
        self
    }

    /// Set the minimum service temperature
    pub fn with_min_temperature(mut self, t_min: impl Into<Kelvin>) -> Self {
        self.min_temperature_k = Some(t_min.into());
        self
    }

    /// Material name, e.g. "304L SS"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density
    pub fn density(&self) -> CalcResult<KgPerM3> {
        self.density_kg_m3
            .ok_or_else(|| CalcError::missing_property(&self.name, "density"))
    }

    /// Basic allowable stress S
    pub fn allowable_stress(&self) -> CalcResult<Psi> {
        self.allowable_stress_psi
            .ok_or_else(|| CalcError::missing_property(&self.name, "allowable stress"))
    }

    /// Poisson's ratio
    pub fn poisson_ratio(&self) -> CalcResult<f64> {
        self.poisson_ratio
            .ok_or_else(|| CalcError::missing_property(&self.name, "Poisson's ratio"))
    }

    /// Lowest temperature the material is listed for
    pub fn min_temperature(&self) -> CalcResult<Kelvin> {
        self.min_temperature_k
            .ok_or_else(|| CalcError::missing_property(&self.name, "minimum temperature"))
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Material {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Material {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Fahrenheit;

    #[test]
    fn test_builder_sets_properties() {
        let mat = Material::new("304L SS")
            .with_density(KgPerM3(7859.0))
            .with_allowable_stress(Psi(16_700.0))
            .with_poisson_ratio(0.3)
            .with_min_temperature(Fahrenheit(-425.0));

        assert_eq!(mat.name(), "304L SS");
        assert_eq!(mat.density().unwrap(), KgPerM3(7859.0));
        assert_eq!(mat.allowable_stress().unwrap(), Psi(16_700.0));
        assert_eq!(mat.poisson_ratio().unwrap(), 0.3);
        assert!((mat.min_temperature().unwrap().0 - 19.261).abs() < 1e-3);
    }

    #[test]
    fn test_missing_property() {
        let mat = Material::new("unobtainium");
        let err = mat.min_temperature().unwrap_err();
        assert_eq!(
            err,
            CalcError::missing_property("unobtainium", "minimum temperature")
        );
        assert!(mat.allowable_stress().is_err());
    }

    #[test]
    fn test_identity_is_name() {
        let a = Material::new("copper").with_allowable_stress(Psi(6000.0));
        let b = Material::new("copper");
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serialization_skips_missing() {
        let mat = Material::new("copper").with_allowable_stress(Psi(6000.0));
        let json = serde_json::to_string(&mat).unwrap();
        assert_eq!(json, r#"{"name":"copper","allowable_stress_psi":6000.0}"#);

        let parsed: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.allowable_stress().unwrap(), Psi(6000.0));
        assert!(parsed.min_temperature().is_err());
    }
}
