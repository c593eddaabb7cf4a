//! Material Catalog
//!
//! The fixed set of piping materials, built once from `data/materials.toml`
//! (compiled in by `build.rs`). Base alloys and their low-carbon variants are
//! separate entries since their allowable stresses differ.
//!
//! ```rust
//! use cryo_core::materials::catalog::{self, SS304L};
//! use cryo_core::units::Psi;
//!
//! let ss = catalog::lookup(SS304L).unwrap();
//! assert_eq!(ss.allowable_stress().unwrap(), Psi(16_700.0));
//! ```

use once_cell::sync::Lazy;

use crate::errors::{CalcError, CalcResult};
use crate::generated::{MaterialRecord, MATERIAL_RECORDS};
use crate::materials::Material;
use crate::units::{Fahrenheit, KgPerM3, Psi};

pub const SS304: &str = "304 SS";
pub const SS304L: &str = "304L SS";
pub const SS316: &str = "316 SS";
pub const SS316L: &str = "316L SS";
pub const COPPER: &str = "copper";
pub const BRASS: &str = "brass";

static CATALOG: Lazy<Vec<Material>> = Lazy::new(|| {
    MATERIAL_RECORDS.iter().map(material_from_record).collect()
});

fn material_from_record(record: &MaterialRecord) -> Material {
    let mut material = Material::new(record.name);
    if let Some(rho) = record.density_kg_m3 {
        material = material.with_density(KgPerM3(rho));
    }
    if let Some(s) = record.allowable_stress_psi {
        material = material.with_allowable_stress(Psi(s));
    }
    if let Some(nu) = record.poisson_ratio {
        material = material.with_poisson_ratio(nu);
    }
    if let Some(t_min) = record.min_temperature_degf {
        material = material.with_min_temperature(Fahrenheit(t_min));
    }
    material
}

/// Every catalog material, in data file order
pub fn all() -> &'static [Material] {
    &CATALOG
}

/// Look up a catalog material by exact name.
pub fn lookup(name: &str) -> CalcResult<&'static Material> {
    CATALOG
        .iter()
        .find(|m| m.name() == name)
        .ok_or_else(|| CalcError::material_not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Kelvin;

    #[test]
    fn test_catalog_contents() {
        let names: Vec<&str> = all().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec![SS304, SS304L, SS316, SS316L, COPPER, BRASS]);
    }

    #[test]
    fn test_low_carbon_variants_differ() {
        let ss304 = lookup(SS304).unwrap();
        let ss304l = lookup(SS304L).unwrap();
        assert_eq!(ss304.allowable_stress().unwrap(), Psi(20_000.0));
        assert_eq!(ss304l.allowable_stress().unwrap(), Psi(16_700.0));

        let ss316 = lookup(SS316).unwrap();
        let ss316l = lookup(SS316L).unwrap();
        assert!(ss316l.allowable_stress().unwrap() < ss316.allowable_stress().unwrap());
    }

    #[test]
    fn test_minimum_temperatures() {
        let copper = lookup(COPPER).unwrap().min_temperature().unwrap();
        let brass = lookup(BRASS).unwrap().min_temperature().unwrap();
        let ss = lookup(SS304L).unwrap().min_temperature().unwrap();

        let expected: Kelvin = Fahrenheit(-452.0).into();
        assert!((copper.0 - expected.0).abs() < 1e-9);
        assert!(copper < ss);
        assert!(ss < brass);
    }

    #[test]
    fn test_every_entry_is_checkable() {
        for material in all() {
            assert!(material.allowable_stress().is_ok(), "{} has no S", material);
            assert!(material.min_temperature().is_ok(), "{} has no T_min", material);
        }
    }

    #[test]
    fn test_partial_entries() {
        assert_eq!(lookup(SS304).unwrap().density().unwrap(), KgPerM3(7859.0));
        assert!(lookup(SS316).unwrap().density().is_err());
        assert!(lookup(COPPER).unwrap().poisson_ratio().is_err());
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("Inconel 718").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("Inconel 718"));
        // Names are case sensitive
        assert!(lookup("Copper").is_err());
    }
}
