//! Compile-time data tables produced by `build.rs`.

/// One row of `data/materials.toml`
#[derive(Debug, Clone, Copy)]
pub(crate) struct MaterialRecord {
    pub name: &'static str,
    pub density_kg_m3: Option<f64>,
    pub allowable_stress_psi: Option<f64>,
    pub poisson_ratio: Option<f64>,
    pub min_temperature_degf: Option<f64>,
}

include!(concat!(env!("OUT_DIR"), "/material_data.rs"));
