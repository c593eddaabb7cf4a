//! Generates the material catalog table from `data/materials.toml`.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Deserialize)]
struct MaterialFile {
    material: Vec<MaterialEntry>,
}

#[derive(Deserialize)]
struct MaterialEntry {
    name: String,
    density_kg_m3: Option<f64>,
    allowable_stress_psi: Option<f64>,
    poisson_ratio: Option<f64>,
    min_temperature_degf: Option<f64>,
}

fn option_literal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("Some({:?})", v),
        None => "None".to_string(),
    }
}

fn main() {
    let data_path = "data/materials.toml";
    println!("cargo:rerun-if-changed={}", data_path);

    let raw = fs::read_to_string(data_path).expect("failed to read data/materials.toml");
    let file: MaterialFile = toml::from_str(&raw).expect("invalid data/materials.toml");

    let mut names = std::collections::HashSet::new();
    let mut out = String::new();
    out.push_str("// Generated by build.rs from data/materials.toml. Do not edit.\n\n");
    out.push_str("pub(crate) const MATERIAL_RECORDS: &[MaterialRecord] = &[\n");
    for entry in &file.material {
        assert!(names.insert(entry.name.clone()), "duplicate material name: {}", entry.name);
        writeln!(
            out,
            "    MaterialRecord {{ name: {:?}, density_kg_m3: {}, allowable_stress_psi: {}, poisson_ratio: {}, min_temperature_degf: {} }},",
            entry.name,
            option_literal(entry.density_kg_m3),
            option_literal(entry.allowable_stress_psi),
            option_literal(entry.poisson_ratio),
            option_literal(entry.min_temperature_degf),
        )
        .expect("write to String");
    }
    out.push_str("];\n");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    fs::write(Path::new(&out_dir).join("material_data.rs"), out).expect("failed to write material_data.rs");
}
