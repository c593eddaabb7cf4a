//! Material Summary
//!
//! Plain-English description of the materials used in an assembly, for
//! report text such as "Piping components are made of brass, copper, and
//! 300 series stainless steel."
//!
//! When two or more different 300 series stainless steels appear ("304 SS",
//! "316L SS", ...), they are described together as "300 series stainless
//! steel" instead of being listed one by one.

use std::collections::BTreeSet;

use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;
use crate::piping::{Component, ComponentType};

/// Phrase replacing the individual 3xx stainless grades
pub const STAINLESS_300_SERIES: &str = "300 series stainless steel";

/// Name looks like a 300 series stainless grade: starts with "3", ends with "SS"
pub(crate) fn is_300_series_name(name: &str) -> bool {
    name.starts_with('3') && name.ends_with("SS")
}

/// Distinct (component type, material) pairs used by the components.
pub fn get_materials<'a, 'm>(
    components: impl IntoIterator<Item = &'a Component<'m>>,
) -> BTreeSet<(ComponentType, &'m Material)>
where
    'm: 'a,
{
    components
        .into_iter()
        .map(|c| (c.component_type, c.material))
        .collect()
}

/// True when at least two of the names are 300 series stainless grades.
pub fn is_300_series<S: AsRef<str>>(material_names: impl IntoIterator<Item = S>) -> bool {
    material_names
        .into_iter()
        .filter(|name| is_300_series_name(name.as_ref()))
        .count()
        > 1
}

/// Join items as an English list: "a", "a, and b", "a, b, and c".
fn english_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let mut parts: Vec<String> = init.iter().map(|s| s.to_string()).collect();
            parts.push(format!("and {}", last));
            parts.join(", ")
        }
    }
}

/// Describe the materials of a set of (component type, material) pairs.
///
/// # Errors
///
/// [`CalcError::NoMaterials`] when the set is empty.
///
/// # Example
///
/// ```rust
/// use cryo_core::materials::{get_materials, lookup, summarize_materials, BRASS, SS304, SS316L};
/// use cryo_core::piping::Component;
/// use cryo_core::units::Psi;
///
/// let parts = vec![
///     Component::fitting("Valve", "1/2\"", "", Psi(1000.0), lookup(SS316L).unwrap()),
///     Component::fitting("Tee", "1/2\"", "", Psi(1000.0), lookup(SS304).unwrap()),
///     Component::fitting("Plug", "1/2\"", "", Psi(1000.0), lookup(BRASS).unwrap()),
/// ];
///
/// let summary = summarize_materials(&get_materials(&parts)).unwrap();
/// assert_eq!(summary, "brass, and 300 series stainless steel");
/// ```
pub fn summarize_materials(materials: &BTreeSet<(ComponentType, &Material)>) -> CalcResult<String> {
    let names: BTreeSet<&str> = materials.iter().map(|(_, m)| m.name()).collect();
    if names.is_empty() {
        return Err(CalcError::NoMaterials);
    }

    if is_300_series(&names) {
        let others: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !is_300_series_name(name))
            .collect();
        let mut result = others.join(", ");
        if !result.is_empty() {
            result.push_str(", and ");
        }
        result.push_str(STAINLESS_300_SERIES);
        Ok(result)
    } else {
        let sorted: Vec<&str> = names.into_iter().collect();
        Ok(english_list(&sorted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{lookup, BRASS, COPPER, SS304, SS304L, SS316, SS316L};
    use crate::units::Psi;

    fn fittings<'m>(materials: &[&'m Material]) -> Vec<Component<'m>> {
        materials
            .iter()
            .enumerate()
            .map(|(i, m)| Component::fitting(format!("F-{}", i), "1/2\"", "", Psi(1000.0), *m))
            .collect()
    }

    fn summarize(names: &[&str]) -> CalcResult<String> {
        let materials: Vec<&Material> = names.iter().map(|n| lookup(n).unwrap()).collect();
        let parts = fittings(&materials);
        summarize_materials(&get_materials(&parts))
    }

    #[test]
    fn test_two_stainless_grades_collapse() {
        assert_eq!(summarize(&[SS304, SS316L]).unwrap(), STAINLESS_300_SERIES);
    }

    #[test]
    fn test_stainless_with_others() {
        let summary = summarize(&[SS304L, COPPER, SS316, BRASS]).unwrap();
        assert_eq!(summary, "brass, copper, and 300 series stainless steel");
        assert!(!summary.contains("SS"));
    }

    #[test]
    fn test_single_stainless_is_listed() {
        let summary = summarize(&[SS304L, COPPER]).unwrap();
        assert_eq!(summary, "304L SS, and copper");
    }

    #[test]
    fn test_three_materials_english_list() {
        let materials = [
            Material::new("G10"),
            Material::new("aluminum"),
            Material::new("Invar"),
        ];
        let refs: Vec<&Material> = materials.iter().collect();
        let parts = fittings(&refs);
        let summary = summarize_materials(&get_materials(&parts)).unwrap();
        // Byte order: uppercase sorts before lowercase
        assert_eq!(summary, "G10, Invar, and aluminum");
    }

    #[test]
    fn test_single_material_has_no_dangling_and() {
        assert_eq!(summarize(&[COPPER]).unwrap(), "copper");
        assert_eq!(summarize(&[SS304]).unwrap(), "304 SS");
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(summarize(&[COPPER, COPPER, BRASS]).unwrap(), "brass, and copper");
    }

    #[test]
    fn test_same_material_different_types() {
        let ss = lookup(SS304L).unwrap();
        let geometry = crate::piping::PipeGeometry::nps("1", crate::piping::Schedule::Sch10).unwrap();
        let parts = vec![
            Component::fitting("Elbow", "1\"", "", Psi(1000.0), ss),
            Component::straight("Pipe", "NPS 1", "", ComponentType::NpsPipe, geometry, ss),
        ];
        let materials = get_materials(&parts);
        assert_eq!(materials.len(), 2);
        assert_eq!(summarize_materials(&materials).unwrap(), "304L SS");
    }

    #[test]
    fn test_empty_set_fails() {
        let empty = BTreeSet::new();
        assert_eq!(summarize_materials(&empty).unwrap_err(), CalcError::NoMaterials);
    }

    #[test]
    fn test_is_300_series() {
        assert!(is_300_series(["304 SS", "316L SS"]));
        assert!(!is_300_series(["304 SS", "copper"]));
        assert!(!is_300_series(["410 SS", "17-4 SS"]));
        assert!(!is_300_series(Vec::<String>::new()));
    }

    #[test]
    fn test_english_list() {
        assert_eq!(english_list(&[]), "");
        assert_eq!(english_list(&["a"]), "a");
        assert_eq!(english_list(&["a", "b"]), "a, and b");
        assert_eq!(english_list(&["a", "b", "c"]), "a, b, and c");
    }
}
