//! # Piping System Description
//!
//! A [`PipingSystem`] is the JSON document the CLI reads: who and what the
//! report is for, the design conditions, the code factors and the component
//! list. Components reference catalog materials by name and carry their type
//! as a plain tag; [`ComponentSpec::resolve`] turns them into
//! [`Component`]s.
//!
//! ## Structure
//!
//! ```text
//! PipingSystem
//! ├── meta: SystemMetadata (version, title, engineer, job id, created)
//! ├── design: DesignConditions (pressure, temperature)
//! ├── factors: RatingFactors (E, W, Y)
//! ├── components: Vec<ComponentSpec>
//! └── settings: ReportSettings (format, images dir, DPI, diagram)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cryo_core::system::{ComponentSpec, DesignConditions, PipingSystem};
//! use cryo_core::piping::RatingFactors;
//! use cryo_core::units::{Celsius, Psi};
//!
//! let mut system = PipingSystem::new(
//!     "LN2 fill line",
//!     "Jane Engineer",
//!     "25-042",
//!     DesignConditions::new(Psi(100.0), Celsius(20.0)),
//!     RatingFactors { e: 1.0, w: 1.0, y: 0.4 },
//! );
//! system.components.push(ComponentSpec::fitting("Valve", "304L SS", Psi(500.0)));
//!
//! assert!(system.check_low_stress().unwrap().passes());
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::low_stress::{check_low_stress, LowStressResult};
use crate::errors::CalcResult;
use crate::images::DEFAULT_DPI;
use crate::materials::{catalog, get_materials, summarize_materials};
use crate::piping::{pressure_rating, Component, ComponentType, PipeGeometry, RatingFactors, Schedule};
use crate::report::ReportFormat;
use crate::units::{Inches, Kelvin, Psi};

/// Current schema version for system description files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root of a system description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipingSystem {
    /// Title, engineer, job info
    pub meta: SystemMetadata,

    /// Design pressure and temperature
    pub design: DesignConditions,

    /// E, W, Y used to rate tube-like components
    pub factors: RatingFactors,

    /// Components in drawing order
    #[serde(default)]
    pub components: Vec<ComponentSpec>,

    /// Report output settings
    #[serde(default)]
    pub settings: ReportSettings,
}

impl PipingSystem {
    /// Create a system with no components.
    pub fn new(
        title: impl Into<String>,
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        design: DesignConditions,
        factors: RatingFactors,
    ) -> Self {
        PipingSystem {
            meta: SystemMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: Utc::now(),
            },
            design,
            factors,
            components: Vec::new(),
            settings: ReportSettings::default(),
        }
    }

    /// Resolve every component against the material catalog.
    pub fn resolve_components(&self) -> CalcResult<Vec<Component<'static>>> {
        self.components.iter().map(ComponentSpec::resolve).collect()
    }

    /// Plain-English material summary of the components
    pub fn material_summary(&self) -> CalcResult<String> {
        let components = self.resolve_components()?;
        summarize_materials(&get_materials(&components))
    }

    /// Run the low stress check on this system's design conditions
    pub fn check_low_stress(&self) -> CalcResult<LowStressResult> {
        self.check_components(&self.resolve_components()?)
    }

    /// Run the low stress check on components already resolved from this system
    pub fn check_components(&self, components: &[Component<'_>]) -> CalcResult<LowStressResult> {
        check_low_stress(
            self.design.pressure_psi,
            self.design.temperature_k,
            components,
            &self.factors,
        )
    }
}

/// Metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// System title, e.g. "Cryostat vent line"
    pub title: String,

    /// Responsible engineer
    #[serde(default)]
    pub engineer: String,

    /// Job/project number
    #[serde(default)]
    pub job_id: String,

    /// When the description was created
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

/// Design conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignConditions {
    /// Differential design pressure
    pub pressure_psi: Psi,

    /// Design temperature
    pub temperature_k: Kelvin,
}

impl DesignConditions {
    /// Create design conditions from any temperature unit
    pub fn new(pressure: Psi, temperature: impl Into<Kelvin>) -> Self {
        DesignConditions {
            pressure_psi: pressure,
            temperature_k: temperature.into(),
        }
    }
}

fn default_component_type() -> String {
    ComponentType::Fitting.tag().to_string()
}

/// A component as written in a system file.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Supply line",
///   "size": "NPS 1",
///   "source": "McMaster",
///   "material": "304L SS",
///   "type": "NPS pipe",
///   "geometry": { "kind": "Nps", "nominal": "1", "schedule": "10S" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub source: String,

    /// Manufacturer rating, used for fittings
    #[serde(default)]
    pub rated_pressure_psi: Psi,

    /// Catalog material name
    pub material: String,

    /// Component type tag; fittings when omitted
    #[serde(rename = "type", default = "default_component_type")]
    pub component_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometrySpec>,
}

impl ComponentSpec {
    /// A fitting with a manufacturer rating
    pub fn fitting(name: impl Into<String>, material: impl Into<String>, rated_pressure: Psi) -> Self {
        ComponentSpec {
            name: name.into(),
            size: String::new(),
            source: String::new(),
            rated_pressure_psi: rated_pressure,
            material: material.into(),
            component_type: default_component_type(),
            geometry: None,
        }
    }

    /// Parse the type tag, look up the material and build the geometry.
    pub fn resolve(&self) -> CalcResult<Component<'static>> {
        let component_type: ComponentType = self.component_type.parse()?;
        let material = catalog::lookup(&self.material)?;
        let geometry = self.geometry.as_ref().map(GeometrySpec::resolve).transpose()?;

        Ok(Component {
            name: self.name.clone(),
            size: self.size.clone(),
            source: self.source.clone(),
            rated_pressure: self.rated_pressure_psi,
            material,
            component_type,
            geometry,
        })
    }

    /// Pressure rating of this component.
    ///
    /// Fails with `UnknownComponentType` when the tag is not recognized.
    pub fn pressure_rating(&self, factors: &RatingFactors) -> CalcResult<Psi> {
        pressure_rating(&self.resolve()?, factors)
    }
}

/// Geometry as written in a system file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GeometrySpec {
    /// Stainless NPS pipe
    Nps {
        nominal: String,
        schedule: Schedule,
        #[serde(default)]
        allowance_in: Inches,
    },
    /// Type K copper tube
    CopperTypeK {
        nominal: String,
        #[serde(default)]
        allowance_in: Inches,
    },
    /// Tube with explicit dimensions
    Tube {
        od_in: Inches,
        wall_in: Inches,
        #[serde(default)]
        allowance_in: Inches,
    },
}

impl GeometrySpec {
    /// Build the cross-section
    pub fn resolve(&self) -> CalcResult<PipeGeometry> {
        let (geometry, allowance) = match self {
            GeometrySpec::Nps { nominal, schedule, allowance_in } => {
                (PipeGeometry::nps(nominal, *schedule)?, *allowance_in)
            }
            GeometrySpec::CopperTypeK { nominal, allowance_in } => {
                (PipeGeometry::copper_type_k(nominal)?, *allowance_in)
            }
            GeometrySpec::Tube { od_in, wall_in, allowance_in } => {
                (PipeGeometry::tube(*od_in, *wall_in)?, *allowance_in)
            }
        };
        let geometry = geometry.with_allowance(allowance);
        geometry.validate()?;
        Ok(geometry)
    }
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_image_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_rasterizer() -> String {
    "pdftoppm".to_string()
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Org or LaTeX output
    #[serde(default)]
    pub format: ReportFormat,

    /// Directory holding diagram PDFs and their PNG pages
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Rasterization resolution
    #[serde(default = "default_image_dpi")]
    pub image_dpi: u32,

    /// Base name of the P&ID diagram to include, without extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,

    /// PDF rasterizer program
    #[serde(default = "default_rasterizer")]
    pub rasterizer: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            format: ReportFormat::default(),
            images_dir: default_images_dir(),
            image_dpi: DEFAULT_DPI,
            diagram: None,
            rasterizer: default_rasterizer(),
        }
    }
}
