//! Standard Pipe and Tube Sizes
//!
//! Cross-section dimensions for the straight components the pressure design
//! formula rates.
//!
//! ## Data Sources
//!
//! - Stainless NPS pipe: ASME B36.19, schedules 5S/10S/40S/80S
//! - Copper water tube Type K: ASTM B88
//!
//! ## Mill Tolerance
//!
//! Wall thickness may be under nominal by the mill tolerance. The pressure
//! formula uses `wall * (1 - mill_tolerance)`:
//!
//! - NPS pipe: 12.5 %
//! - Tube and copper tube: 10 %

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Inches;

/// ASME B36.19 wall under-tolerance for pipe
pub const PIPE_MILL_TOLERANCE: f64 = 0.125;

/// Wall under-tolerance for drawn tube
pub const TUBE_MILL_TOLERANCE: f64 = 0.10;

/// Stainless pipe schedule.
///
/// Serialized as "5S", "10S", ...; system files may also write "10", "Sch 40S",
/// "STD" or "XS".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Schedule {
    #[serde(rename = "5S")]
    Sch5,
    #[serde(rename = "10S")]
    Sch10,
    #[serde(rename = "40S")]
    Sch40,
    #[serde(rename = "80S")]
    Sch80,
}

impl Schedule {
    /// Parse "10", "10S", "Sch 10S"...
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s
            .to_uppercase()
            .replace("SCH", "")
            .replace([' ', '.'], "");
        match cleaned.as_str() {
            "STD" => return Ok(Schedule::Sch40),
            "XS" => return Ok(Schedule::Sch80),
            _ => {}
        }
        match cleaned.trim_end_matches('S') {
            "5" => Ok(Schedule::Sch5),
            "10" => Ok(Schedule::Sch10),
            "40" => Ok(Schedule::Sch40),
            "80" => Ok(Schedule::Sch80),
            _ => Err(CalcError::invalid_input("schedule", s, "Supported schedules are 5S, 10S, 40S and 80S")),
        }
    }

    /// Display name, e.g. "Sch 10S"
    pub fn display_name(&self) -> &'static str {
        match self {
            Schedule::Sch5 => "Sch 5S",
            Schedule::Sch10 => "Sch 10S",
            Schedule::Sch40 => "Sch 40S",
            Schedule::Sch80 => "Sch 80S",
        }
    }

    fn column(&self) -> usize {
        match self {
            Schedule::Sch5 => 0,
            Schedule::Sch10 => 1,
            Schedule::Sch40 => 2,
            Schedule::Sch80 => 3,
        }
    }
}

impl TryFrom<String> for Schedule {
    type Error = CalcError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Schedule::from_str_flexible(&s)
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// NPS, OD (in), wall (in) for 5S / 10S / 40S / 80S
const NPS_TABLE: &[(&str, f64, [Option<f64>; 4])] = &[
    ("1/4", 0.540, [None, Some(0.065), Some(0.088), Some(0.119)]),
    ("3/8", 0.675, [None, Some(0.065), Some(0.091), Some(0.126)]),
    ("1/2", 0.840, [Some(0.065), Some(0.083), Some(0.109), Some(0.147)]),
    ("3/4", 1.050, [Some(0.065), Some(0.083), Some(0.113), Some(0.154)]),
    ("1", 1.315, [Some(0.065), Some(0.109), Some(0.133), Some(0.179)]),
    ("1-1/4", 1.660, [Some(0.065), Some(0.109), Some(0.140), Some(0.191)]),
    ("1-1/2", 1.900, [Some(0.065), Some(0.109), Some(0.145), Some(0.200)]),
    ("2", 2.375, [Some(0.065), Some(0.109), Some(0.154), Some(0.218)]),
    ("2-1/2", 2.875, [Some(0.083), Some(0.120), Some(0.203), Some(0.276)]),
    ("3", 3.500, [Some(0.083), Some(0.120), Some(0.216), Some(0.300)]),
    ("4", 4.500, [Some(0.083), Some(0.120), Some(0.237), Some(0.337)]),
    ("6", 6.625, [Some(0.109), Some(0.134), Some(0.280), Some(0.432)]),
];

/// Nominal size, OD (in), wall (in)
const COPPER_TYPE_K_TABLE: &[(&str, f64, f64)] = &[
    ("1/4", 0.375, 0.035),
    ("3/8", 0.500, 0.049),
    ("1/2", 0.625, 0.049),
    ("5/8", 0.750, 0.049),
    ("3/4", 0.875, 0.065),
    ("1", 1.125, 0.065),
    ("1-1/4", 1.375, 0.065),
    ("1-1/2", 1.625, 0.072),
    ("2", 2.125, 0.083),
    ("2-1/2", 2.625, 0.095),
    ("3", 3.125, 0.109),
    ("4", 4.125, 0.134),
];

/// Normalize "1 1/2", "1-1/2\"", "NPS 1" to the table key form
fn normalize_nominal(nominal: &str) -> String {
    nominal
        .trim()
        .trim_start_matches("NPS")
        .trim()
        .trim_end_matches('"')
        .trim()
        .replace(' ', "-")
}

/// Cross-section of a straight pipe or tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeGeometry {
    /// Outside diameter D
    pub outside_diameter: Inches,

    /// Nominal wall thickness
    pub wall: Inches,

    /// Fraction the wall may be under nominal
    pub mill_tolerance: f64,

    /// Corrosion, erosion and thread/groove allowance c
    #[serde(default)]
    pub allowance: Inches,
}

impl PipeGeometry {
    /// Stainless pipe by nominal size and schedule.
    pub fn nps(nominal: &str, schedule: Schedule) -> CalcResult<Self> {
        let key = normalize_nominal(nominal);
        let (_, od, walls) = NPS_TABLE
            .iter()
            .find(|(size, _, _)| *size == key)
            .ok_or_else(|| CalcError::invalid_input("nominal", nominal, "Not a tabulated NPS size"))?;

        let wall = walls[schedule.column()].ok_or_else(|| {
            CalcError::invalid_input(
                "schedule",
                schedule.display_name(),
                format!("NPS {} is not made in {}", key, schedule),
            )
        })?;

        Ok(PipeGeometry {
            outside_diameter: Inches(*od),
            wall: Inches(wall),
            mill_tolerance: PIPE_MILL_TOLERANCE,
            allowance: Inches(0.0),
        })
    }

    /// ASTM B88 Type K copper tube by nominal size.
    pub fn copper_type_k(nominal: &str) -> CalcResult<Self> {
        let key = normalize_nominal(nominal);
        let (_, od, wall) = COPPER_TYPE_K_TABLE
            .iter()
            .find(|(size, _, _)| *size == key)
            .ok_or_else(|| {
                CalcError::invalid_input("nominal", nominal, "Not a tabulated Type K copper tube size")
            })?;

        Ok(PipeGeometry {
            outside_diameter: Inches(*od),
            wall: Inches(*wall),
            mill_tolerance: TUBE_MILL_TOLERANCE,
            allowance: Inches(0.0),
        })
    }

    /// Tube with explicit outside diameter and wall.
    pub fn tube(outside_diameter: Inches, wall: Inches) -> CalcResult<Self> {
        let geometry = PipeGeometry {
            outside_diameter,
            wall,
            mill_tolerance: TUBE_MILL_TOLERANCE,
            allowance: Inches(0.0),
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Set the corrosion/mechanical allowance c
    pub fn with_allowance(mut self, allowance: Inches) -> Self {
        self.allowance = allowance;
        self
    }

    /// Validate dimensions.
    pub fn validate(&self) -> CalcResult<()> {
        if self.outside_diameter.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "outside_diameter",
                self.outside_diameter.0.to_string(),
                "Outside diameter must be positive",
            ));
        }
        if self.wall.0 <= 0.0 || 2.0 * self.wall.0 >= self.outside_diameter.0 {
            return Err(CalcError::invalid_input(
                "wall",
                self.wall.0.to_string(),
                "Wall must be positive and less than half the outside diameter",
            ));
        }
        if !(0.0..1.0).contains(&self.mill_tolerance) {
            return Err(CalcError::invalid_input(
                "mill_tolerance",
                self.mill_tolerance.to_string(),
                "Mill tolerance must be a fraction in [0, 1)",
            ));
        }
        if self.allowance.0 < 0.0 {
            return Err(CalcError::invalid_input(
                "allowance",
                self.allowance.0.to_string(),
                "Allowance cannot be negative",
            ));
        }
        Ok(())
    }

    /// Wall thickness available for pressure design: minimum wall less allowance
    pub fn pressure_design_thickness(&self) -> Inches {
        self.wall * (1.0 - self.mill_tolerance) - self.allowance
    }
}
