//! Analysis modes and their calibration constants
//!
//! Each mode pairs an analyte with the background the sample was photographed
//! on. The legacy modes predate the protein/nitrite split and carry their own
//! constants; they are kept as separate modes rather than merged with the
//! newer nitrite calibrations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Analyte being estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyte {
    Protein,
    Nitrite,
}

impl Analyte {
    pub fn name(&self) -> &'static str {
        match self {
            Analyte::Protein => "Protein",
            Analyte::Nitrite => "Nitrite",
        }
    }
}

/// Background the sample was photographed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Yellow,
    White,
}

/// Unit an estimate is reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    #[serde(rename = "mg/mL")]
    MgPerMl,
    #[serde(rename = "mg/L")]
    MgPerL,
}

impl ConcentrationUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConcentrationUnit::MgPerMl => "mg/mL",
            ConcentrationUnit::MgPerL => "mg/L",
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Selected analyte and background calibration
///
/// `Invalid` stands for an unknown, empty or missing selector. It is a normal
/// value: estimation under it yields an "invalid mode" result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    ProteinYellow,
    ProteinWhite,
    NitriteYellow,
    NitriteWhite,
    /// Nitrite on yellow, calibration from before the background split
    LegacyYellow,
    /// Nitrite on white, calibration from before the background split
    LegacyWhite,
    Invalid,
}

impl AnalysisMode {
    /// Every valid mode, in table order
    pub const ALL: [AnalysisMode; 6] = [
        AnalysisMode::ProteinYellow,
        AnalysisMode::ProteinWhite,
        AnalysisMode::NitriteYellow,
        AnalysisMode::NitriteWhite,
        AnalysisMode::LegacyYellow,
        AnalysisMode::LegacyWhite,
    ];

    /// Parse a collaborator's mode selector. Anything unrecognised, including
    /// an empty or absent selector, maps to `Invalid`.
    pub fn from_selector(selector: Option<&str>) -> AnalysisMode {
        match selector.map(str::trim) {
            Some("yellow") => AnalysisMode::LegacyYellow,
            Some("white") => AnalysisMode::LegacyWhite,
            Some("yellow_protein") => AnalysisMode::ProteinYellow,
            Some("white_protein") => AnalysisMode::ProteinWhite,
            Some("yellow_nitrite") => AnalysisMode::NitriteYellow,
            Some("white_nitrite") => AnalysisMode::NitriteWhite,
            _ => AnalysisMode::Invalid,
        }
    }

    /// Canonical selector string, `None` for `Invalid`
    pub fn selector(&self) -> Option<&'static str> {
        match self {
            AnalysisMode::LegacyYellow => Some("yellow"),
            AnalysisMode::LegacyWhite => Some("white"),
            AnalysisMode::ProteinYellow => Some("yellow_protein"),
            AnalysisMode::ProteinWhite => Some("white_protein"),
            AnalysisMode::NitriteYellow => Some("yellow_nitrite"),
            AnalysisMode::NitriteWhite => Some("white_nitrite"),
            AnalysisMode::Invalid => None,
        }
    }

    pub fn analyte(&self) -> Option<Analyte> {
        match self {
            AnalysisMode::ProteinYellow | AnalysisMode::ProteinWhite => Some(Analyte::Protein),
            AnalysisMode::NitriteYellow
            | AnalysisMode::NitriteWhite
            | AnalysisMode::LegacyYellow
            | AnalysisMode::LegacyWhite => Some(Analyte::Nitrite),
            AnalysisMode::Invalid => None,
        }
    }

    pub fn background(&self) -> Option<Background> {
        match self {
            AnalysisMode::ProteinYellow | AnalysisMode::NitriteYellow | AnalysisMode::LegacyYellow => {
                Some(Background::Yellow)
            }
            AnalysisMode::ProteinWhite | AnalysisMode::NitriteWhite | AnalysisMode::LegacyWhite => {
                Some(Background::White)
            }
            AnalysisMode::Invalid => None,
        }
    }

    /// Calibration constants, `None` for `Invalid`
    pub fn calibration(&self) -> Option<&'static CalibrationParams> {
        CALIBRATION_TABLE
            .iter()
            .find(|(mode, _)| mode == self)
            .map(|(_, params)| params)
    }

    pub fn is_valid(&self) -> bool {
        *self != AnalysisMode::Invalid
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector().unwrap_or("invalid"))
    }
}

/// Affine calibration: `|intensity - baseline| / scale`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationParams {
    /// Green-channel intensity that reads as zero concentration
    pub baseline: f64,
    /// Intensity change per unit of concentration
    pub scale: f64,
    pub unit: ConcentrationUnit,
}

/// Read-only calibration table keyed by mode
pub static CALIBRATION_TABLE: [(AnalysisMode, CalibrationParams); 6] = [
    (
        AnalysisMode::ProteinYellow,
        CalibrationParams { baseline: 208.41, scale: 13.433, unit: ConcentrationUnit::MgPerMl },
    ),
    (
        AnalysisMode::ProteinWhite,
        CalibrationParams { baseline: 250.24, scale: 35.894, unit: ConcentrationUnit::MgPerMl },
    ),
    (
        AnalysisMode::NitriteYellow,
        CalibrationParams { baseline: 116.60, scale: 75.702, unit: ConcentrationUnit::MgPerL },
    ),
    (
        AnalysisMode::NitriteWhite,
        CalibrationParams { baseline: 116.60, scale: 75.407, unit: ConcentrationUnit::MgPerL },
    ),
    (
        AnalysisMode::LegacyYellow,
        CalibrationParams { baseline: 208.23, scale: 77.37, unit: ConcentrationUnit::MgPerMl },
    ),
    (
        AnalysisMode::LegacyWhite,
        CalibrationParams { baseline: 248.63, scale: 35.433, unit: ConcentrationUnit::MgPerMl },
    ),
];
