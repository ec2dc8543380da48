//! Concentration estimation from the mean green channel
//!
//! `value = max(|green - baseline| / scale - 0.1, 0)` with the mode's
//! calibration constants. The result never goes negative.

use serde::{Deserialize, Serialize};

use crate::calibration::table::{Analyte, AnalysisMode, ConcentrationUnit};
use crate::constants::estimation::{DISPLAY_DECIMALS, INVALID_MODE_LABEL, SYSTEMATIC_OFFSET};

/// Outcome of a concentration estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimate {
    Concentration {
        analyte: Analyte,
        value: f64,
        unit: ConcentrationUnit,
    },
    /// Mode selector was not recognised
    InvalidMode,
}

impl Estimate {
    pub fn value(&self) -> Option<f64> {
        match self {
            Estimate::Concentration { value, .. } => Some(*value),
            Estimate::InvalidMode => None,
        }
    }

    pub fn unit(&self) -> Option<ConcentrationUnit> {
        match self {
            Estimate::Concentration { unit, .. } => Some(*unit),
            Estimate::InvalidMode => None,
        }
    }

    /// Display text, e.g. `"Nitrite level: 2.33 mg/L"` or `"invalid mode"`
    pub fn label(&self) -> String {
        match self {
            Estimate::Concentration { analyte, value, unit } => format!(
                "{} level: {:.*} {}",
                analyte.name(),
                DISPLAY_DECIMALS as usize,
                value,
                unit
            ),
            Estimate::InvalidMode => INVALID_MODE_LABEL.to_string(),
        }
    }
}

/// Concentration before the offset and clamp are applied, `None` for `Invalid`
pub fn raw_concentration(mean_green: f64, mode: AnalysisMode) -> Option<f64> {
    let params = mode.calibration()?;
    Some((mean_green - params.baseline).abs() / params.scale)
}

/// Estimate the analyte concentration for `mode` from a mean green intensity
///
/// Non-finite intensities estimate to zero.
pub fn estimate(mean_green: f64, mode: AnalysisMode) -> Estimate {
    let (Some(raw), Some(params), Some(analyte)) =
        (raw_concentration(mean_green, mode), mode.calibration(), mode.analyte())
    else {
        return Estimate::InvalidMode;
    };

    let value = if raw.is_finite() {
        (raw - SYSTEMATIC_OFFSET).max(0.0)
    } else {
        0.0
    };

    Estimate::Concentration {
        analyte,
        value,
        unit: params.unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(green: f64, mode: AnalysisMode) -> f64 {
        estimate(green, mode).value().unwrap()
    }

    #[test]
    fn test_at_baseline_clamps_to_zero() {
        assert_eq!(value(208.41, AnalysisMode::ProteinYellow), 0.0);
        assert_eq!(estimate(208.41, AnalysisMode::ProteinYellow).unit(), Some(ConcentrationUnit::MgPerMl));
    }

    #[test]
    fn test_nitrite_white_scenario() {
        let v = value(300.0, AnalysisMode::NitriteWhite);
        let expected = (300.0 - 116.6) / 75.407 - 0.1;
        assert!((v - expected).abs() < 1e-12);
        assert!((v - 2.332).abs() < 1e-3);
        assert_eq!(estimate(300.0, AnalysisMode::NitriteWhite).unit(), Some(ConcentrationUnit::MgPerL));
    }

    #[test]
    fn test_legacy_modes() {
        // below and above baseline give the same distance
        let below = value(208.23 - 38.685, AnalysisMode::LegacyYellow);
        let above = value(208.23 + 38.685, AnalysisMode::LegacyYellow);
        assert!((below - 0.4).abs() < 1e-9);
        assert!((below - above).abs() < 1e-9);

        let white = value(248.63 - 35.433, AnalysisMode::LegacyWhite);
        assert!((white - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nitrite_calibrations_differ() {
        let yellow = value(250.0, AnalysisMode::NitriteYellow);
        let white = value(250.0, AnalysisMode::NitriteWhite);
        assert!(white > yellow);
    }

    #[test]
    fn test_never_negative() {
        for mode in AnalysisMode::ALL {
            let mut g = -1000.0;
            while g <= 1000.0 {
                assert!(value(g, mode) >= 0.0, "{:?} at {}", mode, g);
                g += 0.37;
            }
        }
        assert_eq!(value(f64::NAN, AnalysisMode::ProteinWhite), 0.0);
        assert_eq!(value(f64::INFINITY, AnalysisMode::ProteinWhite), 0.0);
    }

    #[test]
    fn test_monotonic_in_distance() {
        for mode in AnalysisMode::ALL {
            let baseline = mode.calibration().unwrap().baseline;
            let mut previous = 0.0;
            for step in 0..200 {
                let distance = step as f64 * 1.5;
                let up = value(baseline + distance, mode);
                let down = value(baseline - distance, mode);
                assert!(up >= previous && down >= previous);
                assert!((up - down).abs() < 1e-9);
                previous = up;
            }
        }
    }

    #[test]
    fn test_invalid_mode() {
        let result = estimate(150.0, AnalysisMode::Invalid);
        assert_eq!(result, Estimate::InvalidMode);
        assert_eq!(result.value(), None);
        assert_eq!(result.label(), "invalid mode");
        assert_eq!(raw_concentration(150.0, AnalysisMode::Invalid), None);
    }

    #[test]
    fn test_label_formatting() {
        let result = estimate(300.0, AnalysisMode::NitriteWhite);
        assert_eq!(result.label(), "Nitrite level: 2.33 mg/L");
        let result = estimate(208.41, AnalysisMode::ProteinYellow);
        assert_eq!(result.label(), "Protein level: 0.00 mg/mL");
    }

    #[test]
    fn test_raw_concentration() {
        let raw = raw_concentration(208.41 + 13.433, AnalysisMode::ProteinYellow).unwrap();
        assert!((raw - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_is_offset_raw_concentration() {
        for mode in AnalysisMode::ALL {
            for green in [0.0, 64.0, 116.6, 190.0, 255.0] {
                let raw = raw_concentration(green, mode).unwrap();
                assert_eq!(value(green, mode), (raw - SYSTEMATIC_OFFSET).max(0.0), "{:?} at {}", mode, green);
            }
        }
    }
}
