//! Qualitative color classification
//!
//! Maps a mean color to a descriptive category by walking an ordered rule
//! list; the first rule that matches wins. Two independent profiles exist:
//!
//! - [`ClassifierProfile::FiveBand`]: absolute thresholds per channel, from
//!   clear through pale yellow, deep yellow, orange and brown.
//! - [`ClassifierProfile::Comparative`]: relative channel comparisons, four
//!   buckets ending in a generic yellow tone.
//!
//! Rule order is part of the behavior. Samples sitting exactly on a threshold
//! resolve to whichever rule comes first.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{comparative, five_band};
use crate::sampling::ColorSample;

/// Which rule set to classify with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierProfile {
    #[default]
    FiveBand,
    Comparative,
}

/// Qualitative category of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCategory {
    // five-band profile
    Clear,
    PaleYellow,
    DeepYellow,
    Orange,
    Brown,
    Unclassifiable,
    // comparative profile
    Colorless,
    OrangeDeepYellow,
    LightYellow,
    GeneralYellow,
}

impl ColorCategory {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ColorCategory::Clear => "clear/near-colorless",
            ColorCategory::PaleYellow => "pale yellow",
            ColorCategory::DeepYellow => "deep yellow",
            ColorCategory::Orange => "orange",
            ColorCategory::Brown => "brown",
            ColorCategory::Unclassifiable => "unclassifiable",
            ColorCategory::Colorless => "colorless",
            ColorCategory::OrangeDeepYellow => "orange/deep yellow tone",
            ColorCategory::LightYellow => "light yellow tone",
            ColorCategory::GeneralYellow => "general yellow tone",
        }
    }

    /// Short interpretation shown alongside the label, if the category has one
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            ColorCategory::Clear | ColorCategory::Colorless => Some("possibly high water intake"),
            ColorCategory::PaleYellow | ColorCategory::LightYellow => Some("normal"),
            ColorCategory::DeepYellow | ColorCategory::OrangeDeepYellow => Some("possibly dehydrated"),
            ColorCategory::Orange => Some("severely dehydrated"),
            ColorCategory::Brown => Some("consult a doctor"),
            ColorCategory::Unclassifiable => Some("cannot be assessed"),
            ColorCategory::GeneralYellow => None,
        }
    }

    /// Label with advice appended, e.g. `"pale yellow (normal)"`
    pub fn description(&self) -> String {
        match self.advice() {
            Some(advice) => format!("{} ({})", self.label(), advice),
            None => self.label().to_string(),
        }
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct Rule {
    category: ColorCategory,
    matches: fn(&ColorSample) -> bool,
}

const FIVE_BAND_RULES: &[Rule] = &[
    Rule {
        category: ColorCategory::Clear,
        matches: |s: &ColorSample| {
            s.red > five_band::CLEAR_MIN && s.green > five_band::CLEAR_MIN && s.blue > five_band::CLEAR_MIN
        },
    },
    Rule {
        category: ColorCategory::PaleYellow,
        matches: |s: &ColorSample| {
            s.red > five_band::PALE_RED_MIN
                && s.green > five_band::PALE_GREEN_MIN
                && s.green < five_band::PALE_GREEN_MAX
                && s.blue < five_band::PALE_BLUE_MAX
        },
    },
    Rule {
        category: ColorCategory::DeepYellow,
        matches: |s: &ColorSample| {
            s.red > five_band::DEEP_RED_MIN
                && s.green > five_band::DEEP_GREEN_MIN
                && s.green <= five_band::DEEP_GREEN_MAX
                && s.blue < five_band::DEEP_BLUE_MAX
        },
    },
    Rule {
        category: ColorCategory::Orange,
        matches: |s: &ColorSample| {
            s.red > five_band::ORANGE_RED_MIN
                && s.green > five_band::ORANGE_GREEN_MIN
                && s.green <= five_band::ORANGE_GREEN_MAX
                && s.blue < five_band::ORANGE_BLUE_MAX
        },
    },
    Rule {
        category: ColorCategory::Brown,
        matches: |s: &ColorSample| {
            s.red > five_band::BROWN_RED_MIN
                && s.green < five_band::BROWN_GREEN_MAX
                && s.blue < five_band::BROWN_BLUE_MAX
        },
    },
];

const COMPARATIVE_RULES: &[Rule] = &[
    Rule {
        category: ColorCategory::Colorless,
        matches: |s: &ColorSample| s.red.min(s.green).min(s.blue) > comparative::COLORLESS_MIN,
    },
    Rule {
        category: ColorCategory::OrangeDeepYellow,
        matches: |s: &ColorSample| {
            s.red - s.green > comparative::CHANNEL_LEAD && s.red - s.blue > comparative::CHANNEL_LEAD
        },
    },
    Rule {
        category: ColorCategory::LightYellow,
        matches: |s: &ColorSample| {
            s.red - s.blue > comparative::CHANNEL_LEAD && s.green - s.blue > comparative::CHANNEL_LEAD
        },
    },
];

impl ClassifierProfile {
    fn rules(&self) -> &'static [Rule] {
        match self {
            ClassifierProfile::FiveBand => FIVE_BAND_RULES,
            ClassifierProfile::Comparative => COMPARATIVE_RULES,
        }
    }

    fn fallback(&self) -> ColorCategory {
        match self {
            ClassifierProfile::FiveBand => ColorCategory::Unclassifiable,
            ClassifierProfile::Comparative => ColorCategory::GeneralYellow,
        }
    }
}

/// Classify a sample under `profile`
pub fn classify(sample: &ColorSample, profile: ClassifierProfile) -> ColorCategory {
    profile
        .rules()
        .iter()
        .find(|rule| (rule.matches)(sample))
        .map(|rule| rule.category)
        .unwrap_or_else(|| profile.fallback())
}
