// THEORY:
// `Config` is the single, immutable bag of tuning knobs for the scoring engine.
// It is created once, validated once, and then only ever read. Every stage of the
// pipeline receives it by reference, so two analyses sharing a `Config` can never
// influence each other.
//
// The serde names mirror the option names callers already know (`detailWeight`,
// `scoreDownSample`, ...). `#[serde(default)]` means a partial document is merged
// over the defaults: only the options that are present are overridden.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scoring parameters for the interestingness pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Multiplier applied to the accumulated detail score in the total.
    pub detail_weight: f64,
    /// Lower bound (inclusive, 0..1) on normalized luminance for a pixel to count as saturated.
    pub saturation_brightness_min: f64,
    /// Upper bound (inclusive, 0..1) on normalized luminance for a pixel to count as saturated.
    pub saturation_brightness_max: f64,
    /// Saturation a pixel must exceed before it contributes. Must stay below 1.
    pub saturation_threshold: f64,
    /// Added to a pixel's detail before weighting its saturation.
    pub saturation_bias: f64,
    /// Multiplier applied to the accumulated saturation score in the total.
    pub saturation_weight: f64,
    /// Integer shrink factor applied to the channel map before scoring. 1 disables it.
    ///
    /// Only whole factors are supported: a fractional value such as `2.5` fails to
    /// parse, and 0 is rejected by `validate`.
    pub score_down_sample: u32,
    /// Fraction of the half-frame, measured from the border, that is penalized.
    pub edge_radius: f64,
    /// Strength of the border penalty. Negative values penalize.
    pub edge_weight: f64,
    /// Boost pixels that sit on the rule-of-thirds gridlines.
    pub rule_of_thirds: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detail_weight: 1.0,
            saturation_brightness_min: 0.05,
            saturation_brightness_max: 0.9,
            saturation_threshold: 0.4,
            saturation_bias: 5.0,
            saturation_weight: 0.5,
            score_down_sample: 1,
            edge_radius: 0.4,
            edge_weight: -20.0,
            rule_of_thirds: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document of options, falling back to defaults for missing keys.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }

    /// Rejects values that would turn the scoring math into `NaN` or `Infinity`.
    pub fn validate(&self) -> Result<()> {
        if self.saturation_threshold.is_nan() || self.saturation_threshold >= 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "saturationThreshold must be below 1, got {}",
                self.saturation_threshold
            )));
        }
        if self.score_down_sample == 0 {
            return Err(Error::InvalidConfiguration(
                "scoreDownSample must be at least 1".to_string(),
            ));
        }
        if self.saturation_brightness_min > self.saturation_brightness_max {
            log::warn!(
                "saturationBrightnessMin ({}) is above saturationBrightnessMax ({}); no pixel will count as saturated",
                self.saturation_brightness_min,
                self.saturation_brightness_max
            );
        }
        Ok(())
    }
}
