//! Scaler configuration.
//!
//! All thresholds have reasonable defaults; a default-constructed config is
//! ready to use. Configs are immutable for the lifetime of a scaling
//! session. Serde support allows partial configs (e.g. a TOML file setting
//! only `equal_color_tolerance`) to deserialize with defaults filled in.

use serde::{Deserialize, Serialize};

use crate::error::ScaleError;
use crate::pixel::ChannelLayout;

/// Tuning parameters for the scaling engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerConfig {
    /// Weight applied to the luma component of the color distance.
    /// Higher values make brightness differences count more than hue shifts.
    #[serde(default = "default_luminance_weight")]
    pub luminance_weight: f64,

    /// Two colors closer than this (in perceptual distance) are treated as
    /// equal when classifying edges. The engine compares squared distances,
    /// so the tolerance is squared internally.
    #[serde(default = "default_equal_color_tolerance")]
    pub equal_color_tolerance: f64,

    /// Gradient strength ratio above which an edge is classified as
    /// dominant rather than normal.
    #[serde(default = "default_dominant_direction_threshold")]
    pub dominant_direction_threshold: f64,

    /// Direction strength ratio above which a line is classified as steep
    /// (or shallow, in the mirrored comparison).
    #[serde(default = "default_steep_direction_threshold")]
    pub steep_direction_threshold: f64,

    /// Channel ordering of the packed source and target pixels.
    #[serde(default)]
    pub channel_layout: ChannelLayout,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            luminance_weight: default_luminance_weight(),
            equal_color_tolerance: default_equal_color_tolerance(),
            dominant_direction_threshold: default_dominant_direction_threshold(),
            steep_direction_threshold: default_steep_direction_threshold(),
            channel_layout: ChannelLayout::default(),
        }
    }
}

fn default_luminance_weight() -> f64 {
    1.0
}

fn default_equal_color_tolerance() -> f64 {
    30.0
}

fn default_dominant_direction_threshold() -> f64 {
    3.6
}

fn default_steep_direction_threshold() -> f64 {
    2.2
}

impl ScalerConfig {
    /// Create a config with the given channel layout and default thresholds.
    pub fn with_layout(channel_layout: ChannelLayout) -> Self {
        Self { channel_layout, ..Default::default() }
    }

    /// Check the invariant that every threshold is positive.
    pub(crate) fn validate(&self) -> Result<(), ScaleError> {
        let thresholds = [
            ("luminance_weight", self.luminance_weight),
            ("equal_color_tolerance", self.equal_color_tolerance),
            ("dominant_direction_threshold", self.dominant_direction_threshold),
            ("steep_direction_threshold", self.steep_direction_threshold),
        ];
        for (name, value) in thresholds {
            if !(value > 0.0) {
                return Err(ScaleError::NonPositiveThreshold { name, value });
            }
        }
        Ok(())
    }
}
