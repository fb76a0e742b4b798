use pm_edge::BaselineConfig;
use pm_mask::{MaskConfig, MaskParams};
use pm_picks::{MatchConfig, SpacingConfig, TipConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Gaussian pre-blur applied before the gradient and the live mask.
    pub blur_sigma: f32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { blur_sigma: 2.0 }
    }
}

/// Every tunable of a session. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub profile: ProfileConfig,
    pub baseline: BaselineConfig,
    /// Initial brightness/threshold; later changes arrive as events.
    pub params: MaskParams,
    pub mask: MaskConfig,
    pub tips: TipConfig,
    pub matching: MatchConfig,
    pub spacing: SpacingConfig,
    /// Pause between frames in the run loop, milliseconds.
    pub frame_wait_ms: u64,
}
