use pm_core::Error;
use serde::{Deserialize, Serialize};

use crate::profile::EdgeEnergyProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Scan window start as a fraction of frame height (inclusive).
    pub scan_start_frac: f64,
    /// Scan window end as a fraction of frame height (exclusive).
    pub scan_end_frac: f64,
    /// Sub-pixel offset added to the detected row.
    pub row_correction: f32,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            scan_start_frac: 0.5,
            scan_end_frac: 0.9,
            row_correction: 2.25,
        }
    }
}

impl BaselineConfig {
    pub fn scan_rows(&self, height: usize) -> core::ops::Range<usize> {
        let at = |frac: f64| ((height as f64 * frac) + 1e-9).floor().max(0.0) as usize;
        let start = at(self.scan_start_frac).min(height);
        let end = at(self.scan_end_frac).min(height);
        start..end.max(start)
    }
}

/// Topmost rim row found so far, in native frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineEstimate {
    /// Detected row before correction.
    pub row: usize,
    /// Corrected baseline position.
    pub y: f32,
}

impl BaselineEstimate {
    /// First row masked out below the baseline.
    pub fn mask_row(&self) -> usize {
        self.y.max(0.0) as usize
    }

    /// Baseline in a frame magnified by `scale`, truncated toward zero.
    pub fn scaled(&self, scale: i32) -> i32 {
        (self.y * scale as f32) as i32
    }
}

#[derive(Debug, Clone, Default)]
pub struct BaselineTracker {
    config: BaselineConfig,
    estimate: Option<BaselineEstimate>,
}

impl BaselineTracker {
    pub fn new(config: BaselineConfig) -> Self {
        Self {
            config,
            estimate: None,
        }
    }

    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    pub fn estimate(&self) -> Option<BaselineEstimate> {
        self.estimate
    }

    /// Folds one frame's profile into the session estimate.
    ///
    /// The estimate is replaced only when the strongest edge of the scan
    /// window lies strictly above the current one, so the sequence of
    /// estimates is non-increasing once set.
    pub fn update(
        &mut self,
        profile: &EdgeEnergyProfile,
        frame_height: usize,
    ) -> Result<Option<BaselineEstimate>, Error> {
        if profile.len() != frame_height {
            return Err(Error::SizeMismatch {
                expected: frame_height,
                actual: profile.len(),
            });
        }

        let Some(candidate) = profile.strongest_row_in(self.config.scan_rows(frame_height)) else {
            return Ok(self.estimate);
        };

        let improves = match self.estimate {
            None => true,
            Some(current) => candidate < current.row,
        };

        if improves {
            let next = BaselineEstimate {
                row: candidate,
                y: candidate as f32 + self.config.row_correction,
            };
            tracing::debug!(
                "baseline moved to row {} (y = {:.2}), was {:?}",
                next.row,
                next.y,
                self.estimate.map(|e| e.row)
            );
            self.estimate = Some(next);
        }

        Ok(self.estimate)
    }
}
