use pm_core::{Image, ImageView, MASK_ON};
use serde::{Deserialize, Serialize};

/// User-adjustable binarization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskParams {
    /// Additive brightness offset, `0..=100`.
    pub brightness: u8,
    /// Binary threshold, `0..=255`; pixels strictly above it are set.
    pub threshold: u8,
}

impl MaskParams {
    pub const MAX_BRIGHTNESS: u8 = 100;

    pub fn new(brightness: u8, threshold: u8) -> Self {
        Self {
            brightness: brightness.min(Self::MAX_BRIGHTNESS),
            threshold,
        }
    }

    /// Same parameters with the brightness clamped to its legal range.
    pub fn clamped(self) -> Self {
        Self::new(self.brightness, self.threshold)
    }
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            brightness: 11,
            threshold: 101,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Fraction of the frame height blanked at the top (drum-top clutter).
    pub ignore_top_frac: f64,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            ignore_top_frac: 0.1,
        }
    }
}

impl MaskConfig {
    pub fn ignored_top_rows(&self, height: usize) -> usize {
        ((self.ignore_top_frac * height as f64).max(0.0) as usize).min(height)
    }
}

/// Thresholds `gray + brightness` (saturating) against `params.threshold`.
///
/// Rows above [`MaskConfig::ignored_top_rows`] and rows from `baseline_row`
/// downward are cleared. Pass `None` when no baseline is known.
pub fn binarize(
    gray: &ImageView<'_, u8>,
    params: &MaskParams,
    cfg: &MaskConfig,
    baseline_row: Option<usize>,
) -> Image<u8> {
    let (w, h) = gray.dimensions();
    let mut data = Vec::with_capacity(w * h);
    for row in gray.rows() {
        data.extend(row.iter().map(|&v| {
            if v.saturating_add(params.brightness) > params.threshold {
                MASK_ON
            } else {
                0
            }
        }));
    }
    let mut out = Image::from_vec(w, h, data).expect("mask buffer matches view dimensions");

    let mut view = out.as_view_mut();
    view.fill_rows(0..cfg.ignored_top_rows(h), 0);
    if let Some(row) = baseline_row {
        view.fill_rows(row..h, 0);
    }

    out
}
