use pm_core::{Error, Image, ImageView, MASK_ON};

/// Why the accumulated silhouette was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    ParametersChanged,
    ViewportChanged,
    /// Incoming frames changed extent.
    FrameResized,
    Requested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SilhouetteState {
    Empty,
    Accumulating,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Empty,
    Accumulating {
        mask: Image<u8>,
        frames: usize,
    },
}

/// Running OR of per-frame masks.
///
/// Transitions:
///
/// | state          | event      | next           |
/// |----------------|------------|----------------|
/// | `Empty`        | `ingest`   | `Accumulating` |
/// | `Accumulating` | `ingest`   | `Accumulating` |
/// | any            | `reset`    | `Empty`        |
#[derive(Debug, Clone, Default)]
pub struct SilhouetteAccumulator {
    state: State,
}

impl SilhouetteAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SilhouetteState {
        match self.state {
            State::Empty => SilhouetteState::Empty,
            State::Accumulating { .. } => SilhouetteState::Accumulating,
        }
    }

    /// Frames folded in since the last reset.
    pub fn frames(&self) -> usize {
        match &self.state {
            State::Empty => 0,
            State::Accumulating { frames, .. } => *frames,
        }
    }

    /// Extent fixed by the first mask since the last reset.
    pub fn extent(&self) -> Option<(usize, usize)> {
        match &self.state {
            State::Empty => None,
            State::Accumulating { mask, .. } => Some(mask.dimensions()),
        }
    }

    /// ORs `mask` into the silhouette. Any non-zero pixel counts as set.
    ///
    /// The first mask after a reset fixes the extent; later masks of a
    /// different size are rejected.
    pub fn ingest(&mut self, mask: &ImageView<'_, u8>) -> Result<(), Error> {
        match &mut self.state {
            State::Empty => {
                let mut owned = mask.to_image();
                for v in owned.data_mut() {
                    if *v != 0 {
                        *v = MASK_ON;
                    }
                }
                self.state = State::Accumulating {
                    mask: owned,
                    frames: 1,
                };
            }
            State::Accumulating { mask: acc, frames } => {
                if acc.dimensions() != mask.dimensions() {
                    return Err(Error::DimensionMismatch {
                        expected: acc.dimensions(),
                        actual: mask.dimensions(),
                    });
                }
                let w = acc.width();
                for (y, src) in mask.rows().enumerate() {
                    let dst = &mut acc.data_mut()[y * w..(y + 1) * w];
                    for (d, &s) in dst.iter_mut().zip(src) {
                        if s != 0 {
                            *d = MASK_ON;
                        }
                    }
                }
                *frames += 1;
            }
        }
        Ok(())
    }

    pub fn reset(&mut self, reason: ResetReason) {
        if let State::Accumulating { frames, .. } = self.state {
            tracing::info!("clearing accumulated silhouette ({reason:?}, {frames} frames)");
        }
        self.state = State::Empty;
    }

    /// Point-in-time copy of the silhouette; zero-extent when `Empty`.
    pub fn snapshot(&self) -> Image<u8> {
        match &self.state {
            State::Empty => Image::empty(),
            State::Accumulating { mask, .. } => mask.clone(),
        }
    }
}
