use pm_core::{Image, Point2i};
use pm_edge::{BaselineEstimate, BaselineTracker, EdgeEnergyProfile};
use pm_imgproc::{gaussian_blur, gray_from_rgb, outer_contours, vertical_gradient};
use pm_mask::{MaskParams, ResetReason, SilhouetteAccumulator, binarize};
use pm_picks::TipCandidate;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::measure::{Measurement, Snapshot, measure};
use crate::source::Frame;

/// External input delivered to a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ParametersChanged(MaskParams),
    ViewportResized { width: u32, height: u32 },
    Measure,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Continue,
    Measured(Box<Measurement>),
    Stop,
}

/// What one processed frame changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub baseline: Option<BaselineEstimate>,
    /// Set pixels in this frame's mask.
    pub mask_pixels: usize,
    pub silhouette_frames: usize,
}

/// Session-long measurement state.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    params: MaskParams,
    baseline: BaselineTracker,
    silhouette: SilhouetteAccumulator,
    recorded: Vec<TipCandidate>,
    viewport: Option<(u32, u32)>,
    current: Option<Frame>,
    frame_mask: Image<u8>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            params: config.params.clamped(),
            baseline: BaselineTracker::new(config.baseline.clone()),
            silhouette: SilhouetteAccumulator::new(),
            recorded: Vec::new(),
            viewport: None,
            current: None,
            frame_mask: Image::empty(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn params(&self) -> MaskParams {
        self.params
    }

    pub fn baseline(&self) -> Option<BaselineEstimate> {
        self.baseline.estimate()
    }

    pub fn silhouette(&self) -> &SilhouetteAccumulator {
        &self.silhouette
    }

    /// Tips kept by the most recent measurement.
    pub fn recorded_tips(&self) -> &[TipCandidate] {
        &self.recorded
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    /// Updates the baseline and folds the frame's mask into the silhouette.
    pub fn process_frame(&mut self, frame: Frame) -> Result<FrameOutcome, SessionError> {
        let gray = gray_from_rgb(&frame.image);
        let blurred = gaussian_blur(&gray, self.config.profile.blur_sigma)?;

        let gy = vertical_gradient(&blurred)?;
        let profile = EdgeEnergyProfile::from_vertical_gradient(&gy.as_view());
        let baseline = self.baseline.update(&profile, gray.height())?;

        let mask = binarize(
            &blurred.as_view(),
            &self.params,
            &self.config.mask,
            baseline.map(|b| b.mask_row()),
        );

        if self
            .silhouette
            .extent()
            .is_some_and(|extent| extent != mask.dimensions())
        {
            self.silhouette.reset(ResetReason::FrameResized);
        }
        self.silhouette.ingest(&mask.as_view())?;

        let outcome = FrameOutcome {
            baseline,
            mask_pixels: mask.count_set(),
            silhouette_frames: self.silhouette.frames(),
        };
        self.frame_mask = mask;
        self.current = Some(frame);
        Ok(outcome)
    }

    /// Outer contours of the latest frame's mask, native coordinates.
    pub fn live_contours(&self) -> Result<Vec<Vec<Point2i>>, SessionError> {
        Ok(outer_contours(&self.frame_mask)?)
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<EventOutcome, SessionError> {
        match event {
            SessionEvent::ParametersChanged(params) => {
                let params = params.clamped();
                if params != self.params {
                    self.params = params;
                    self.silhouette.reset(ResetReason::ParametersChanged);
                }
                Ok(EventOutcome::Continue)
            }
            SessionEvent::ViewportResized { width, height } => {
                if self.viewport != Some((width, height)) {
                    self.viewport = Some((width, height));
                    self.silhouette.reset(ResetReason::ViewportChanged);
                }
                Ok(EventOutcome::Continue)
            }
            SessionEvent::Measure => Ok(match self.measure()? {
                Some(m) => EventOutcome::Measured(Box::new(m)),
                None => EventOutcome::Continue,
            }),
            SessionEvent::Stop => Ok(EventOutcome::Stop),
        }
    }

    /// Runs the measurement action on the current frame and state.
    ///
    /// Replaces the recorded tip set. Returns `None` before the first frame.
    pub fn measure(&mut self) -> Result<Option<Measurement>, SessionError> {
        let Some(frame) = &self.current else {
            tracing::warn!("measure requested before any frame was processed");
            return Ok(None);
        };

        let m = measure(
            Snapshot {
                frame: &frame.image,
                timestamp_ms: frame.timestamp_ms,
                silhouette: self.silhouette.snapshot(),
                baseline: self.baseline.estimate(),
                params: self.params,
            },
            &self.config,
        )?;
        self.recorded.clone_from(&m.recorded);
        Ok(Some(m))
    }
}
