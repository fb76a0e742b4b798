use image::RgbImage;
use pm_core::{Image, Point2i};
use pm_edge::BaselineEstimate;
use pm_imgproc::{arc_length, gray_from_rgb, outer_contours, simplify_polygon};
use pm_mask::{MaskParams, binarize};
use pm_picks::{
    PickTipExtractor, Simplifier, SpacingEstimate, SpacingEstimator, SpacingShortfall,
    TipCandidate, TipMatch, TipMatcher, topmost_per_block,
};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::SessionError;

/// [`Simplifier`] backed by `imageproc`'s Douglas-Peucker.
#[derive(Debug, Clone, Copy, Default)]
pub struct DouglasPeucker;

impl Simplifier for DouglasPeucker {
    fn perimeter(&self, contour: &[Point2i]) -> f64 {
        arc_length(contour, true)
    }

    fn simplify(&self, contour: &[Point2i], epsilon: f64) -> Vec<Point2i> {
        simplify_polygon(contour, epsilon)
    }
}

/// One connected region of the accumulated silhouette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTips {
    /// Outer boundary in native coordinates.
    pub outline: Vec<Point2i>,
    pub tips: Vec<TipCandidate>,
    /// Length of the recorded tip set once this region's tips were appended.
    pub recorded_count: usize,
    /// Raw tips matched against the first `recorded_count` recorded tips.
    pub matched: Vec<MatchedTip>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedTip {
    #[serde(flatten)]
    pub pair: TipMatch,
    /// Raw tip height above the scaled baseline.
    pub height: Option<i32>,
}

/// Optional outputs that were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degradation {
    UnavailableBaseline,
    InsufficientSpacingData(SpacingShortfall),
}

/// Result of one measurement action, in working (magnified) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp_ms: f64,
    /// Native frame extent.
    pub frame_width: u32,
    pub frame_height: u32,
    pub scale: i32,
    pub baseline: Option<BaselineEstimate>,
    pub scaled_baseline: Option<i32>,
    pub regions: Vec<RegionTips>,
    /// Union of the region tips in region order.
    pub recorded: Vec<TipCandidate>,
    pub raw_tips: Vec<Point2i>,
    /// Raw tips matched against the whole recorded set.
    pub matched: Vec<MatchedTip>,
    pub spacing: SpacingEstimate,
    pub degradations: Vec<Degradation>,
}

impl Measurement {
    /// Timestamp truncated to whole seconds.
    pub fn timestamp_sec(&self) -> u64 {
        (self.timestamp_ms / 1000.0).max(0.0) as u64
    }

    pub fn has_baseline(&self) -> bool {
        self.scaled_baseline.is_some()
    }
}

/// Inputs a measurement reads; borrowed from the session for one call.
pub(crate) struct Snapshot<'a> {
    pub frame: &'a RgbImage,
    pub timestamp_ms: f64,
    pub silhouette: Image<u8>,
    pub baseline: Option<BaselineEstimate>,
    pub params: MaskParams,
}

pub(crate) fn measure(
    snap: Snapshot<'_>,
    config: &SessionConfig,
) -> Result<Measurement, SessionError> {
    let scale = config.tips.scale;
    let (w, h) = snap.frame.dimensions();
    let scaled_width = w as i32 * scale;
    let scaled_baseline = snap.baseline.map(|b| b.scaled(scale));

    let raw_tips = raw_frame_tips(&snap, config)?;

    let extractor = PickTipExtractor::new(config.tips.clone());
    let matcher = TipMatcher::new(config.matching.clone());
    let match_recorded = |recorded: &[TipCandidate]| -> Vec<MatchedTip> {
        let reference: Vec<Point2i> = recorded.iter().map(|t| t.point).collect();
        matcher
            .match_tips(&raw_tips, &reference)
            .into_iter()
            .map(|pair| MatchedTip {
                height: scaled_baseline.map(|b| b - pair.raw.y),
                pair,
            })
            .collect()
    };

    let mut recorded: Vec<TipCandidate> = Vec::new();
    let mut regions = Vec::new();
    for outline in outer_contours(&snap.silhouette)? {
        let tips = extractor.extract(&outline, &DouglasPeucker, scaled_baseline);
        recorded.extend_from_slice(&tips);
        regions.push(RegionTips {
            matched: match_recorded(&recorded),
            recorded_count: recorded.len(),
            outline,
            tips,
        });
    }
    let matched = regions.last().map(|r| r.matched.clone()).unwrap_or_default();

    let xs: Vec<i32> = recorded.iter().map(|t| t.point.x).collect();
    let spacing = SpacingEstimator::new(config.spacing.clone()).estimate(&xs, scaled_width);

    let mut degradations = Vec::new();
    if scaled_baseline.is_none() {
        tracing::warn!("baseline not available; heights omitted");
        degradations.push(Degradation::UnavailableBaseline);
    }
    if let Some(shortfall) = spacing.shortfall {
        degradations.push(Degradation::InsufficientSpacingData(shortfall));
    }

    tracing::info!(
        "measured at {:.0} ms: {} region(s), {} pick(s), {} aligned, spacing {} px",
        snap.timestamp_ms,
        regions.len(),
        recorded.len(),
        matched.len(),
        spacing.average_spacing
    );

    Ok(Measurement {
        timestamp_ms: snap.timestamp_ms,
        frame_width: w,
        frame_height: h,
        scale,
        baseline: snap.baseline,
        scaled_baseline,
        regions,
        recorded,
        raw_tips,
        matched,
        spacing,
        degradations,
    })
}

/// Topmost outline point per column block of the unblurred frame mask.
fn raw_frame_tips(
    snap: &Snapshot<'_>,
    config: &SessionConfig,
) -> Result<Vec<Point2i>, SessionError> {
    let scale = config.tips.scale;
    let gray = gray_from_rgb(snap.frame);
    let mask = binarize(
        &gray.as_view(),
        &snap.params,
        &config.mask,
        snap.baseline.map(|b| b.mask_row()),
    );
    let points: Vec<Point2i> = outer_contours(&mask)?
        .into_iter()
        .flatten()
        .map(|p| p * scale)
        .collect();

    Ok(topmost_per_block(
        &points,
        gray.width() as i32 * scale,
        config.matching.block_width_px,
    ))
}
