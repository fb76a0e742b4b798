//! Pick-level measurement stages.
//!
//! - [`tips`]: candidate apexes from a region outline, with horizontal
//!   neighborhood suppression ([`PickTipExtractor`]), and the per-block
//!   topmost scan used for a single frame's raw tips ([`topmost_per_block`]).
//! - [`matcher`]: greedy nearest-neighbor pairing of raw tips against the
//!   recorded tip set ([`TipMatcher`]).
//! - [`spacing`]: median/MAD filtered pick spacing and the cutting-line
//!   lattice ([`SpacingEstimator`]).
//!
//! All coordinates are in the magnified working frame unless a function says
//! otherwise. Polygon simplification is external; callers provide it through
//! [`Simplifier`].

pub mod matcher;
pub mod spacing;
pub mod tips;

pub use matcher::{MatchConfig, TipMatch, TipMatcher};
pub use spacing::{SpacingConfig, SpacingEstimate, SpacingEstimator, SpacingShortfall, median};
pub use tips::{
    PickTipExtractor, Simplifier, TipCandidate, TipConfig, suppress_horizontal_neighbors,
    topmost_per_block,
};
