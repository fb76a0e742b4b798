//! Binary masks for the pick silhouette.
//!
//! [`binarize`] turns a grayscale frame into a `0`/`255` mask using a
//! brightness offset and a binary threshold, then blanks the top band of the
//! frame and everything below the baseline. [`SilhouetteAccumulator`] ORs
//! those masks across frames until an external signal resets it.

mod accumulator;
mod binarize;

pub use accumulator::{ResetReason, SilhouetteAccumulator, SilhouetteState};
pub use binarize::{MaskConfig, MaskParams, binarize};
