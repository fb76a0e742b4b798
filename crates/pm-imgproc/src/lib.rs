//! Image-processing primitives the measurement pipeline delegates to.
//!
//! Everything here is a thin adapter over `image` and `imageproc`:
//! - [`convert`]: RGB to grayscale and `pm-core` <-> `image` buffers.
//! - [`filter`]: Gaussian blur, vertical gradient, uniform magnification.
//! - [`contours`]: outer-boundary tracing, arc length, Douglas-Peucker
//!   simplification.
//! - [`draw`]: the annotation [`Surface`] and its raster implementation.
//!
//! The algorithmic crates never depend on this one; they consume the plain
//! `pm-core` data it produces.

pub mod contours;
pub mod convert;
pub mod draw;
pub mod filter;

pub use contours::{arc_length, outer_contours, simplify_polygon};
pub use convert::{gray_from_rgb, to_gray_image};
pub use draw::{Fill, RgbCanvas, Surface};
pub use filter::{gaussian_blur, magnify_rgb, vertical_gradient};
