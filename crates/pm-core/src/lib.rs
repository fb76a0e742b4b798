//! Foundational primitives for drum pick metrology.
//!
//! ## Images
//! [`Image`] owns a contiguous row-major buffer; [`ImageView`] and
//! [`ImageViewMut`] borrow one for row-wise access.
//!
//! ## Coordinates
//! Integer image coordinates: `x` grows to the right, `y` grows downward.
//! "Higher on screen" therefore means a smaller `y`.
//!
//! ## Binary masks
//! Masks are `Image<u8>` with pixels either `0` or `255`; any non-zero value
//! counts as set.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::Point2i;
pub use image::{Image, ImageView, ImageViewMut};

/// Value written into set pixels of a binary mask.
pub const MASK_ON: u8 = 255;
