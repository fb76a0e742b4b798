//! Umbrella crate for the `pick-metrology` workspace.
//!
//! Re-exports the measurement stages and the session layer so downstream
//! code needs a single dependency. The image-library adapter stays behind
//! the [`imgproc`] path.

pub use pm_core::*;
pub use pm_edge::*;
pub use pm_imgproc as imgproc;
pub use pm_mask::*;
pub use pm_picks::*;
pub use pm_session::*;
