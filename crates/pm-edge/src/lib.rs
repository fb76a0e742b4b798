//! Horizontal-edge evidence and the drum rim baseline.
//!
//! A frame's vertical gradient is reduced to one scalar per row
//! ([`EdgeEnergyProfile`]). The [`BaselineTracker`] scans a band of rows for
//! the strongest horizontal edge and keeps the topmost one seen during the
//! session: once set, the baseline only ever moves up (smaller row index).

pub mod baseline;
pub mod profile;

pub use baseline::{BaselineConfig, BaselineEstimate, BaselineTracker};
pub use profile::EdgeEnergyProfile;
