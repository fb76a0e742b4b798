//! Session orchestration for drum pick metrology.
//!
//! A [`Session`] owns everything that lives longer than one frame: the
//! baseline tracker, the accumulated silhouette, the current mask
//! parameters, and the recorded tip set. Frames come from a
//! [`FrameSource`]; user input arrives as [`SessionEvent`]s. A `Measure`
//! event runs the measurement action on a snapshot of that state and yields
//! a [`Measurement`], which can be rendered as a text report, serialized as
//! JSON, or drawn onto the magnified frame.
//!
//! [`run`] drives the whole loop: it pulls frames (rewinding at the end of
//! the stream), polls a [`Controller`] for events after each frame, and
//! hands measurements to a [`MeasurementSink`].

pub mod annotate;
mod config;
mod error;
mod measure;
mod output;
mod report;
mod run;
mod session;
mod source;

pub use config::{ProfileConfig, SessionConfig};
pub use error::SessionError;
pub use measure::{Degradation, DouglasPeucker, MatchedTip, Measurement, RegionTips};
pub use output::{FileSink, MeasurementSink, OutputPaths};
pub use report::ReportText;
pub use run::{Controller, RunSummary, ScheduledController, run};
pub use session::{EventOutcome, FrameOutcome, Session, SessionEvent};
pub use source::{Frame, FrameInfo, FrameSource, ImageSequenceSource, MemorySource};
