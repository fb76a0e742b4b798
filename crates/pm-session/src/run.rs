use std::thread;
use std::time::Duration;

use pm_mask::MaskParams;

use crate::error::SessionError;
use crate::output::MeasurementSink;
use crate::session::{EventOutcome, Session, SessionEvent};
use crate::source::{FrameInfo, FrameSource};

/// Source of user input, polled once after every processed frame.
///
/// Returning [`SessionError::SurfaceLost`] ends the run cleanly.
pub trait Controller {
    fn poll(&mut self, info: &FrameInfo) -> Result<Vec<SessionEvent>, SessionError>;
}

impl<F> Controller for F
where
    F: FnMut(&FrameInfo) -> Result<Vec<SessionEvent>, SessionError>,
{
    fn poll(&mut self, info: &FrameInfo) -> Result<Vec<SessionEvent>, SessionError> {
        self(info)
    }
}

/// Non-interactive controller driven by timestamps.
///
/// Each measure time fires once, on the first frame at or after it. With no
/// measure times, one measurement is taken on the last frame of the first
/// pass. Parameter changes fire the same way. With `passes > 0` the run
/// stops after the last frame of that many passes.
#[derive(Debug, Clone, Default)]
pub struct ScheduledController {
    measure_at_ms: Vec<f64>,
    parameter_changes: Vec<(f64, MaskParams)>,
    passes: usize,
    fired_measures: usize,
    fired_changes: usize,
}

impl ScheduledController {
    pub fn new(passes: usize) -> Self {
        Self {
            passes,
            ..Self::default()
        }
    }

    pub fn measure_at(mut self, mut times_ms: Vec<f64>) -> Self {
        times_ms.retain(|t| t.is_finite());
        times_ms.sort_by(f64::total_cmp);
        self.measure_at_ms = times_ms;
        self
    }

    pub fn change_parameters_at(mut self, time_ms: f64, params: MaskParams) -> Self {
        self.parameter_changes.push((time_ms, params));
        self.parameter_changes.sort_by(|a, b| a.0.total_cmp(&b.0));
        self
    }
}

impl Controller for ScheduledController {
    fn poll(&mut self, info: &FrameInfo) -> Result<Vec<SessionEvent>, SessionError> {
        let mut events = Vec::new();

        if self.measure_at_ms.is_empty() {
            if info.pass == 0 && info.last_in_pass {
                events.push(SessionEvent::Measure);
            }
        } else {
            while self
                .measure_at_ms
                .get(self.fired_measures)
                .is_some_and(|&t| info.timestamp_ms >= t)
            {
                self.fired_measures += 1;
                events.push(SessionEvent::Measure);
            }
            // Several due times on one frame measure that frame once.
            events.dedup();
        }

        while let Some(&(t, params)) = self.parameter_changes.get(self.fired_changes) {
            if info.timestamp_ms < t {
                break;
            }
            self.fired_changes += 1;
            events.push(SessionEvent::ParametersChanged(params));
        }

        if self.passes > 0 && info.last_in_pass && info.pass + 1 >= self.passes {
            events.push(SessionEvent::Stop);
        }
        Ok(events)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: usize,
    /// Passes started, including a partial final one.
    pub passes: usize,
    pub measurements: usize,
}

/// Drives `session` with frames from `source` until the controller stops
/// it or loses its surface.
///
/// The stream is rewound at its end. A source that yields nothing right
/// after opening or rewinding is [`SessionError::SourceUnavailable`].
pub fn run<F, C, K>(
    session: &mut Session,
    source: &mut F,
    controller: &mut C,
    sink: &mut K,
) -> Result<RunSummary, SessionError>
where
    F: FrameSource + ?Sized,
    C: Controller + ?Sized,
    K: MeasurementSink + ?Sized,
{
    let wait = Duration::from_millis(session.config().frame_wait_ms);
    let mut summary = RunSummary {
        passes: 1,
        ..RunSummary::default()
    };
    let mut pass = 0;
    let mut frames_in_pass = 0usize;

    loop {
        let Some(frame) = source.next_frame()? else {
            if frames_in_pass == 0 {
                return Err(SessionError::SourceUnavailable(format!(
                    "{} yielded no frames",
                    source.base_name()
                )));
            }
            source.rewind()?;
            pass += 1;
            frames_in_pass = 0;
            summary.passes = pass + 1;
            tracing::debug!("end of stream; rewinding for pass {pass}");
            continue;
        };

        let info = FrameInfo::of(&frame, pass);
        session.process_frame(frame)?;
        summary.frames += 1;
        frames_in_pass += 1;

        let events = match controller.poll(&info) {
            Ok(events) => events,
            Err(SessionError::SurfaceLost(why)) => {
                tracing::info!("surface lost ({why}); ending session");
                return Ok(summary);
            }
            Err(e) => return Err(e),
        };

        for event in events {
            match session.handle(event)? {
                EventOutcome::Continue => {}
                EventOutcome::Measured(m) => {
                    if let Some(frame) = session.current_frame() {
                        sink.accept(&m, frame)?;
                    }
                    summary.measurements += 1;
                }
                EventOutcome::Stop => {
                    tracing::info!(
                        "stopped after {} frame(s), {} measurement(s)",
                        summary.frames,
                        summary.measurements
                    );
                    return Ok(summary);
                }
            }
        }

        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
