use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;

use crate::annotate;
use crate::error::SessionError;
use crate::measure::Measurement;
use crate::report::ReportText;
use crate::source::Frame;

/// Receives every completed measurement with the frame it was taken on.
pub trait MeasurementSink {
    fn accept(&mut self, measurement: &Measurement, frame: &Frame) -> Result<(), SessionError>;
}

impl MeasurementSink for Vec<Measurement> {
    fn accept(&mut self, measurement: &Measurement, _frame: &Frame) -> Result<(), SessionError> {
        self.push(measurement.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub report: PathBuf,
    pub json: PathBuf,
    pub image: PathBuf,
}

impl OutputPaths {
    /// `<dir>/<base>_measurements.{txt,json}` and `<dir>/<base>_<sec>s.png`.
    pub fn new(dir: &Path, base: &str, timestamp_sec: u64) -> Self {
        Self {
            report: dir.join(format!("{base}_measurements.txt")),
            json: dir.join(format!("{base}_measurements.json")),
            image: dir.join(format!("{base}_{timestamp_sec}s.png")),
        }
    }
}

/// Writes the report, its JSON form, and the annotated frame to a directory.
///
/// Report files are overwritten by every measurement; images accumulate,
/// one per distinct second.
pub struct FileSink {
    dir: PathBuf,
    base: String,
    font: Option<FontArc>,
    written: Vec<OutputPaths>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, base: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base: base.into(),
            font: None,
            written: Vec::new(),
        }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn written(&self) -> &[OutputPaths] {
        &self.written
    }
}

impl MeasurementSink for FileSink {
    fn accept(&mut self, m: &Measurement, frame: &Frame) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir).map_err(|e| SessionError::io(&self.dir, e))?;
        let paths = OutputPaths::new(&self.dir, &self.base, m.timestamp_sec());

        let text = ReportText(m).to_string();
        fs::write(&paths.report, text).map_err(|e| SessionError::io(&paths.report, e))?;

        let json = serde_json::to_vec_pretty(m)?;
        fs::write(&paths.json, json).map_err(|e| SessionError::io(&paths.json, e))?;

        let image = annotate::render(&frame.image, m, self.font.as_ref());
        image.save(&paths.image)?;

        tracing::info!("saved resampled frame as {}", paths.image.display());
        self.written.push(paths);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::OutputPaths;

    #[test]
    fn output_names_follow_base_and_second() {
        let p = OutputPaths::new(Path::new("Outputs"), "video_0", 12);
        assert_eq!(p.report, Path::new("Outputs/video_0_measurements.txt"));
        assert_eq!(p.json, Path::new("Outputs/video_0_measurements.json"));
        assert_eq!(p.image, Path::new("Outputs/video_0_12s.png"));
    }
}
