use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::SessionError;

/// One decoded frame from a [`FrameSource`].
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    /// Position within the current pass.
    pub index: usize,
    pub timestamp_ms: f64,
    /// Whether this is the final frame before the stream ends.
    pub last: bool,
}

/// Where the run loop is, as seen by a [`crate::Controller`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based playback pass; increments on every rewind.
    pub pass: usize,
    pub index: usize,
    pub timestamp_ms: f64,
    pub last_in_pass: bool,
}

impl FrameInfo {
    pub fn of(frame: &Frame, pass: usize) -> Self {
        Self {
            pass,
            index: frame.index,
            timestamp_ms: frame.timestamp_ms,
            last_in_pass: frame.last,
        }
    }
}

/// Ordered, rewindable frame stream.
pub trait FrameSource {
    /// Next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Frame>, SessionError>;

    fn rewind(&mut self) -> Result<(), SessionError>;

    /// Stem used to name output files.
    fn base_name(&self) -> &str;
}

const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tif"];

/// Directory of still frames played back in file-name order.
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    fps: f64,
    cursor: usize,
    base_name: String,
}

impl ImageSequenceSource {
    /// Lists the frames in `dir`; timestamps are derived from `fps`.
    pub fn open(dir: &Path, fps: f64) -> Result<Self, SessionError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(SessionError::SourceUnavailable(format!(
                "invalid frame rate {fps}"
            )));
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            SessionError::SourceUnavailable(format!("cannot open {}: {e}", dir.display()))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SessionError::io(dir, e))?.path();
            let is_frame = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if is_frame && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(SessionError::SourceUnavailable(format!(
                "no frames in {}",
                dir.display()
            )));
        }

        let base_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());

        tracing::info!(
            "opened {} frames from {} at {fps} fps",
            paths.len(),
            dir.display()
        );

        Ok(Self {
            paths,
            fps,
            cursor: 0,
            base_name,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SessionError> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };
        let image = image::open(path)?.to_rgb8();
        let index = self.cursor;
        self.cursor += 1;

        Ok(Some(Frame {
            image,
            index,
            timestamp_ms: index as f64 * 1000.0 / self.fps,
            last: self.cursor == self.paths.len(),
        }))
    }

    fn rewind(&mut self) -> Result<(), SessionError> {
        self.cursor = 0;
        Ok(())
    }

    fn base_name(&self) -> &str {
        &self.base_name
    }
}

/// In-memory frames with a fixed frame interval.
#[derive(Debug, Clone)]
pub struct MemorySource {
    frames: Vec<RgbImage>,
    interval_ms: f64,
    cursor: usize,
    base_name: String,
}

impl MemorySource {
    pub fn new(frames: Vec<RgbImage>, fps: f64) -> Self {
        let interval_ms = if fps > 0.0 { 1000.0 / fps } else { 0.0 };
        Self {
            frames,
            interval_ms,
            cursor: 0,
            base_name: "frame".to_string(),
        }
    }

    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SessionError> {
        let Some(image) = self.frames.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;
        self.cursor += 1;

        Ok(Some(Frame {
            image: image.clone(),
            index,
            timestamp_ms: index as f64 * self.interval_ms,
            last: self.cursor == self.frames.len(),
        }))
    }

    fn rewind(&mut self) -> Result<(), SessionError> {
        self.cursor = 0;
        Ok(())
    }

    fn base_name(&self) -> &str {
        &self.base_name
    }
}
