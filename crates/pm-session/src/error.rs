use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SessionError {
    /// The frame source cannot be opened or produced nothing.
    SourceUnavailable(String),
    /// The controlling surface went away; ends the loop cleanly.
    SurfaceLost(String),
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Image(image::ImageError),
    Json(serde_json::Error),
    Core(pm_core::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable(why) => write!(f, "frame source unavailable: {why}"),
            Self::SurfaceLost(why) => write!(f, "surface lost: {why}"),
            Self::Io { path, source } => write!(f, "i/o error at {}: {source}", path.display()),
            Self::Image(e) => write!(f, "image error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Core(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Image(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Core(e) => Some(e),
            Self::SourceUnavailable(_) | Self::SurfaceLost(_) => None,
        }
    }
}

impl From<pm_core::Error> for SessionError {
    fn from(e: pm_core::Error) -> Self {
        Self::Core(e)
    }
}

impl From<image::ImageError> for SessionError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
