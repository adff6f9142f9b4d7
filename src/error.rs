use std::error::Error;
use std::fmt;
use std::io;

/// An error raised when a [`Layout`] would be unusable.
///
/// [`Layout`]: ./struct.Layout.html
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LayoutError {
    InvalidLineMax { line_max: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLineMax { line_max } => write!(
                f,
                "line_max must be at least 1 value per line, got {}",
                line_max
            ),
        }
    }
}

impl Error for LayoutError {}

/// An error that may arise while dumping a hex array.
///
/// Rendering to a `String` can't fail once you have a valid layout, so in practice the
/// `Write` variant only shows up when writing to an `io::Write` target.
#[derive(Debug)]
pub enum DumpError {
    Layout(LayoutError),
    Write { source: io::Error },
}

impl DumpError {
    pub(crate) fn write(source: io::Error) -> Self {
        Self::Write { source }
    }
}

impl From<LayoutError> for DumpError {
    fn from(source: LayoutError) -> Self {
        Self::Layout(source)
    }
}

impl From<io::Error> for DumpError {
    fn from(source: io::Error) -> Self {
        Self::write(source)
    }
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "Invalid layout: {}", err),
            Self::Write { .. } => write!(f, "An underlying IO error occurred while dumping"),
        }
    }
}

impl Error for DumpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(source) => Some(source),
            Self::Write { source } => Some(source),
        }
    }
}
