use std::fmt;

/// Errors raised by the anahash builder and indexer libraries.
///
/// Following the three kinds of failure the tools recognise: bad
/// configuration (missing/conflicting flags), bad input data (malformed
/// lines), and I/O failures. All three print a message and cause the
/// calling binary to exit nonzero; there is no retry or partial recovery.
#[derive(Debug)]
pub enum TiccltoolsError {
    Config(String),
    Format { line: String, reason: String },
    Io(std::io::Error),
}

impl fmt::Display for TiccltoolsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiccltoolsError::Config(msg) => write!(f, "{}", msg),
            TiccltoolsError::Format { line, reason } => {
                write!(f, "{}\noffending line: {}", reason, line)
            }
            TiccltoolsError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TiccltoolsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiccltoolsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TiccltoolsError {
    fn from(e: std::io::Error) -> Self {
        TiccltoolsError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, TiccltoolsError>;
