//! Error types for grid, world and codec operations

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where in an input a parse failure was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line number in a text file
    Line(usize),
    /// Byte offset in a binary file
    Offset(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line(line) => write!(f, "line {}", line),
            Location::Offset(offset) => write!(f, "byte offset {}", offset),
        }
    }
}

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: u64,
        y: u64,
        width: u32,
        height: u32,
    },

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error at {location}: {message}")]
    Parse { location: Location, message: String },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LifeError {
    pub(crate) fn parse_at_line(line: usize, message: impl Into<String>) -> Self {
        LifeError::Parse {
            location: Location::Line(line),
            message: message.into(),
        }
    }

    pub(crate) fn parse_at_offset(offset: usize, message: impl Into<String>) -> Self {
        LifeError::Parse {
            location: Location::Offset(offset),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LifeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
