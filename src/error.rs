//! Error types of the light core.
//!
//! None of these reach the protocol layer: callers of the mutators never see
//! them. They exist so the render and storage paths can log what failed.

use core::fmt;

/// A frame could not be pushed to the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError<E> {
    /// Staging a pixel failed; the frame was abandoned before flush.
    Pixel { index: usize, source: E },
    /// The staged frame could not be flushed.
    Flush(E),
}

impl<E: fmt::Debug> fmt::Display for RenderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel { index, source } => write!(f, "set pixel {index}: {source:?}"),
            Self::Flush(e) => write!(f, "flush: {e:?}"),
        }
    }
}

/// Key-value storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The namespace could not be opened.
    Open,
    /// A present key could not be read.
    Read(&'static str),
    /// A key could not be written.
    Write(&'static str),
    /// Pending writes could not be committed.
    Commit,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open failed"),
            Self::Read(key) => write!(f, "read `{key}` failed"),
            Self::Write(key) => write!(f, "write `{key}` failed"),
            Self::Commit => write!(f, "commit failed"),
        }
    }
}
