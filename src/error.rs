use std::path::PathBuf;
use thiserror::Error;
/// Everything that can go wrong during a batch.
///
/// [`Error::Enumeration`], [`Error::OutputDir`] and [`Error::Config`] abort a run before any
/// work is submitted. [`Error::Codec`] and [`Error::Io`] only ever fail a single item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source directory is missing or cannot be read.
    #[error("cannot read source directory {}: {reason}", path.display())]
    Enumeration {
        /// Source directory.
        path: PathBuf,
        /// What the filesystem reported.
        reason: String,
    },
    /// The output directory cannot be created.
    #[error("cannot create output directory {}: {reason}", path.display())]
    OutputDir {
        /// Output directory.
        path: PathBuf,
        /// What the filesystem reported.
        reason: String,
    },
    /// The image could not be decoded or re-encoded.
    #[error("compression failed: {0}")]
    Codec(String),
    /// Reading the input or writing the output of a single item failed.
    #[error("I/O error on {}: {reason}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// What the filesystem reported.
        reason: String,
    },
    /// The run configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}
impl Error {
    /// Returns true for errors that abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Enumeration { .. } | Error::OutputDir { .. } | Error::Config(_)
        )
    }
}
