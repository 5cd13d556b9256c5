//! Error-related types for document parsing.

use std::io;
use thiserror::Error;

/// Alias for `Result<T, EbookError>`.
pub type EbookResult<T> = Result<T, EbookError>;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Unified error type for opening and parsing a packaged document.
///
/// All variants are fatal to the parse attempt as a whole; item-level
/// problems (an unresolvable spine entry, malformed markup in one
/// content part) are absorbed during parsing and never surface here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EbookError {
    /// Access to the underlying archive has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Required structural files are absent or malformed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Possible errors from the archive containing a document.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The input bytes cannot be indexed as a zip archive.
    #[error("[UnreadableArchive]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
    },

    /// A file exists in the archive but its contents cannot be read.
    #[error("[CannotRead - `{path}`]: {source}")]
    CannotRead {
        /// The root cause of this error.
        source: io::Error,
        /// The archive path responsible for triggering the error.
        path: String,
    },

    /// A given path does not point to a file within the archive.
    #[error("[MissingFile - `{path}`]: no such file in archive")]
    MissingFile {
        /// The archive path responsible for triggering the error.
        path: String,
    },
}

/// Possible structural errors for a packaged document.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FormatError {
    /// The input does not carry the expected container signature,
    /// rejected before any parsing is attempted.
    #[error("[InvalidFileType]: input does not look like a zip-packaged document")]
    InvalidFileType,

    /// The fixed `META-INF/container.xml` pointer file is absent.
    #[error("[MissingContainer]: `META-INF/container.xml` is absent")]
    MissingContainer,

    /// No `rootfile` element with a `full-path` attribute exists
    /// within the container pointer file.
    #[error("[MissingPackagePath]: no `rootfile` with a `full-path` attribute")]
    MissingPackagePath,

    /// The package document referenced by the container pointer file
    /// does not exist within the archive.
    #[error("[PackageNotFound - `{path}`]: referenced package file is absent")]
    PackageNotFound {
        /// The package path announced by the container pointer file.
        path: String,
    },
}
