//! Unified error types for vkpack.
//!
//! This module provides a single [`ExportError`] enum that covers all error
//! cases in the library, plus [`ApiFailure`] for the transport-level detail
//! behind a failed VK API call.
//!
//! # Error Handling Philosophy
//!
//! - Configuration problems and remote fetch failures are **fatal**: the run
//!   aborts with a descriptive message before or instead of writing output.
//! - A failed attachment download is **non-fatal**: it is logged and the run
//!   continues, trading attachment completeness for transcript completeness.
//! - Failing to write the transcript itself is fatal, since the transcript is
//!   the sole deliverable of a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for vkpack operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// The error type for all vkpack operations.
///
/// Each variant carries context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A required setting is missing or malformed.
    ///
    /// Raised before any network call is made.
    #[error("configuration error: {0}")]
    Config(String),

    /// A VK API request failed.
    ///
    /// This covers metadata, member-profile and history-page fetches as well
    /// as attachment byte retrieval. Whether the error aborts the run depends
    /// on the caller: page and profile fetches are fatal, attachment
    /// downloads are logged and skipped.
    #[error("{context} failed: {source}")]
    RemoteFetch {
        /// What was being fetched (e.g. "history page fetch")
        context: &'static str,
        /// The underlying transport or API failure
        #[source]
        source: ApiFailure,
    },

    /// Writing the final transcript file failed.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        /// Path of the file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred (e.g. creating the backup directory).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The reason a VK API call failed.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// Transport-level failure: connection, timeout, non-2xx status or a
    /// response body that could not be decoded.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// VK returned an explicit error payload instead of a response.
    #[error("VK API error {code}: {message}")]
    Api {
        /// VK error code (see the VK API error reference)
        code: i64,
        /// Human-readable message from VK
        message: String,
    },

    /// The response envelope decoded, but its shape was not usable.
    #[error("malformed VK response: {0}")]
    Malformed(String),
}

impl ExportError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ExportError::Config(message.into())
    }

    /// Creates a remote fetch error with call-site context.
    pub fn remote_fetch(context: &'static str, source: ApiFailure) -> Self {
        ExportError::RemoteFetch { context, source }
    }

    /// Creates a transcript write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, ExportError::Config(_))
    }

    /// Returns `true` if this is a remote fetch error.
    pub fn is_remote_fetch(&self) -> bool {
        matches!(self, ExportError::RemoteFetch { .. })
    }

    /// Returns `true` if this is a transcript write error.
    pub fn is_file_write(&self) -> bool {
        matches!(self, ExportError::FileWrite { .. })
    }
}
