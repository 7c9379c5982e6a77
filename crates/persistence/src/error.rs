// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for document persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving or loading a database document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The file could not be read or written.
    #[error("I/O failure on '{}': {source}", .path.display())]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document could not be encoded or decoded as JSON.
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The document declares a format version this build does not read.
    #[error("Unsupported document version {found} (this build reads version {expected})")]
    UnsupportedVersion {
        /// The version found in the document.
        found: u32,
        /// The version this build reads.
        expected: u32,
    },
    /// A stored date does not name a real calendar day.
    #[error("Document date {year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate {
        /// The stored year.
        year: i32,
        /// The stored month.
        month: u8,
        /// The stored day.
        day: u8,
    },
    /// A stored quantity is not a valid rational.
    #[error("Document value '{value}' is not a valid rational quantity")]
    InvalidNumber {
        /// The stored text.
        value: String,
    },
}
