// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod document;
mod error;

#[cfg(test)]
mod tests;

use leave_bank::EntityStore;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub use document::{
    DatabaseDocument, DateRecord, EmployeeRecord, ExtraTimeRecord, FORMAT_VERSION,
    LeaveTypeRecord, RuleRecord, TakenDayRecord,
};
pub use error::PersistenceError;

/// Writes the store to `path` as a JSON document.
///
/// `progress` receives fractions in `[0, 1]` as the save advances and is
/// called with `1.0` exactly once, after the file has been written.
///
/// # Errors
///
/// Returns an error if the document cannot be encoded or the file cannot
/// be written.
pub fn save_to_path(
    path: &Path,
    store: &EntityStore,
    progress: impl Fn(f32),
) -> Result<(), PersistenceError> {
    progress(0.0);
    let document = DatabaseDocument::from_store(store);
    debug!(
        employees = document.employees.len(),
        leave_types = document.leave_types.len(),
        "captured store into document"
    );
    progress(0.25);

    let text = serde_json::to_string_pretty(&document)?;
    progress(0.5);

    fs::write(path, text).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    progress(1.0);

    info!(path = %path.display(), "saved database document");
    Ok(())
}

/// Reads a JSON document from `path` and rebuilds the store it describes.
///
/// `progress` receives fractions in `[0, 1]` as the load advances and is
/// called with `1.0` exactly once, after the store has been rebuilt.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the document cannot be
/// decoded, its format version is unsupported, a stored date is not a
/// real calendar day, or a stored quantity is not a valid rational.
pub fn load_from_path(
    path: &Path,
    progress: impl Fn(f32),
) -> Result<EntityStore, PersistenceError> {
    progress(0.0);
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    progress(0.25);

    let document: DatabaseDocument = serde_json::from_str(&text)?;
    debug!(
        version = document.version,
        employees = document.employees.len(),
        leave_types = document.leave_types.len(),
        "decoded database document"
    );
    progress(0.5);

    let store = document.into_store()?;
    progress(1.0);

    info!(path = %path.display(), "loaded database document");
    Ok(store)
}
