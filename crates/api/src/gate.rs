// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The I/O gate.
//!
//! Load and save run on one background thread at a time. The gate tracks
//! the in-flight task together with the observable status flags, and
//! parks the next foreground operation until the task has finished. The
//! status flags are the only state shared with the background thread and
//! are accessed atomically, so `status` never waits.

use leave_bank::EntityStore;
use leave_bank_persistence::PersistenceError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};
use std::thread::JoinHandle;
use tracing::error;

/// The background operation kinds reported by [`IoStatus`].
///
/// The numeric codes are part of the status contract: `0` none, `1`
/// load, `2` save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoOperation {
    /// No load or save has been started since the last reset.
    #[default]
    None,
    /// The most recent operation was a load.
    Load,
    /// The most recent operation was a save.
    Save,
}

impl IoOperation {
    /// Returns the numeric status code for this operation.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Load => 1,
            Self::Save => 2,
        }
    }

    const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Load,
            2 => Self::Save,
            _ => Self::None,
        }
    }
}

/// A point-in-time view of the background I/O state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IoStatus {
    /// The most recently started operation.
    pub operation: IoOperation,
    /// Fractional completion of that operation, in `[0, 1]`.
    pub progress: f32,
}

/// What a finished background task hands back to the foreground.
pub(crate) enum IoOutcome {
    /// A load produced a replacement store.
    Loaded(EntityStore),
    /// A save finished; the in-memory store is untouched.
    Saved,
}

pub(crate) struct IoGate {
    locked: AtomicBool,
    operation: AtomicU8,
    progress: Arc<AtomicU32>,
    task: Option<JoinHandle<Result<IoOutcome, PersistenceError>>>,
}

impl IoGate {
    pub(crate) fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            operation: AtomicU8::new(IoOperation::None.code()),
            progress: Arc::new(AtomicU32::new(0.0_f32.to_bits())),
            task: None,
        }
    }

    /// Snapshot of operation and progress; never waits.
    pub(crate) fn status(&self) -> IoStatus {
        IoStatus {
            operation: IoOperation::from_code(self.operation.load(Ordering::Acquire)),
            progress: f32::from_bits(self.progress.load(Ordering::Acquire)),
        }
    }

    /// Returns a progress sink the background task can own.
    pub(crate) fn progress_sink(&self) -> impl Fn(f32) + Send + 'static {
        let cell = Arc::clone(&self.progress);
        move |fraction: f32| cell.store(fraction.to_bits(), Ordering::Release)
    }

    /// Marks a task as in flight. The next `wait` call parks until it
    /// completes.
    pub(crate) fn begin(
        &mut self,
        operation: IoOperation,
        task: JoinHandle<Result<IoOutcome, PersistenceError>>,
    ) {
        self.progress.store(0.0_f32.to_bits(), Ordering::Release);
        self.operation.store(operation.code(), Ordering::Release);
        self.task = Some(task);
        self.locked.store(true, Ordering::Release);
    }

    /// Blocks on the in-flight task, if any, and clears the lock.
    ///
    /// Returns `None` when nothing was in flight, or when the task
    /// panicked (which is logged rather than propagated).
    pub(crate) fn wait(&mut self) -> Option<Result<IoOutcome, PersistenceError>> {
        if !self.locked.swap(false, Ordering::AcqRel) {
            return None;
        }
        let task = self.task.take()?;
        match task.join() {
            Ok(result) => Some(result),
            Err(_) => {
                error!("background I/O task panicked");
                None
            }
        }
    }

    /// Joins any in-flight task and returns the gate to its initial
    /// state.
    pub(crate) fn reset(&mut self) {
        if let Some(Err(failure)) = self.wait() {
            error!(%failure, "discarded failed background I/O result during reset");
        }
        self.operation
            .store(IoOperation::None.code(), Ordering::Release);
        self.progress.store(0.0_f32.to_bits(), Ordering::Release);
        self.locked.store(false, Ordering::Release);
    }
}
