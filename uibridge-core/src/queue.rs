use crate::{Batch, Command};

/// What the caller must do after pushing onto a [`BatchQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Append {
    /// The queue is disposed; the command was discarded.
    Dropped,
    /// Queued behind an already requested flush, or deferred on purpose.
    Queued,
    /// First request since the last flush: schedule exactly one flush tagged
    /// with this epoch.
    ScheduleFlush(u64),
}

/// Pending commands plus the single-flight flush flag.
///
/// Pure state: it never talks to the host or the scheduler itself, it only tells
/// the dispatcher when a flush needs scheduling and hands over drained batches.
#[derive(Debug)]
pub struct BatchQueue {
    commands: Vec<Command>,
    flush_pending: bool,
    // Bumped on every flush request so stale frame callbacks can be recognised.
    epoch: u64,
    disposed: bool,
}

impl BatchQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            flush_pending: false,
            epoch: 0,
            disposed: false,
        }
    }

    /// Push `cmd` at the tail. When `request_update` is set and no flush is pending
    /// yet, marks one pending and returns the epoch to schedule it under.
    pub fn push(&mut self, cmd: Command, request_update: bool) -> Append {
        if self.disposed {
            return Append::Dropped;
        }
        self.commands.push(cmd);
        if request_update && !self.flush_pending {
            self.flush_pending = true;
            self.epoch += 1;
            Append::ScheduleFlush(self.epoch)
        } else {
            Append::Queued
        }
    }

    /// Clear the pending flag and drain every queued command, in order.
    ///
    /// The flag drops before anything is handed out, so commands appended while
    /// the returned batch is being sent request a fresh flush.
    pub fn take(&mut self) -> Batch {
        self.flush_pending = false;
        Batch(self.commands.drain(..).collect())
    }

    /// True when a frame callback scheduled under `epoch` is still the live one.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.flush_pending && self.epoch == epoch
    }

    /// Tear down: discard pending commands and refuse new ones. Returns how many
    /// commands were discarded.
    pub fn dispose(&mut self) -> usize {
        self.disposed = true;
        self.flush_pending = false;
        let dropped = self.commands.len();
        self.commands.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_flush_pending(&self) -> bool {
        self.flush_pending
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for BatchQueue {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
