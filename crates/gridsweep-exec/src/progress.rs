//! Progress reporting for running sweeps.
//!
//! Sinks only observe; they cannot influence the order or number of
//! callback invocations.

/// Receives `completed / total` updates from a running sweep.
pub trait ProgressSink {
    /// Called once before the first grid point is evaluated.
    fn start(&mut self, label: &str, total: usize);

    /// Called after each completed grid point.
    fn advance(&mut self, completed: usize, total: usize);

    /// Called once after the last grid point completed.
    fn finish(&mut self, _completed: usize, _total: usize) {}
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn start(&mut self, label: &str, total: usize) {
        (**self).start(label, total);
    }

    fn advance(&mut self, completed: usize, total: usize) {
        (**self).advance(completed, total);
    }

    fn finish(&mut self, completed: usize, total: usize) {
        (**self).finish(completed, total);
    }
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _label: &str, _total: usize) {}

    fn advance(&mut self, _completed: usize, _total: usize) {}
}

/// Emits progress as `tracing` events under the `gridsweep_exec::progress` target.
#[derive(Debug, Clone, Default)]
pub struct TracingProgress {
    description: String,
    stride: usize,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for TracingProgress {
    fn start(&mut self, label: &str, total: usize) {
        self.description = if label.is_empty() {
            "sweeping".to_string()
        } else {
            format!("sweeping {label}")
        };
        // roughly one debug line per percent
        self.stride = (total / 100).max(1);
        tracing::debug!(total, "{}", self.description);
    }

    fn advance(&mut self, completed: usize, total: usize) {
        if completed % self.stride.max(1) == 0 || completed == total {
            tracing::debug!(completed, total, "{}", self.description);
        } else {
            tracing::trace!(completed, total, "{}", self.description);
        }
    }

    fn finish(&mut self, completed: usize, total: usize) {
        tracing::debug!(completed, total, "{} done", self.description);
    }
}

/// Records the last update; useful for callers that poll progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressCounter {
    /// Label passed to [`ProgressSink::start`].
    pub label: String,
    /// Total number of grid points announced at start.
    pub total: usize,
    /// Completed grid points so far.
    pub completed: usize,
    /// Number of `advance` calls received.
    pub updates: usize,
    /// Whether `finish` was called.
    pub finished: bool,
}

impl ProgressSink for ProgressCounter {
    fn start(&mut self, label: &str, total: usize) {
        self.label = label.to_string();
        self.total = total;
        self.completed = 0;
        self.updates = 0;
        self.finished = false;
    }

    fn advance(&mut self, completed: usize, _total: usize) {
        self.completed = completed;
        self.updates += 1;
    }

    fn finish(&mut self, completed: usize, _total: usize) {
        self.completed = completed;
        self.finished = true;
    }
}
