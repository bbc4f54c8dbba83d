//! Process-wide switches and per-call sweep configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Environment variable that disables progress reporting when set to
/// `1`, `true` or `yes`.
pub const PROGRESS_DISABLED_ENV: &str = "GRIDSWEEP_PROGRESS_DISABLED";

static PROGRESS_DISABLED: OnceLock<AtomicBool> = OnceLock::new();

fn progress_flag() -> &'static AtomicBool {
    PROGRESS_DISABLED.get_or_init(|| AtomicBool::new(env_flag(PROGRESS_DISABLED_ENV)))
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            )
        })
        .unwrap_or(false)
}

/// Returns `true` when progress reporting is disabled for the whole process.
pub fn progress_disabled() -> bool {
    progress_flag().load(Ordering::Relaxed)
}

/// Enables or disables progress reporting for the whole process.
pub fn set_progress_disabled(disabled: bool) {
    progress_flag().store(disabled, Ordering::Relaxed);
}

/// Per-call configuration of a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Human readable label used in progress output.
    #[serde(default)]
    pub label: String,
    /// Report progress for this call (still subject to the process-wide switch).
    #[serde(default = "SweepConfig::default_progress")]
    pub progress: bool,
}

impl SweepConfig {
    const fn default_progress() -> bool {
        true
    }

    /// Configuration with the given progress label.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Whether progress is reported once the process-wide switch is applied.
    pub fn reports_progress(&self) -> bool {
        self.progress && !progress_disabled()
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            progress: Self::default_progress(),
        }
    }
}
