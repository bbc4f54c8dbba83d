//! Error types for grid construction, reduction and result reshaping.
//!
//! Every failure carries an [`ErrorInfo`] with a stable code (for example
//! `fixed-index-out-of-range` or `grid-too-large`) and the offending axis,
//! index or count as context.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and context describing one grid failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable code, e.g. `fixed-axis-unknown`.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
    /// Axis names, indices and counts involved in the failure.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How the caller can fix the input, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key=value`; numbers and names are stored in their display form.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Context entry recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " | context: [{key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("]")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure raised while building, reducing or reshaping a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GridError {
    /// A pinned axis, pinned index or grid index lies outside the space.
    #[error("out of range: {0}")]
    OutOfRange(ErrorInfo),
    /// Collected results do not fill the reduced grid exactly.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(ErrorInfo),
    /// Invalid axis, plan or grid definition.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// JSON or YAML encoding failure.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl GridError {
    /// Payload shared by every family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GridError::OutOfRange(info)
            | GridError::ShapeMismatch(info)
            | GridError::Config(info)
            | GridError::Serde(info) => info,
        }
    }

    /// Shorthand for `self.info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// `false` only for shape mismatches, which signal a broken
    /// iteration/collection pairing rather than bad input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GridError::ShapeMismatch(_))
    }
}
