use std::error::Error as StdError;

use gridsweep_core::{GridError, MultiIndex};
use thiserror::Error;

/// Failure of a sweep call. No partial results are ever returned.
#[derive(Debug, Error)]
pub enum SweepError<E: StdError + 'static> {
    /// Grid reduction or reshaping failed; no callback ran for a reduction error.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The callback failed; the sweep was abandoned at `index`.
    #[error("callback failed at grid point {index}: {source}")]
    Callback {
        /// Grid point whose evaluation failed.
        index: MultiIndex,
        /// Error returned by the callback, unchanged.
        #[source]
        source: E,
    },
}

impl<E: StdError + 'static> SweepError<E> {
    /// Grid point of a callback failure.
    pub fn index(&self) -> Option<&MultiIndex> {
        match self {
            SweepError::Callback { index, .. } => Some(index),
            SweepError::Grid(_) => None,
        }
    }

    /// Grid error, if this is not a callback failure.
    pub fn grid(&self) -> Option<&GridError> {
        match self {
            SweepError::Grid(err) => Some(err),
            SweepError::Callback { .. } => None,
        }
    }

    /// Returns the callback's own error, discarding the grid point.
    pub fn into_callback(self) -> Option<E> {
        match self {
            SweepError::Callback { source, .. } => Some(source),
            SweepError::Grid(_) => None,
        }
    }
}
