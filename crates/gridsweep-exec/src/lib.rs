//! Sweep execution over reduced parameter grids.
//!
//! [`SweepExecutor::execute`] reduces a [`ParameterSpace`] by the caller's
//! [`FixedIndices`], evaluates a callback once per grid point in row-major
//! order and reshapes the results into a [`ResultArray`] whose shape is the
//! reduced grid's counts.

mod error;
mod executor;
mod json;
pub mod progress;
mod result;
pub mod settings;

pub use error::SweepError;
pub use executor::{generate, GridPoint, SweepExecutor};
pub use json::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
pub use progress::{NoProgress, ProgressCounter, ProgressSink, TracingProgress};
pub use result::{AxisSlot, ResultArray};
pub use settings::{progress_disabled, set_progress_disabled, SweepConfig};

pub use gridsweep_core::{
    reduce, FixedIndices, GridError, MultiIndex, ParameterAxis, ParameterSpace,
    ReducedParameterSpace,
};
