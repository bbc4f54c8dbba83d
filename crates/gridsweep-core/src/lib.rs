#![deny(missing_docs)]
#![doc = "Parameter grids, fixed-axis reduction and row-major grid enumeration."]

mod axis;
pub mod errors;
mod fixed;
mod grid;
mod index;
mod plan;

pub use axis::{ParameterAxis, ParameterSpace};
pub use errors::{ErrorInfo, GridError};
pub use fixed::FixedIndices;
pub use grid::{reduce, DroppedAxis, GridIter, ReducedAxis, ReducedParameterSpace};
pub use index::MultiIndex;
pub use plan::{AxisSpec, SweepPlan};
