//! Named parameter axes and the ordered space they span.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, GridError};
use crate::index::MultiIndex;

/// Ordered, named sequence of physical values swept along one grid dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisRepr")]
pub struct ParameterAxis {
    name: String,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct AxisRepr {
    name: String,
    values: Vec<f64>,
}

impl TryFrom<AxisRepr> for ParameterAxis {
    type Error = GridError;

    fn try_from(repr: AxisRepr) -> Result<Self, Self::Error> {
        Self::new(repr.name, repr.values)
    }
}

impl ParameterAxis {
    /// Creates an axis from explicit values. Non-finite values are rejected.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self, GridError> {
        let name = name.into();
        if let Some(pos) = values.iter().position(|value| !value.is_finite()) {
            return Err(GridError::Config(
                ErrorInfo::new("axis-non-finite", "axis values must be finite")
                    .with_context("axis", &name)
                    .with_context("index", pos),
            ));
        }
        Ok(Self { name, values })
    }

    /// Creates an axis of `count` evenly spaced values from `start` to `stop`
    /// inclusive.
    pub fn linspace(
        name: impl Into<String>,
        start: f64,
        stop: f64,
        count: usize,
    ) -> Result<Self, GridError> {
        let name = name.into();
        if !start.is_finite() || !stop.is_finite() {
            return Err(GridError::Config(
                ErrorInfo::new("axis-non-finite", "linspace bounds must be finite")
                    .with_context("axis", &name),
            ));
        }
        let values = match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        if i == count - 1 {
                            stop
                        } else {
                            start + step * i as f64
                        }
                    })
                    .collect()
            }
        };
        Ok(Self { name, values })
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical values in sweep order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values along the axis.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Physical value at `index`, if it exists.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Enumerable index range `0..count`.
    pub fn range(&self) -> Range<usize> {
        0..self.values.len()
    }
}

/// Ordered collection of axes. Axis order defines output array axis order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ParameterAxis>", into = "Vec<ParameterAxis>")]
pub struct ParameterSpace {
    axes: Vec<ParameterAxis>,
}

impl ParameterSpace {
    /// Builds a space from axes in order. Axis names must be unique.
    pub fn new(axes: Vec<ParameterAxis>) -> Result<Self, GridError> {
        let mut seen = BTreeSet::new();
        for axis in &axes {
            if !seen.insert(axis.name()) {
                return Err(GridError::Config(
                    ErrorInfo::new("axis-duplicate", "axis names must be unique")
                        .with_context("axis", axis.name()),
                ));
            }
        }
        Ok(Self { axes })
    }

    /// Axes in order.
    pub fn axes(&self) -> &[ParameterAxis] {
        &self.axes
    }

    /// Axis at `position`.
    pub fn axis(&self, position: usize) -> Option<&ParameterAxis> {
        self.axes.get(position)
    }

    /// Position of the axis called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|axis| axis.name() == name)
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Returns `true` for a rank-0 space.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Ordered per-axis counts.
    pub fn counts(&self) -> Vec<usize> {
        self.axes.iter().map(ParameterAxis::count).collect()
    }

    /// Ordered per-axis index ranges.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.axes.iter().map(ParameterAxis::range).collect()
    }

    /// Number of grid points in the full space, or `None` if it overflows `usize`.
    pub fn total_count(&self) -> Option<usize> {
        if self.axes.iter().any(|axis| axis.count() == 0) {
            return Some(0);
        }
        self.axes
            .iter()
            .try_fold(1usize, |total, axis| total.checked_mul(axis.count()))
    }

    /// Physical values at a full-rank grid index.
    pub fn values_at(&self, index: &MultiIndex) -> Result<Vec<f64>, GridError> {
        if index.len() != self.axes.len() {
            return Err(GridError::OutOfRange(
                ErrorInfo::new("grid-index-rank", "grid index rank does not match space")
                    .with_context("expected", self.axes.len())
                    .with_context("actual", index.len()),
            ));
        }
        self.axes
            .iter()
            .zip(index.iter())
            .map(|(axis, &i)| {
                axis.value(i).ok_or_else(|| {
                    GridError::OutOfRange(
                        ErrorInfo::new("grid-index-out-of-range", "grid index exceeds axis")
                            .with_context("axis", axis.name())
                            .with_context("index", i)
                            .with_context("count", axis.count()),
                    )
                })
            })
            .collect()
    }
}

impl TryFrom<Vec<ParameterAxis>> for ParameterSpace {
    type Error = GridError;

    fn try_from(axes: Vec<ParameterAxis>) -> Result<Self, Self::Error> {
        Self::new(axes)
    }
}

impl From<ParameterSpace> for Vec<ParameterAxis> {
    fn from(space: ParameterSpace) -> Self {
        space.axes
    }
}
