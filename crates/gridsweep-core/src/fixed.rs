use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::axis::ParameterSpace;
use crate::errors::{ErrorInfo, GridError};

/// Axes pinned to a single index for one sweep call.
///
/// Keys are axis positions in the owning [`ParameterSpace`]. Indices are
/// signed because they arrive from external collaborators unchecked; the
/// grid reducer validates them before any evaluation takes place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedIndices(BTreeMap<usize, i64>);

impl FixedIndices {
    /// No pinned axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `axis` pinned to `index`.
    pub fn pin(mut self, axis: usize, index: i64) -> Self {
        self.0.insert(axis, index);
        self
    }

    /// Resolves axis names against `space`. Unknown names fail with
    /// [`GridError::OutOfRange`].
    pub fn from_names(
        space: &ParameterSpace,
        pinned: &BTreeMap<String, i64>,
    ) -> Result<Self, GridError> {
        let mut fixed = BTreeMap::new();
        for (name, &index) in pinned {
            let position = space.position(name).ok_or_else(|| {
                GridError::OutOfRange(
                    ErrorInfo::new("fixed-axis-unknown", "fixed axis is not part of the space")
                        .with_context("axis", name)
                        .with_hint("check the axis names declared in the sweep plan"),
                )
            })?;
            fixed.insert(position, index);
        }
        Ok(Self(fixed))
    }

    /// Pinned index for `axis`.
    pub fn get(&self, axis: usize) -> Option<i64> {
        self.0.get(&axis).copied()
    }

    /// Returns `true` when `axis` is pinned.
    pub fn is_fixed(&self, axis: usize) -> bool {
        self.0.contains_key(&axis)
    }

    /// Pinned `(axis, index)` pairs ordered by axis position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.0.iter().map(|(&axis, &index)| (axis, index))
    }

    /// Number of pinned axes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing is pinned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(usize, i64)> for FixedIndices {
    fn from_iter<I: IntoIterator<Item = (usize, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
