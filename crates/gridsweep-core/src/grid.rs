//! Grid reduction and row-major enumeration of the reduced grid.
//!
//! A reduced space keeps the grid coordinates of the full space: an axis
//! collapsed to its pinned index `i` enumerates the range `i..i + 1`, so a
//! callback always sees full-space indices while the output array shape
//! only counts surviving values. [`ReducedParameterSpace::storage_index`]
//! translates grid coordinates into zero-based array coordinates.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::axis::ParameterSpace;
use crate::errors::{ErrorInfo, GridError};
use crate::fixed::FixedIndices;
use crate::index::MultiIndex;

/// One axis that survives reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReducedAxisRepr")]
pub struct ReducedAxis {
    position: usize,
    name: String,
    range: Range<usize>,
    pinned: bool,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct ReducedAxisRepr {
    position: usize,
    name: String,
    range: Range<usize>,
    pinned: bool,
    values: Vec<f64>,
}

impl TryFrom<ReducedAxisRepr> for ReducedAxis {
    type Error = GridError;

    fn try_from(repr: ReducedAxisRepr) -> Result<Self, Self::Error> {
        let ReducedAxisRepr {
            position,
            name,
            range,
            pinned,
            values,
        } = repr;
        let consistent = range.start <= range.end
            && range.end <= values.len()
            && (!pinned || range.len() == 1);
        if !consistent {
            return Err(GridError::Config(
                ErrorInfo::new("reduced-axis-range", "reduced axis range outside its values")
                    .with_context("axis", &name)
                    .with_context("start", range.start)
                    .with_context("end", range.end)
                    .with_context("values", values.len())
                    .with_context("pinned", pinned),
            ));
        }
        Ok(Self {
            position,
            name,
            range,
            pinned,
            values,
        })
    }
}

impl ReducedAxis {
    /// Position of the axis in the full space.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid indices enumerated along this axis.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Whether the axis was collapsed to a single pinned index.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Number of grid points along the axis after reduction.
    pub fn count(&self) -> usize {
        self.range.len()
    }

    /// Physical values enumerated along the axis, in order.
    pub fn values(&self) -> &[f64] {
        self.values.get(self.range.clone()).unwrap_or(&[])
    }

    /// Physical value at grid index `index` (full-space coordinates).
    pub fn value(&self, index: usize) -> Option<f64> {
        if self.range.contains(&index) {
            self.values.get(index).copied()
        } else {
            None
        }
    }
}

/// Axis removed from the reduced space because it was pinned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedAxis {
    /// Position of the axis in the full space.
    pub position: usize,
    /// Axis name.
    pub name: String,
    /// Pinned index.
    pub index: usize,
    /// Physical value at the pinned index.
    pub value: f64,
}

/// Coordinate space that remains after pinning a subset of axes.
///
/// The number of grid points always fits in `usize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReducedSpaceRepr")]
pub struct ReducedParameterSpace {
    axes: Vec<ReducedAxis>,
    dropped: Vec<DroppedAxis>,
}

#[derive(Deserialize)]
struct ReducedSpaceRepr {
    axes: Vec<ReducedAxis>,
    dropped: Vec<DroppedAxis>,
}

impl TryFrom<ReducedSpaceRepr> for ReducedParameterSpace {
    type Error = GridError;

    fn try_from(repr: ReducedSpaceRepr) -> Result<Self, Self::Error> {
        checked_total(&repr.axes)?;
        Ok(Self {
            axes: repr.axes,
            dropped: repr.dropped,
        })
    }
}

/// Reduces `space` by the axes pinned in `fixed`.
///
/// Pinned axes are removed when `remove_fixed` is set, otherwise they are
/// kept at their position as length-1 axes. All pinned entries are
/// validated before anything is built. A grid whose point count does not
/// fit in `usize` is rejected with a `grid-too-large` config error.
pub fn reduce(
    space: &ParameterSpace,
    fixed: &FixedIndices,
    remove_fixed: bool,
) -> Result<ReducedParameterSpace, GridError> {
    let mut pinned = vec![None; space.len()];
    for (position, index) in fixed.iter() {
        let axis = space.axis(position).ok_or_else(|| {
            GridError::OutOfRange(
                ErrorInfo::new("fixed-axis-unknown", "fixed axis is not part of the space")
                    .with_context("axis", position)
                    .with_context("rank", space.len()),
            )
        })?;
        let valid = usize::try_from(index)
            .ok()
            .filter(|&index| index < axis.count());
        match valid {
            Some(index) => pinned[position] = Some(index),
            None => {
                return Err(GridError::OutOfRange(
                    ErrorInfo::new("fixed-index-out-of-range", "fixed index outside axis range")
                        .with_context("axis", axis.name())
                        .with_context("index", index)
                        .with_context("count", axis.count())
                        .with_hint("fixed indices must satisfy 0 <= index < count"),
                ))
            }
        }
    }

    let mut axes = Vec::with_capacity(space.len());
    let mut dropped = Vec::new();
    for (position, axis) in space.axes().iter().enumerate() {
        match pinned[position] {
            Some(index) if remove_fixed => dropped.push(DroppedAxis {
                position,
                name: axis.name().to_string(),
                index,
                value: axis.values()[index],
            }),
            Some(index) => axes.push(ReducedAxis {
                position,
                name: axis.name().to_string(),
                range: index..index + 1,
                pinned: true,
                values: axis.values().to_vec(),
            }),
            None => axes.push(ReducedAxis {
                position,
                name: axis.name().to_string(),
                range: axis.range(),
                pinned: false,
                values: axis.values().to_vec(),
            }),
        }
    }
    checked_total(&axes)?;
    Ok(ReducedParameterSpace { axes, dropped })
}

// Product of `counts`, which must not overflow unless a count is zero.
fn grid_len(counts: impl Iterator<Item = usize> + Clone) -> usize {
    if counts.clone().any(|count| count == 0) {
        0
    } else {
        counts.product()
    }
}

// Bounded by `isize::MAX` over the non-empty axes, like an ndarray shape.
fn checked_total(axes: &[ReducedAxis]) -> Result<usize, GridError> {
    let extent = axes
        .iter()
        .map(ReducedAxis::count)
        .filter(|&count| count > 0)
        .try_fold(1usize, |total, count| total.checked_mul(count))
        .filter(|&total| isize::try_from(total).is_ok());
    match extent {
        Some(_) => Ok(grid_len(axes.iter().map(ReducedAxis::count))),
        None => {
            let counts: Vec<String> = axes.iter().map(|axis| axis.count().to_string()).collect();
            Err(GridError::Config(
                ErrorInfo::new("grid-too-large", "reduced grid shape is too large to store")
                    .with_context("counts", counts.join("x"))
                    .with_hint("pin more axes or use fewer values per axis"),
            ))
        }
    }
}

impl ReducedParameterSpace {
    /// Surviving axes in order.
    pub fn axes(&self) -> &[ReducedAxis] {
        &self.axes
    }

    /// Axes removed by reduction, ordered by original position.
    pub fn dropped(&self) -> &[DroppedAxis] {
        &self.dropped
    }

    /// Rank of the reduced grid.
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Ordered per-axis sizes; this is the output array shape.
    pub fn counts(&self) -> Vec<usize> {
        self.axes.iter().map(ReducedAxis::count).collect()
    }

    /// Ordered per-axis grid index ranges.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.axes.iter().map(|axis| axis.range.clone()).collect()
    }

    /// Number of grid points; 1 for a rank-0 space, 0 if any axis is empty.
    pub fn total_count(&self) -> usize {
        grid_len(self.axes.iter().map(ReducedAxis::count))
    }

    /// Physical values at grid point `index`.
    pub fn values(&self, index: &MultiIndex) -> Result<Vec<f64>, GridError> {
        self.check_rank(index)?;
        self.axes
            .iter()
            .zip(index.iter())
            .map(|(axis, &i)| axis.value(i).ok_or_else(|| out_of_grid(axis, i)))
            .collect()
    }

    /// Converts grid coordinates into zero-based array coordinates.
    pub fn storage_index(&self, index: &MultiIndex) -> Result<MultiIndex, GridError> {
        self.check_rank(index)?;
        self.axes
            .iter()
            .zip(index.iter())
            .map(|(axis, &i)| {
                if axis.range.contains(&i) {
                    Ok(i - axis.range.start)
                } else {
                    Err(out_of_grid(axis, i))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(MultiIndex::from)
    }

    /// Row-major position of grid point `index`.
    pub fn linear_index(&self, index: &MultiIndex) -> Result<usize, GridError> {
        let storage = self.storage_index(index)?;
        Ok(storage
            .iter()
            .zip(self.axes.iter())
            .fold(0, |acc, (&i, axis)| acc * axis.count() + i))
    }

    /// Grid point at row-major position `linear`.
    pub fn multi_index(&self, linear: usize) -> Option<MultiIndex> {
        if linear >= self.total_count() {
            return None;
        }
        let mut rest = linear;
        let mut indices = vec![0; self.axes.len()];
        for (slot, axis) in indices.iter_mut().zip(self.axes.iter()).rev() {
            *slot = axis.range.start + rest % axis.count();
            rest /= axis.count();
        }
        Some(MultiIndex::from(indices))
    }

    /// Enumerates grid points in row-major order (last axis fastest).
    pub fn iter(&self) -> GridIter {
        GridIter::new(self.ranges())
    }

    fn check_rank(&self, index: &MultiIndex) -> Result<(), GridError> {
        if index.len() == self.axes.len() {
            Ok(())
        } else {
            Err(GridError::OutOfRange(
                ErrorInfo::new("grid-index-rank", "grid index rank does not match space")
                    .with_context("expected", self.axes.len())
                    .with_context("actual", index.len()),
            ))
        }
    }
}

fn out_of_grid(axis: &ReducedAxis, index: usize) -> GridError {
    GridError::OutOfRange(
        ErrorInfo::new("grid-index-out-of-range", "grid index outside reduced axis")
            .with_context("axis", &axis.name)
            .with_context("index", index)
            .with_context("start", axis.range.start)
            .with_context("end", axis.range.end),
    )
}

/// Row-major Cartesian product over a list of index ranges.
#[derive(Debug, Clone)]
pub struct GridIter {
    ranges: Vec<Range<usize>>,
    current: Vec<usize>,
    remaining: usize,
}

impl GridIter {
    /// Iterator over the product of `ranges`; their total length must fit in `usize`.
    pub(crate) fn new(ranges: Vec<Range<usize>>) -> Self {
        let remaining = grid_len(ranges.iter().map(|range| range.len()));
        let current = ranges.iter().map(|range| range.start).collect();
        Self {
            ranges,
            current,
            remaining,
        }
    }
}

impl Iterator for GridIter {
    type Item = MultiIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = MultiIndex::from(self.current.as_slice());
        self.remaining -= 1;
        for (slot, range) in self.current.iter_mut().zip(self.ranges.iter()).rev() {
            *slot += 1;
            if *slot < range.end {
                break;
            }
            *slot = range.start;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridIter {}

impl<'a> IntoIterator for &'a ReducedParameterSpace {
    type Item = MultiIndex;
    type IntoIter = GridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
