use gridsweep_core::{ErrorInfo, GridError, MultiIndex, ReducedParameterSpace};
use ndarray::{ArrayD, Dimension, IxDyn};
use serde::{Deserialize, Serialize};

/// Named axis attached to a [`ResultArray`] dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSlot {
    /// Axis name.
    pub name: String,
    /// Position of the axis in the full parameter space.
    pub position: usize,
    /// Grid index stored at array index 0 along this dimension.
    pub offset: usize,
    /// Whether the axis was pinned to a single index.
    pub pinned: bool,
    /// Physical values along this dimension.
    pub values: Vec<f64>,
}

/// Sweep output: one element per grid point, shaped like the reduced grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultArray<T> {
    axes: Vec<AxisSlot>,
    data: ArrayD<T>,
}

impl<T> ResultArray<T> {
    /// Reshapes a flat, row-major sequence of results into the grid shape of
    /// `reduced`. Element `k` lands at the `k`-th row-major index.
    pub fn from_flat(reduced: &ReducedParameterSpace, flat: Vec<T>) -> Result<Self, GridError> {
        let shape = reduced.counts();
        let expected = reduced.total_count();
        if flat.len() != expected {
            return Err(GridError::ShapeMismatch(
                ErrorInfo::new("result-shape", "collected results do not fill the grid")
                    .with_context("expected", expected)
                    .with_context("actual", flat.len())
                    .with_context("shape", format!("{shape:?}")),
            ));
        }
        let data = ArrayD::from_shape_vec(IxDyn(&shape), flat).map_err(|err| {
            GridError::ShapeMismatch(
                ErrorInfo::new("result-shape", err.to_string())
                    .with_context("shape", format!("{shape:?}")),
            )
        })?;
        let axes = reduced
            .axes()
            .iter()
            .map(|axis| AxisSlot {
                name: axis.name().to_string(),
                position: axis.position(),
                offset: axis.range().start,
                pinned: axis.is_pinned(),
                values: axis.values().to_vec(),
            })
            .collect();
        Ok(Self { axes, data })
    }

    /// Array shape; equals the reduced grid counts.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when any dimension has length zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at zero-based array coordinates.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.data.get(index)
    }

    /// Element at grid coordinates, i.e. the index the callback received.
    pub fn get_at(&self, grid_index: &MultiIndex) -> Option<&T> {
        let storage = self.storage_index(grid_index)?;
        self.data.get(storage.as_slice())
    }

    /// Named axes in dimension order.
    pub fn axes(&self) -> &[AxisSlot] {
        &self.axes
    }

    /// Axis slot called `name`.
    pub fn axis_by_name(&self, name: &str) -> Option<&AxisSlot> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    /// Underlying array.
    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Consumes the result and returns the underlying array.
    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }

    /// Elements with their grid coordinates, in row-major order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (MultiIndex, &T)> + '_ {
        self.data.indexed_iter().map(move |(dim, value)| {
            let grid: Vec<usize> = dim
                .slice()
                .iter()
                .zip(self.axes.iter())
                .map(|(&i, axis)| i + axis.offset)
                .collect();
            (MultiIndex::from(grid), value)
        })
    }

    /// Applies `f` to every element, keeping shape and axes.
    pub fn map<U, F>(&self, f: F) -> ResultArray<U>
    where
        F: FnMut(&T) -> U,
    {
        ResultArray {
            axes: self.axes.clone(),
            data: self.data.map(f),
        }
    }

    fn storage_index(&self, grid_index: &MultiIndex) -> Option<Vec<usize>> {
        if grid_index.len() != self.axes.len() {
            return None;
        }
        grid_index
            .iter()
            .zip(self.axes.iter())
            .map(|(&i, axis)| i.checked_sub(axis.offset))
            .collect()
    }
}
