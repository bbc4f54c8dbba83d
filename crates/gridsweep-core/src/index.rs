use std::fmt::{self, Display};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Grid coordinates, one index per surviving axis, in axis order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiIndex(Box<[usize]>);

impl MultiIndex {
    /// Creates a multi-index from its components.
    pub fn new(indices: impl Into<Box<[usize]>>) -> Self {
        Self(indices.into())
    }

    /// Index components in axis order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Consumes the index and returns its components.
    pub fn into_vec(self) -> Vec<usize> {
        self.0.into_vec()
    }
}

impl Deref for MultiIndex {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<usize>> for MultiIndex {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices.into_boxed_slice())
    }
}

impl From<&[usize]> for MultiIndex {
    fn from(indices: &[usize]) -> Self {
        Self(indices.into())
    }
}

impl<const N: usize> From<[usize; N]> for MultiIndex {
    fn from(indices: [usize; N]) -> Self {
        Self(Box::new(indices))
    }
}

impl Display for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (pos, index) in self.0.iter().enumerate() {
            if pos > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, ")")
    }
}
