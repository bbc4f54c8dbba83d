use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::axis::{ParameterAxis, ParameterSpace};
use crate::errors::{ErrorInfo, GridError};
use crate::fixed::FixedIndices;

/// Declarative description of one axis inside a [`SweepPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec {
    /// Explicit list of physical values.
    Values {
        /// Axis name.
        name: String,
        /// Values in enumeration order.
        values: Vec<f64>,
    },
    /// Evenly spaced values between two inclusive endpoints.
    Linspace {
        /// Axis name.
        name: String,
        /// First value.
        start: f64,
        /// Last value.
        stop: f64,
        /// Number of values.
        count: usize,
    },
}

impl AxisSpec {
    /// Name of the declared axis.
    pub fn name(&self) -> &str {
        match self {
            AxisSpec::Values { name, .. } | AxisSpec::Linspace { name, .. } => name,
        }
    }

    /// Materialises the axis.
    pub fn build(&self) -> Result<ParameterAxis, GridError> {
        match self {
            AxisSpec::Values { name, values } => ParameterAxis::new(name.clone(), values.clone()),
            AxisSpec::Linspace {
                name,
                start,
                stop,
                count,
            } => ParameterAxis::linspace(name.clone(), *start, *stop, *count),
        }
    }
}

/// Serializable sweep plan: axes, pinned axes and reporting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Axes in space order.
    pub axes: Vec<AxisSpec>,
    /// Axis name to pinned index.
    #[serde(default)]
    pub fixed: BTreeMap<String, i64>,
    /// Progress label for runs of this plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether runs report progress; unset means yes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
}

impl SweepPlan {
    /// Builds the parameter space declared by the plan.
    pub fn space(&self) -> Result<ParameterSpace, GridError> {
        let axes = self
            .axes
            .iter()
            .map(AxisSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        ParameterSpace::new(axes)
    }

    /// Resolves the plan's pinned axis names against `space`.
    pub fn fixed_indices(&self, space: &ParameterSpace) -> Result<FixedIndices, GridError> {
        FixedIndices::from_names(space, &self.fixed)
    }

    /// Parses a plan from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, GridError> {
        serde_yaml::from_str(text).map_err(|err| {
            GridError::Serde(ErrorInfo::new("yaml-decode", err.to_string()))
        })
    }

    /// Parses a plan from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, GridError> {
        serde_json::from_slice(data).map_err(|err| {
            GridError::Serde(ErrorInfo::new("json-decode", err.to_string()))
        })
    }
}
