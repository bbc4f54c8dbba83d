use std::error::Error as StdError;

use gridsweep_core::{reduce, FixedIndices, MultiIndex, ParameterSpace};
use tracing::{debug, trace};

use crate::error::SweepError;
use crate::progress::{NoProgress, ProgressSink, TracingProgress};
use crate::result::ResultArray;
use crate::settings::SweepConfig;

// Larger grids grow the result buffer as points complete.
const PREALLOCATE_LIMIT: usize = 1 << 20;

/// Grid point handed to a sweep callback.
#[derive(Debug, Clone, Copy)]
pub struct GridPoint<'a> {
    /// Grid coordinates in full-space indices, one per reduced axis.
    pub index: &'a MultiIndex,
    /// Physical values at `index`, in axis order.
    pub values: &'a [f64],
    /// Row-major position of the point within the reduced grid.
    pub linear: usize,
}

/// Drives a callback over every point of a reduced grid.
pub struct SweepExecutor<'p> {
    config: SweepConfig,
    sink: Box<dyn ProgressSink + 'p>,
}

impl std::fmt::Debug for SweepExecutor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'p> SweepExecutor<'p> {
    /// Executor reporting progress through `tracing`, unless disabled.
    pub fn new(config: SweepConfig) -> Self {
        let sink: Box<dyn ProgressSink> = if config.reports_progress() {
            Box::new(TracingProgress::new())
        } else {
            Box::new(NoProgress)
        };
        Self { config, sink }
    }

    /// Executor reporting progress to `sink`.
    pub fn with_sink(config: SweepConfig, sink: impl ProgressSink + 'p) -> Self {
        Self {
            config,
            sink: Box::new(sink),
        }
    }

    /// Evaluates `func` at every grid point of `space` reduced by `fixed`.
    ///
    /// Pinned axes are kept as length-1 dimensions, so the result always has
    /// the rank of `space`. Points are visited in row-major order and each
    /// one is evaluated exactly once; the first callback error aborts the
    /// sweep and no partial result is returned.
    pub fn execute<C, K, T, E, F>(
        &mut self,
        context: &C,
        space: &ParameterSpace,
        fixed: &FixedIndices,
        kwargs: &K,
        mut func: F,
    ) -> Result<ResultArray<T>, SweepError<E>>
    where
        C: ?Sized,
        K: ?Sized,
        E: StdError + 'static,
        F: FnMut(&C, GridPoint<'_>, &K) -> Result<T, E>,
    {
        let reduced = reduce(space, fixed, false)?;
        let total = reduced.total_count();
        let label = self.config.label.as_str();
        let reporting = self.config.reports_progress();
        debug!(label, shape = ?reduced.counts(), total, "sweep started");

        if reporting {
            self.sink.start(label, total);
        }
        let mut flat = Vec::with_capacity(total.min(PREALLOCATE_LIMIT));
        for (linear, index) in reduced.iter().enumerate() {
            let values = reduced.values(&index)?;
            let point = GridPoint {
                index: &index,
                values: &values,
                linear,
            };
            match func(context, point, kwargs) {
                Ok(value) => flat.push(value),
                Err(source) => {
                    debug!(label, %index, "sweep aborted by callback error");
                    return Err(SweepError::Callback { index, source });
                }
            }
            trace!(label, %index, "grid point evaluated");
            if reporting {
                self.sink.advance(linear + 1, total);
            }
        }
        if reporting {
            self.sink.finish(flat.len(), total);
        }

        let result = ResultArray::from_flat(&reduced, flat)?;
        debug!(label, total, "sweep finished");
        Ok(result)
    }
}

/// Runs a sweep with the default configuration.
///
/// Shorthand for `SweepExecutor::new(SweepConfig::default()).execute(..)`.
pub fn generate<C, K, T, E, F>(
    context: &C,
    space: &ParameterSpace,
    fixed: &FixedIndices,
    kwargs: &K,
    func: F,
) -> Result<ResultArray<T>, SweepError<E>>
where
    C: ?Sized,
    K: ?Sized,
    E: StdError + 'static,
    F: FnMut(&C, GridPoint<'_>, &K) -> Result<T, E>,
{
    SweepExecutor::new(SweepConfig::default()).execute(context, space, fixed, kwargs, func)
}
