use std::convert::Infallible;

use gridsweep_exec::{
    progress_disabled, set_progress_disabled, FixedIndices, ParameterAxis, ParameterSpace,
    ProgressCounter, SweepConfig, SweepExecutor,
};

fn run(config: SweepConfig, progress: &mut ProgressCounter) -> usize {
    let space = ParameterSpace::new(vec![ParameterAxis::new("x", vec![1.0, 2.0, 3.0]).unwrap()])
        .unwrap();
    let mut calls = 0;
    SweepExecutor::with_sink(config, progress)
        .execute(&(), &space, &FixedIndices::new(), &(), |_, _, _| {
            calls += 1;
            Ok::<_, Infallible>(())
        })
        .unwrap();
    calls
}

// Single test: the switch is process-wide.
#[test]
fn progress_switches_never_change_evaluation() {
    set_progress_disabled(false);
    let mut progress = ProgressCounter::default();
    assert_eq!(run(SweepConfig::labelled("levels"), &mut progress), 3);
    assert_eq!(progress.completed, 3);

    let mut silent = ProgressCounter::default();
    let config = SweepConfig {
        progress: false,
        ..SweepConfig::default()
    };
    assert_eq!(run(config, &mut silent), 3);
    assert_eq!(silent, ProgressCounter::default());

    set_progress_disabled(true);
    assert!(progress_disabled());
    let mut disabled = ProgressCounter::default();
    assert_eq!(run(SweepConfig::default(), &mut disabled), 3);
    assert_eq!(disabled, ProgressCounter::default());
    set_progress_disabled(false);
}
