use std::cell::RefCell;
use std::convert::Infallible;

use gridsweep_exec::{
    generate, set_progress_disabled, FixedIndices, MultiIndex, ParameterAxis, ParameterSpace,
    ProgressCounter, SweepConfig, SweepExecutor,
};

fn flux_ng_space() -> ParameterSpace {
    ParameterSpace::new(vec![
        ParameterAxis::new("flux", vec![0.0, 0.5, 1.0]).unwrap(),
        ParameterAxis::new("ng", vec![10.0, 20.0, 30.0, 40.0]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn sum_over_full_grid() {
    // GRIDSWEEP_PROGRESS_DISABLED may be set by the caller's environment
    set_progress_disabled(false);
    let space = flux_ng_space();
    let mut progress = ProgressCounter::default();
    let mut executor = SweepExecutor::with_sink(SweepConfig::labelled("sum"), &mut progress);
    let result = executor
        .execute(&(), &space, &FixedIndices::new(), &(), |_, point, _| {
            Ok::<_, Infallible>(point.values[0] + point.values[1])
        })
        .unwrap();
    drop(executor);

    assert_eq!(result.shape(), &[3, 4]);
    let flux = space.axis(0).unwrap().values();
    let ng = space.axis(1).unwrap().values();
    for i in 0..3 {
        for j in 0..4 {
            assert_eq!(result.get(&[i, j]), Some(&(flux[i] + ng[j])));
        }
    }
    assert_eq!(progress.label, "sum");
    assert_eq!(progress.total, 12);
    assert_eq!(progress.completed, 12);
    assert_eq!(progress.updates, 12);
    assert!(progress.finished);
}

#[test]
fn pinned_axis_collapses_to_length_one() {
    let space = flux_ng_space();
    let fixed = FixedIndices::new().pin(0, 1);
    let calls = RefCell::new(Vec::new());
    let result = generate(&(), &space, &fixed, &(), |_, point, _| {
        calls.borrow_mut().push(point.index.clone());
        Ok::<_, Infallible>(point.values[1] - point.values[0])
    })
    .unwrap();

    assert_eq!(result.shape(), &[1, 4]);
    let calls = calls.into_inner();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|index| index[0] == 1));
    assert_eq!(result.get(&[0, 2]), Some(&29.5));
    assert_eq!(result.get_at(&MultiIndex::from([1, 2])), Some(&29.5));
    assert_eq!(result.get_at(&MultiIndex::from([0, 2])), None);

    let flux = result.axis_by_name("flux").unwrap();
    assert!(flux.pinned);
    assert_eq!(flux.offset, 1);
    assert_eq!(flux.values, vec![0.5]);
}

#[test]
fn empty_axis_short_circuits() {
    let space = ParameterSpace::new(vec![
        ParameterAxis::new("flux", vec![0.0, 1.0]).unwrap(),
        ParameterAxis::new("ng", Vec::new()).unwrap(),
    ])
    .unwrap();
    let mut progress = ProgressCounter::default();
    let mut calls = 0;
    let result = SweepExecutor::with_sink(SweepConfig::default(), &mut progress)
        .execute(&(), &space, &FixedIndices::new(), &(), |_, _, _| {
            calls += 1;
            Ok::<u8, Infallible>(0)
        })
        .unwrap();
    assert_eq!(calls, 0);
    assert_eq!(result.shape(), &[2, 0]);
    assert!(result.is_empty());
    assert_eq!(progress.total, 0);
    assert_eq!(progress.updates, 0);
}

#[test]
fn rank_zero_space_evaluates_once() {
    let result = generate(&(), &ParameterSpace::default(), &FixedIndices::new(), &(), |_, point, _| {
        assert!(point.index.is_empty());
        Ok::<_, Infallible>("scalar")
    })
    .unwrap();
    assert_eq!(result.rank(), 0);
    assert_eq!(result.len(), 1);
    assert_eq!(result.get(&[]), Some(&"scalar"));
}

struct Circuit {
    offset: f64,
}

struct Scale {
    factor: f64,
}

#[test]
fn context_and_kwargs_are_passed_through() {
    let space = flux_ng_space();
    let circuit = Circuit { offset: 100.0 };
    let scale = Scale { factor: 2.0 };
    let result = generate(&circuit, &space, &FixedIndices::new(), &scale, |ctx, point, kw| {
        Ok::<_, Infallible>(ctx.offset + kw.factor * point.values[1])
    })
    .unwrap();
    assert_eq!(result.get(&[2, 3]), Some(&180.0));
}

#[derive(Debug, Clone, PartialEq)]
enum Observable {
    Energy(f64),
    Levels(Vec<f64>),
}

#[test]
fn heterogeneous_elements_keep_grid_shape() {
    let space = flux_ng_space();
    let result = generate(&(), &space, &FixedIndices::new(), &(), |_, point, _| {
        let value = if point.linear % 2 == 0 {
            Observable::Energy(point.values[0])
        } else {
            Observable::Levels(vec![point.values[1]; point.index[1] + 1])
        };
        Ok::<_, Infallible>(value)
    })
    .unwrap();
    assert_eq!(result.shape(), &[3, 4]);
    assert_eq!(result.get(&[0, 0]), Some(&Observable::Energy(0.0)));
    assert_eq!(result.get(&[0, 3]), Some(&Observable::Levels(vec![40.0; 4])));
}

#[test]
fn indexed_iter_reports_grid_coordinates() {
    let space = flux_ng_space();
    let fixed = FixedIndices::new().pin(1, 3);
    let result = generate(&(), &space, &fixed, &(), |_, point, _| {
        Ok::<_, Infallible>(point.index.clone())
    })
    .unwrap();
    for (grid, value) in result.indexed_iter() {
        assert_eq!(&grid, value);
        assert_eq!(grid[1], 3);
    }
    let doubled = result.map(|index| index[0] * 2);
    assert_eq!(doubled.data().iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
}
