use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use gridsweep_exec::{
    stable_hash_string, to_canonical_json_bytes, ResultArray, SweepConfig, SweepExecutor,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::load_plan;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML or JSON sweep plan.
    #[arg(long)]
    pub plan: PathBuf,
    /// Observable evaluated at every grid point.
    #[arg(long = "eval", value_enum, default_value_t = Evaluator::Sum)]
    pub evaluator: Evaluator,
    /// Multiplier applied to every evaluated value.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
    /// Output directory for `result.json` and `report.json`.
    #[arg(long)]
    pub out: PathBuf,
    /// Progress label; defaults to the plan label.
    #[arg(long)]
    pub label: Option<String>,
    /// Suppress progress output for this run.
    #[arg(long)]
    pub no_progress: bool,
}

/// Built-in observables over the physical values of a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluator {
    Sum,
    Product,
    Norm,
    /// Value of the first axis.
    First,
    /// First value divided by the second.
    Ratio,
}

#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    pub scale: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("{evaluator} needs {needed} or more axes, found {found}")]
    MissingAxis {
        evaluator: &'static str,
        needed: usize,
        found: usize,
    },
    #[error("ratio undefined for zero denominator")]
    ZeroDenominator,
}

impl Evaluator {
    fn evaluate(self, values: &[f64], options: &EvalOptions) -> Result<f64, EvalError> {
        let raw: f64 = match self {
            Evaluator::Sum => values.iter().sum(),
            Evaluator::Product => values.iter().product(),
            Evaluator::Norm => values.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Evaluator::First => match values {
                [first, ..] => *first,
                [] => return Err(missing_axis("first", 1, values)),
            },
            Evaluator::Ratio => match values {
                [_, denominator, ..] if *denominator == 0.0 => {
                    return Err(EvalError::ZeroDenominator)
                }
                [numerator, denominator, ..] => numerator / denominator,
                _ => return Err(missing_axis("ratio", 2, values)),
            },
        };
        Ok(raw * options.scale)
    }
}

fn missing_axis(evaluator: &'static str, needed: usize, values: &[f64]) -> EvalError {
    EvalError::MissingAxis {
        evaluator,
        needed,
        found: values.len(),
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    label: String,
    evaluator: Evaluator,
    shape: Vec<usize>,
    total: usize,
    result_hash: String,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let plan = load_plan(&args.plan)?;
    let space = plan.space()?;
    let fixed = plan.fixed_indices(&space)?;
    let config = SweepConfig {
        label: args
            .label
            .clone()
            .or_else(|| plan.label.clone())
            .unwrap_or_default(),
        progress: !args.no_progress && plan.progress.unwrap_or(true),
    };
    let options = EvalOptions { scale: args.scale };

    let result = SweepExecutor::new(config.clone()).execute(
        &args.evaluator,
        &space,
        &fixed,
        &options,
        |evaluator, point, options| evaluator.evaluate(point.values, options),
    )?;

    let report = RunReport {
        label: config.label,
        evaluator: args.evaluator,
        shape: result.shape().to_vec(),
        total: result.len(),
        result_hash: stable_hash_string(&result)?,
    };
    persist(&args.out, &result, &report)?;
    info!(
        out = %args.out.display(),
        hash = %report.result_hash,
        "sweep persisted"
    );
    Ok(())
}

fn persist(out: &Path, result: &ResultArray<f64>, report: &RunReport) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(out)?;
    fs::write(out.join("result.json"), to_canonical_json_bytes(result)?)?;
    fs::write(out.join("report.json"), to_canonical_json_bytes(report)?)?;
    Ok(())
}
