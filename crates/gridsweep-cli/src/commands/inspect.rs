use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gridsweep_core::{reduce, ReducedParameterSpace};
use gridsweep_exec::to_canonical_json_bytes;
use serde::Serialize;

use super::load_plan;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// YAML or JSON sweep plan.
    #[arg(long)]
    pub plan: PathBuf,
    /// Drop pinned axes instead of keeping them as length-1 dimensions.
    #[arg(long)]
    pub remove_fixed: bool,
}

#[derive(Debug, Serialize)]
struct GridSummary<'a> {
    counts: Vec<usize>,
    total: usize,
    grid: &'a ReducedParameterSpace,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let plan = load_plan(&args.plan)?;
    let space = plan.space()?;
    let fixed = plan.fixed_indices(&space)?;
    let reduced = reduce(&space, &fixed, args.remove_fixed)?;
    let summary = GridSummary {
        counts: reduced.counts(),
        total: reduced.total_count(),
        grid: &reduced,
    };
    let json = to_canonical_json_bytes(&summary)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
