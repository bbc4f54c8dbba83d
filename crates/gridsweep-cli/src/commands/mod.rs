use std::error::Error;
use std::fs;
use std::path::Path;

use gridsweep_core::SweepPlan;

pub mod inspect;
pub mod run;

fn load_plan(path: &Path) -> Result<SweepPlan, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let plan = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => SweepPlan::from_json_slice(text.as_bytes())?,
        _ => SweepPlan::from_yaml_str(&text)?,
    };
    Ok(plan)
}
