//! Canonical YAML encoding of a [`Plan`].
//!
//! Block style with 2-space indentation, keys in declaration order,
//! no line wrapping and no anchors or aliases. Optional keys are left
//! out rather than written as null.

use evacplan_common::{Error, Result};
use tracing::debug;

use crate::plan::Plan;

/// Serialize a plan to its canonical text.
pub fn to_yaml(plan: &Plan) -> Result<String> {
    let text = serde_yaml::to_string(plan)?;
    debug!(
        "Serialized plan: {} servers, {} VMs, {} bytes",
        plan.servers.len(),
        plan.vm_count(),
        text.len()
    );
    Ok(text)
}

/// Parse plan text produced by [`to_yaml`] (or an edited equivalent).
///
/// Missing required keys, wrong value types and unknown keys are all
/// rejected with [`Error::PlanFormat`].
pub fn from_yaml(text: &str) -> Result<Plan> {
    if text.trim().is_empty() {
        return Err(Error::PlanFormat("empty document".to_string()));
    }
    let plan: Plan = serde_yaml::from_str(text)?;
    Ok(plan)
}
