use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::WlmpResult;
use crate::render::pipeline::{RenderBackend, ensure_parent_dir};
use crate::timeline::assemble::CompositionPlan;

/// Writes the plan as JSON for an out-of-process renderer.
#[derive(Clone, Copy, Debug)]
pub struct JsonPlanBackend {
    /// Indent the output.
    pub pretty: bool,
}

impl Default for JsonPlanBackend {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl RenderBackend for JsonPlanBackend {
    fn render(&mut self, plan: &CompositionPlan, out: &Path) -> WlmpResult<()> {
        ensure_parent_dir(out)?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(plan)
        } else {
            serde_json::to_vec(plan)
        }
        .context("serialize composition plan")?;
        std::fs::write(out, bytes)
            .with_context(|| format!("write plan to '{}'", out.display()))?;
        tracing::debug!(out = %out.display(), "plan written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/json.rs"]
mod tests;
