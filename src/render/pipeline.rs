use std::path::Path;

use crate::assets::media::MediaProbe;
use crate::assets::text::{LineMetricsMeasure, TextMeasure};
use crate::config::ResolveOpts;
use crate::document::loader::{load_project, parse_project};
use crate::document::model::Document;
use crate::foundation::core::OutputParams;
use crate::foundation::error::{WlmpError, WlmpResult};
use crate::resolve::graph::ProjectGraph;
use crate::timeline::assemble::CompositionPlan;
use crate::timeline::audio::build_audio_track;
use crate::timeline::title::build_title_track;
use crate::timeline::video::build_video_track;

static DEFAULT_MEASURE: LineMetricsMeasure = LineMetricsMeasure { line_height: 1.2 };

/// External collaborators and tunables used while resolving a project.
#[derive(Clone, Copy)]
pub struct ResolveEnv<'a> {
    /// Media existence and metadata.
    pub probe: &'a dyn MediaProbe,
    /// Text height for scrolling titles.
    pub measure: &'a dyn TextMeasure,
    /// Calibration constants.
    pub opts: &'a ResolveOpts,
}

impl<'a> ResolveEnv<'a> {
    /// Environment with line-metrics text measurement.
    pub fn new(probe: &'a dyn MediaProbe, opts: &'a ResolveOpts) -> Self {
        Self {
            probe,
            measure: &DEFAULT_MEASURE,
            opts,
        }
    }

    /// Replace the text measurer.
    pub fn with_measure(mut self, measure: &'a dyn TextMeasure) -> Self {
        self.measure = measure;
        self
    }
}

/// Consumer of a resolved plan, e.g. a compositor and encoder.
pub trait RenderBackend {
    /// Produce the output file at `out` from `plan`.
    fn render(&mut self, plan: &CompositionPlan, out: &Path) -> WlmpResult<()>;
}

/// Options for [`render_project`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOpts {
    /// Replace `out` if it already exists.
    pub overwrite: bool,
}

/// Resolve an already-loaded document into a composition plan.
///
/// Pipeline:
/// 1. [`ProjectGraph::resolve`]
/// 2. video/color track, whose end bounds the soundtrack
/// 3. soundtrack and titles
/// 4. [`CompositionPlan::assemble`]
#[tracing::instrument(skip_all, fields(media = doc.media_items.len()))]
pub fn resolve_document(
    doc: &Document,
    output: OutputParams,
    env: ResolveEnv<'_>,
) -> WlmpResult<CompositionPlan> {
    let graph = ProjectGraph::resolve(doc)?;
    let video = build_video_track(&graph, env.probe, output, env.opts)?;
    let soundtrack = build_audio_track(&graph, env.probe, video.total_duration)?;
    let titles = build_title_track(&graph, env.measure, output, env.opts)?;
    Ok(CompositionPlan::assemble(output, video, soundtrack, titles))
}

/// Parse and resolve project XML.
#[tracing::instrument(skip_all)]
pub fn resolve_project_str(
    xml: &str,
    output: OutputParams,
    env: ResolveEnv<'_>,
) -> WlmpResult<CompositionPlan> {
    resolve_document(&parse_project(xml)?, output, env)
}

/// Load and resolve a project file.
#[tracing::instrument(skip(env))]
pub fn resolve_project_file(
    path: &Path,
    output: OutputParams,
    env: ResolveEnv<'_>,
) -> WlmpResult<CompositionPlan> {
    resolve_document(&load_project(path)?, output, env)
}

/// Resolve `project` and hand the plan to `backend` for writing `out`.
///
/// Output parameters are validated by construction, so the only check before any parsing is the
/// existing-output guard. Nothing reaches the backend unless resolution fully succeeds.
#[tracing::instrument(skip(env, backend))]
pub fn render_project(
    project: &Path,
    out: &Path,
    output: OutputParams,
    env: ResolveEnv<'_>,
    opts: RenderOpts,
    backend: &mut dyn RenderBackend,
) -> WlmpResult<CompositionPlan> {
    if !opts.overwrite && out.exists() {
        return Err(WlmpError::OutputExists(out.to_path_buf()));
    }

    let plan = resolve_project_file(project, output, env)?;
    backend.render(&plan, out)?;
    tracing::info!(out = %out.display(), frames = plan.total_frames(), "render finished");
    Ok(plan)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> WlmpResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
