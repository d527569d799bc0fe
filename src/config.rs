//! Calibration constants for timeline resolution.
//!
//! The stored title font size is a relative value whose pixel mapping was derived empirically
//! (a factor of roughly 60 to 64). All such constants live here so they can be tuned without
//! touching the track builders.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{WlmpError, WlmpResult};

/// Tunables applied while building tracks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOpts {
    /// Relative title font size to pixels.
    pub font_size_scale: f64,
    /// Title outline pixels per `outlineSizeIndex` step.
    pub outline_px_per_step: u32,
    /// Fade in/out applied to non-scrolling titles, in seconds.
    pub title_fade_secs: f64,
    /// Extra height added to a scrolling title's canvas.
    pub scroll_margin_px: f64,
    /// Sample rate of the silent audio attached to color clips.
    pub silent_audio_sample_rate: u32,
}

impl Default for ResolveOpts {
    fn default() -> Self {
        Self {
            font_size_scale: 60.0,
            outline_px_per_step: 4,
            title_fade_secs: 1.5,
            scroll_margin_px: 50.0,
            silent_audio_sample_rate: 44_100,
        }
    }
}

impl ResolveOpts {
    /// Parse options from JSON; omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> WlmpResult<Self> {
        let opts: Self = serde_json::from_str(json).context("parse resolve options JSON")?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: &Path) -> WlmpResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read resolve options '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> WlmpResult<()> {
        let invalid = |msg: &str| Err(WlmpError::Other(anyhow::anyhow!("resolve options: {msg}")));
        if !(self.font_size_scale.is_finite() && self.font_size_scale > 0.0) {
            return invalid("font_size_scale must be > 0");
        }
        if !(self.title_fade_secs.is_finite() && self.title_fade_secs >= 0.0) {
            return invalid("title_fade_secs must be >= 0");
        }
        if !(self.scroll_margin_px.is_finite() && self.scroll_margin_px >= 0.0) {
            return invalid("scroll_margin_px must be >= 0");
        }
        if self.silent_audio_sample_rate == 0 {
            return invalid("silent_audio_sample_rate must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
