use std::path::PathBuf;

use crate::assets::media::{MediaInfo, MediaProbe};
use crate::assets::text::TextStyle;
use crate::document::model::MediaItem;
use crate::foundation::core::{Canvas, Fps, FrameRange, Point, Rgb8, TimeSpan};
use crate::foundation::error::{WlmpError, WlmpResult};
use crate::foundation::ids::MediaIdx;
use crate::resolve::graph::ProjectGraph;

/// Source-time window `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceTrim {
    /// First source second played.
    pub start: f64,
    /// Source second playback stops at.
    pub end: f64,
}

impl SourceTrim {
    /// Seconds of timeline this window fills when played at `speed`.
    pub fn timeline_duration(self, speed: f64) -> f64 {
        (self.end - self.start) / speed
    }
}

/// Vertical motion of a title over its own span.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TitleMotion {
    /// Centered on the output frame.
    Static,
    /// Bottom-to-top crawl: the canvas top sits at `start_y - speed * t`.
    Scroll {
        /// Canvas top at the clip start; the bottom edge of the output.
        start_y: f64,
        /// Upward speed in pixels per second.
        speed: f64,
    },
}

impl TitleMotion {
    /// Top-left canvas position at `t` seconds into the clip, or `None` for centered titles.
    pub fn position_at(self, t: f64) -> Option<Point> {
        match self {
            Self::Static => None,
            Self::Scroll { start_y, speed } => Some(Point::new(0.0, start_y - speed * t)),
        }
    }
}

/// What a clip shows or plays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClipSource {
    /// Solid background.
    Color {
        /// Fill color.
        color: Rgb8,
        /// Fill size; the whole output frame.
        size: Canvas,
        /// Sample rate of the silent audio the clip contributes to the mix.
        silent_audio_rate: u32,
    },
    /// Window of a video file, with its embedded audio.
    Video {
        /// Id of the referenced media item.
        media_id: String,
        /// File path as written in the project.
        path: PathBuf,
        /// Source window.
        trim: SourceTrim,
        /// Playback speed factor.
        speed: f64,
        /// Embedded-audio gain (0 when muted).
        volume: f64,
        /// Clockwise rotation, a multiple of 90.
        rotation_deg: u16,
        /// Frame size after rotation and resize.
        size: Canvas,
    },
    /// Window of a soundtrack file.
    Audio {
        /// Id of the referenced media item.
        media_id: String,
        /// File path as written in the project.
        path: PathBuf,
        /// Source window.
        trim: SourceTrim,
        /// Playback speed factor.
        speed: f64,
        /// Gain applied in the mix.
        volume: f64,
    },
    /// Rendered text overlay.
    Title {
        /// Lines joined with `\n`.
        text: String,
        /// Font, colors and alignment in output pixels.
        style: TextStyle,
        /// Text canvas; full frame for static titles, frame width by text height when scrolling.
        canvas: Canvas,
        /// Placement of the canvas over time.
        motion: TitleMotion,
    },
}

/// Time-based effect attached to a clip. Durations are in seconds and always positive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClipEffect {
    /// Blend in over the tail of the previous base-layer clip.
    CrossFadeIn {
        /// Overlap with the previous clip.
        secs: f64,
    },
    /// Opacity ramp from transparent at the clip start.
    FadeIn {
        /// Ramp length.
        secs: f64,
    },
    /// Opacity ramp to transparent at the clip end.
    FadeOut {
        /// Ramp length.
        secs: f64,
    },
    /// Gain ramp from silence at the clip start.
    AudioFadeIn {
        /// Ramp length.
        secs: f64,
    },
    /// Gain ramp to silence at the clip end.
    AudioFadeOut {
        /// Ramp length.
        secs: f64,
    },
}

impl ClipEffect {
    /// Return `true` for effects that act on the audio signal.
    pub fn is_audio(self) -> bool {
        matches!(self, Self::AudioFadeIn { .. } | Self::AudioFadeOut { .. })
    }
}

/// One extent placed on the global timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedClip {
    /// Extent the clip was built from.
    pub extent_id: String,
    /// Placement in output seconds.
    pub span: TimeSpan,
    /// What the clip shows or plays.
    pub source: ClipSource,
    /// Fades and transitions, in the order they were declared.
    pub effects: Vec<ClipEffect>,
}

impl ResolvedClip {
    /// Output frames covered by the clip (floor on both bounds).
    pub fn frame_range(&self, fps: Fps) -> FrameRange {
        self.span.to_frames(fps)
    }
}

/// Push the audio fades that are present and positive.
pub(crate) fn push_audio_fades(
    effects: &mut Vec<ClipEffect>,
    fade_in: Option<f64>,
    fade_out: Option<f64>,
) {
    if let Some(secs) = fade_in.filter(|s| *s > 0.0) {
        effects.push(ClipEffect::AudioFadeIn { secs });
    }
    if let Some(secs) = fade_out.filter(|s| *s > 0.0) {
        effects.push(ClipEffect::AudioFadeOut { secs });
    }
}

/// Append `clip` unless truncation left it with no duration.
pub(crate) fn push_clip(clips: &mut Vec<ResolvedClip>, clip: ResolvedClip) {
    if clip.span.duration() <= 0.0 {
        tracing::warn!(extent = %clip.extent_id, "clip has no duration; dropped");
        return;
    }
    tracing::debug!(
        extent = %clip.extent_id,
        start = clip.span.start,
        end = clip.span.end,
        "adding clip"
    );
    clips.push(clip);
}

/// Look up a media item, fail if its file is absent, then probe it.
pub(crate) fn probe_media<'g>(
    graph: &'g ProjectGraph,
    idx: MediaIdx,
    probe: &dyn MediaProbe,
) -> WlmpResult<(&'g MediaItem, MediaInfo)> {
    let item = graph.media(idx);
    if !probe.exists(&item.file_path) {
        return Err(WlmpError::MediaFileMissing {
            media_id: item.id.clone(),
            path: item.file_path.clone(),
        });
    }
    let info = probe.probe(&item.file_path)?;
    if !(info.duration_secs.is_finite() && info.duration_secs >= 0.0) {
        return Err(WlmpError::probe(format!(
            "invalid duration {} for '{}'",
            info.duration_secs,
            item.file_path.display()
        )));
    }
    Ok((item, info))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clip.rs"]
mod tests;
