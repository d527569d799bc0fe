use std::path::PathBuf;

use crate::foundation::core::{OutputParams, TimeSpan};
use crate::timeline::clip::{ClipEffect, ClipSource, ResolvedClip, SourceTrim};
use crate::timeline::video::VideoTrack;

/// Where a mix input's samples come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AudioSource {
    /// Generated silence at `sample_rate`.
    Silence {
        /// Samples per second.
        sample_rate: u32,
    },
    /// A window of a media file's audio stream.
    File {
        /// File path as written in the project.
        path: PathBuf,
        /// Source window.
        trim: SourceTrim,
        /// Playback speed factor.
        speed: f64,
    },
}

/// One input of the final audio mix. Inputs are summed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioMixEntry {
    /// Extent the input belongs to.
    pub extent_id: String,
    /// Placement in output seconds.
    pub span: TimeSpan,
    /// Sample source.
    pub source: AudioSource,
    /// Linear gain.
    pub volume: f64,
    /// Only audio effects (fades).
    pub effects: Vec<ClipEffect>,
}

/// Fully resolved timeline handed to a render backend.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositionPlan {
    /// Frame size and rate every layer is resolved against.
    pub output: OutputParams,
    /// Color and video clips, drawn first.
    pub video_layer: Vec<ResolvedClip>,
    /// Titles drawn over the video layer; later entries on top.
    pub title_layer: Vec<ResolvedClip>,
    /// Embedded video audio, color-clip silence and the soundtrack.
    pub audio_mix: Vec<AudioMixEntry>,
    /// End of the main track.
    pub total_video_duration: f64,
    /// Latest end over the video and title layers.
    pub duration_secs: f64,
}

impl CompositionPlan {
    /// Merge built tracks into one plan.
    pub fn assemble(
        output: OutputParams,
        video: VideoTrack,
        soundtrack: Vec<ResolvedClip>,
        titles: Vec<ResolvedClip>,
    ) -> Self {
        let mut audio_mix = Vec::with_capacity(video.clips.len() + soundtrack.len());
        audio_mix.extend(video.clips.iter().filter_map(mix_entry));
        audio_mix.extend(soundtrack.iter().filter_map(mix_entry));

        let duration_secs = video
            .clips
            .iter()
            .chain(&titles)
            .map(|c| c.span.end)
            .fold(0.0_f64, f64::max);

        let plan = Self {
            output,
            video_layer: video.clips,
            title_layer: titles,
            audio_mix,
            total_video_duration: video.total_duration,
            duration_secs,
        };
        tracing::info!(
            video = plan.video_layer.len(),
            titles = plan.title_layer.len(),
            audio = plan.audio_mix.len(),
            duration_secs = plan.duration_secs,
            "composition plan assembled"
        );
        plan
    }

    /// Number of output frames the plan covers.
    pub fn total_frames(&self) -> u64 {
        self.output.fps.secs_to_frames_floor(self.duration_secs)
    }

    /// Return `true` when nothing would be drawn or played.
    pub fn is_empty(&self) -> bool {
        self.video_layer.is_empty() && self.title_layer.is_empty() && self.audio_mix.is_empty()
    }
}

fn mix_entry(clip: &ResolvedClip) -> Option<AudioMixEntry> {
    let (source, volume) = match &clip.source {
        ClipSource::Color {
            silent_audio_rate, ..
        } => (
            AudioSource::Silence {
                sample_rate: *silent_audio_rate,
            },
            1.0,
        ),
        ClipSource::Video {
            path,
            trim,
            speed,
            volume,
            ..
        }
        | ClipSource::Audio {
            path,
            trim,
            speed,
            volume,
            ..
        } => (
            AudioSource::File {
                path: path.clone(),
                trim: *trim,
                speed: *speed,
            },
            *volume,
        ),
        ClipSource::Title { .. } => return None,
    };
    Some(AudioMixEntry {
        extent_id: clip.extent_id.clone(),
        span: clip.span,
        source,
        volume,
        effects: clip.effects.iter().copied().filter(|e| e.is_audio()).collect(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assemble.rs"]
mod tests;
