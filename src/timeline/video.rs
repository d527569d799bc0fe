use crate::assets::media::{MediaInfo, MediaProbe};
use crate::config::ResolveOpts;
use crate::foundation::core::{Canvas, OutputParams, TimeSpan};
use crate::foundation::error::{WlmpError, WlmpResult};
use crate::resolve::extents::{ColorExtent, VideoExtent};
use crate::resolve::graph::{MainEntry, ProjectGraph};
use crate::timeline::clip::{
    ClipEffect, ClipSource, ResolvedClip, SourceTrim, probe_media, push_audio_fades, push_clip,
};

/// Built main track.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoTrack {
    /// Color and video clips in document order.
    pub clips: Vec<ResolvedClip>,
    /// End of the main track in seconds; the soundtrack is fitted to it.
    pub total_duration: f64,
}

/// Place every main-track entry on the timeline.
///
/// Clips follow each other back to back. A video clip with a crossfade starts that many seconds
/// before the previous clip ends, so the running end advances by `duration - crossfade`.
#[tracing::instrument(skip_all)]
pub fn build_video_track(
    graph: &ProjectGraph,
    probe: &dyn MediaProbe,
    output: OutputParams,
    opts: &ResolveOpts,
) -> WlmpResult<VideoTrack> {
    let mut track = VideoTrack::default();
    let mut prev_end = 0.0_f64;

    for entry in graph.main_track() {
        match *entry {
            MainEntry::Color(idx) => {
                let c = graph.color(idx);
                let span = TimeSpan::at(prev_end, c.duration);
                prev_end += c.duration;
                push_clip(&mut track.clips, color_clip(c, span, output, opts));
            }
            MainEntry::Video(idx) => {
                let v = graph.video(idx);
                let (item, info) = probe_media(graph, v.media, probe)?;

                let trim = SourceTrim {
                    start: v.in_time,
                    end: v.out_time.unwrap_or(info.duration_secs),
                };
                let duration = trim.timeline_duration(v.speed);
                if duration <= 0.0 {
                    tracing::warn!(extent = %v.extent_id, "video clip has no duration; dropped");
                    continue;
                }
                // A crossfade needs something to blend with, so it never reaches before 0.
                let crossfade = v
                    .transition
                    .filter(|c| *c > 0.0)
                    .unwrap_or(0.0)
                    .min(prev_end);

                let start = prev_end - crossfade;
                prev_end += duration - crossfade;

                let mut effects = Vec::new();
                if crossfade > 0.0 {
                    effects.push(ClipEffect::CrossFadeIn { secs: crossfade });
                }
                push_audio_fades(&mut effects, v.audio_fade.fade_in, v.audio_fade.fade_out);

                let clip = ResolvedClip {
                    extent_id: v.extent_id.clone(),
                    span: TimeSpan::at(start, duration),
                    source: ClipSource::Video {
                        media_id: item.id.clone(),
                        path: item.file_path.clone(),
                        trim,
                        speed: v.speed,
                        volume: v.effective_volume(),
                        rotation_deg: u16::from(v.rotate_steps) * 90,
                        size: fit_width(v, &info, output)?,
                    },
                    effects,
                };
                push_clip(&mut track.clips, clip);
            }
        }
    }

    track.total_duration = prev_end.max(0.0);
    tracing::info!(
        clips = track.clips.len(),
        total_duration = track.total_duration,
        "video track built"
    );
    Ok(track)
}

fn color_clip(
    c: &ColorExtent,
    span: TimeSpan,
    output: OutputParams,
    opts: &ResolveOpts,
) -> ResolvedClip {
    ResolvedClip {
        extent_id: c.extent_id.clone(),
        span,
        source: ClipSource::Color {
            color: c.color,
            size: output.canvas,
            silent_audio_rate: opts.silent_audio_sample_rate,
        },
        effects: Vec::new(),
    }
}

/// Output size of a video frame: rotate, then scale to the output width keeping aspect.
fn fit_width(v: &VideoExtent, info: &MediaInfo, output: OutputParams) -> WlmpResult<Canvas> {
    if !info.has_video || info.width == 0 || info.height == 0 {
        return Err(WlmpError::probe(format!(
            "VideoClip '{}' source has no usable video stream ({}x{})",
            v.extent_id, info.width, info.height
        )));
    }
    let (w, h) = if v.rotate_steps % 2 == 1 {
        (info.height, info.width)
    } else {
        (info.width, info.height)
    };
    let height = (f64::from(h) * output.width_f64() / f64::from(w))
        .round()
        .max(1.0);
    Ok(Canvas {
        width: output.canvas.width,
        height: height.min(f64::from(u32::MAX)) as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/video.rs"]
mod tests;
