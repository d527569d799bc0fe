use crate::assets::media::MediaProbe;
use crate::foundation::core::TimeSpan;
use crate::foundation::error::WlmpResult;
use crate::resolve::graph::ProjectGraph;
use crate::timeline::clip::{
    ClipSource, ResolvedClip, SourceTrim, probe_media, push_audio_fades, push_clip,
};

/// Place every soundtrack entry on the timeline.
///
/// A positive `gapBefore` leaves silence before a clip. A negative one does not move the clip;
/// it is taken off the end of the clip before it. Every clip is cut at `total_video_duration`
/// and clips starting at or after it are not placed, so the soundtrack never outlasts the video.
#[tracing::instrument(skip(graph, probe))]
pub fn build_audio_track(
    graph: &ProjectGraph,
    probe: &dyn MediaProbe,
    total_video_duration: f64,
) -> WlmpResult<Vec<ResolvedClip>> {
    let order = graph.soundtrack();
    let mut clips = Vec::with_capacity(order.len());
    let mut prev_end = 0.0_f64;

    for (i, idx) in order.iter().enumerate() {
        let a = graph.audio(*idx);
        let gap = a.gap_before.max(0.0);
        let start = prev_end + gap;
        if start >= total_video_duration {
            tracing::debug!(
                skipped = order.len() - i,
                start,
                "soundtrack reaches video end"
            );
            break;
        }

        let (item, info) = probe_media(graph, a.media, probe)?;
        let mut trim = SourceTrim {
            start: a.in_time,
            end: a.out_time.unwrap_or(info.duration_secs),
        };

        if let Some(next) = order.get(i + 1) {
            let next_gap = graph.audio(*next).gap_before;
            if next_gap < 0.0 {
                trim.end += next_gap * a.speed;
            }
        }
        // Timeline seconds left before the video ends, in source seconds.
        let room = (total_video_duration - start) * a.speed;
        trim.end = trim.end.min(trim.start + room);

        let duration = trim.timeline_duration(a.speed);
        prev_end += duration.max(0.0) + gap;

        let mut effects = Vec::new();
        push_audio_fades(&mut effects, a.audio_fade.fade_in, a.audio_fade.fade_out);
        push_clip(
            &mut clips,
            ResolvedClip {
                extent_id: a.extent_id.clone(),
                span: TimeSpan::at(start, duration),
                source: ClipSource::Audio {
                    media_id: item.id.clone(),
                    path: item.file_path.clone(),
                    trim,
                    speed: a.speed,
                    volume: a.effective_volume(),
                },
                effects,
            },
        );
    }

    tracing::info!(clips = clips.len(), end = prev_end, "audio track built");
    Ok(clips)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/audio.rs"]
mod tests;
