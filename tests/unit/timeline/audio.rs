use super::*;
use crate::foundation::error::WlmpError;
use crate::timeline::clip::ClipEffect;
use crate::timeline::test_support::{audio, audio_at_speed, graph, probe, project};

fn build(extents: &str, order: &[&str], video_end: f64) -> Vec<ResolvedClip> {
    build_audio_track(&graph(&project(extents, &[], order, &[])), &probe(), video_end).unwrap()
}

fn placement(clip: &ResolvedClip) -> (f64, f64, f64, f64) {
    let ClipSource::Audio { trim, .. } = &clip.source else {
        panic!("expected an audio clip");
    };
    (clip.span.start, clip.span.end, trim.start, trim.end)
}

#[test]
fn last_clip_is_cut_at_video_end() {
    // a1.mp3 plays 60 s naturally; the video is 42.5 s long.
    let clips = build(&audio("s", "3", 0.0, 0.0, 0.0, ""), &["s"], 42.5);
    assert_eq!(placement(&clips[0]), (0.0, 42.5, 0.0, 42.5));
}

#[test]
fn short_last_clip_is_left_alone() {
    let clips = build(&audio("s", "4", 0.0, 5.0, 0.0, ""), &["s"], 100.0);
    assert_eq!(placement(&clips[0]), (0.0, 25.0, 5.0, 30.0));
}

#[test]
fn earlier_clip_past_video_end_is_cut_and_later_clips_dropped() {
    // a2.mp3 alone outlasts the 5 s video.
    let extents = [
        audio("a", "4", 0.0, 0.0, 0.0, ""),
        audio("b", "3", 0.0, 0.0, 0.0, ""),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"], 5.0);
    assert_eq!(clips.len(), 1);
    assert_eq!(placement(&clips[0]), (0.0, 5.0, 0.0, 5.0));
}

#[test]
fn gap_reaching_video_end_drops_the_rest() {
    let extents = [
        audio("a", "4", 0.0, 0.0, 4.0, ""),
        audio("b", "3", 6.0, 0.0, 0.0, ""),
        audio("c", "4", 0.0, 0.0, 0.0, ""),
    ]
    .concat();
    let clips = build(&extents, &["a", "b", "c"], 10.0);
    assert_eq!(clips.len(), 1);
    assert_eq!(placement(&clips[0]), (0.0, 4.0, 0.0, 4.0));
}

#[test]
fn video_end_fit_is_measured_in_source_time() {
    // At double speed, 10 timeline seconds consume 20 source seconds.
    let clips = build(
        &audio_at_speed("s", "3", 0.0, 0.0, 0.0, 2.0, ""),
        &["s"],
        10.0,
    );
    assert_eq!(placement(&clips[0]), (0.0, 10.0, 0.0, 20.0));
}

#[test]
fn negative_gap_cut_is_measured_in_source_time() {
    let extents = [
        audio_at_speed("a", "4", 0.0, 0.0, 10.0, 2.0, ""),
        audio("b", "3", -1.0, 0.0, 4.0, ""),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"], 100.0);
    // One timeline second off `a` is two source seconds.
    assert_eq!(placement(&clips[0]), (0.0, 4.0, 0.0, 8.0));
    assert_eq!(placement(&clips[1]), (4.0, 8.0, 0.0, 4.0));
}

#[test]
fn positive_gap_delays_clip_and_counts_toward_fit() {
    let extents = [
        audio("a", "4", 0.0, 0.0, 10.0, ""),
        audio("b", "3", 2.0, 0.0, 0.0, ""),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"], 20.0);
    assert_eq!(placement(&clips[0]), (0.0, 10.0, 0.0, 10.0));
    assert_eq!(placement(&clips[1]), (12.0, 20.0, 0.0, 8.0));
}

#[test]
fn negative_gap_shortens_predecessor() {
    let extents = [
        audio("a", "4", 0.0, 0.0, 10.0, ""),
        audio("b", "3", -1.5, 0.0, 4.0, ""),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"], 100.0);
    assert_eq!(placement(&clips[0]), (0.0, 8.5, 0.0, 8.5));
    // The overlap is consumed from `a`; `b` still starts where `a` now ends.
    assert_eq!(placement(&clips[1]), (8.5, 12.5, 0.0, 4.0));
}

#[test]
fn negative_gap_on_first_clip_is_ignored() {
    let clips = build(&audio("a", "4", -3.0, 0.0, 5.0, ""), &["a"], 100.0);
    assert_eq!(placement(&clips[0]), (0.0, 5.0, 0.0, 5.0));
}

#[test]
fn without_video_the_soundtrack_is_dropped() {
    let clips = build(&audio("a", "4", 0.0, 0.0, 5.0, ""), &["a"], 0.0);
    assert!(clips.is_empty());
}

#[test]
fn volume_and_fades_carry_over() {
    let body = r#"<Effects>
        <AudioEffect effectTemplateID="AudioFadeEffectTemplate">
          <BoundProperties>
            <BoundPropertyFloat Name="AudioFadeInDuration" Value="1" />
            <BoundPropertyFloat Name="AudioFadeOutDuration" Value="2" />
          </BoundProperties>
        </AudioEffect>
      </Effects>
      <BoundProperties><BoundPropertyFloat Name="Volume" Value="0.25" /></BoundProperties>"#;
    let clips = build(&audio("a", "4", 0.0, 0.0, 0.0, body), &["a"], 10.0);
    let ClipSource::Audio { volume, .. } = &clips[0].source else {
        panic!("expected an audio clip");
    };
    assert_eq!(*volume, 0.25);
    assert_eq!(
        clips[0].effects,
        vec![
            ClipEffect::AudioFadeIn { secs: 1.0 },
            ClipEffect::AudioFadeOut { secs: 2.0 }
        ]
    );
}

#[test]
fn missing_media_file_is_fatal() {
    let xml = project(&audio("a", "9", 0.0, 0.0, 0.0, ""), &[], &["a"], &[]);
    let err = build_audio_track(&graph(&xml), &probe(), 10.0).unwrap_err();
    assert!(matches!(err, WlmpError::MediaFileMissing { .. }));
}
