use super::*;
use crate::assets::text::LineMetricsMeasure;
use crate::foundation::core::Rgb8;
use crate::resolve::extents::TextAlign;
use crate::timeline::test_support::{graph, project, title};

const FADE_ZOOM: &str = "TextEffectFadeZoomTemplate";
const SCROLL: &str = "TextEffectScrollTemplate";

fn build(extents: &str, order: &[&str]) -> Vec<ResolvedClip> {
    build_title_track(
        &graph(&project(extents, &[], &[], order)),
        &LineMetricsMeasure { line_height: 1.0 },
        OutputParams::new(1920, 1080, 30).unwrap(),
        &ResolveOpts::default(),
    )
    .unwrap()
}

fn spans(clips: &[ResolvedClip]) -> Vec<(f64, f64)> {
    clips.iter().map(|c| (c.span.start, c.span.end)).collect()
}

#[test]
fn negative_gap_on_second_title_shortens_first() {
    let extents = [
        title("a", 0.0, 5.0, FADE_ZOOM, &["one"]),
        title("b", -1.0, 3.0, FADE_ZOOM, &["two"]),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"]);
    assert_eq!(spans(&clips), vec![(0.0, 4.0), (4.0, 7.0)]);
}

#[test]
fn positive_gaps_accumulate() {
    let extents = [
        title("a", 1.0, 2.0, FADE_ZOOM, &["one"]),
        title("b", 0.5, 2.0, FADE_ZOOM, &["two"]),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"]);
    assert_eq!(spans(&clips), vec![(1.0, 3.0), (3.5, 5.5)]);
}

#[test]
fn static_title_fades_and_uses_pixel_style() {
    let clips = build(&title("a", 0.0, 4.0, FADE_ZOOM, &["Hello", "World"]), &["a"]);
    assert_eq!(
        clips[0].effects,
        vec![
            ClipEffect::FadeIn { secs: 1.5 },
            ClipEffect::FadeOut { secs: 1.5 }
        ]
    );
    let ClipSource::Title {
        text,
        style,
        canvas,
        motion,
    } = &clips[0].source
    else {
        panic!("expected a title clip");
    };
    assert_eq!(text, "Hello\nWorld");
    assert_eq!(style.font_family, "Segoe UI");
    assert_eq!(style.font_px, 60);
    assert_eq!(style.outline_px, 8);
    assert_eq!(style.align, TextAlign::Right);
    assert_eq!(style.color, Rgb8 { r: 255, g: 255, b: 255 });
    assert_eq!((canvas.width, canvas.height), (1920, 1080));
    assert_eq!(*motion, TitleMotion::Static);
}

#[test]
fn scrolling_title_crosses_frame_in_its_duration() {
    let clips = build(&title("s", 0.0, 10.0, SCROLL, &["a", "b", "c"]), &["s"]);
    assert!(clips[0].effects.is_empty());
    let ClipSource::Title { canvas, motion, .. } = &clips[0].source else {
        panic!("expected a title clip");
    };
    // Three 60 px lines, an 8 px outline on each edge, plus the 50 px margin.
    assert_eq!(canvas.height, 180 + 16 + 50);
    let TitleMotion::Scroll { start_y, speed } = *motion else {
        panic!("expected scrolling motion");
    };
    assert_eq!(start_y, 1080.0);
    assert!((speed - (246.0 + 1080.0) / 10.0).abs() < 1e-9);

    // At the end the canvas has left the top of the frame entirely.
    let end = motion.position_at(10.0).unwrap();
    assert!((end.y + f64::from(canvas.height)).abs() < 1e-9);
}

#[test]
fn configured_scale_changes_font_size() {
    let opts = ResolveOpts {
        font_size_scale: 64.0,
        title_fade_secs: 0.0,
        ..ResolveOpts::default()
    };
    let clips = build_title_track(
        &graph(&project(&title("a", 0.0, 2.0, FADE_ZOOM, &["x"]), &[], &[], &["a"])),
        &LineMetricsMeasure::default(),
        OutputParams::default(),
        &opts,
    )
    .unwrap();
    let ClipSource::Title { style, .. } = &clips[0].source else {
        panic!("expected a title clip");
    };
    assert_eq!(style.font_px, 64);
    assert!(clips[0].effects.is_empty());
}

#[test]
fn title_consumed_by_overlap_is_dropped() {
    let extents = [
        title("a", 0.0, 1.0, FADE_ZOOM, &["one"]),
        title("b", -2.0, 3.0, FADE_ZOOM, &["two"]),
    ]
    .concat();
    let clips = build(&extents, &["a", "b"]);
    assert_eq!(spans(&clips), vec![(0.0, 3.0)]);
    assert_eq!(clips[0].extent_id, "b");
}
