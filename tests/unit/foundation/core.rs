use super::*;

#[test]
fn fps_rejects_zero_terms() {
    assert!(matches!(
        Fps::new(0, 1),
        Err(WlmpError::InvalidOutputParameters(_))
    ));
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(24, 1).unwrap().as_f64(), 24.0);
}

#[test]
fn seconds_floor_to_frames_and_never_go_negative() {
    let fps = Fps::new(25, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(1.999), 49);
    assert_eq!(fps.secs_to_frames_floor(2.0), 50);
    assert_eq!(fps.secs_to_frames_floor(-0.5), 0);
}

#[test]
fn rgb_from_unit_rounds_and_clamps() {
    assert_eq!(Rgb8::from_unit(0.0, 0.5, 1.0), Rgb8 { r: 0, g: 128, b: 255 });
    assert_eq!(Rgb8::from_unit(-0.2, 1.7, 0.2), Rgb8 { r: 0, g: 255, b: 51 });
}

#[test]
fn time_span_maps_to_frames() {
    let fps = Fps::new(30, 1).unwrap();
    let span = TimeSpan::at(1.0, 2.5);
    assert_eq!(span.end, 3.5);
    let frames = span.to_frames(fps);
    assert_eq!(frames.start, FrameIndex(30));
    assert_eq!(frames.end, FrameIndex(105));
}

#[test]
fn output_params_reject_non_positive() {
    assert!(matches!(
        OutputParams::new(0, 1080, 30),
        Err(WlmpError::InvalidOutputParameters(_))
    ));
    assert!(matches!(
        OutputParams::new(1920, -1, 30),
        Err(WlmpError::InvalidOutputParameters(_))
    ));
    assert!(matches!(
        OutputParams::new(1920, 1080, 0),
        Err(WlmpError::InvalidOutputParameters(_))
    ));
    assert!(OutputParams::new(1920, 1080, 30).is_ok());
}

#[test]
fn output_params_reject_non_numeric_text() {
    let err = OutputParams::parse("1920", "tall", "30").unwrap_err();
    assert!(err.to_string().contains("height"));
    let ok = OutputParams::parse(" 1280 ", "720", "25").unwrap();
    assert_eq!(ok.canvas, Canvas { width: 1280, height: 720 });
    assert_eq!(ok.fps, Fps { num: 25, den: 1 });
}

#[test]
fn presets_match_common_resolutions() {
    let p = OutputParams::from_preset(ResolutionPreset::TwoK, 24).unwrap();
    assert_eq!(p.canvas, Canvas { width: 2048, height: 1080 });
    assert_eq!(OutputParams::default().canvas.width, 3840);
    assert_eq!(OutputParams::default().fps.num, 30);
}
