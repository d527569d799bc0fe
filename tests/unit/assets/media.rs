use super::*;

#[test]
fn static_probe_reports_registered_files_only() {
    let probe = StaticProbe::new()
        .with("clips/a.mp4", MediaInfo::video(10.0, 1920, 1080))
        .with("music/b.mp3", MediaInfo::audio(95.5));

    assert!(probe.exists(Path::new("clips/a.mp4")));
    assert!(!probe.exists(Path::new("clips/missing.mp4")));

    let info = probe.probe(Path::new("clips/a.mp4")).unwrap();
    assert!(info.has_video);
    assert_eq!((info.width, info.height), (1920, 1080));

    let info = probe.probe(Path::new("music/b.mp3")).unwrap();
    assert!(!info.has_video);
    assert_eq!(info.duration_secs, 95.5);
}

#[test]
fn static_probe_unknown_path_is_probe_error() {
    let err = StaticProbe::new().probe(Path::new("nope.mp4")).unwrap_err();
    assert!(matches!(err, WlmpError::Probe(_)));
    assert!(err.to_string().contains("nope.mp4"));
}

#[test]
fn probe_works_through_a_reference() {
    let probe = StaticProbe::new().with("x.mp4", MediaInfo::video(1.0, 2, 2));
    let by_ref: &dyn MediaProbe = &probe;
    assert!(by_ref.exists(Path::new("x.mp4")));
}

#[test]
fn default_existence_check_uses_filesystem() {
    let dir = std::env::temp_dir().join("wlmp_probe_exists");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("present.bin");
    std::fs::write(&file, b"x").unwrap();

    assert!(FfprobeProbe.exists(&file));
    assert!(!FfprobeProbe.exists(&dir.join("absent.bin")));
    // A directory is not a media file.
    assert!(!FfprobeProbe.exists(&dir));
}

#[cfg(not(feature = "media-ffmpeg"))]
#[test]
fn ffprobe_without_feature_is_probe_error() {
    let err = FfprobeProbe.probe(Path::new("a.mp4")).unwrap_err();
    assert!(matches!(err, WlmpError::Probe(_)));
}
