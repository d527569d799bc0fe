use super::*;
use crate::document::model::{ExtentCategory, RawEffect, RawTransition};
use crate::document::props::PropertyValue;

fn video(attrs: &[(&str, &str)]) -> RawExtent {
    let mut raw = RawExtent::new(ExtentCategory::Video, "v1");
    raw.attributes = attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    raw
}

fn text_effect(template: &str) -> RawEffect {
    RawEffect {
        kind: "TextEffect".to_string(),
        template_id: Some(template.to_string()),
        properties: PropertyBag::new()
            .with("color", PropertyValue::FloatSet(vec![1.0, 1.0, 1.0]))
            .with("outlineColor", PropertyValue::FloatSet(vec![0.0, 0.0, 0.0]))
            .with("outlineSizeIndex", PropertyValue::Int(2))
            .with("size", PropertyValue::Float(0.5))
            .with(
                "family",
                PropertyValue::StringSet(vec!["Segoe UI".to_string()]),
            )
            .with(
                "string",
                PropertyValue::StringSet(vec!["Hello".to_string(), "World".to_string()]),
            ),
    }
}

fn title(template: &str) -> RawExtent {
    let mut raw = RawExtent::new(ExtentCategory::Title, "t1");
    raw.attributes = vec![
        ("gapBefore".to_string(), "-0.5".to_string()),
        ("duration".to_string(), "4".to_string()),
    ];
    raw.effects.push(text_effect(template));
    raw
}

#[test]
fn zero_out_time_means_natural_end() {
    let raw = video(&[("inTime", "2"), ("outTime", "0"), ("speed", "1")]);
    let v = VideoExtent::from_raw(&raw, MediaIdx(0)).unwrap();
    assert_eq!(v.in_time, 2.0);
    assert_eq!(v.out_time, None);

    let raw = video(&[("inTime", "2"), ("outTime", "7.5"), ("speed", "1")]);
    let v = VideoExtent::from_raw(&raw, MediaIdx(0)).unwrap();
    assert_eq!(v.out_time, Some(7.5));
}

#[test]
fn inverted_trim_window_is_malformed() {
    let raw = video(&[("inTime", "5"), ("outTime", "3"), ("speed", "1")]);
    assert!(matches!(
        VideoExtent::from_raw(&raw, MediaIdx(0)),
        Err(WlmpError::MalformedDocument(_))
    ));
}

#[test]
fn video_defaults_apply_when_properties_are_absent() {
    let raw = video(&[("inTime", "0"), ("outTime", "0"), ("speed", "2")]);
    let v = VideoExtent::from_raw(&raw, MediaIdx(3)).unwrap();
    assert_eq!(v.media, MediaIdx(3));
    assert_eq!(v.speed, 2.0);
    assert_eq!(v.volume, 1.0);
    assert!(!v.muted);
    assert_eq!(v.rotate_steps, 0);
    assert_eq!(v.transition, None);
    assert_eq!(v.audio_fade, AudioFade::default());
}

#[test]
fn mute_wins_over_volume_and_rotation_wraps() {
    let mut raw = video(&[("inTime", "0"), ("outTime", "0"), ("speed", "1")]);
    raw.properties = PropertyBag::new()
        .with("Mute", PropertyValue::Bool(true))
        .with("Volume", PropertyValue::Float(0.7))
        .with("rotateStepNinety", PropertyValue::Int(5));
    let v = VideoExtent::from_raw(&raw, MediaIdx(0)).unwrap();
    assert_eq!(v.volume, 0.7);
    assert_eq!(v.effective_volume(), 0.0);
    assert_eq!(v.rotate_steps, 1);
}

#[test]
fn transition_and_fade_are_read() {
    let mut raw = video(&[("inTime", "0"), ("outTime", "0"), ("speed", "1")]);
    raw.transitions.push(RawTransition {
        kind: "CrossFadeTransition".to_string(),
        duration: Some(0.75),
    });
    raw.effects.push(RawEffect {
        kind: "AudioEffect".to_string(),
        template_id: Some("AudioFadeEffectTemplate".to_string()),
        properties: PropertyBag::new().with("AudioFadeOutDuration", PropertyValue::Float(2.0)),
    });
    let v = VideoExtent::from_raw(&raw, MediaIdx(0)).unwrap();
    assert_eq!(v.transition, Some(0.75));
    assert_eq!(v.audio_fade.fade_in, None);
    assert_eq!(v.audio_fade.fade_out, Some(2.0));
}

#[test]
fn non_positive_speed_is_malformed() {
    let raw = video(&[("inTime", "0"), ("outTime", "0"), ("speed", "0")]);
    assert!(VideoExtent::from_raw(&raw, MediaIdx(0)).is_err());
}

#[test]
fn audio_keeps_negative_gap() {
    let mut raw = RawExtent::new(ExtentCategory::Audio, "a1");
    raw.attributes = vec![
        ("gapBefore".to_string(), "-1.25".to_string()),
        ("inTime".to_string(), "0".to_string()),
        ("outTime".to_string(), "0".to_string()),
        ("speed".to_string(), "1".to_string()),
    ];
    let a = AudioExtent::from_raw(&raw, MediaIdx(1)).unwrap();
    assert_eq!(a.gap_before, -1.25);
    assert_eq!(a.effective_volume(), 1.0);
}

#[test]
fn color_requires_diffuse_color() {
    let mut raw = RawExtent::new(ExtentCategory::Title, "c1");
    raw.attributes = vec![("duration".to_string(), "3".to_string())];
    let err = ColorExtent::from_raw(&raw).unwrap_err();
    assert!(err.to_string().contains("diffuseColor"));

    raw.properties = PropertyBag::new().with(
        "diffuseColor",
        PropertyValue::FloatSet(vec![1.0, 0.0, 0.5]),
    );
    let c = ColorExtent::from_raw(&raw).unwrap();
    assert_eq!(c.duration, 3.0);
    assert_eq!(c.color, Rgb8 { r: 255, g: 0, b: 128 });
}

#[test]
fn title_reads_text_effect() {
    let t = TitleExtent::from_raw(&title("TextEffectFadeZoomTemplate")).unwrap();
    assert_eq!(t.text, "Hello\nWorld");
    assert_eq!(t.gap_before, -0.5);
    assert_eq!(t.duration, 4.0);
    assert_eq!(t.style.font_family, "Segoe UI");
    assert_eq!(t.style.relative_size, 0.5);
    assert_eq!(t.style.outline_size_index, 2);
    assert_eq!(t.style.align, TextAlign::Center);
    assert!(!t.scrolling);

    let t = TitleExtent::from_raw(&title("TextEffectScrollTemplate")).unwrap();
    assert!(t.scrolling);
}

#[test]
fn justify_maps_with_center_fallback() {
    assert_eq!(TextAlign::from_justify("BEGIN"), TextAlign::Left);
    assert_eq!(TextAlign::from_justify("MIDDLE"), TextAlign::Center);
    assert_eq!(TextAlign::from_justify("END"), TextAlign::Right);
    assert_eq!(TextAlign::from_justify("DIAGONAL"), TextAlign::Center);
}

#[test]
fn title_without_style_property_is_malformed() {
    let mut raw = title("TextEffectFadeZoomTemplate");
    raw.effects[0].properties = PropertyBag::new().with(
        "string",
        PropertyValue::StringSet(vec!["Hi".to_string()]),
    );
    let err = TitleExtent::from_raw(&raw).unwrap_err();
    assert!(matches!(err, WlmpError::MalformedDocument(_)));
    assert!(err.to_string().contains("TitleClip 't1'"));
}
