//! Strongly typed clip records.
//!
//! Each type is hydrated from a [`RawExtent`] once, during graph resolution. Sentinel values in
//! the file format are made explicit here: `outTime="0"` becomes `out_time: None` (play to the
//! source's natural end), and `gapBefore` keeps its sign (negative means the clip overlaps its
//! predecessor on the same track).

use crate::document::model::RawExtent;
use crate::document::props::PropertyBag;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{WlmpError, WlmpResult};
use crate::foundation::ids::MediaIdx;

const AUDIO_FADE_TEMPLATE: &str = "AudioFadeEffectTemplate";
const SCROLL_TEMPLATE: &str = "TextEffectScrollTemplate";

/// Solid background color shown on the main track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorExtent {
    /// `@extentID`
    pub extent_id: String,
    /// Seconds on screen.
    pub duration: f64,
    /// `diffuseColor`
    pub color: Rgb8,
}

/// Optional audio fade durations in seconds, as stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioFade {
    /// `AudioFadeInDuration`
    pub fade_in: Option<f64>,
    /// `AudioFadeOutDuration`
    pub fade_out: Option<f64>,
}

/// A trimmed video file on the main track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoExtent {
    /// `@extentID`
    pub extent_id: String,
    /// Resolved `@mediaItemID`.
    pub media: MediaIdx,
    /// Source in-point in seconds.
    pub in_time: f64,
    /// Source out-point in seconds; `None` plays to the natural end.
    pub out_time: Option<f64>,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Clockwise quarter turns, `0..=3`.
    pub rotate_steps: u8,
    /// `Volume` property (1.0 when absent).
    pub volume: f64,
    /// `Mute` property.
    pub muted: bool,
    /// Incoming transition duration in seconds, as stored.
    pub transition: Option<f64>,
    /// Embedded-audio fades.
    pub audio_fade: AudioFade,
}

/// A trimmed audio file on the soundtrack.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioExtent {
    /// `@extentID`
    pub extent_id: String,
    /// Resolved `@mediaItemID`.
    pub media: MediaIdx,
    /// Source in-point in seconds.
    pub in_time: f64,
    /// Source out-point in seconds; `None` plays to the natural end.
    pub out_time: Option<f64>,
    /// Playback speed multiplier.
    pub speed: f64,
    /// `Volume` property (1.0 when absent).
    pub volume: f64,
    /// `Mute` property.
    pub muted: bool,
    /// Signed gap before the clip in seconds.
    pub gap_before: f64,
    /// Audio fades.
    pub audio_fade: AudioFade,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    /// `BEGIN`
    Left,
    /// `MIDDLE`, also the fallback for unknown values.
    #[default]
    Center,
    /// `END`
    Right,
}

impl TextAlign {
    /// Map a stored `justify` value.
    pub fn from_justify(value: &str) -> Self {
        match value {
            "BEGIN" => Self::Left,
            "END" => Self::Right,
            _ => Self::Center,
        }
    }
}

/// Text styling as stored on a title's text effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleStyle {
    /// Display or family name of the font.
    pub font_family: String,
    /// Relative font size (`size` property), converted to pixels at build time.
    pub relative_size: f64,
    /// Fill color.
    pub color: Rgb8,
    /// Outline color.
    pub outline_color: Rgb8,
    /// Outline size index, converted to pixels at build time.
    pub outline_size_index: i64,
    /// Alignment.
    pub align: TextAlign,
}

/// A text overlay on the title track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleExtent {
    /// `@extentID`
    pub extent_id: String,
    /// Stored duration in seconds.
    pub duration: f64,
    /// Signed gap before the title in seconds.
    pub gap_before: f64,
    /// Lines joined with `\n`.
    pub text: String,
    /// Styling.
    pub style: TitleStyle,
    /// Whether the scroll template is selected.
    pub scrolling: bool,
}

impl ColorExtent {
    pub(crate) fn from_raw(raw: &RawExtent) -> WlmpResult<Self> {
        let duration = non_negative(raw, "duration")?;
        let color = rgb(raw, &raw.properties, "diffuseColor")?;
        Ok(Self {
            extent_id: raw.extent_id.clone(),
            duration,
            color,
        })
    }
}

impl VideoExtent {
    pub(crate) fn from_raw(raw: &RawExtent, media: MediaIdx) -> WlmpResult<Self> {
        let (in_time, out_time) = trim_points(raw)?;
        let rotate_steps = raw
            .properties
            .get_int("rotateStepNinety")
            .unwrap_or(0)
            .rem_euclid(4) as u8;

        let transition = raw.transitions.iter().find_map(|t| t.duration);

        Ok(Self {
            extent_id: raw.extent_id.clone(),
            media,
            in_time,
            out_time,
            speed: speed(raw)?,
            rotate_steps,
            volume: raw.properties.get_float("Volume").unwrap_or(1.0),
            muted: raw.properties.get_bool("Mute").unwrap_or(false),
            transition,
            audio_fade: audio_fade(raw),
        })
    }

    /// Volume actually applied (0 when muted).
    pub fn effective_volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }
}

impl AudioExtent {
    pub(crate) fn from_raw(raw: &RawExtent, media: MediaIdx) -> WlmpResult<Self> {
        let (in_time, out_time) = trim_points(raw)?;
        Ok(Self {
            extent_id: raw.extent_id.clone(),
            media,
            in_time,
            out_time,
            speed: speed(raw)?,
            volume: raw.properties.get_float("Volume").unwrap_or(1.0),
            muted: raw.properties.get_bool("Mute").unwrap_or(false),
            gap_before: raw.required_f64("gapBefore")?,
            audio_fade: audio_fade(raw),
        })
    }

    /// Volume actually applied (0 when muted).
    pub fn effective_volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }
}

impl TitleExtent {
    pub(crate) fn from_raw(raw: &RawExtent) -> WlmpResult<Self> {
        let effect = raw.effect("TextEffect").ok_or_else(|| {
            WlmpError::malformed(format!("TitleClip '{}' has no <TextEffect>", raw.extent_id))
        })?;
        let props = &effect.properties;

        let lines = required_strings(raw, props, "string")?;
        let font_family = required_strings(raw, props, "family")?
            .first()
            .cloned()
            .ok_or_else(|| missing(raw, "family"))?;
        let align = props
            .get_string_set("justify")
            .and_then(|v| v.first())
            .map(|v| TextAlign::from_justify(v))
            .unwrap_or_default();

        let style = TitleStyle {
            font_family,
            relative_size: props.get_float("size").ok_or_else(|| missing(raw, "size"))?,
            color: rgb(raw, props, "color")?,
            outline_color: rgb(raw, props, "outlineColor")?,
            outline_size_index: props
                .get_int("outlineSizeIndex")
                .ok_or_else(|| missing(raw, "outlineSizeIndex"))?,
            align,
        };

        Ok(Self {
            extent_id: raw.extent_id.clone(),
            duration: non_negative(raw, "duration")?,
            gap_before: raw.required_f64("gapBefore")?,
            text: lines.join("\n"),
            style,
            scrolling: effect.template_id.as_deref() == Some(SCROLL_TEMPLATE),
        })
    }
}

fn missing(raw: &RawExtent, property: &str) -> WlmpError {
    WlmpError::malformed(format!(
        "{} '{}' is missing property '{property}'",
        raw.category.element_name(),
        raw.extent_id
    ))
}

fn non_negative(raw: &RawExtent, name: &str) -> WlmpResult<f64> {
    let v = raw.required_f64(name)?;
    if v < 0.0 {
        return Err(WlmpError::malformed(format!(
            "{} '{}' has negative {name} ({v})",
            raw.category.element_name(),
            raw.extent_id
        )));
    }
    Ok(v)
}

fn speed(raw: &RawExtent) -> WlmpResult<f64> {
    let v = raw.required_f64("speed")?;
    if v <= 0.0 {
        return Err(WlmpError::malformed(format!(
            "{} '{}' has non-positive speed ({v})",
            raw.category.element_name(),
            raw.extent_id
        )));
    }
    Ok(v)
}

fn trim_points(raw: &RawExtent) -> WlmpResult<(f64, Option<f64>)> {
    let in_time = non_negative(raw, "inTime")?;
    let out_time = non_negative(raw, "outTime")?;
    // 0 is the "not trimmed" sentinel.
    if out_time == 0.0 {
        return Ok((in_time, None));
    }
    if out_time <= in_time {
        return Err(WlmpError::malformed(format!(
            "{} '{}' has empty trim window [{in_time}, {out_time})",
            raw.category.element_name(),
            raw.extent_id
        )));
    }
    Ok((in_time, Some(out_time)))
}

fn audio_fade(raw: &RawExtent) -> AudioFade {
    raw.effects
        .iter()
        .find(|e| e.kind == "AudioEffect" && e.template_id.as_deref() == Some(AUDIO_FADE_TEMPLATE))
        .map(|e| AudioFade {
            fade_in: e.properties.get_float("AudioFadeInDuration"),
            fade_out: e.properties.get_float("AudioFadeOutDuration"),
        })
        .unwrap_or_default()
}

fn rgb(raw: &RawExtent, props: &PropertyBag, name: &str) -> WlmpResult<Rgb8> {
    match props.get_float_set(name) {
        Some([r, g, b, ..]) => Ok(Rgb8::from_unit(*r, *g, *b)),
        Some(_) => Err(WlmpError::malformed(format!(
            "{} '{}' property '{name}' needs three color channels",
            raw.category.element_name(),
            raw.extent_id
        ))),
        None => Err(missing(raw, name)),
    }
}

fn required_strings<'a>(
    raw: &RawExtent,
    props: &'a PropertyBag,
    name: &str,
) -> WlmpResult<&'a [String]> {
    props.get_string_set(name).ok_or_else(|| missing(raw, name))
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/extents.rs"]
mod tests;
