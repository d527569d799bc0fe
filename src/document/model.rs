use std::path::PathBuf;

use crate::document::props::PropertyBag;
use crate::foundation::error::{WlmpError, WlmpResult};

/// Parsed project document.
///
/// Records are kept exactly as the file lists them: ids are still strings and clip parameters
/// still live in attributes and property bags. [`crate::ProjectGraph::resolve`] turns this into
/// typed, cross-checked records.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// `<MediaItems>` in document order.
    pub media_items: Vec<MediaItem>,
    /// Known `<BoundPlaceholder>` entries in document order.
    pub placeholders: Vec<Placeholder>,
    /// `<ExtentSelector>` entries in document order.
    pub selectors: Vec<ExtentSelector>,
    /// `<VideoClip>` extents.
    pub video_clips: Vec<RawExtent>,
    /// `<AudioClip>` extents.
    pub audio_clips: Vec<RawExtent>,
    /// `<TitleClip>` extents (background colors and titles share this category).
    pub title_clips: Vec<RawExtent>,
}

impl Document {
    /// Extents of one category.
    pub fn extents(&self, category: ExtentCategory) -> &[RawExtent] {
        match category {
            ExtentCategory::Video => &self.video_clips,
            ExtentCategory::Audio => &self.audio_clips,
            ExtentCategory::Title => &self.title_clips,
        }
    }

    /// Mutable extents of one category.
    pub fn extents_mut(&mut self, category: ExtentCategory) -> &mut Vec<RawExtent> {
        match category {
            ExtentCategory::Video => &mut self.video_clips,
            ExtentCategory::Audio => &mut self.audio_clips,
            ExtentCategory::Title => &mut self.title_clips,
        }
    }
}

/// A source media file referenced by clips.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaItem {
    /// `@id`
    pub id: String,
    /// `@filePath`
    pub file_path: PathBuf,
}

/// Track slots a project binds extent selectors to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PlaceholderKind {
    /// Video and background-color clips.
    Main,
    /// Independent soundtrack audio clips.
    SoundTrack,
    /// Title overlays.
    Text,
}

impl PlaceholderKind {
    /// All kinds a project must bind.
    pub const ALL: [PlaceholderKind; 3] = [Self::Main, Self::SoundTrack, Self::Text];

    /// Value of `@placeholderID` for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::SoundTrack => "SoundTrack",
            Self::Text => "Text",
        }
    }

    /// Parse `@placeholderID`; other slots (e.g. `SingleExtentView`) yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// `<BoundPlaceholder>`: binds a track slot to an extent selector.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placeholder {
    /// Track slot.
    pub kind: PlaceholderKind,
    /// `@extentID` of the bound `<ExtentSelector>`.
    pub selector_id: String,
}

/// `<ExtentSelector>`: an ordered list of extent references.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtentSelector {
    /// `@extentID`
    pub extent_id: String,
    /// `<ExtentRef @id>` values in order; empty when `<ExtentRefs>` is empty or absent.
    pub refs: Vec<String>,
}

/// Extent element kinds the interpreter understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ExtentCategory {
    /// `<VideoClip>`
    Video,
    /// `<AudioClip>`
    Audio,
    /// `<TitleClip>`
    Title,
}

impl ExtentCategory {
    /// XML element name.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Video => "VideoClip",
            Self::Audio => "AudioClip",
            Self::Title => "TitleClip",
        }
    }

    /// Inverse of [`ExtentCategory::element_name`].
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "VideoClip" => Some(Self::Video),
            "AudioClip" => Some(Self::Audio),
            "TitleClip" => Some(Self::Title),
            _ => None,
        }
    }
}

/// One child of `<Transitions>`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawTransition {
    /// Element name, e.g. `CrossFadeTransition` or `ShaderTransition`.
    pub kind: String,
    /// `@duration` in seconds, if present.
    pub duration: Option<f64>,
}

/// One child of `<Effects>`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawEffect {
    /// Element name, e.g. `AudioEffect` or `TextEffect`.
    pub kind: String,
    /// `@effectTemplateID`, if present.
    pub template_id: Option<String>,
    /// Effect-level `<BoundProperties>`.
    pub properties: PropertyBag,
}

/// A clip record with its attributes still in string form.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawExtent {
    /// Element kind.
    pub category: ExtentCategory,
    /// `@extentID`
    pub extent_id: String,
    /// Remaining attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Clip-level `<BoundProperties>`.
    pub properties: PropertyBag,
    /// `<Transitions>` children.
    pub transitions: Vec<RawTransition>,
    /// `<Effects>` children.
    pub effects: Vec<RawEffect>,
}

impl RawExtent {
    /// Empty extent with only its identity set.
    pub fn new(category: ExtentCategory, extent_id: impl Into<String>) -> Self {
        Self {
            category,
            extent_id: extent_id.into(),
            attributes: Vec::new(),
            properties: PropertyBag::new(),
            transitions: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Raw attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Required string attribute.
    pub fn required_attr(&self, name: &str) -> WlmpResult<&str> {
        self.attr(name).ok_or_else(|| {
            WlmpError::malformed(format!(
                "{} '{}' is missing attribute '{name}'",
                self.category.element_name(),
                self.extent_id
            ))
        })
    }

    /// Required numeric attribute.
    pub fn required_f64(&self, name: &str) -> WlmpResult<f64> {
        let raw = self.required_attr(name)?;
        raw.trim().parse::<f64>().map_err(|_| {
            WlmpError::malformed(format!(
                "{} '{}' has non-numeric attribute {name}='{raw}'",
                self.category.element_name(),
                self.extent_id
            ))
        })
    }

    /// First effect whose element name is `kind`.
    pub fn effect(&self, kind: &str) -> Option<&RawEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
