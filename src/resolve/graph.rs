use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::document::model::{Document, ExtentCategory, MediaItem, PlaceholderKind, RawExtent};
use crate::foundation::error::{WlmpError, WlmpResult};
use crate::foundation::ids::{AudioIdx, ColorIdx, MediaIdx, TitleIdx, VideoIdx};
use crate::resolve::extents::{AudioExtent, ColorExtent, TitleExtent, VideoExtent};

/// One slot of the main track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MainEntry {
    /// Background color (stored as a `TitleClip`).
    Color(ColorIdx),
    /// Video file.
    Video(VideoIdx),
}

/// Ordered extent ids bound to a placeholder kind.
///
/// Fails with [`WlmpError::PlaceholderNotFound`] when the document binds no placeholder of this
/// kind and with [`WlmpError::ReferenceNotFound`] when the bound selector does not exist. An
/// empty selector yields an empty slice.
pub fn extent_order(doc: &Document, kind: PlaceholderKind) -> WlmpResult<&[String]> {
    let placeholder = doc
        .placeholders
        .iter()
        .find(|p| p.kind == kind)
        .ok_or_else(|| {
            WlmpError::placeholder(format!(
                "extentID for placeholderID '{}' was not found in the project",
                kind.as_str()
            ))
        })?;

    let selector = doc
        .selectors
        .iter()
        .find(|s| s.extent_id == placeholder.selector_id)
        .ok_or_else(|| {
            WlmpError::reference(format!(
                "placeholder '{}' is bound to missing ExtentSelector '{}'",
                kind.as_str(),
                placeholder.selector_id
            ))
        })?;

    Ok(&selector.refs)
}

/// Cross-checked, strongly typed view of a project.
///
/// Every id reference in the document is resolved eagerly into an arena index, so track builders
/// never see a dangling reference. The graph owns its records; builders borrow them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectGraph {
    media: Vec<MediaItem>,
    colors: Vec<ColorExtent>,
    videos: Vec<VideoExtent>,
    audios: Vec<AudioExtent>,
    titles: Vec<TitleExtent>,
    main: Vec<MainEntry>,
    soundtrack: Vec<AudioIdx>,
    text: Vec<TitleIdx>,
}

impl ProjectGraph {
    /// Resolve all placeholder orders and hydrate the referenced extents.
    #[tracing::instrument(skip(doc))]
    pub fn resolve(doc: &Document) -> WlmpResult<Self> {
        // All three placeholders must exist before any extent is looked at.
        let main_ids = extent_order(doc, PlaceholderKind::Main)?;
        let soundtrack_ids = extent_order(doc, PlaceholderKind::SoundTrack)?;
        let text_ids = extent_order(doc, PlaceholderKind::Text)?;
        for (kind, ids) in [
            (PlaceholderKind::Main, main_ids),
            (PlaceholderKind::SoundTrack, soundtrack_ids),
            (PlaceholderKind::Text, text_ids),
        ] {
            if ids.is_empty() {
                tracing::warn!(placeholder = kind.as_str(), "clip category has no entries");
            }
        }

        let mut b = GraphBuilder::new(doc)?;

        for id in main_ids {
            let entry = if let Some(raw) = b.lookup(ExtentCategory::Title, id) {
                MainEntry::Color(b.color(raw)?)
            } else if let Some(raw) = b.lookup(ExtentCategory::Video, id) {
                MainEntry::Video(b.video(raw)?)
            } else {
                return Err(not_in_category(
                    id,
                    PlaceholderKind::Main,
                    "TitleClip or VideoClip",
                ));
            };
            b.graph.main.push(entry);
        }

        for id in soundtrack_ids {
            let raw = b
                .lookup(ExtentCategory::Audio, id)
                .ok_or_else(|| not_in_category(id, PlaceholderKind::SoundTrack, "AudioClip"))?;
            let idx = b.audio(raw)?;
            b.graph.soundtrack.push(idx);
        }

        for id in text_ids {
            let raw = b
                .lookup(ExtentCategory::Title, id)
                .ok_or_else(|| not_in_category(id, PlaceholderKind::Text, "TitleClip"))?;
            let idx = b.title(raw)?;
            b.graph.text.push(idx);
        }

        tracing::info!(
            main = b.graph.main.len(),
            soundtrack = b.graph.soundtrack.len(),
            text = b.graph.text.len(),
            "reading order of video/title/audio clips done"
        );
        Ok(b.graph)
    }

    /// Ordered main-track entries.
    pub fn main_track(&self) -> &[MainEntry] {
        &self.main
    }

    /// Ordered soundtrack entries.
    pub fn soundtrack(&self) -> &[AudioIdx] {
        &self.soundtrack
    }

    /// Ordered title-track entries.
    pub fn text_track(&self) -> &[TitleIdx] {
        &self.text
    }

    /// Media item by index.
    pub fn media(&self, idx: MediaIdx) -> &MediaItem {
        &self.media[idx.index()]
    }

    /// Color extent by index.
    pub fn color(&self, idx: ColorIdx) -> &ColorExtent {
        &self.colors[idx.index()]
    }

    /// Video extent by index.
    pub fn video(&self, idx: VideoIdx) -> &VideoExtent {
        &self.videos[idx.index()]
    }

    /// Audio extent by index.
    pub fn audio(&self, idx: AudioIdx) -> &AudioExtent {
        &self.audios[idx.index()]
    }

    /// Title extent by index.
    pub fn title(&self, idx: TitleIdx) -> &TitleExtent {
        &self.titles[idx.index()]
    }

    /// Return `true` when no placeholder references any extent.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.soundtrack.is_empty() && self.text.is_empty()
    }
}

fn not_in_category(id: &str, kind: PlaceholderKind, expected: &str) -> WlmpError {
    WlmpError::reference(format!(
        "extent '{id}' referenced by placeholder '{}' is not a known {expected}",
        kind.as_str()
    ))
}

fn too_many() -> WlmpError {
    WlmpError::malformed("too many records in project")
}

struct GraphBuilder<'a> {
    graph: ProjectGraph,
    media_by_id: HashMap<&'a str, MediaIdx>,
    raw_videos: HashMap<&'a str, &'a RawExtent>,
    raw_audios: HashMap<&'a str, &'a RawExtent>,
    raw_titles: HashMap<&'a str, &'a RawExtent>,
    colors_by_id: HashMap<&'a str, ColorIdx>,
    videos_by_id: HashMap<&'a str, VideoIdx>,
    audios_by_id: HashMap<&'a str, AudioIdx>,
    titles_by_id: HashMap<&'a str, TitleIdx>,
}

impl<'a> GraphBuilder<'a> {
    fn new(doc: &'a Document) -> WlmpResult<Self> {
        let mut graph = ProjectGraph::default();
        let mut media_by_id = HashMap::with_capacity(doc.media_items.len());
        for item in &doc.media_items {
            match media_by_id.entry(item.id.as_str()) {
                Entry::Occupied(_) => {
                    tracing::warn!(media = %item.id, "duplicate media item id; first one wins");
                }
                Entry::Vacant(slot) => {
                    let idx = MediaIdx::from_usize(graph.media.len()).ok_or_else(too_many)?;
                    graph.media.push(item.clone());
                    slot.insert(idx);
                }
            }
        }

        let by_id = |category: ExtentCategory| {
            let mut map = HashMap::new();
            for raw in doc.extents(category) {
                map.entry(raw.extent_id.as_str()).or_insert(raw);
            }
            map
        };

        Ok(Self {
            graph,
            media_by_id,
            raw_videos: by_id(ExtentCategory::Video),
            raw_audios: by_id(ExtentCategory::Audio),
            raw_titles: by_id(ExtentCategory::Title),
            colors_by_id: HashMap::new(),
            videos_by_id: HashMap::new(),
            audios_by_id: HashMap::new(),
            titles_by_id: HashMap::new(),
        })
    }

    fn lookup(&self, category: ExtentCategory, id: &str) -> Option<&'a RawExtent> {
        let map = match category {
            ExtentCategory::Video => &self.raw_videos,
            ExtentCategory::Audio => &self.raw_audios,
            ExtentCategory::Title => &self.raw_titles,
        };
        map.get(id).copied()
    }

    fn media_of(&self, raw: &RawExtent) -> WlmpResult<MediaIdx> {
        let id = raw.required_attr("mediaItemID")?;
        self.media_by_id.get(id).copied().ok_or_else(|| {
            WlmpError::reference(format!(
                "{} '{}' references missing MediaItem '{id}'",
                raw.category.element_name(),
                raw.extent_id
            ))
        })
    }

    fn color(&mut self, raw: &'a RawExtent) -> WlmpResult<ColorIdx> {
        if let Some(idx) = self.colors_by_id.get(raw.extent_id.as_str()) {
            return Ok(*idx);
        }
        let idx = ColorIdx::from_usize(self.graph.colors.len()).ok_or_else(too_many)?;
        self.graph.colors.push(ColorExtent::from_raw(raw)?);
        self.colors_by_id.insert(&raw.extent_id, idx);
        Ok(idx)
    }

    fn video(&mut self, raw: &'a RawExtent) -> WlmpResult<VideoIdx> {
        if let Some(idx) = self.videos_by_id.get(raw.extent_id.as_str()) {
            return Ok(*idx);
        }
        let media = self.media_of(raw)?;
        let idx = VideoIdx::from_usize(self.graph.videos.len()).ok_or_else(too_many)?;
        self.graph.videos.push(VideoExtent::from_raw(raw, media)?);
        self.videos_by_id.insert(&raw.extent_id, idx);
        Ok(idx)
    }

    fn audio(&mut self, raw: &'a RawExtent) -> WlmpResult<AudioIdx> {
        if let Some(idx) = self.audios_by_id.get(raw.extent_id.as_str()) {
            return Ok(*idx);
        }
        let media = self.media_of(raw)?;
        let idx = AudioIdx::from_usize(self.graph.audios.len()).ok_or_else(too_many)?;
        self.graph.audios.push(AudioExtent::from_raw(raw, media)?);
        self.audios_by_id.insert(&raw.extent_id, idx);
        Ok(idx)
    }

    fn title(&mut self, raw: &'a RawExtent) -> WlmpResult<TitleIdx> {
        if let Some(idx) = self.titles_by_id.get(raw.extent_id.as_str()) {
            return Ok(*idx);
        }
        let idx = TitleIdx::from_usize(self.graph.titles.len()).ok_or_else(too_many)?;
        self.graph.titles.push(TitleExtent::from_raw(raw)?);
        self.titles_by_id.insert(&raw.extent_id, idx);
        Ok(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/graph.rs"]
mod tests;
