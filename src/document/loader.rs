//! Project file parsing.
//!
//! Handles the Movie Maker project layout:
//! ```xml
//! <Project>
//!   <MediaItems>
//!     <MediaItem id="1" filePath="C:\clips\beach.mp4" />
//!   </MediaItems>
//!   <Extents>
//!     <VideoClip extentID="5" mediaItemID="1" inTime="0" outTime="0" speed="1">
//!       <Effects />
//!       <Transitions><CrossFadeTransition duration="1.25" /></Transitions>
//!       <BoundProperties>
//!         <BoundPropertyFloat Name="Volume" Value="0.8" />
//!       </BoundProperties>
//!     </VideoClip>
//!     <ExtentSelector extentID="1">
//!       <ExtentRefs><ExtentRef id="5" /></ExtentRefs>
//!     </ExtentSelector>
//!   </Extents>
//!   <BoundPlaceholders>
//!     <BoundPlaceholder placeholderID="Main" extentID="1" />
//!   </BoundPlaceholders>
//! </Project>
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use roxmltree::Node;

use crate::document::model::{
    Document, ExtentCategory, ExtentSelector, MediaItem, Placeholder, PlaceholderKind, RawEffect,
    RawExtent, RawTransition,
};
use crate::document::props::{PropertyBag, PropertyValue};
use crate::foundation::error::{WlmpError, WlmpResult};

/// Read and parse a project file from disk.
#[tracing::instrument]
pub fn load_project(path: &Path) -> WlmpResult<Document> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("read project file '{}'", path.display()))?;
    tracing::info!("reading project file done");
    parse_project(&xml)
}

/// Parse project XML into a [`Document`].
///
/// Fails with [`WlmpError::MalformedDocument`] when the XML is not well formed, when one of the
/// `MediaItems`, `BoundPlaceholders` or `Extents` sections is absent, or when an id attribute
/// needed for cross-referencing is missing.
pub fn parse_project(xml: &str) -> WlmpResult<Document> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| WlmpError::malformed(format!("XML parse error: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().name() != "Project" {
        return Err(WlmpError::malformed("root element must be <Project>"));
    }

    let media_section = required_section(root, "MediaItems")?;
    let placeholder_section = required_section(root, "BoundPlaceholders")?;
    let extent_section = required_section(root, "Extents")?;

    let mut out = Document::default();

    for node in elements(media_section, "MediaItem") {
        out.media_items.push(MediaItem {
            id: required_attr(node, "id")?.to_string(),
            file_path: PathBuf::from(required_attr(node, "filePath")?),
        });
    }

    for node in elements(placeholder_section, "BoundPlaceholder") {
        let id = required_attr(node, "placeholderID")?;
        let selector_id = required_attr(node, "extentID")?;
        match PlaceholderKind::parse(id) {
            Some(kind) => out.placeholders.push(Placeholder {
                kind,
                selector_id: selector_id.to_string(),
            }),
            None => tracing::debug!(placeholder = id, "ignoring unused placeholder"),
        }
    }

    for node in extent_section.children().filter(Node::is_element) {
        let name = node.tag_name().name();
        if name == "ExtentSelector" {
            out.selectors.push(parse_selector(node)?);
        } else if let Some(category) = ExtentCategory::from_element_name(name) {
            let extent = parse_extent(node, category)?;
            out.extents_mut(category).push(extent);
        } else {
            tracing::debug!(element = name, "ignoring unsupported extent element");
        }
    }

    tracing::info!(
        media_items = out.media_items.len(),
        video_clips = out.video_clips.len(),
        audio_clips = out.audio_clips.len(),
        title_clips = out.title_clips.len(),
        "parsing project file done"
    );
    Ok(out)
}

fn required_section<'a, 'input>(
    root: Node<'a, 'input>,
    name: &str,
) -> WlmpResult<Node<'a, 'input>> {
    child(root, name)
        .ok_or_else(|| WlmpError::malformed(format!("missing required section <{name}>")))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> WlmpResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        WlmpError::malformed(format!(
            "<{}> is missing required attribute '{name}'",
            node.tag_name().name()
        ))
    })
}

fn parse_selector(node: Node<'_, '_>) -> WlmpResult<ExtentSelector> {
    let extent_id = required_attr(node, "extentID")?.to_string();
    let mut refs = Vec::new();
    if let Some(list) = child(node, "ExtentRefs") {
        for r in elements(list, "ExtentRef") {
            refs.push(required_attr(r, "id")?.to_string());
        }
    }
    Ok(ExtentSelector { extent_id, refs })
}

fn parse_extent(node: Node<'_, '_>, category: ExtentCategory) -> WlmpResult<RawExtent> {
    let mut extent = RawExtent::new(category, required_attr(node, "extentID")?);
    extent.attributes = node
        .attributes()
        .filter(|a| a.name() != "extentID")
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    if let Some(props) = child(node, "BoundProperties") {
        extent.properties = parse_properties(props)?;
    }

    if let Some(transitions) = child(node, "Transitions") {
        for t in transitions.children().filter(Node::is_element) {
            let duration = match t.attribute("duration") {
                Some(raw) => Some(parse_f64(t, "duration", raw)?),
                None => None,
            };
            extent.transitions.push(RawTransition {
                kind: t.tag_name().name().to_string(),
                duration,
            });
        }
    }

    if let Some(effects) = child(node, "Effects") {
        for e in effects.children().filter(Node::is_element) {
            let properties = match child(e, "BoundProperties") {
                Some(p) => parse_properties(p)?,
                None => PropertyBag::new(),
            };
            extent.effects.push(RawEffect {
                kind: e.tag_name().name().to_string(),
                template_id: e.attribute("effectTemplateID").map(str::to_string),
                properties,
            });
        }
    }

    for name in extent.properties.duplicate_names() {
        tracing::warn!(
            extent = %extent.extent_id,
            property = name,
            "duplicate property name; first occurrence wins"
        );
    }

    Ok(extent)
}

fn parse_properties(node: Node<'_, '_>) -> WlmpResult<PropertyBag> {
    let mut bag = PropertyBag::new();
    for p in node.children().filter(Node::is_element) {
        let kind = p.tag_name().name();
        let name = required_attr(p, "Name")?;
        let value = match kind {
            "BoundPropertyBool" => PropertyValue::Bool(parse_bool(p, required_attr(p, "Value")?)?),
            "BoundPropertyInt" => {
                let raw = required_attr(p, "Value")?;
                PropertyValue::Int(raw.trim().parse::<i64>().map_err(|_| {
                    WlmpError::malformed(format!("int property '{name}' has value '{raw}'"))
                })?)
            }
            "BoundPropertyFloat" => {
                PropertyValue::Float(parse_f64(p, name, required_attr(p, "Value")?)?)
            }
            "BoundPropertyString" => PropertyValue::String(required_attr(p, "Value")?.to_string()),
            "BoundPropertyFloatSet" => {
                let mut values = Vec::new();
                for el in elements(p, "BoundPropertyFloatElement") {
                    values.push(parse_f64(el, name, required_attr(el, "Value")?)?);
                }
                PropertyValue::FloatSet(values)
            }
            "BoundPropertyStringSet" => {
                let mut values = Vec::new();
                for el in elements(p, "BoundPropertyStringElement") {
                    values.push(required_attr(el, "Value")?.to_string());
                }
                PropertyValue::StringSet(values)
            }
            other => {
                tracing::debug!(element = other, property = name, "ignoring unknown property kind");
                continue;
            }
        };
        bag.push(name, value);
    }
    Ok(bag)
}

fn parse_bool(node: Node<'_, '_>, raw: &str) -> WlmpResult<bool> {
    match raw.trim() {
        v if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        v if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        _ => Err(WlmpError::malformed(format!(
            "<{}> has non-boolean value '{raw}'",
            node.tag_name().name()
        ))),
    }
}

fn parse_f64(node: Node<'_, '_>, what: &str, raw: &str) -> WlmpResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        WlmpError::malformed(format!(
            "<{}> {what} has non-numeric value '{raw}'",
            node.tag_name().name()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/document/loader.rs"]
mod tests;
