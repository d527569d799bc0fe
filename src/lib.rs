//! Interpreter for Windows Movie Maker project files (`.wlmp`).
//!
//! The crate turns a project description into a fully resolved timeline. It does not decode or
//! encode media; it computes where in time, and with which parameters, every clip appears:
//!
//! - Parse the project into a [`Document`]
//! - Resolve placeholders and cross-references into a [`ProjectGraph`]
//! - Build the video/color, soundtrack and title tracks
//! - Assemble a [`CompositionPlan`] and hand it to a [`RenderBackend`]
//!
//! Media metadata and text metrics come from the [`MediaProbe`] and [`TextMeasure`]
//! collaborators, so the core stays free of decoders and font lookup.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod config;
pub(crate) mod document;
pub(crate) mod render;
pub(crate) mod resolve;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, OutputParams, Point, ResolutionPreset, Rgb8, TimeSpan,
};
pub use crate::foundation::error::{WlmpError, WlmpResult};
pub use crate::foundation::ids::{AudioIdx, ColorIdx, MediaIdx, TitleIdx, VideoIdx};

pub use crate::assets::media::{FfprobeProbe, MediaInfo, MediaProbe, StaticProbe};
#[cfg(feature = "text-parley")]
pub use crate::assets::text::ParleyMeasure;
pub use crate::assets::text::{LineMetricsMeasure, TextMeasure, TextStyle};
pub use crate::config::ResolveOpts;
pub use crate::document::loader::{load_project, parse_project};
pub use crate::document::model::{
    Document, ExtentCategory, ExtentSelector, MediaItem, Placeholder, PlaceholderKind, RawEffect,
    RawExtent, RawTransition,
};
pub use crate::document::props::{PropertyBag, PropertyValue};
pub use crate::render::json::JsonPlanBackend;
pub use crate::render::pipeline::{
    RenderBackend, RenderOpts, ResolveEnv, ensure_parent_dir, render_project, resolve_document,
    resolve_project_file, resolve_project_str,
};
pub use crate::resolve::extents::{
    AudioExtent, AudioFade, ColorExtent, TextAlign, TitleExtent, TitleStyle, VideoExtent,
};
pub use crate::resolve::graph::{MainEntry, ProjectGraph, extent_order};
pub use crate::timeline::assemble::{AudioMixEntry, AudioSource, CompositionPlan};
pub use crate::timeline::audio::build_audio_track;
pub use crate::timeline::clip::{ClipEffect, ClipSource, ResolvedClip, SourceTrim, TitleMotion};
pub use crate::timeline::title::build_title_track;
pub use crate::timeline::video::{VideoTrack, build_video_track};
