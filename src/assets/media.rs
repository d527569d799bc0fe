use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{WlmpError, WlmpResult};

/// Metadata the track builders need from a source file.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaInfo {
    /// Natural duration in seconds.
    pub duration_secs: f64,
    /// Frame width in pixels (0 for audio-only files).
    pub width: u32,
    /// Frame height in pixels (0 for audio-only files).
    pub height: u32,
    /// Whether a video stream was found.
    pub has_video: bool,
}

impl MediaInfo {
    /// Video file metadata.
    pub fn video(duration_secs: f64, width: u32, height: u32) -> Self {
        Self {
            duration_secs,
            width,
            height,
            has_video: true,
        }
    }

    /// Audio-only file metadata.
    pub fn audio(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            width: 0,
            height: 0,
            has_video: false,
        }
    }
}

/// Source of media existence and metadata.
///
/// The resolution core never decodes samples; it only asks this collaborator whether a file is
/// there, how long it plays and how large its frames are.
pub trait MediaProbe {
    /// Return `true` when `path` resolves to a readable file.
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Read metadata for `path`.
    fn probe(&self, path: &Path) -> WlmpResult<MediaInfo>;
}

impl<P: MediaProbe + ?Sized> MediaProbe for &P {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn probe(&self, path: &Path) -> WlmpResult<MediaInfo> {
        (**self).probe(path)
    }
}

/// Probe backed by the `ffprobe` executable.
#[derive(Clone, Debug, Default)]
pub struct FfprobeProbe;

#[cfg(feature = "media-ffmpeg")]
impl MediaProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> WlmpResult<MediaInfo> {
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            #[serde(default)]
            streams: Vec<ProbeStream>,
            format: Option<ProbeFormat>,
        }

        let out = std::process::Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-show_format",
            ])
            .arg(path)
            .output()
            .map_err(|e| WlmpError::probe(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(WlmpError::probe(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
            .map_err(|e| WlmpError::probe(format!("ffprobe json parse failed: {e}")))?;
        let duration_secs = parsed
            .format
            .as_ref()
            .and_then(|f| f.duration.as_deref())
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| {
                WlmpError::probe(format!("no duration reported for '{}'", path.display()))
            })?;

        let info = match parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
        {
            Some(v) => MediaInfo::video(
                duration_secs,
                v.width.unwrap_or(0),
                v.height.unwrap_or(0),
            ),
            None => MediaInfo::audio(duration_secs),
        };
        tracing::debug!(path = %path.display(), ?info, "probed media");
        Ok(info)
    }
}

#[cfg(not(feature = "media-ffmpeg"))]
impl MediaProbe for FfprobeProbe {
    fn probe(&self, _path: &Path) -> WlmpResult<MediaInfo> {
        Err(WlmpError::probe(
            "probing media files requires the 'media-ffmpeg' feature",
        ))
    }
}

/// In-memory probe for callers that already know their media.
#[derive(Clone, Debug, Default)]
pub struct StaticProbe {
    entries: HashMap<PathBuf, MediaInfo>,
}

impl StaticProbe {
    /// Probe with no registered files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `info` for `path`, replacing any earlier entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, info: MediaInfo) {
        self.entries.insert(path.into(), info);
    }

    /// Builder form of [`StaticProbe::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, info: MediaInfo) -> Self {
        self.insert(path, info);
        self
    }
}

impl MediaProbe for StaticProbe {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    fn probe(&self, path: &Path) -> WlmpResult<MediaInfo> {
        self.entries.get(path).copied().ok_or_else(|| {
            WlmpError::probe(format!("no metadata registered for '{}'", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
