use std::path::PathBuf;

/// Convenience result type used across the crate.
pub type WlmpResult<T> = Result<T, WlmpError>;

/// Top-level error taxonomy.
///
/// Every variant is fatal for a resolution pass: nothing partial is handed to a render backend.
#[derive(thiserror::Error, Debug)]
pub enum WlmpError {
    /// The project document is structurally invalid (missing section, attribute or property).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A required placeholder kind (`Main`, `SoundTrack`, `Text`) is absent.
    #[error("placeholder not found: {0}")]
    PlaceholderNotFound(String),

    /// An extent, selector or media item referenced by id does not exist in its category.
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    /// A media item's file path does not resolve on disk.
    #[error("media file missing: media item '{}' points to '{}'", .media_id, .path.display())]
    MediaFileMissing {
        /// Id of the offending `MediaItem`.
        media_id: String,
        /// File path as written in the project.
        path: PathBuf,
    },

    /// Output width/height/fps are non-positive or non-numeric.
    #[error("invalid output parameters: {0}")]
    InvalidOutputParameters(String),

    /// The output file already exists and overwriting was not requested.
    #[error("output file '{}' already exists", .0.display())]
    OutputExists(PathBuf),

    /// A media collaborator (e.g. `ffprobe`) failed or returned unusable metadata.
    #[error("media probe error: {0}")]
    Probe(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WlmpError {
    /// Build a [`WlmpError::MalformedDocument`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build a [`WlmpError::PlaceholderNotFound`] value.
    pub fn placeholder(msg: impl Into<String>) -> Self {
        Self::PlaceholderNotFound(msg.into())
    }

    /// Build a [`WlmpError::ReferenceNotFound`] value.
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::ReferenceNotFound(msg.into())
    }

    /// Build a [`WlmpError::InvalidOutputParameters`] value.
    pub fn output_params(msg: impl Into<String>) -> Self {
        Self::InvalidOutputParameters(msg.into())
    }

    /// Build a [`WlmpError::Probe`] value.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
