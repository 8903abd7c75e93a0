use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The frame source could not deliver a frame. Fatal for the session.
    #[error("capture failure: {0}")]
    CaptureFailure(String),

    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),

    #[error("failed to read frame {path}: {source}")]
    Image {
        path: std::path::PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("label font is unreadable: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
