use hand_tracker::TrackerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// True when the session ended because no frame arrived
    pub fn is_capture_failure(&self) -> bool {
        matches!(self, GameError::Tracker(TrackerError::CaptureFailure(_)))
    }
}
