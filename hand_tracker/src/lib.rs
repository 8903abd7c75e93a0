//! Motion tracking for Hand Pong.
//!
//! A [`MotionTracker`] owns an adaptive background model and turns each webcam
//! frame into a single vertical position: the centre of the largest moving
//! blob. Stages run in order: background subtraction, closing, median
//! smoothing, binarisation, contour extraction, largest-blob selection.

pub mod annotate;
pub mod background;
pub mod contours;
pub mod error;
pub mod morphology;
pub mod source;
pub mod tracker;

pub use background::{BackgroundModel, BackgroundParams};
pub use contours::{Blob, Contour, Point, Rect};
pub use error::TrackerError;
pub use source::{FrameSource, ImageSequence};
pub use tracker::{MotionTracker, NoDetectionPolicy, TrackResult, TrackerConfig};

/// One RGB webcam frame
pub type Frame = image::RgbImage;

/// 8-bit single channel mask: 0 background, 127 shadow, 255 foreground
pub type Mask = image::GrayImage;
