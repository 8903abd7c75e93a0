use crate::annotate::{label_font, mark_detection};
use crate::background::{BackgroundModel, BackgroundParams};
use crate::contours::{find_contours, largest_blob, Blob};
use crate::morphology::{median_blur, threshold, Closing, MAX_KERNEL_SIDE};
use crate::source::FrameSource;
use crate::{Frame, TrackerError};
use ab_glyph::FontRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to report as the vertical position when nothing moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoDetectionPolicy {
    /// Half the frame height, which maps to zero paddle velocity
    #[default]
    Midframe,
    /// The last reported position (midframe before the first detection)
    HoldPrevious,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub background: BackgroundParams,
    /// Closing kernel as `[width, height]`
    pub close_kernel: [u32; 2],
    pub median_kernel: u32,
    pub binary_threshold: u8,
    pub no_detection: NoDetectionPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            background: BackgroundParams::default(),
            close_kernel: [20, 20],
            median_kernel: 5,
            binary_threshold: 127,
            no_detection: NoDetectionPolicy::Midframe,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        let invalid = |msg: &str| Err(TrackerError::InvalidConfig(msg.to_string()));
        if self.background.history == 0 {
            return invalid("history must be positive");
        }
        if self.background.var_threshold <= 0.0 {
            return invalid("var_threshold must be positive");
        }
        if self.close_kernel.iter().any(|&side| side == 0 || side > MAX_KERNEL_SIDE) {
            return invalid("close_kernel sides must be between 1 and 511");
        }
        if self.median_kernel < 3 || self.median_kernel % 2 == 0 {
            return invalid("median_kernel must be odd and at least 3");
        }
        Ok(())
    }
}

/// Output of one tracked frame
#[derive(Debug, Clone)]
pub struct TrackResult {
    /// Centre row of the hand, or the no-detection substitute
    pub vertical_position: i32,
    pub has_detection: bool,
    pub blob: Option<Blob>,
    /// Input frame with the detection drawn on it
    pub annotated: Frame,
    pub frame_height: i32,
}

pub struct MotionTracker {
    config: TrackerConfig,
    background: BackgroundModel,
    closing: Closing,
    font: FontRef<'static>,
    last_position: Option<i32>,
}

impl MotionTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        let [kw, kh] = config.close_kernel;
        Ok(Self {
            background: BackgroundModel::new(config.background),
            closing: Closing::rect(kw, kh),
            font: label_font()?,
            config,
            last_position: None,
        })
    }

    /// Pull the next frame from `source` and track it
    pub fn poll(&mut self, source: &mut dyn FrameSource) -> Result<TrackResult, TrackerError> {
        let frame = source.next_frame()?;
        Ok(self.track(&frame))
    }

    /// Run the full pipeline on one frame
    pub fn track(&mut self, frame: &Frame) -> TrackResult {
        let frame_height = frame.height() as i32;

        let raw = self.background.apply(frame);
        let closed = self.closing.apply(&raw);
        let smoothed = median_blur(&closed, self.config.median_kernel);
        let binary = threshold(&smoothed, self.config.binary_threshold);

        let contours = find_contours(&binary);
        let blob = largest_blob(&contours);

        let mut annotated = frame.clone();
        let vertical_position = match blob {
            Some(blob) => {
                mark_detection(&mut annotated, blob.rect, &self.font);
                let position = blob.center().y;
                debug!(
                    frame = self.background.frames_seen(),
                    contours = contours.len(),
                    area = blob.area,
                    position,
                    "Hand detected"
                );
                self.last_position = Some(position);
                position
            }
            None => {
                let midframe = frame_height / 2;
                let position = match self.config.no_detection {
                    NoDetectionPolicy::Midframe => midframe,
                    NoDetectionPolicy::HoldPrevious => self.last_position.unwrap_or(midframe),
                };
                debug!(
                    frame = self.background.frames_seen(),
                    position,
                    "No motion detected"
                );
                position
            }
        };

        TrackResult {
            vertical_position,
            has_detection: blob.is_some(),
            blob,
            annotated,
            frame_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn flat(width: u32, height: u32) -> Frame {
        Frame::from_pixel(width, height, Rgb([30, 30, 30]))
    }

    fn with_patch(base: &Frame, x0: u32, y0: u32, size: u32) -> Frame {
        let mut frame = base.clone();
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                frame.put_pixel(x, y, Rgb([230, 190, 160]));
            }
        }
        frame
    }

    fn warmed_tracker(config: TrackerConfig, background: &Frame) -> MotionTracker {
        let mut tracker = MotionTracker::new(config).expect("valid config");
        for _ in 0..20 {
            tracker.track(background);
        }
        tracker
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let even_median = TrackerConfig {
            median_kernel: 4,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            MotionTracker::new(even_median),
            Err(TrackerError::InvalidConfig(_))
        ));

        let zero_kernel = TrackerConfig {
            close_kernel: [0, 20],
            ..TrackerConfig::default()
        };
        assert!(MotionTracker::new(zero_kernel).is_err());

        let huge_kernel = TrackerConfig {
            close_kernel: [20, 600],
            ..TrackerConfig::default()
        };
        assert!(MotionTracker::new(huge_kernel).is_err());

        let mut no_history = TrackerConfig::default();
        no_history.background.history = 0;
        assert!(MotionTracker::new(no_history).is_err());

        let mut no_threshold = TrackerConfig::default();
        no_threshold.background.var_threshold = 0.0;
        assert!(MotionTracker::new(no_threshold).is_err());
    }

    #[test]
    fn test_static_scene_reports_midframe() {
        let background = flat(64, 48);
        let mut tracker = warmed_tracker(TrackerConfig::default(), &background);

        let result = tracker.track(&background);
        assert!(!result.has_detection);
        assert_eq!(result.blob, None);
        assert_eq!(result.vertical_position, 24);
        assert_eq!(result.annotated, background, "No annotation without a detection");
    }

    #[test]
    fn test_moving_patch_is_located() {
        let background = flat(64, 48);
        let mut tracker = warmed_tracker(TrackerConfig::default(), &background);

        let result = tracker.track(&with_patch(&background, 20, 10, 12));
        assert!(result.has_detection);
        let blob = result.blob.expect("blob");
        assert_eq!(blob.rect.top(), 10);
        assert_eq!(blob.rect.height(), 12);
        assert_eq!(result.vertical_position, 16);
        assert_eq!(result.frame_height, 48);
        assert_eq!(*result.annotated.get_pixel(20, 10), Rgb([0, 255, 0]));
    }

    #[test]
    fn test_hold_previous_policy() {
        let background = flat(64, 48);
        let config = TrackerConfig {
            no_detection: NoDetectionPolicy::HoldPrevious,
            ..TrackerConfig::default()
        };
        let mut tracker = warmed_tracker(config, &background);
        assert_eq!(tracker.track(&background).vertical_position, 24);

        let seen = tracker.track(&with_patch(&background, 20, 24, 12));
        assert_eq!(seen.vertical_position, 30);

        // Patch disappears: the model still remembers the plain background
        let gone = tracker.track(&background);
        assert!(!gone.has_detection);
        assert_eq!(gone.vertical_position, 30);
    }

    #[test]
    fn test_poll_propagates_capture_failure() {
        let mut tracker = MotionTracker::new(TrackerConfig::default()).expect("valid config");
        let mut empty: std::collections::VecDeque<Frame> = Default::default();
        assert!(matches!(
            tracker.poll(&mut empty),
            Err(TrackerError::CaptureFailure(_))
        ));
    }
}
