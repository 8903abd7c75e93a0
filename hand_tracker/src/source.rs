use crate::{Frame, TrackerError};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::info;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "ppm", "pgm", "tif", "tiff"];

/// Anything that can hand the tracker one frame at a time.
///
/// Returning an error ends the session; there are no retries.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame, TrackerError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Frame, TrackerError> {
        (**self).next_frame()
    }
}

/// In-memory frames, consumed front to back
impl FrameSource for VecDeque<Frame> {
    fn next_frame(&mut self) -> Result<Frame, TrackerError> {
        self.pop_front()
            .ok_or_else(|| TrackerError::CaptureFailure("frame queue exhausted".into()))
    }
}

/// Still images from a directory, played back in file name order
#[derive(Debug)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequence {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_image {
                paths.push(path);
            }
        }
        paths.sort();
        info!("Loaded {} frames from {}", paths.len(), dir.display());
        Ok(Self::from_paths(paths))
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths, next: 0 }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.paths.len() - self.next
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Frame, TrackerError> {
        let path = self.paths.get(self.next).ok_or_else(|| {
            TrackerError::CaptureFailure(format!(
                "end of image sequence after {} frames",
                self.next
            ))
        })?;
        let frame = image::open(path)
            .map_err(|source| TrackerError::Image {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        self.next += 1;
        Ok(frame)
    }
}
