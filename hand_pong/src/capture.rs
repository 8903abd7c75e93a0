//! Frame sources for a session: replayed image directories, live cameras and the
//! timeout wrapper that keeps a stalled device from hanging the game loop.

use crate::config::CaptureConfig;
use crate::error::GameError;
use hand_tracker::{Frame, FrameSource, ImageSequence, TrackerError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Reads frames on a dedicated thread so the loop can give up after `timeout`.
///
/// The reader hands frames over one at a time and holds at most one frame
/// the consumer has not taken. Dropping the wrapper stops the reader and waits
/// up to `timeout` for it to release the device.
pub struct TimedSource {
    frames: Receiver<Result<Frame, TrackerError>>,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
    timeout: Duration,
}

impl TimedSource {
    pub fn spawn<S>(mut source: S, timeout: Duration) -> Result<Self, GameError>
    where
        S: FrameSource + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(0);
        let stop = Arc::new(AtomicBool::new(false));
        let stopped = stop.clone();
        let reader = thread::Builder::new()
            .name("frame-reader".into())
            .spawn(move || {
                while !stopped.load(Ordering::Relaxed) {
                    let frame = source.next_frame();
                    let failed = frame.is_err();
                    if tx.send(frame).is_err() || failed {
                        break;
                    }
                }
                debug!("Frame reader stopping");
            })?;
        Ok(Self {
            frames: rx,
            stop,
            reader: Some(reader),
            timeout,
        })
    }
}

impl Drop for TimedSource {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // Unblock a reader waiting in `send`
        let (_, closed) = mpsc::sync_channel(0);
        drop(std::mem::replace(&mut self.frames, closed));

        let Some(reader) = self.reader.take() else {
            return;
        };
        let deadline = Instant::now() + self.timeout;
        while !reader.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        if !reader.is_finished() {
            warn!(
                "Frame reader still busy after {} ms, leaving it behind",
                self.timeout.as_millis()
            );
        } else if reader.join().is_err() {
            warn!("Frame reader panicked");
        }
    }
}

impl FrameSource for TimedSource {
    fn next_frame(&mut self) -> Result<Frame, TrackerError> {
        match self.frames.recv_timeout(self.timeout) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => Err(TrackerError::CaptureFailure(format!(
                "no frame within {} ms",
                self.timeout.as_millis()
            ))),
            Err(RecvTimeoutError::Disconnected) => Err(TrackerError::CaptureFailure(
                "frame reader stopped".into(),
            )),
        }
    }
}

/// Open the configured frame source, wrapped in a [`TimedSource`]
pub fn open_source(config: &CaptureConfig) -> Result<Box<dyn FrameSource>, GameError> {
    let timeout = Duration::from_millis(config.timeout_ms);

    if let Some(dir) = &config.frames_dir {
        let sequence = ImageSequence::new(dir)?;
        if sequence.is_empty() {
            return Err(GameError::Config(format!(
                "no image frames found in {}",
                dir.display()
            )));
        }
        return Ok(Box::new(TimedSource::spawn(sequence, timeout)?));
    }

    #[cfg(feature = "camera")]
    {
        let camera = camera::OpenCvCamera::open(config.device)?;
        info!("Opened camera {}", config.device);
        Ok(Box::new(TimedSource::spawn(camera, timeout)?))
    }

    #[cfg(not(feature = "camera"))]
    {
        info!("Camera {} requested without camera support", config.device);
        Err(GameError::Config(
            "built without the camera feature; replay frames with --frames <dir>".into(),
        ))
    }
}

#[cfg(feature = "camera")]
pub mod camera {
    use hand_tracker::{Frame, FrameSource, TrackerError};
    use opencv::{
        core::Mat,
        imgproc,
        prelude::*,
        videoio::{self, VideoCapture},
    };

    fn capture_error(e: opencv::Error) -> TrackerError {
        TrackerError::CaptureFailure(e.to_string())
    }

    /// Live webcam through OpenCV's video I/O
    pub struct OpenCvCamera {
        cap: VideoCapture,
        bgr: Mat,
        rgb: Mat,
    }

    impl OpenCvCamera {
        pub fn open(index: i32) -> Result<Self, TrackerError> {
            let cap = VideoCapture::new(index, videoio::CAP_ANY).map_err(capture_error)?;
            if !cap.is_opened().map_err(capture_error)? {
                return Err(TrackerError::CaptureFailure(format!(
                    "camera {} could not be opened",
                    index
                )));
            }
            Ok(Self {
                cap,
                bgr: Mat::default(),
                rgb: Mat::default(),
            })
        }
    }

    impl FrameSource for OpenCvCamera {
        fn next_frame(&mut self) -> Result<Frame, TrackerError> {
            let grabbed = self.cap.read(&mut self.bgr).map_err(capture_error)?;
            if !grabbed || self.bgr.empty() {
                return Err(TrackerError::CaptureFailure("camera returned no frame".into()));
            }
            imgproc::cvt_color(&self.bgr, &mut self.rgb, imgproc::COLOR_BGR2RGB, 0)
                .map_err(capture_error)?;
            let width = self.rgb.cols() as u32;
            let height = self.rgb.rows() as u32;
            let bytes = self.rgb.data_bytes().map_err(capture_error)?.to_vec();
            Frame::from_raw(width, height, bytes).ok_or_else(|| {
                TrackerError::CaptureFailure("camera frame has an unexpected layout".into())
            })
        }
    }

    impl Drop for OpenCvCamera {
        fn drop(&mut self) {
            let _ = self.cap.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    struct CountingDevice {
        pulled: Arc<AtomicUsize>,
    }

    impl FrameSource for CountingDevice {
        fn next_frame(&mut self) -> Result<Frame, TrackerError> {
            self.pulled.fetch_add(1, Ordering::SeqCst);
            Ok(Frame::new(2, 2))
        }
    }

    struct SlowDevice {
        released: Arc<AtomicBool>,
    }

    impl FrameSource for SlowDevice {
        fn next_frame(&mut self) -> Result<Frame, TrackerError> {
            thread::sleep(Duration::from_millis(100));
            Ok(Frame::new(2, 2))
        }
    }

    impl Drop for SlowDevice {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    struct StalledSource;

    impl FrameSource for StalledSource {
        fn next_frame(&mut self) -> Result<Frame, TrackerError> {
            thread::sleep(Duration::from_millis(500));
            Ok(Frame::new(2, 2))
        }
    }

    #[test]
    fn test_timed_source_passes_frames_through() {
        let frames: VecDeque<Frame> = (0..3).map(|i| Frame::new(4, 2 + i)).collect();
        let mut source = TimedSource::spawn(frames, Duration::from_secs(2)).expect("spawn");
        for i in 0..3 {
            assert_eq!(source.next_frame().expect("frame").height(), 2 + i);
        }
        assert!(matches!(
            source.next_frame(),
            Err(TrackerError::CaptureFailure(_))
        ));
        // Reader has stopped after the failure
        assert!(matches!(
            source.next_frame(),
            Err(TrackerError::CaptureFailure(_))
        ));
    }

    #[test]
    fn test_timed_source_times_out() {
        let mut source =
            TimedSource::spawn(StalledSource, Duration::from_millis(20)).expect("spawn");
        match source.next_frame() {
            Err(TrackerError::CaptureFailure(msg)) => assert!(msg.contains("20 ms")),
            other => panic!("expected timeout, got {:?}", other.map(|f| f.dimensions())),
        }
    }

    #[test]
    fn test_reader_holds_at_most_one_frame() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let mut source = TimedSource::spawn(
            CountingDevice {
                pulled: pulled.clone(),
            },
            Duration::from_secs(2),
        )
        .expect("spawn");

        thread::sleep(Duration::from_millis(100));
        assert_eq!(pulled.load(Ordering::SeqCst), 1);

        source.next_frame().expect("frame");
        thread::sleep(Duration::from_millis(100));
        assert_eq!(pulled.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_releases_device() {
        let released = Arc::new(AtomicBool::new(false));
        let mut source = TimedSource::spawn(
            SlowDevice {
                released: released.clone(),
            },
            Duration::from_secs(2),
        )
        .expect("spawn");
        source.next_frame().expect("frame");

        // Reader is mid-read when the session lets go
        drop(source);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_gives_up_on_stalled_device() {
        let source = TimedSource::spawn(StalledSource, Duration::from_millis(20)).expect("spawn");
        let started = Instant::now();
        drop(source);
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn test_open_source_rejects_empty_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = CaptureConfig {
            frames_dir: Some(dir.path().to_path_buf()),
            ..CaptureConfig::default()
        };
        assert!(matches!(open_source(&config), Err(GameError::Config(_))));
    }
}
