use crate::config::AudioConfig;
use thiserror::Error;
use tracing::{info, warn};

/// Something worth a sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Ball hit the paddle
    Bounce,
    /// A point was scored and the ball re-served
    Score,
}

/// Audio failures never affect the game; callers log and carry on
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Device(String),

    #[error("failed to load clip {path}: {reason}")]
    Clip {
        path: std::path::PathBuf,
        reason: String,
    },

    #[error("playback failed: {0}")]
    Playback(String),
}

pub trait AudioSink {
    fn play(&mut self, event: SoundEvent) -> Result<(), AudioError>;
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _event: SoundEvent) -> Result<(), AudioError> {
        Ok(())
    }
}

#[cfg(feature = "audio")]
pub use rodio_sink::RodioAudio;

#[cfg(feature = "audio")]
mod rodio_sink {
    use super::{AudioError, AudioSink, SoundEvent};
    use crate::config::AudioConfig;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        bounce: Arc<[u8]>,
        score: Arc<[u8]>,
    }

    fn read_clip(path: &Path) -> Result<Arc<[u8]>, AudioError> {
        std::fs::read(path)
            .map(Arc::from)
            .map_err(|e| AudioError::Clip {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    impl RodioAudio {
        pub fn new(config: &AudioConfig) -> Result<Self, AudioError> {
            let bounce = read_clip(&config.bounce_clip)?;
            let score = read_clip(&config.score_clip)?;
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                bounce,
                score,
            })
        }
    }

    impl AudioSink for RodioAudio {
        fn play(&mut self, event: SoundEvent) -> Result<(), AudioError> {
            let clip = match event {
                SoundEvent::Bounce => self.bounce.clone(),
                SoundEvent::Score => self.score.clone(),
            };
            let sink =
                Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))?;
            let source =
                Decoder::new(Cursor::new(clip)).map_err(|e| AudioError::Playback(e.to_string()))?;
            sink.append(source);
            sink.detach();
            Ok(())
        }
    }
}

/// Pick the audio backend; any failure falls back to silence
pub fn open_audio(config: &AudioConfig) -> Box<dyn AudioSink> {
    if !config.enabled {
        info!("Audio disabled");
        return Box::new(SilentAudio);
    }

    #[cfg(feature = "audio")]
    {
        match RodioAudio::new(config) {
            Ok(audio) => {
                info!("Audio output ready");
                return Box::new(audio);
            }
            Err(e) => warn!("Audio unavailable, continuing silently: {}", e),
        }
    }

    #[cfg(not(feature = "audio"))]
    warn!("Built without the audio feature, continuing silently");

    Box::new(SilentAudio)
}
