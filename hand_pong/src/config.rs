//! Application configuration, loaded from TOML with per-section defaults.

use crate::error::GameError;
use game_core::Config as GameConfig;
use hand_tracker::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "hand_pong.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Camera index, used when no frame directory is given
    pub device: i32,
    /// Replay still images from this directory instead of a camera
    pub frames_dir: Option<PathBuf>,
    /// Longest wait for a frame before the session is ended
    pub timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: 0,
            frames_dir: None,
            timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target ticks per second; 0 runs unpaced
    pub tick_rate: u32,
    pub window_title: String,
    pub background: [u8; 3],
    pub text_color: [u8; 3],
    pub ball_color: [u8; 3],
    /// Camera overlay size relative to the captured frame
    pub overlay_scale: f32,
    /// Camera overlay alpha, 0 transparent to 255 opaque
    pub overlay_opacity: u8,
    /// Write rendered frames as PNG into this directory
    pub record_dir: Option<PathBuf>,
    /// Keep every Nth rendered frame when recording
    pub record_every: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_rate: game_core::Params::TICK_RATE,
            window_title: "Hand Pong".to_string(),
            background: [0, 0, 0],
            text_color: [255, 255, 255],
            ball_color: [255, 255, 255],
            overlay_scale: 0.5,
            overlay_opacity: 75,
            record_dir: None,
            record_every: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub bounce_clip: PathBuf,
    pub score_clip: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bounce_clip: PathBuf::from("sounds/bounce.wav"),
            score_clip: PathBuf::from("sounds/beep.wav"),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let game = &self.game;
        if game.screen_width <= 0.0 || game.screen_height <= 0.0 {
            return Err(GameError::Config("screen size must be positive".into()));
        }
        if game.paddle_height > game.screen_height {
            return Err(GameError::Config(format!(
                "paddle_height {} exceeds screen_height {}",
                game.paddle_height, game.screen_height
            )));
        }
        if game.ball_speed_initial <= 0.0 || game.ball_speed_multiplier < 1.0 {
            return Err(GameError::Config(
                "ball speed must be positive and the multiplier at least 1".into(),
            ));
        }
        if game.move_pixel_buffer < 0 {
            return Err(GameError::Config("move_pixel_buffer must not be negative".into()));
        }
        if !(self.display.overlay_scale > 0.0 && self.display.overlay_scale <= 1.0) {
            return Err(GameError::Config(format!(
                "overlay_scale must be in (0, 1], got {}",
                self.display.overlay_scale
            )));
        }
        if self.display.record_every == 0 {
            return Err(GameError::Config("record_every must be at least 1".into()));
        }
        if self.capture.timeout_ms == 0 {
            return Err(GameError::Config("capture timeout must be positive".into()));
        }
        self.tracker.validate()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// `hand_pong.toml` in the working directory if present, built-in defaults otherwise
    pub fn load_default() -> Result<Self, GameError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String, GameError> {
        toml::to_string_pretty(self).map_err(|e| GameError::Config(e.to_string()))
    }
}
