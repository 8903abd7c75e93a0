use crate::control::ControlPolicy;
use crate::map::PlayField;
use crate::params::Params;
use serde::{Deserialize, Serialize};

/// What happens when the ball reaches the wall opposite the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeftWallBehavior {
    /// The left wall reflects the ball (single-paddle practice mode)
    #[default]
    Bounce,
    /// The left wall is a goal: reaching it scores for the player
    OpponentScores,
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub paddle_x: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_multiplier: f32,
    pub left_wall: LeftWallBehavior,
    pub move_pixel_buffer: i32,
    pub control_policy: ControlPolicy,
    pub rng_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: Params::SCREEN_WIDTH,
            screen_height: Params::SCREEN_HEIGHT,
            paddle_x: Params::SCREEN_WIDTH - Params::PADDLE_INSET,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_multiplier: Params::BALL_SPEED_MULTIPLIER,
            left_wall: LeftWallBehavior::default(),
            move_pixel_buffer: Params::MOVE_PIXEL_BUFFER,
            control_policy: ControlPolicy::default(),
            rng_seed: Params::RNG_SEED,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playing field bounds derived from the screen size
    pub fn field(&self) -> PlayField {
        PlayField::new(self.screen_width, self.screen_height)
    }
}
