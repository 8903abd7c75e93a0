use crate::config::{Config, LeftWallBehavior};
use crate::map::{Aabb, PlayField};
use glam::Vec2;

/// Direction factor along one axis, always +1 or -1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn flip(&mut self) {
        *self = match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        };
    }

    pub fn factor(self) -> f32 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

/// Colors the paddle cycles through on hits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleColor {
    Red,
    Green,
    Blue,
    White,
}

impl PaddleColor {
    pub const ALL: [PaddleColor; 4] = [
        PaddleColor::Red,
        PaddleColor::Green,
        PaddleColor::Blue,
        PaddleColor::White,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            PaddleColor::Red => [255, 0, 0],
            PaddleColor::Green => [0, 255, 0],
            PaddleColor::Blue => [0, 0, 255],
            PaddleColor::White => [255, 255, 255],
        }
    }
}

/// Paddle component - the player's paddle on the right side
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub x: f32, // Left edge, fixed for the session
    pub y: f32, // Top edge (clamped to the field)
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: PaddleColor,
}

impl Paddle {
    pub fn new(config: &Config) -> Self {
        Self {
            x: config.paddle_x,
            y: 0.0,
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
            color: PaddleColor::Green,
        }
    }

    /// Move by `speed * velocity_factor` and clamp into the field
    pub fn update(&mut self, velocity_factor: i8, field: &PlayField) {
        self.y += self.speed * velocity_factor as f32;
        self.y = field.clamp_top(self.y, self.height);
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Result of advancing the ball one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallOutcome {
    #[default]
    InPlay,
    /// The ball got past the paddle on the right edge
    OpponentScored,
    /// The ball reached the left edge while it is a goal
    PlayerScored,
}

impl BallOutcome {
    pub fn is_point(self) -> bool {
        self != BallOutcome::InPlay
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub x_fac: Sign,
    pub y_fac: Sign,
}

impl Ball {
    pub fn new(pos: Vec2, config: &Config) -> Self {
        Self {
            pos,
            radius: config.ball_radius,
            speed: config.ball_speed_initial,
            x_fac: Sign::Plus,
            y_fac: Sign::Minus,
        }
    }

    /// Advance one tick and report whether a point ended.
    ///
    /// Top/bottom contact only reflects; the ball is not pushed back inside.
    pub fn update(&mut self, config: &Config) -> BallOutcome {
        self.pos.x += self.speed * self.x_fac.factor();
        self.pos.y += self.speed * self.y_fac.factor();

        if self.pos.y <= self.radius || self.pos.y >= config.screen_height - self.radius {
            self.y_fac.flip();
        }

        if self.pos.x <= self.radius {
            match config.left_wall {
                LeftWallBehavior::Bounce => {
                    self.x_fac.flip();
                    BallOutcome::InPlay
                }
                LeftWallBehavior::OpponentScores => BallOutcome::PlayerScored,
            }
        } else if self.pos.x >= config.screen_width - self.radius {
            BallOutcome::OpponentScored
        } else {
            BallOutcome::InPlay
        }
    }

    /// Speed up and reflect after touching the paddle at `paddle_x`
    pub fn hit(&mut self, paddle_x: f32, speed_multiplier: f32) {
        self.speed *= speed_multiplier;
        // Paddle behind the ball means it was clipped by the paddle's end
        if paddle_x < self.pos.x {
            self.y_fac.flip();
        } else {
            self.x_fac.flip();
        }
    }

    /// Back to the middle, serving the other way at base speed
    pub fn reset(&mut self, field: &PlayField, base_speed: f32) {
        self.pos = field.center();
        self.x_fac.flip();
        self.speed = base_speed;
    }

    pub fn rect(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }
}

/// Velocity factor applied to the paddle this tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: i8, // -2..=2, negative = up
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}
