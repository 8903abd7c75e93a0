use crate::components::BallOutcome;

/// Player score: paddle hits minus misses, never below zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.points += 1;
    }

    /// Lose a point, floored at zero
    pub fn decrement(&mut self) {
        self.points = self.points.saturating_sub(1);
    }

    /// Apply the score delta of a ball outcome
    pub fn apply(&mut self, outcome: BallOutcome) {
        match outcome {
            BallOutcome::InPlay => {}
            BallOutcome::OpponentScored => self.decrement(),
            BallOutcome::PlayerScored => self.increment(),
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(crate::Params::RNG_SEED)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub outcome: BallOutcome,
    pub ball_reset: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
        self.outcome = BallOutcome::InPlay;
        self.ball_reset = false;
    }
}

/// Control signal for the upcoming tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub velocity: i8,
}

impl ControlInput {
    pub fn new(velocity: i8) -> Self {
        Self { velocity }
    }
}
