/// Game tuning parameters for Hand Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_INSET: f32 = 30.0; // distance of paddle x from the right edge
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 10.0; // pixels per tick at velocity factor 1

    // Ball
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_SPEED_INITIAL: f32 = 7.0; // pixels per tick
    pub const BALL_SPEED_MULTIPLIER: f32 = 1.25; // Multiply speed on paddle hit (uncapped)

    // Control
    pub const MOVE_PIXEL_BUFFER: i32 = 25; // Dead zone half-height in camera pixels

    // Loop
    pub const TICK_RATE: u32 = 30; // ticks per second
    pub const RNG_SEED: u64 = 12345;
}
