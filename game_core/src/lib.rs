pub mod components;
pub mod config;
pub mod control;
pub mod map;
pub mod params;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use control::*;
pub use map::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one deterministic tick of the Hand Pong simulation
pub fn step(
    world: &mut World,
    config: &Config,
    control: &ControlInput,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Ingest the control signal (apply to paddle intents)
    ingest_control(world, control);

    // 2. Ball vs paddle, against last tick's positions
    check_paddle_hits(world, config, score, events, rng);

    // 3. Move paddle based on intent
    move_paddles(world, config);

    // 4. Move ball, bounce off walls
    move_ball(world, config, events);

    // 5. Score and re-serve if the ball left the field
    check_scoring(world, config, score, events);
}

/// Helper to create the paddle entity
pub fn create_paddle(world: &mut World, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(config), PaddleIntent::new()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, config: &Config) -> hecs::Entity {
    world.spawn((Ball::new(pos, config),))
}
