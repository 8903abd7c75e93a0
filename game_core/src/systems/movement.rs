use crate::{Ball, Config, Events, Paddle, PaddleIntent};
use hecs::World;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, config: &Config) {
    let field = config.field();
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        paddle.update(intent.dir, &field);
    }
}

/// Advance the ball and record what happened at the walls
pub fn move_ball(world: &mut World, config: &Config, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let before = (ball.x_fac, ball.y_fac);
        events.outcome = ball.update(config);
        if (ball.x_fac, ball.y_fac) != before {
            events.ball_hit_wall = true;
        }
    }
}
