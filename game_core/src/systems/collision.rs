use crate::{Ball, Config, Events, GameRng, Paddle, PaddleColor, Score};
use hecs::World;
use rand::seq::SliceRandom;

/// Check the ball against the paddle and apply a hit.
///
/// Every hit speeds the ball up, scores a point and re-rolls the paddle color.
/// There is no cooldown: a ball still overlapping next tick is hit again.
pub fn check_paddle_hits(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Collect paddle rects without holding borrows
    let paddles: Vec<(hecs::Entity, crate::Aabb, f32)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(e, p)| (e, p.rect(), p.x))
        .collect();

    for (entity, paddle_rect, paddle_x) in paddles {
        let mut hit = false;
        for (_e, ball) in world.query_mut::<&mut Ball>() {
            if ball.rect().intersects(&paddle_rect) {
                ball.hit(paddle_x, config.ball_speed_multiplier);
                hit = true;
            }
        }

        if hit {
            score.increment();
            events.ball_hit_paddle = true;

            if let Ok(mut paddle) = world.get::<&mut Paddle>(entity) {
                if let Some(color) = PaddleColor::ALL.choose(&mut rng.0) {
                    paddle.color = *color;
                }
            }
        }
    }
}
