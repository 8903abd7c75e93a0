use crate::{Ball, Config, Events, Score};
use hecs::World;

/// Apply the score delta of this tick's ball outcome and re-serve after a point
pub fn check_scoring(world: &mut World, config: &Config, score: &mut Score, events: &mut Events) {
    if !events.outcome.is_point() {
        return;
    }

    score.apply(events.outcome);

    let field = config.field();
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(&field, config.ball_speed_initial);
    }
    events.ball_reset = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, BallOutcome, Sign};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Score, Events) {
        (World::new(), Config::new(), Score::new(), Events::new())
    }

    #[test]
    fn test_opponent_scoring_costs_a_point_and_resets() {
        let (mut world, config, mut score, mut events) = setup_world();
        score.points = 3;
        let ball = create_ball(&mut world, Vec2::new(895.0, 120.0), &config);
        {
            let mut b = world.get::<&mut Ball>(ball).expect("ball exists");
            b.speed = 17.0;
        }
        events.outcome = BallOutcome::OpponentScored;

        check_scoring(&mut world, &config, &mut score, &mut events);

        assert_eq!(score.points, 2);
        assert!(events.ball_reset);
        let b = world.get::<&Ball>(ball).expect("ball exists");
        assert_eq!(b.pos, Vec2::new(450.0, 300.0));
        assert_eq!(b.speed, 7.0);
        assert_eq!(b.x_fac, Sign::Minus, "Serve switches direction");
    }

    #[test]
    fn test_opponent_scoring_at_zero_stays_zero() {
        let (mut world, config, mut score, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(895.0, 120.0), &config);
        events.outcome = BallOutcome::OpponentScored;

        check_scoring(&mut world, &config, &mut score, &mut events);

        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_player_scoring_adds_a_point() {
        let (mut world, config, mut score, mut events) = setup_world();
        create_ball(&mut world, Vec2::new(5.0, 120.0), &config);
        events.outcome = BallOutcome::PlayerScored;

        check_scoring(&mut world, &config, &mut score, &mut events);

        assert_eq!(score.points, 1);
        assert!(events.ball_reset);
    }

    #[test]
    fn test_no_scoring_when_ball_in_play() {
        let (mut world, config, mut score, mut events) = setup_world();
        let ball = create_ball(&mut world, Vec2::new(300.0, 120.0), &config);

        check_scoring(&mut world, &config, &mut score, &mut events);

        assert_eq!(score.points, 0);
        assert!(!events.ball_reset);
        assert_eq!(
            world.get::<&Ball>(ball).expect("ball exists").pos,
            Vec2::new(300.0, 120.0)
        );
    }
}
