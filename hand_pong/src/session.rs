use crate::audio::{AudioSink, SoundEvent};
use crate::config::AppConfig;
use crate::error::GameError;
use crate::render::{Renderer, Scene};
use game_core::{
    create_ball, create_paddle, step, Ball, Config, ControlInput, ControlMapper, Events, GameRng,
    Paddle, Score,
};
use hand_tracker::{FrameSource, MotionTracker};
use hecs::World;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Whether the loop should keep going after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Totals reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub ticks: u64,
    pub score: u32,
    pub paddle_hits: u32,
    pub points: u32,
}

/// One game: owns the world, the score and every collaborator.
///
/// Everything runs on the caller's thread; a tick is quit check, capture,
/// track, map, physics, present, audio.
pub struct Session {
    world: World,
    config: Config,
    score: Score,
    events: Events,
    rng: GameRng,
    tracker: MotionTracker,
    mapper: ControlMapper,
    source: Box<dyn FrameSource>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
    tick_period: Option<Duration>,
    summary: SessionSummary,
}

impl Session {
    pub fn new(
        app: &AppConfig,
        source: Box<dyn FrameSource>,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self, GameError> {
        let config = app.game.clone();
        let tracker = MotionTracker::new(app.tracker)?;
        let mut world = World::new();
        create_paddle(&mut world, &config);
        create_ball(&mut world, config.field().center(), &config);

        let tick_period = match app.display.tick_rate {
            0 => None,
            rate => Some(Duration::from_secs_f64(1.0 / rate as f64)),
        };

        Ok(Self {
            mapper: ControlMapper::from_config(&config),
            rng: GameRng::new(config.rng_seed),
            world,
            config,
            score: Score::new(),
            events: Events::new(),
            tracker,
            source,
            renderer,
            audio,
            tick_period,
            summary: SessionSummary::default(),
        })
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score.points,
            ..self.summary
        }
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)
    }

    pub fn paddle(&self) -> Option<Paddle> {
        self.world.query::<&Paddle>().iter().next().map(|(_e, paddle)| *paddle)
    }

    /// Run one tick. A capture failure ends the session with an error.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.renderer.quit_requested() {
            info!("Quit requested");
            return Ok(TickOutcome::Quit);
        }

        let tracked = self.tracker.poll(self.source.as_mut())?;
        let velocity = self
            .mapper
            .velocity(tracked.vertical_position, tracked.frame_height);

        step(
            &mut self.world,
            &self.config,
            &ControlInput::new(velocity),
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        );

        let scene = Scene::compose(&self.world, &self.config, &self.score, Some(tracked.annotated));
        self.renderer.present(&scene)?;

        if self.events.ball_hit_paddle {
            self.summary.paddle_hits += 1;
            self.play(SoundEvent::Bounce);
        }
        if self.events.ball_reset {
            self.summary.points += 1;
            self.play(SoundEvent::Score);
        }

        self.summary.ticks += 1;
        debug!(
            tick = self.summary.ticks,
            position = tracked.vertical_position,
            detected = tracked.has_detection,
            velocity,
            score = self.score.points,
            "Tick"
        );
        Ok(TickOutcome::Continue)
    }

    fn play(&mut self, event: SoundEvent) {
        if let Err(e) = self.audio.play(event) {
            warn!("Could not play {:?}: {}", event, e);
        }
    }

    /// Tick until quit, `max_ticks`, or an error. Slow ticks are not caught up.
    pub fn run(&mut self, max_ticks: Option<u64>) -> Result<SessionSummary, GameError> {
        info!(
            "Session started ({})",
            match self.tick_period {
                Some(period) => format!("{:.1} ms per tick", period.as_secs_f64() * 1000.0),
                None => "unpaced".to_string(),
            }
        );

        loop {
            if max_ticks.is_some_and(|max| self.summary.ticks >= max) {
                info!("Tick limit reached");
                break;
            }

            let started = Instant::now();
            if self.tick()? == TickOutcome::Quit {
                break;
            }

            if let Some(period) = self.tick_period {
                let elapsed = started.elapsed();
                if elapsed < period {
                    std::thread::sleep(period - elapsed);
                } else {
                    debug!("Tick overran by {:?}", elapsed - period);
                }
            }
        }

        let summary = self.summary();
        info!(
            "Session over after {} ticks: score {}, {} paddle hits, {} points",
            summary.ticks, summary.score, summary.paddle_hits, summary.points
        );
        Ok(summary)
    }
}
