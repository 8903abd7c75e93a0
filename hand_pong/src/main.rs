//! Hand Pong - webcam hand tracking drives a single Pong paddle.

use hand_pong::cli::Cli;
use hand_pong::config::{AppConfig, DisplayConfig};
use hand_pong::render::Renderer;
use hand_pong::{open_audio, open_source, CanvasRenderer, GameError, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let source = open_source(&config.capture)?;
    let renderer = open_renderer(&config.display)?;
    let audio = open_audio(&config.audio);

    let mut session = Session::new(&config, source, renderer, audio)?;
    match session.run(cli.max_ticks) {
        Ok(summary) => {
            info!("Final score: {}", summary.score);
            Ok(())
        }
        Err(e) => {
            let summary = session.summary();
            if e.is_capture_failure() {
                error!("Capture stopped after {} ticks: {}", summary.ticks, e);
            } else {
                error!("Session failed after {} ticks: {}", summary.ticks, e);
            }
            Err(e.into())
        }
    }
}

/// A window when one is available and nothing is being recorded, the canvas otherwise
fn open_renderer(display: &DisplayConfig) -> Result<Box<dyn Renderer>, GameError> {
    #[cfg(feature = "camera")]
    if display.record_dir.is_none() {
        return Ok(Box::new(hand_pong::render::HighGuiRenderer::new(display)?));
    }

    Ok(Box::new(CanvasRenderer::new(display)?))
}
