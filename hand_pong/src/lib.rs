//! Hand Pong: a single-paddle Pong game steered by a hand waved in front of a
//! webcam.
//!
//! [`session::Session`] wires the motion tracker, the control mapper and the
//! game simulation to a frame source, a renderer and an audio sink.

pub mod audio;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use audio::{open_audio, AudioError, AudioSink, SilentAudio, SoundEvent};
pub use capture::{open_source, TimedSource};
pub use config::AppConfig;
pub use error::GameError;
pub use render::{CanvasRenderer, Renderer, Scene};
pub use session::{Session, SessionSummary, TickOutcome};
