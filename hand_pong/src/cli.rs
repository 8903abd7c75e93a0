//! Command-line interface

use crate::config::AppConfig;
use clap::{Parser, ValueEnum};
use game_core::{ControlPolicy, LeftWallBehavior};
use std::path::PathBuf;

/// Single-paddle Pong controlled by moving your hand in front of a webcam
#[derive(Parser, Debug)]
#[command(name = "hand_pong")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path (defaults to ./hand_pong.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replay still images from a directory instead of a camera
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// Camera device index
    #[arg(long)]
    pub device: Option<i32>,

    /// Stop after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Save rendered frames as PNG into this directory
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// What the wall opposite the paddle does
    #[arg(long, value_enum)]
    pub left_wall: Option<LeftWallArg>,

    /// How hand position maps to paddle speed
    #[arg(long, value_enum)]
    pub control: Option<ControlArg>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LeftWallArg {
    Bounce,
    OpponentScores,
}

impl From<LeftWallArg> for LeftWallBehavior {
    fn from(arg: LeftWallArg) -> Self {
        match arg {
            LeftWallArg::Bounce => LeftWallBehavior::Bounce,
            LeftWallArg::OpponentScores => LeftWallBehavior::OpponentScores,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ControlArg {
    Tiered,
    Simple,
}

impl From<ControlArg> for ControlPolicy {
    fn from(arg: ControlArg) -> Self {
        match arg {
            ControlArg::Tiered => ControlPolicy::Tiered,
            ControlArg::Simple => ControlPolicy::Simple,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Command-line flags win over the config file
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.frames {
            config.capture.frames_dir = Some(dir.clone());
        }
        if let Some(device) = self.device {
            config.capture.device = device;
        }
        if let Some(dir) = &self.record {
            config.display.record_dir = Some(dir.clone());
        }
        if let Some(left_wall) = self.left_wall {
            config.game.left_wall = left_wall.into();
        }
        if let Some(control) = self.control {
            config.game.control_policy = control.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "hand_pong",
            "--frames",
            "replay",
            "--left-wall",
            "opponent-scores",
            "--control",
            "simple",
            "--max-ticks",
            "90",
        ])
        .expect("valid args");
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.capture.frames_dir, Some(PathBuf::from("replay")));
        assert_eq!(config.game.left_wall, LeftWallBehavior::OpponentScores);
        assert_eq!(config.game.control_policy, ControlPolicy::Simple);
        assert_eq!(cli.max_ticks, Some(90));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["hand_pong", "-v"]).expect("valid args");
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(cli.verbose);
        assert_eq!(config.capture.frames_dir, None);
        assert_eq!(config.game.left_wall, LeftWallBehavior::Bounce);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(Cli::try_parse_from(["hand_pong", "--control", "turbo"]).is_err());
    }
}
