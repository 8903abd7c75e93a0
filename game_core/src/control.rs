use serde::{Deserialize, Serialize};

/// Largest velocity factor magnitude the mapper produces
pub const MAX_VELOCITY_FACTOR: i8 = 2;

/// How a tracked vertical position becomes a paddle velocity factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPolicy {
    /// Dead zone around the middle, normal speed beyond it, double speed near the edges
    #[default]
    Tiered,
    /// Dead zone around the middle, normal speed everywhere else
    Simple,
}

/// Map a vertical position in camera pixels to a velocity factor in [-2, 2].
///
/// Tiers are checked top to bottom and the first match wins, so the order of
/// the comparisons matters when the frame is short enough for tiers to overlap.
pub fn map_to_velocity(vertical_position: i32, frame_height: i32, buffer: i32) -> i8 {
    let middle = frame_height / 2;
    if vertical_position >= frame_height - buffer * 3 {
        2
    } else if vertical_position > middle + buffer {
        1
    } else if vertical_position <= buffer * 3 {
        -2
    } else if vertical_position < middle - buffer {
        -1
    } else {
        0
    }
}

/// Two-tier variant: only the dead zone and normal speed
pub fn map_to_velocity_simple(vertical_position: i32, frame_height: i32, buffer: i32) -> i8 {
    let middle = frame_height / 2;
    if vertical_position > middle + buffer {
        1
    } else if vertical_position < middle - buffer {
        -1
    } else {
        0
    }
}

/// Converts tracker output into the control signal for the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMapper {
    pub policy: ControlPolicy,
    pub buffer: i32,
}

impl ControlMapper {
    pub fn new(policy: ControlPolicy, buffer: i32) -> Self {
        Self { policy, buffer }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(config.control_policy, config.move_pixel_buffer)
    }

    pub fn velocity(&self, vertical_position: i32, frame_height: i32) -> i8 {
        match self.policy {
            ControlPolicy::Tiered => map_to_velocity(vertical_position, frame_height, self.buffer),
            ControlPolicy::Simple => {
                map_to_velocity_simple(vertical_position, frame_height, self.buffer)
            }
        }
    }
}
