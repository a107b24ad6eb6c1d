//! Lane geometry and player selection
//!
//! Four lanes sit at the corners of a 2x2 grid inside the tunnel. Entities and
//! the player reference lanes by index only; the anchor positions exist for
//! renderers. Directional navigation is relative to the current lane (left
//! from a left-column lane is a no-op, never a wrap), while pointer input maps
//! an absolute surface quadrant to a lane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LANE_COUNT, LANE_RADIUS, SELECT_SMOOTHING};

/// One of the four fixed lanes.
///
/// Index layout matches the reference quadrants: 0 = top-left, 1 =
/// bottom-left, 2 = top-right, 3 = bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane(u8);

/// Vertical half of the grid a lane sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Row {
    Top,
    Bottom,
}

/// Horizontal half of the grid a lane sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Left,
    Right,
}

/// Relative navigation direction (arrow keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Lane {
    pub const TOP_LEFT: Lane = Lane(0);
    pub const BOTTOM_LEFT: Lane = Lane(1);
    pub const TOP_RIGHT: Lane = Lane(2);
    pub const BOTTOM_RIGHT: Lane = Lane(3);

    /// Build a lane from an untrusted index, clamping into `0..LANE_COUNT`.
    pub fn from_index(index: usize) -> Self {
        Lane(index.min(LANE_COUNT - 1) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> Row {
        match self.0 {
            0 | 2 => Row::Top,
            _ => Row::Bottom,
        }
    }

    pub fn column(self) -> Column {
        match self.0 {
            0 | 1 => Column::Left,
            _ => Column::Right,
        }
    }

    /// World-space anchor position for renderers.
    pub fn anchor(self) -> Vec2 {
        let x = match self.column() {
            Column::Left => -LANE_RADIUS,
            Column::Right => LANE_RADIUS,
        };
        let y = match self.row() {
            Row::Top => LANE_RADIUS,
            Row::Bottom => -LANE_RADIUS,
        };
        Vec2::new(x, y)
    }

    /// Move one step in `direction`, staying on the same row (left/right) or
    /// column (up/down). Already at the edge is a no-op.
    pub fn navigate(self, direction: Direction) -> Lane {
        match direction {
            Direction::Left => match self {
                Lane::TOP_RIGHT => Lane::TOP_LEFT,
                Lane::BOTTOM_RIGHT => Lane::BOTTOM_LEFT,
                other => other,
            },
            Direction::Right => match self {
                Lane::TOP_LEFT => Lane::TOP_RIGHT,
                Lane::BOTTOM_LEFT => Lane::BOTTOM_RIGHT,
                other => other,
            },
            Direction::Up => match self {
                Lane::BOTTOM_LEFT => Lane::TOP_LEFT,
                Lane::BOTTOM_RIGHT => Lane::TOP_RIGHT,
                other => other,
            },
            Direction::Down => match self {
                Lane::TOP_LEFT => Lane::BOTTOM_LEFT,
                Lane::TOP_RIGHT => Lane::BOTTOM_RIGHT,
                other => other,
            },
        }
    }

    /// Absolute quadrant selection for pointer/tap input: which quarter of a
    /// `width` x `height` input surface was touched.
    pub fn from_pointer(x: f32, y: f32, width: f32, height: f32) -> Lane {
        let left = x < width / 2.0;
        let top = y < height / 2.0;
        match (left, top) {
            (true, true) => Lane::TOP_LEFT,
            (true, false) => Lane::BOTTOM_LEFT,
            (false, true) => Lane::TOP_RIGHT,
            (false, false) => Lane::BOTTOM_RIGHT,
        }
    }
}

/// Player lane selection: an authoritative target plus a smoothed visual
/// position for renderers.
///
/// Collision resolution reads only the target. The visual position eases
/// toward the target anchor once per simulated frame and freezes with the
/// rest of the simulation while paused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    target: Lane,
    visual: Vec2,
}

impl Selection {
    pub fn new(lane: Lane) -> Self {
        Self {
            target: lane,
            visual: lane.anchor(),
        }
    }

    pub fn target(&self) -> Lane {
        self.target
    }

    pub fn visual(&self) -> Vec2 {
        self.visual
    }

    pub fn set_target(&mut self, lane: Lane) {
        self.target = lane;
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.target = self.target.navigate(direction);
    }

    /// One frame of easing toward the target anchor.
    pub fn smooth(&mut self) {
        self.visual = self.visual.lerp(self.target.anchor(), SELECT_SMOOTHING);
    }
}
