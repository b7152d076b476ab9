use glam::Vec3;
use log::debug;

use crate::chain::{Chain, IkStep};

/// Default distance a target moves per nudge.
pub const DEFAULT_NUDGE_STEP: f32 = 0.05;

/// Direction of a target nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetNudge {
    /// -Z
    Forward,
    /// +Z
    Backward,
    /// -X
    Left,
    /// +X
    Right,
    /// +Y
    Up,
    /// -Y
    Down,
}

impl TargetNudge {
    /// Gets the unit direction of the nudge.
    #[inline]
    pub fn direction(self) -> Vec3 {
        return match self {
            TargetNudge::Forward => Vec3::NEG_Z,
            TargetNudge::Backward => Vec3::Z,
            TargetNudge::Left => Vec3::NEG_X,
            TargetNudge::Right => Vec3::X,
            TargetNudge::Up => Vec3::Y,
            TargetNudge::Down => Vec3::NEG_Y,
        };
    }
}

///
/// Host loop state for a chain tracking a target.
///
/// Holds the target position and the pause flag, nothing of the chain itself.
/// While paused, frames still refresh world matrices but never correct poses,
/// so the chain keeps its last configuration.
///
#[derive(Debug, Clone)]
pub struct Tracker {
    target: Vec3,
    paused: bool,
    nudge_step: f32,
}

impl Tracker {
    pub fn new(target: Vec3) -> Tracker {
        return Tracker {
            target,
            paused: false,
            nudge_step: DEFAULT_NUDGE_STEP,
        };
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        return self.target;
    }

    #[inline]
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    #[inline]
    pub fn paused(&self) -> bool {
        return self.paused;
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flips the pause flag, returns the new value.
    #[inline]
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        return self.paused;
    }

    #[inline]
    pub fn nudge_step(&self) -> f32 {
        return self.nudge_step;
    }

    #[inline]
    pub fn set_nudge_step(&mut self, nudge_step: f32) {
        self.nudge_step = nudge_step;
    }

    /// Moves the target by `nudge_step` toward `nudge`, returns the new target.
    pub fn nudge(&mut self, nudge: TargetNudge) -> Vec3 {
        self.target += nudge.direction() * self.nudge_step;
        debug!("Target location: {}, {}, {}", self.target.x, self.target.y, self.target.z);
        return self.target;
    }

    /// Runs one frame: `chain.update()`, then `chain.move_toward()` unless
    /// paused. Returns `None` while paused.
    pub fn frame(&self, chain: &mut Chain) -> Option<IkStep> {
        chain.update();
        if self.paused {
            return None;
        }
        return Some(chain.move_toward(self.target));
    }
}
