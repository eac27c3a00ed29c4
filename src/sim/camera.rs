use glam::{Mat4, Vec3Swizzles};

use super::movement::{self, Direction, MoveOutcome};
use super::{Collider, CollisionReport, Command, WalkConfig, orient};
use crate::world::{Pose, TileMap};

/// First-person camera: an owned [`Pose`] plus the rules for moving it.
///
/// Every operation leaves the cached view matrix in sync with the pose.
/// The map is borrowed per call, so the host may edit it between events.
#[derive(Clone, Debug)]
pub struct Camera {
    pose: Pose,
    config: WalkConfig,
    collider: Collider,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Pose::default(), WalkConfig::default())
    }
}

impl Camera {
    /// A pose steeper than `config.pitch_limit` is tilted back to the limit.
    pub fn new(mut pose: Pose, config: WalkConfig) -> Self {
        let look = orient::clamp_elevation(pose.look(), pose.up(), config.pitch_limit);
        if look != pose.look() {
            log::warn!(
                "initial pitch {:.2}° clamped to the {}° limit",
                pose.pitch(),
                config.pitch_limit
            );
            pose.set_look(look);
        }
        Self {
            pose,
            collider: Collider::from(&config),
            config,
            view: pose.view_matrix(),
        }
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// View transform as of the last operation.
    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Publish the view transform for the current pose.
    #[inline]
    pub fn recompute_view(&mut self) {
        self.view = self.pose.view_matrix();
    }

    /// What the eye touches where it stands now.
    pub fn probe(&self, map: &TileMap) -> CollisionReport {
        let eye = self.pose.eye();
        self.collider.report(map, eye.xz(), eye.y)
    }

    /*──────────────────────── translation ───────────────────────────*/

    pub fn move_forward(&mut self, map: &TileMap, speed: f32) -> MoveOutcome {
        self.translate(map, Direction::Forward, speed)
    }

    pub fn move_backward(&mut self, map: &TileMap, speed: f32) -> MoveOutcome {
        self.translate(map, Direction::Backward, speed)
    }

    pub fn strafe_left(&mut self, map: &TileMap, speed: f32) -> MoveOutcome {
        self.translate(map, Direction::Left, speed)
    }

    pub fn strafe_right(&mut self, map: &TileMap, speed: f32) -> MoveOutcome {
        self.translate(map, Direction::Right, speed)
    }

    fn translate(&mut self, map: &TileMap, dir: Direction, speed: f32) -> MoveOutcome {
        let step = movement::step(&self.pose, map, &self.collider, &self.config, dir, speed);
        log::debug!(
            "{dir:?} {speed}: {:?} eye {} -> {}",
            step.outcome,
            self.pose.eye(),
            step.eye
        );
        self.pose.set(step.eye, step.at);
        self.recompute_view();
        step.outcome
    }

    /*──────────────────────── rotation ──────────────────────────────*/

    /// Turn left about `up` by `angle` degrees.
    pub fn pan_left(&mut self, angle: f32) {
        self.pan(angle);
    }

    /// Turn right about `up` by `angle` degrees.
    pub fn pan_right(&mut self, angle: f32) {
        self.pan(-angle);
    }

    /// Tilt up by `angle` degrees, stopping at the pitch limit.
    pub fn pitch_up(&mut self, angle: f32) {
        self.pitch(angle);
    }

    /// Tilt down by `angle` degrees, stopping at the pitch limit.
    pub fn pitch_down(&mut self, angle: f32) {
        self.pitch(-angle);
    }

    fn pan(&mut self, degrees: f32) {
        let look = orient::pan(self.pose.look(), self.pose.up(), degrees);
        self.pose.set_look(look);
        self.recompute_view();
    }

    fn pitch(&mut self, degrees: f32) {
        let (look, applied) = orient::pitch(
            self.pose.look(),
            self.pose.up(),
            degrees,
            self.config.pitch_limit,
        );
        if (applied - degrees).abs() > 1e-4 {
            log::warn!(
                "pitch {degrees}° clamped to {applied}° at the {}° limit",
                self.config.pitch_limit
            );
        }
        self.pose.set_look(look);
        self.recompute_view();
    }

    /*──────────────────────── dispatch ──────────────────────────────*/

    /// Run one input event, filling in configured defaults for missing
    /// amounts.  Returns the move outcome for translations.
    pub fn apply(&mut self, map: &TileMap, cmd: Command) -> Option<MoveOutcome> {
        let WalkConfig {
            move_speed,
            turn_angle,
            ..
        } = self.config;
        match cmd {
            Command::MoveForward(v) => Some(self.move_forward(map, v.unwrap_or(move_speed))),
            Command::MoveBackward(v) => Some(self.move_backward(map, v.unwrap_or(move_speed))),
            Command::StrafeLeft(v) => Some(self.strafe_left(map, v.unwrap_or(move_speed))),
            Command::StrafeRight(v) => Some(self.strafe_right(map, v.unwrap_or(move_speed))),
            Command::PanLeft(v) => {
                self.pan_left(v.unwrap_or(turn_angle));
                None
            }
            Command::PanRight(v) => {
                self.pan_right(v.unwrap_or(turn_angle));
                None
            }
            Command::PitchUp(v) => {
                self.pitch_up(v.unwrap_or(turn_angle));
                None
            }
            Command::PitchDown(v) => {
                self.pitch_down(v.unwrap_or(turn_angle));
                None
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
