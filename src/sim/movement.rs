//! Rigid translation of the look frame with axis-separated sliding.
//!
//! ✔ eye and look-at move together, `up` never changes
//! ✔ a blocked step retries along X and along Z on their own
//! ✔ ground contact pins the eye to the floor

use glam::{Vec3, Vec3Swizzles};

use super::{Collider, WalkConfig};
use crate::world::{Pose, TileMap};

/// Translation requested by one input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// Displacement of length `speed` for `pose`.
    pub fn displacement(self, pose: &Pose, speed: f32) -> Vec3 {
        let forward = pose.forward();
        let unit = match self {
            Direction::Forward => forward,
            Direction::Backward => -forward,
            Direction::Left => pose.up().cross(forward).normalize_or_zero(),
            Direction::Right => forward.cross(pose.up()).normalize_or_zero(),
        };
        unit * speed
    }
}

/// Which branch a step committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Whole displacement applied.
    Full,
    /// Only the X component applied.
    SlideX,
    /// Only the Z component applied.
    SlideZ,
    /// Nothing applied (both axes blocked, or both clear).
    Blocked,
}

/// Resolved `(eye, at)` after one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub eye: Vec3,
    pub at: Vec3,
    pub outcome: MoveOutcome,
}

/// Resolve one step of `dir` at `speed` from `pose` against `map`.
///
/// Pure: the caller commits the returned eye/look-at.
pub fn step(
    pose: &Pose,
    map: &TileMap,
    collider: &Collider,
    cfg: &WalkConfig,
    dir: Direction,
    speed: f32,
) -> Step {
    let d = dir.displacement(pose, speed);
    let (old_eye, old_at) = (pose.eye(), pose.at());

    /* ----- 1. whole look frame, probed at the candidate eye ---------- */
    let mut eye = old_eye + d;
    let mut at = old_at + d;
    let contact = collider.query(map, eye.xz(), old_eye.y);

    if contact.below_ground() {
        eye.y = collider.ground;
        if dir == Direction::Forward {
            at.y = cfg.forward_ground_damping * old_at.y;
        }
    }

    if !contact.blocked_by_wall() {
        return Step {
            eye,
            at,
            outcome: MoveOutcome::Full,
        };
    }

    /* ----- 2. slide: each axis alone from the old pose --------------- */
    let dx = Vec3::new(d.x, 0.0, 0.0);
    let dz = Vec3::new(0.0, 0.0, d.z);
    // an axis the step doesn't move along offers nothing to slide on
    let x_blocked = d.x == 0.0
        || collider
            .query(map, (old_eye + dx).xz(), old_eye.y)
            .blocked_by_wall();
    let z_blocked = d.z == 0.0
        || collider
            .query(map, (old_eye + dz).xz(), old_eye.y)
            .blocked_by_wall();

    let (mut eye, at, outcome) = match (x_blocked, z_blocked) {
        (false, true) => (old_eye + dx, old_at + dx, MoveOutcome::SlideX),
        (true, false) => (old_eye + dz, old_at + dz, MoveOutcome::SlideZ),
        // both blocked, or a diagonal-only hit with both axes clear
        _ => (old_eye, old_at, MoveOutcome::Blocked),
    };
    if contact.below_ground() {
        eye.y = collider.ground;
    }

    Step { eye, at, outcome }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Tile, TileCoord};

    fn resolve(pose: &Pose, map: &TileMap, dir: Direction, speed: f32) -> Step {
        let cfg = WalkConfig::default();
        step(pose, map, &Collider::from(&cfg), &cfg, dir, speed)
    }

    fn near(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn strafe_axes_are_perpendicular_and_level() {
        let pose = Pose::default();
        let l = Direction::Left.displacement(&pose, 1.0);
        let r = Direction::Right.displacement(&pose, 1.0);
        assert!(near(l, Vec3::X));
        assert!(near(r, -Vec3::X));
        assert!(l.dot(pose.forward()).abs() < 1e-6);
    }

    #[test]
    fn open_floor_commits_full_step() {
        let pose = Pose::default();
        let s = resolve(&pose, &TileMap::default(), Direction::Forward, 0.2);
        assert_eq!(s.outcome, MoveOutcome::Full);
        assert!(near(s.eye, Vec3::new(0.0, 0.0, -3.7)));
        assert!(near(s.at, Vec3::new(0.0, 0.0, 10.2)));
    }

    #[test]
    fn slides_along_x_when_z_is_walled() {
        // under the stock wall (x ∈ [-2, -1], z ∈ [1, 2]), heading +X+Z
        let eye = Vec3::new(-1.5, 0.0, 0.75);
        let pose = Pose::new(eye, eye + Vec3::new(1.0, 0.0, 1.0), Vec3::Y).unwrap();
        let map = TileMap::default();
        let d = Direction::Forward.displacement(&pose, 0.2);

        let s = resolve(&pose, &map, Direction::Forward, 0.2);
        assert_eq!(s.outcome, MoveOutcome::SlideX);
        assert_eq!(s.eye, Vec3::new(eye.x + d.x, eye.y, eye.z));
        assert_eq!(s.at, pose.at() + Vec3::new(d.x, 0.0, 0.0));
    }

    #[test]
    fn slides_along_z_when_x_is_walled() {
        // west of the stock wall, heading +X+Z
        let eye = Vec3::new(-2.25, 0.0, 1.2);
        let pose = Pose::new(eye, eye + Vec3::new(1.0, 0.0, 1.0), Vec3::Y).unwrap();
        let s = resolve(&pose, &TileMap::default(), Direction::Forward, 0.2);
        assert_eq!(s.outcome, MoveOutcome::SlideZ);
        assert_eq!(s.eye.x, eye.x);
        assert!(s.eye.z > eye.z);
    }

    #[test]
    fn boxed_in_corner_does_not_move() {
        let mut map = TileMap::empty();
        for c in TileCoord::new(3, 3).neighbourhood() {
            if c != TileCoord::new(3, 3) {
                map.set(c, Tile::Wall);
            }
        }
        // tile (3, 3) spans [-1, 0]²; sit near its +X+Z corner
        let eye = Vec3::new(-0.25, 0.0, -0.25);
        let pose = Pose::new(eye, eye + Vec3::new(1.0, 0.0, 1.0), Vec3::Y).unwrap();

        let s = resolve(&pose, &map, Direction::Forward, 0.2);
        assert_eq!(s.outcome, MoveOutcome::Blocked);
        assert_eq!(s.eye, pose.eye());
        assert_eq!(s.at, pose.at());
    }

    #[test]
    fn below_ground_is_pinned_for_every_direction() {
        let eye = Vec3::new(0.0, -0.5, -3.0);
        let pose = Pose::new(eye, Vec3::new(0.0, -0.5, 10.0), Vec3::Y).unwrap();
        for dir in [
            Direction::Forward,
            Direction::Backward,
            Direction::Left,
            Direction::Right,
        ] {
            let s = resolve(&pose, &TileMap::default(), dir, 0.2);
            assert_eq!(s.eye.y, 0.0, "{dir:?}");
        }
    }

    #[test]
    fn only_forward_damps_look_height() {
        let eye = Vec3::new(0.0, -0.5, -3.0);
        let pose = Pose::new(eye, Vec3::new(0.0, 1.0, 10.0), Vec3::Y).unwrap();
        let map = TileMap::default();

        let fwd = resolve(&pose, &map, Direction::Forward, 0.2);
        assert!((fwd.at.y - 0.9).abs() < 1e-6);

        let back = resolve(&pose, &map, Direction::Backward, 0.2);
        let d = Direction::Backward.displacement(&pose, 0.2);
        assert!((back.at.y - (1.0 + d.y)).abs() < 1e-6);
    }

    #[test]
    fn below_ground_against_wall_still_pins_eye() {
        let eye = Vec3::new(-2.25, -0.5, 1.5);
        let pose = Pose::new(eye, eye + Vec3::X, Vec3::Y).unwrap();
        let s = resolve(&pose, &TileMap::default(), Direction::Forward, 0.2);
        assert_eq!(s.outcome, MoveOutcome::Blocked);
        assert_eq!(s.eye, Vec3::new(eye.x, 0.0, eye.z));
    }

    #[test]
    fn zero_speed_changes_nothing() {
        let pose = Pose::default();
        for dir in [
            Direction::Forward,
            Direction::Backward,
            Direction::Left,
            Direction::Right,
        ] {
            let s = resolve(&pose, &TileMap::default(), dir, 0.0);
            assert_eq!(s.outcome, MoveOutcome::Full);
            assert!(near(s.eye, pose.eye()));
            assert!(near(s.at, pose.at()));
        }
    }
}
