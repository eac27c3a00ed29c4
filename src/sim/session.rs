use glam::{Vec2, Vec3, Vec3Swizzles};

use super::{Camera, Command, MoveOutcome};
use crate::world::{Tile, TileCoord, TileMap};

/// How far ahead of the eye block edits land, in world units.
const REACH: f32 = 1.0;

/// Circle in X/Z the walker is trying to reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal {
    pub centre: Vec2,
    pub radius: f32,
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            centre: Vec2::new(10.0, 4.0),
            radius: 3.0,
        }
    }
}

impl Goal {
    #[inline]
    pub fn reached_by(&self, eye: Vec3) -> bool {
        eye.xz().distance(self.centre) < self.radius
    }
}

/// What [`Session::apply`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Goal already reached; the event was dropped.
    Locked,
    /// A pan or pitch.
    Turned,
    Moved(MoveOutcome),
}

/// A camera walking one map.  Once the goal is reached the session locks
/// and ignores further input.
#[derive(Clone, Debug)]
pub struct Session {
    camera: Camera,
    map: TileMap,
    goal: Option<Goal>,
    won: bool,
}

impl Session {
    pub fn new(camera: Camera, map: TileMap) -> Self {
        Self {
            camera,
            map,
            goal: None,
            won: false,
        }
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = Some(goal);
        self
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Edit the map between events.
    #[inline]
    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    #[inline]
    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Tile one unit ahead of the eye in X/Z, if it lies on the grid.
    pub fn target_tile(&self) -> Option<TileCoord> {
        let pose = self.camera.pose();
        let ahead = pose.forward().xz().normalize_or_zero();
        if ahead == Vec2::ZERO {
            return None;
        }
        Some(TileCoord::containing(pose.eye().xz() + ahead * REACH)).filter(|c| c.in_bounds())
    }

    /// Place a wall on (`place`) or clear (`!place`) the target tile.
    /// A wall that would swallow the eye is refused.  Returns the tile
    /// that changed.
    pub fn edit_block(&mut self, place: bool) -> Option<TileCoord> {
        let target = self.target_tile()?;
        let tile = if place { Tile::Wall } else { Tile::Empty };
        let old = self.map.set(target, tile)?;
        if place && self.camera.probe(&self.map).blockers.contains(&target) {
            self.map.set(target, old);
            log::debug!("wall at ({}, {}) would overlap the eye", target.x, target.z);
            return None;
        }
        if old == tile {
            return None;
        }
        log::info!(
            "{} block at ({}, {})",
            if place { "placed" } else { "removed" },
            target.x,
            target.z
        );
        Some(target)
    }

    /// Feed one event.
    pub fn apply(&mut self, cmd: Command) -> Applied {
        if self.won {
            return Applied::Locked;
        }
        let applied = match self.camera.apply(&self.map, cmd) {
            Some(outcome) => Applied::Moved(outcome),
            None => Applied::Turned,
        };

        if let Some(goal) = &self.goal {
            if goal.reached_by(self.camera.pose().eye()) {
                log::info!("goal reached at {}", self.camera.pose().eye());
                self.won = true;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Pose;

    #[test]
    fn goal_locks_input() {
        let goal = Goal {
            centre: Vec2::new(0.0, -3.0),
            radius: 0.4,
        };
        let mut s = Session::new(Camera::default(), TileMap::default()).with_goal(goal);

        // start at z = -3.9, 0.9 away; inside after three steps
        let full = Applied::Moved(MoveOutcome::Full);
        assert_eq!(s.apply(Command::MoveForward(None)), full);
        assert!(!s.is_won());
        assert_eq!(s.apply(Command::MoveForward(None)), full);
        assert_eq!(s.apply(Command::MoveForward(None)), full);
        assert!(s.is_won());

        let eye = s.camera().pose().eye();
        assert_eq!(s.apply(Command::MoveForward(None)), Applied::Locked);
        assert_eq!(s.apply(Command::PanLeft(None)), Applied::Locked);
        assert_eq!(s.camera().pose().eye(), eye);
    }

    #[test]
    fn no_goal_never_locks() {
        let mut s = Session::new(Camera::default(), TileMap::empty());
        for _ in 0..100 {
            assert_ne!(s.apply(Command::MoveForward(None)), Applied::Locked);
        }
        assert_eq!(s.apply(Command::PitchUp(None)), Applied::Turned);
        assert!(!s.is_won());
    }

    #[test]
    fn default_goal_is_off_grid() {
        let g = Goal::default();
        assert!(!g.reached_by(Pose::default().eye()));
        assert!(g.reached_by(Vec3::new(8.0, 0.0, 4.0)));
    }

    #[test]
    fn edit_block_targets_tile_ahead() {
        // eye (0, -3.9) facing +Z: one unit ahead is (0, -2.9), tile (4, 1)
        let mut s = Session::new(Camera::default(), TileMap::empty());
        assert_eq!(s.target_tile(), Some(TileCoord::new(4, 1)));

        assert_eq!(s.edit_block(true), Some(TileCoord::new(4, 1)));
        assert_eq!(s.map().height_class_at(TileCoord::new(4, 1)), Some(Tile::Wall));
        assert_eq!(s.edit_block(true), None);

        assert_eq!(s.edit_block(false), Some(TileCoord::new(4, 1)));
        assert_eq!(s.map(), &TileMap::empty());
        assert_eq!(s.edit_block(false), None);
    }

    #[test]
    fn edit_block_refuses_wall_on_the_eye() {
        // eye (0, -3.1) facing +Z: target tile (4, 1) starts at z = -3
        let pose = Pose::new(Vec3::new(0.0, 0.0, -3.1), Vec3::new(0.0, 0.0, 10.0), Vec3::Y)
            .unwrap();
        let mut s = Session::new(Camera::new(pose, Default::default()), TileMap::empty());
        assert_eq!(s.target_tile(), Some(TileCoord::new(4, 1)));
        assert_eq!(s.edit_block(true), None);
        assert_eq!(s.map(), &TileMap::empty());
    }

    #[test]
    fn edit_block_off_grid_is_noop() {
        let pose = Pose::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 10.0), Vec3::Y)
            .unwrap();
        let mut s = Session::new(Camera::new(pose, Default::default()), TileMap::default());
        assert_eq!(s.target_tile(), None);
        assert_eq!(s.edit_block(false), None);
        assert_eq!(s.map(), &TileMap::default());
    }

    #[test]
    fn map_edits_take_effect_next_event() {
        let mut s = Session::new(Camera::default(), TileMap::empty());
        // tile (4, 1) spans x ∈ [0, 1], z ∈ [-3, -2], right across the path
        s.map_mut().set(TileCoord::new(4, 1), Tile::Wall);
        for _ in 0..3 {
            s.apply(Command::MoveForward(None));
        }
        assert_eq!(
            s.apply(Command::MoveForward(None)),
            Applied::Moved(MoveOutcome::Blocked)
        );
        assert!(s.camera().pose().eye().z <= -3.2 + 1e-4);
    }
}
