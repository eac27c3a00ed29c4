//! Circle-vs-tile overlap test in the X/Z plane plus the ground test.
//!
//! Only the eye's position is probed – no swept path – so a single query
//! answers "would the eye fit here", nothing more.

use bitflags::bitflags;
use glam::Vec2;
use smallvec::SmallVec;

use super::WalkConfig;
use crate::world::{TileCoord, TileMap};

bitflags! {
    /// What a probe touched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Contact: u8 {
        const WALL   = 0x01;
        const GROUND = 0x02;
    }
}

impl Contact {
    #[inline]
    pub fn blocked_by_wall(self) -> bool {
        self.contains(Contact::WALL)
    }

    #[inline]
    pub fn below_ground(self) -> bool {
        self.contains(Contact::GROUND)
    }
}

/// `Contact` plus the tiles responsible for `WALL`.
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    pub contact: Contact,
    pub blockers: SmallVec<[TileCoord; 9]>,
}

/// Probe shape and floor shared by every query of one camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub radius: f32,
    pub ground: f32,
}

impl From<&WalkConfig> for Collider {
    fn from(cfg: &WalkConfig) -> Self {
        Self {
            radius: cfg.collision_radius,
            ground: cfg.ground_height,
        }
    }
}

impl Collider {
    /// Probe world X/Z `xz` with the eye currently at height `eye_y`.
    pub fn query(&self, map: &TileMap, xz: Vec2, eye_y: f32) -> Contact {
        let mut contact = self.ground_contact(eye_y);
        if Self::solid_neighbours(map, xz).any(|c| self.overlaps(c, xz)) {
            contact |= Contact::WALL;
        }
        contact
    }

    /// Like [`query`](Self::query) but keeps every blocking tile.
    pub fn report(&self, map: &TileMap, xz: Vec2, eye_y: f32) -> CollisionReport {
        let blockers: SmallVec<[TileCoord; 9]> = Self::solid_neighbours(map, xz)
            .filter(|&c| self.overlaps(c, xz))
            .collect();

        let mut contact = self.ground_contact(eye_y);
        if !blockers.is_empty() {
            contact |= Contact::WALL;
        }
        CollisionReport { contact, blockers }
    }

    #[inline]
    fn ground_contact(&self, eye_y: f32) -> Contact {
        if eye_y < self.ground {
            Contact::GROUND
        } else {
            Contact::empty()
        }
    }

    /// Solid tiles in the 3×3 block around the tile containing `xz`.
    /// The radius can reach across a tile edge, hence the neighbours.
    fn solid_neighbours(map: &TileMap, xz: Vec2) -> impl Iterator<Item = TileCoord> + '_ {
        TileCoord::containing(xz)
            .neighbourhood()
            .filter(move |&c| map.height_class_at(c).is_some_and(|t| t.is_solid()))
    }

    /// Closest-point test; touching at exactly `radius` is not a hit.
    #[inline]
    fn overlaps(&self, tile: TileCoord, xz: Vec2) -> bool {
        let closest = tile.footprint().closest_point(xz);
        let hit = xz.distance_squared(closest) < self.radius * self.radius;
        if hit {
            log::trace!("probe {xz} grazes tile ({}, {})", tile.x, tile.z);
        }
        hit
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Tile;

    fn collider() -> Collider {
        Collider::from(&WalkConfig::default())
    }

    #[test]
    fn stock_wall_blocks_near_its_edge() {
        let map = TileMap::default();
        // tile (2, 5) spans x ∈ [-2, -1], z ∈ [1, 2]
        let probe = Vec2::new(-2.0 - 0.1, 1.5);
        let c = collider().query(&map, probe, 0.0);
        assert!(c.blocked_by_wall());
        assert!(!c.below_ground());
    }

    #[test]
    fn emptied_wall_no_longer_blocks() {
        let mut map = TileMap::default();
        map.set(TileCoord::new(2, 5), Tile::Empty);
        let c = collider().query(&map, Vec2::new(-2.1, 1.5), 0.0);
        assert!(!c.blocked_by_wall());
    }

    #[test]
    fn just_beyond_radius_is_clear() {
        let map = TileMap::default();
        let c = collider().query(&map, Vec2::new(-2.25, 1.5), 0.0);
        assert!(!c.blocked_by_wall());
    }

    #[test]
    fn corner_graze_is_caught_from_diagonal_neighbour() {
        let map = TileMap::default();
        // just off the (-2, 1) corner, inside tile (1, 4)
        let probe = Vec2::new(-2.1, 0.9);
        assert_eq!(TileCoord::containing(probe), TileCoord::new(1, 4));
        let r = collider().report(&map, probe, 0.0);
        assert!(r.contact.blocked_by_wall());
        assert_eq!(r.blockers.as_slice(), &[TileCoord::new(2, 5)]);
    }

    #[test]
    fn probe_inside_tile_is_blocked() {
        let map = TileMap::default();
        assert!(collider().query(&map, Vec2::new(-1.5, 1.5), 0.0).blocked_by_wall());
    }

    #[test]
    fn outside_grid_never_blocks() {
        let mut map = TileMap::empty();
        map.set(TileCoord::new(0, 0), Tile::TallWall);
        // 0.1 west of the grid edge, beside the solid corner tile
        let c = collider().query(&map, Vec2::new(-4.1, -3.5), 0.0);
        assert!(c.blocked_by_wall());
        let c = collider().query(&map, Vec2::new(-6.0, -3.5), 0.0);
        assert!(!c.blocked_by_wall());
    }

    #[test]
    fn ground_uses_eye_height() {
        let map = TileMap::empty();
        let c = collider().query(&map, Vec2::ZERO, -0.5);
        assert_eq!(c, Contact::GROUND);
        assert_eq!(collider().query(&map, Vec2::ZERO, 0.0), Contact::empty());
    }

    #[test]
    fn report_lists_every_blocker() {
        let mut map = TileMap::empty();
        map.set(TileCoord::new(4, 3), Tile::Wall);
        map.set(TileCoord::new(3, 4), Tile::Stack(1));
        // tiles meet at the origin; probe sits in tile (3, 3)
        let r = collider().report(&map, Vec2::new(-0.1, -0.1), 0.0);
        assert_eq!(r.blockers.len(), 2);
        assert!(r.blockers.contains(&TileCoord::new(4, 3)));
        assert!(r.blockers.contains(&TileCoord::new(3, 4)));
    }
}
