//! First-person walker core.
//!
//! A [`sim::Camera`] owns the `(eye, at, up)` pose and turns discrete input
//! commands into new poses, sliding along the solid tiles of a
//! [`world::TileMap`].  Rendering is somebody else's job: consumers read the
//! pose or the cached view matrix once per frame.

pub mod sim;
pub mod world;
