mod map;
mod pose;
mod tile;

pub use map::{Aabb, MAP_SIZE, MapError, TileCoord, TileMap};

pub use pose::{PITCH_LIMIT, Pose, PoseError};

pub use tile::Tile;
