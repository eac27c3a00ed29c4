mod camera;
mod collision;
mod config;
mod input;
pub mod movement;
pub mod orient;
mod session;

pub use camera::Camera;
pub use collision::{Collider, CollisionReport, Contact};
pub use config::WalkConfig;
pub use input::{Command, CommandError, MouseLook};
pub use movement::{Direction, MoveOutcome};
pub use session::{Applied, Goal, Session};
