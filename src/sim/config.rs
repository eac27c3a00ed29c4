use crate::world::PITCH_LIMIT;

/// Tunables for one walking camera.  Every movement and rotation operation
/// reads its constants from here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkConfig {
    /// World Y of the floor plane the eye may not sink below.
    pub ground_height: f32,
    /// Radius of the eye's X/Z collision circle.
    pub collision_radius: f32,
    /// Distance covered by one move or strafe event.
    pub move_speed: f32,
    /// Degrees turned by one pan or pitch event.
    pub turn_angle: f32,
    /// Largest elevation (degrees) the forward vector may reach.
    pub pitch_limit: f32,
    /// Factor applied to `at.y` when walking forward below the ground.
    pub forward_ground_damping: f32,
    /// Degrees of rotation per pixel of pointer-lock mouse motion.
    pub mouse_sensitivity: f32,
    /// Degrees of rotation per pixel dragged with the button held.
    pub drag_sensitivity: f32,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            ground_height: 0.0,
            collision_radius: 0.2,
            move_speed: 0.2,
            turn_angle: 5.0,
            pitch_limit: PITCH_LIMIT,
            forward_ground_damping: 0.9,
            mouse_sensitivity: 0.1,
            drag_sensitivity: 0.3,
        }
    }
}
