use glam::{Mat4, Vec3};

/// Steepest elevation (degrees) a pose may look up or down.
pub const PITCH_LIMIT: f32 = 89.0;

/// Things that make a pose unusable.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PoseError {
    /// `at` coincides with `eye`: no forward direction.
    #[error("look-at point coincides with eye")]
    Degenerate,

    /// `eye` or `at` has a NaN or infinite component.
    #[error("pose point {0} is not finite")]
    NotFinite(Vec3),

    /// `up` is zero-length or not finite.
    #[error("up vector {0} cannot be normalised")]
    BadUp(Vec3),

    /// Looking straight along `up`: pan and strafe axes vanish.
    #[error("forward direction is parallel to up")]
    Parallel,

    /// Forward elevation outside `±PITCH_LIMIT`.
    #[error("pitch {0}° exceeds the ±{max}° limit", max = PITCH_LIMIT)]
    TooSteep(f32),
}

/// Camera pose in world space.
///
/// * `at` is an absolute point, not a direction.
/// * `up` is kept unit-length.
/// * `eye` and `at` are finite, and pitch stays within `±PITCH_LIMIT`.
/// * yaw / pitch are derived on demand – the triple is authoritative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
}

impl Default for Pose {
    /// Session start: just inside the south edge of the grid, looking north.
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -3.9),
            at: Vec3::new(0.0, 0.0, 10.0),
            up: Vec3::Y,
        }
    }
}

impl Pose {
    pub fn new(eye: Vec3, at: Vec3, up: Vec3) -> Result<Self, PoseError> {
        if let Some(bad) = [eye, at].into_iter().find(|p| !p.is_finite()) {
            return Err(PoseError::NotFinite(bad));
        }
        let up = up.try_normalize().ok_or(PoseError::BadUp(up))?;
        let look = at - eye;
        if look.length_squared() <= f32::EPSILON * f32::EPSILON {
            return Err(PoseError::Degenerate);
        }
        if look.cross(up).length_squared() <= f32::EPSILON * look.length_squared() {
            return Err(PoseError::Parallel);
        }
        let pose = Self { eye, at, up };
        let pitch = pose.pitch();
        if pitch.abs() > PITCH_LIMIT {
            return Err(PoseError::TooSteep(pitch));
        }
        Ok(pose)
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    #[inline]
    pub fn at(&self) -> Vec3 {
        self.at
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Un-normalised `at - eye`.
    #[inline]
    pub fn look(&self) -> Vec3 {
        self.at - self.eye
    }

    /// Unit vector from eye toward the look-at point.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.look().normalize()
    }

    /// Heading in degrees about `up`; 0 looks down +Z, positive turns
    /// toward +X (a pan to the left).
    pub fn yaw(&self) -> f32 {
        let f = self.look();
        f.x.atan2(f.z).to_degrees()
    }

    /// Elevation of the forward vector above the plane normal to `up`,
    /// in degrees.
    pub fn pitch(&self) -> f32 {
        self.forward().dot(self.up).clamp(-1.0, 1.0).asin().to_degrees()
    }

    /// Right-handed look-at matrix for the renderer.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.at, self.up)
    }

    /// Replace eye and look-at together.  Callers keep `at != eye`.
    #[inline]
    pub(crate) fn set(&mut self, eye: Vec3, at: Vec3) {
        debug_assert!(eye != at, "pose update would collapse forward vector");
        self.eye = eye;
        self.at = at;
    }

    /// Re-aim from the current eye along `look`.
    #[inline]
    pub(crate) fn set_look(&mut self, look: Vec3) {
        self.set(self.eye, self.eye + look);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_north() {
        let p = Pose::default();
        assert!((p.forward() - Vec3::Z).length() < 1e-6);
        assert!(p.yaw().abs() < 1e-4);
        assert!(p.pitch().abs() < 1e-4);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let e = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Pose::new(e, e, Vec3::Y), Err(PoseError::Degenerate));
        assert_eq!(
            Pose::new(e, e + Vec3::X, Vec3::ZERO),
            Err(PoseError::BadUp(Vec3::ZERO))
        );
        assert_eq!(
            Pose::new(e, e + Vec3::Y * 4.0, Vec3::Y),
            Err(PoseError::Parallel)
        );
    }

    #[test]
    fn rejects_non_finite_points() {
        let nan = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(matches!(
            Pose::new(nan, Vec3::Z, Vec3::Y),
            Err(PoseError::NotFinite(_))
        ));
        let inf = Vec3::new(0.0, 0.0, f32::INFINITY);
        assert!(matches!(
            Pose::new(Vec3::ZERO, inf, Vec3::Y),
            Err(PoseError::NotFinite(_))
        ));
    }

    #[test]
    fn rejects_steep_look() {
        // 100 up for 1 across is about 89.43°
        let err = Pose::new(Vec3::ZERO, Vec3::new(0.0, 100.0, 1.0), Vec3::Y).unwrap_err();
        assert!(matches!(err, PoseError::TooSteep(p) if p > PITCH_LIMIT));
        assert!(Pose::new(Vec3::ZERO, Vec3::new(0.0, -100.0, 1.0), Vec3::Y).is_err());

        // 50 up for 1 across is about 88.85°
        let p = Pose::new(Vec3::ZERO, Vec3::new(0.0, 50.0, 1.0), Vec3::Y).unwrap();
        assert!(p.pitch() < PITCH_LIMIT);
    }

    #[test]
    fn up_is_normalised() {
        let p = Pose::new(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert!((p.up().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_and_pitch_follow_look() {
        let p = Pose::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::Y).unwrap();
        assert!((p.yaw() - 90.0).abs() < 1e-4);
        assert!((p.pitch() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin_and_at_to_minus_z() {
        let p = Pose::default();
        let v = p.view_matrix();
        assert!(v.transform_point3(p.eye()).length() < 1e-5);
        let at_view = v.transform_point3(p.at());
        assert!(at_view.x.abs() < 1e-4 && at_view.y.abs() < 1e-4);
        assert!((at_view.z + p.look().length()).abs() < 1e-4);
    }
}
