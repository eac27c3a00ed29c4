use glam::{Quat, Vec3};

/// Rotate `look` by `degrees` about the unit `axis` (right-handed).
#[inline]
pub fn rotate(look: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    Quat::from_axis_angle(axis, degrees.to_radians()) * look
}

/// Angle in degrees between `look` and the plane normal to `up`.
#[inline]
pub fn elevation(look: Vec3, up: Vec3) -> f32 {
    look.normalize().dot(up).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Largest part of `delta` that keeps `current + delta` within
/// `[-limit, limit]`.  Never turns against `delta`: from outside the band
/// the result is zero unless `delta` heads back in.
#[inline]
pub fn clamp_pitch_delta(current: f32, delta: f32, limit: f32) -> f32 {
    let applied = (current + delta).clamp(-limit, limit) - current;
    if applied * delta < 0.0 { 0.0 } else { applied }
}

/// Tilt `look` back inside `±limit` degrees of elevation, if needed.
pub fn clamp_elevation(look: Vec3, up: Vec3, limit: f32) -> Vec3 {
    let side = look.cross(up).normalize_or_zero();
    let current = elevation(look, up);
    let excess = current - current.clamp(-limit, limit);
    if side == Vec3::ZERO || excess == 0.0 {
        return look;
    }
    rotate(look, side, -excess)
}

/// Turn `look` about `up`.  Positive turns left.
pub fn pan(look: Vec3, up: Vec3, degrees: f32) -> Vec3 {
    rotate(look, up, degrees)
}

/// Tilt `look` toward `up` by `degrees` (negative tilts down), stopping at
/// `limit` degrees of elevation.  Returns the rotated vector and the angle
/// actually applied.
pub fn pitch(look: Vec3, up: Vec3, degrees: f32, limit: f32) -> (Vec3, f32) {
    let side = look.cross(up).normalize_or_zero();
    if side == Vec3::ZERO {
        return (look, 0.0);
    }
    let applied = clamp_pitch_delta(elevation(look, up), degrees, limit);
    (rotate(look, side, applied), applied)
}
