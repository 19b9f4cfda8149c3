//! Compass angle helpers
//!
//! Orientation accumulators are wrap-free, so anything comparing angles has
//! to normalize first.

/// Normalize angle to the (-180, 180] range
///
/// # Arguments
///
/// * `angle` - Input angle in degrees
///
/// # Returns
///
/// Normalized angle in degrees. Non-finite input yields 0.
pub fn wrap_180(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Normalize angle to the [0, 360) range
///
/// Non-finite input yields 0.
pub fn wrap_360(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle % 360.0;
    let a = if a < 0.0 { a + 360.0 } else { a };
    // -1e-9 % 360 + 360 rounds up to exactly 360.0 in f32
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    #[test]
    fn test_wrap_180_identity_inside_range() {
        assert!((wrap_180(0.0)).abs() < EPSILON);
        assert!((wrap_180(90.0) - 90.0).abs() < EPSILON);
        assert!((wrap_180(-179.5) + 179.5).abs() < EPSILON);
        assert!((wrap_180(180.0) - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_180_minus_180_maps_to_plus_180() {
        assert!((wrap_180(-180.0) - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_180_large_values() {
        assert!((wrap_180(270.0) + 90.0).abs() < EPSILON);
        assert!((wrap_180(-270.0) - 90.0).abs() < EPSILON);
        assert!((wrap_180(720.0 + 45.0) - 45.0).abs() < EPSILON);
        assert!((wrap_180(350.0) + 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_360() {
        assert!((wrap_360(0.0)).abs() < EPSILON);
        assert!((wrap_360(-10.0) - 350.0).abs() < EPSILON);
        assert!((wrap_360(370.0) - 10.0).abs() < EPSILON);
        assert!((wrap_360(-720.0)).abs() < EPSILON);
        assert!(wrap_360(-1e-9) < 360.0);
    }

    #[test]
    fn test_non_finite_angles() {
        assert_eq!(wrap_180(f32::NAN), 0.0);
        assert_eq!(wrap_360(f32::INFINITY), 0.0);
    }
}
