use nalgebra::{Point2, Rotation2};

/// Rotate `point` around `center` by `degrees`.
///
/// The drawing surface has its y-axis pointing down, so positive angles
/// turn clockwise on the page.
pub fn rotate(center: Point2<f32>, point: Point2<f32>, degrees: f32) -> Point2<f32> {
    if degrees == 0.0 {
        return point;
    }
    center + Rotation2::new(degrees.to_radians()) * (point - center)
}

pub fn square_distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    nalgebra::distance_squared(&a, &b)
}

/// Angle in degrees from `from` towards `to`, in (-180, 180].
pub fn bearing(from: Point2<f32>, to: Point2<f32>) -> f32 {
    let dy = to.y - from.y;
    let dx = to.x - from.x;
    dy.atan2(dx).to_degrees()
}

/// Weighted running average of a heading towards `target`.
///
/// `inertia == 0` jumps straight to the target; larger values turn slower.
pub fn nudge_angle(inertia: f32, current: f32, target: f32) -> f32 {
    (current * inertia + target) / (inertia + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_rotation_is_identity() {
        let center = Point2::new(3.5, -2.0);
        let point = Point2::new(-7.25, 11.0);
        assert_eq!(rotate(center, point, 0.0), point);
    }

    #[test]
    fn quarter_turn_is_clockwise_on_page() {
        let rotated = rotate(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 90.0);
        assert_abs_diff_eq!(rotated.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rotated.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn bearing_along_axes() {
        let origin = Point2::new(0.0, 0.0);
        assert_abs_diff_eq!(bearing(origin, Point2::new(1.0, 0.0)), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(bearing(origin, Point2::new(0.0, 1.0)), 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(bearing(origin, Point2::new(-1.0, 0.0)), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn nudge_stays_between_current_and_target() {
        for inertia in [0.0, 0.1, 1.0, 10.0, 250.0] {
            let nudged = nudge_angle(inertia, -30.0, 45.0);
            assert!((-30.0..=45.0).contains(&nudged), "inertia {inertia} gave {nudged}");
        }
        assert_eq!(nudge_angle(0.0, -30.0, 45.0), 45.0);
        assert_abs_diff_eq!(nudge_angle(1e7, -30.0, 45.0), -30.0, epsilon = 1e-3);
    }
}
