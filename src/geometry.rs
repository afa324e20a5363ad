//! Numeric primitives behind parity perception: dihedral angles, the
//! dihedral parity bands, and the handedness of three points seen along an
//! axis.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point3, Rotation2, Rotation3, Vector2, Vector3};
use tracing::trace;

use crate::stereo::{Parity, RotationDirection};

/// Dihedral angle between planes (p1, p2, p3) and (p2, p3, p4), in `[0, 2π)`.
///
/// Returns `None` when either triple is (nearly) collinear and no plane is
/// defined.
pub fn dihedral_angle(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> Option<f64> {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;
    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let tolerance = b2.norm() / 1e5;
    if n1.norm() <= tolerance || n2.norm() <= tolerance {
        return None;
    }
    let axis = b2.normalize();
    let y = n1.cross(&n2).dot(&axis);
    let x = n1.dot(&n2);
    let mut angle = y.atan2(x);
    if angle < 0.0 {
        angle += TAU;
    }
    Some(angle)
}

/// Classifies a dihedral angle into a double-bond parity.
///
/// Near 0 the reference atoms sit on the same side (`Odd`), near π on
/// opposite sides (`Even`). The bands around π/2 and 3π/2 are left
/// `Unknown`, as is any negative angle (an angle that could not be
/// computed).
pub fn parity_from_dihedral(angle: f64) -> Parity {
    if angle < 0.0 {
        Parity::Unknown
    } else if angle < PI * 2.0 / 5.0 || angle > PI * 8.0 / 5.0 {
        Parity::Odd
    } else if angle > PI * 3.0 / 5.0 && angle < PI * 7.0 / 5.0 {
        Parity::Even
    } else {
        Parity::Unknown
    }
}

/// Rotation taking `v` onto the +z axis.
fn align_with_z(v: &Vector3<f64>) -> Rotation3<f64> {
    let flip_or_keep = || {
        if v.z < 0.0 {
            Rotation3::from_axis_angle(&Vector3::x_axis(), PI)
        } else {
            Rotation3::identity()
        }
    };
    if v.x == 0.0 && v.y == 0.0 {
        return flip_or_keep();
    }
    Rotation3::rotation_between(v, &Vector3::z()).unwrap_or_else(|| {
        trace!(x = v.x, y = v.y, z = v.z, "view axis nearly parallel to z");
        flip_or_keep()
    })
}

fn polar_angle(v: &Vector2<f64>) -> f64 {
    let angle = v.y.atan2(v.x);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Turning direction of `p1 → p2 → p3` around `center`.
///
/// The viewer stands at `reference` looking at `center`, or, with
/// `reference_behind`, stands on the far side of `center` so that
/// `reference` points away from them. Swapping `p2` and `p3` always flips
/// the result; `Unknown` is returned when `p2` or `p3` is collinear with
/// `p1` in the viewing plane.
pub fn rotation_direction(
    center: &Point3<f64>,
    reference: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    reference_behind: bool,
) -> RotationDirection {
    let looking = if reference_behind {
        center - reference
    } else {
        reference - center
    };
    let to_z = align_with_z(&looking);
    let v1 = to_z * (p1 - center);
    let v2 = to_z * (p2 - center);
    let v3 = to_z * (p3 - center);

    let flatten = Rotation2::new(-v1.y.atan2(v1.x));
    let c2 = flatten * Vector2::new(v2.x, v2.y);
    let c3 = flatten * Vector2::new(v3.x, v3.y);
    if c2.y == 0.0 || c3.y == 0.0 {
        return RotationDirection::Unknown;
    }

    let angle2 = polar_angle(&c2);
    let angle3 = polar_angle(&c3);
    if angle2 < angle3 {
        RotationDirection::Anticlockwise
    } else if angle2 > angle3 {
        RotationDirection::Clockwise
    } else {
        RotationDirection::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn view_axis_close_to_minus_z_is_flipped() {
        for v in [
            Vector3::new(0.0, 0.0, -2.0),
            Vector3::new(1e-20, 0.0, -1.0),
            Vector3::new(0.3, -0.4, 0.5),
        ] {
            let aligned = align_with_z(&v) * v.normalize();
            assert!((aligned - Vector3::z()).norm() < 1e-9, "{v:?} -> {aligned:?}");
        }
    }

    #[test]
    fn planar_cis_is_zero() {
        let angle = dihedral_angle(
            &p(-0.5, 0.87, 0.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(1.5, 0.87, 0.0),
        )
        .unwrap();
        assert!(angle.abs() < 1e-9 || (TAU - angle).abs() < 1e-9);
    }

    #[test]
    fn planar_trans_is_pi() {
        let angle = dihedral_angle(
            &p(-0.5, 0.87, 0.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(1.5, -0.87, 0.0),
        )
        .unwrap();
        assert!((angle - PI).abs() < 1e-9);
    }

    #[test]
    fn perpendicular_planes() {
        let angle = dihedral_angle(
            &p(0.0, 1.0, 0.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(1.0, 0.0, 1.0),
        )
        .unwrap();
        assert!((angle - PI / 2.0).abs() < 1e-9 || (angle - 3.0 * PI / 2.0).abs() < 1e-9);
        assert_eq!(parity_from_dihedral(angle), Parity::Unknown);
    }

    #[test]
    fn collinear_points_have_no_dihedral() {
        assert_eq!(
            dihedral_angle(
                &p(-1.0, 0.0, 0.0),
                &p(0.0, 0.0, 0.0),
                &p(1.0, 0.0, 0.0),
                &p(2.0, 1.0, 0.0),
            ),
            None
        );
    }

    #[test]
    fn band_edges() {
        assert_eq!(parity_from_dihedral(0.0), Parity::Odd);
        assert_eq!(parity_from_dihedral(PI * 2.0 / 5.0), Parity::Unknown);
        assert_eq!(parity_from_dihedral(PI * 3.0 / 5.0), Parity::Unknown);
        assert_eq!(parity_from_dihedral(PI), Parity::Even);
        assert_eq!(parity_from_dihedral(PI * 7.0 / 5.0), Parity::Unknown);
        assert_eq!(parity_from_dihedral(PI * 8.0 / 5.0), Parity::Unknown);
        assert_eq!(parity_from_dihedral(PI * 1.9), Parity::Odd);
        assert_eq!(parity_from_dihedral(-1.0), Parity::Unknown);
    }

    #[test]
    fn looking_down_z_counterclockwise() {
        let center = p(0.0, 0.0, 0.0);
        let reference = p(0.0, 0.0, 1.0);
        let a = p(1.0, 0.0, 0.0);
        let b = p(0.0, 1.0, 0.0);
        let c = p(-1.0, -0.5, 0.0);
        assert_eq!(
            rotation_direction(&center, &reference, &a, &b, &c, false),
            RotationDirection::Anticlockwise
        );
        assert_eq!(
            rotation_direction(&center, &reference, &a, &c, &b, false),
            RotationDirection::Clockwise
        );
        // viewing from the other side mirrors the turn
        assert_eq!(
            rotation_direction(&center, &reference, &a, &b, &c, true),
            RotationDirection::Clockwise
        );
    }

    #[test]
    fn antiparallel_view_axis() {
        let center = p(0.0, 0.0, 0.0);
        let reference = p(0.0, 0.0, -2.0);
        let a = p(1.0, 0.0, 0.0);
        let b = p(0.0, 1.0, 0.0);
        let c = p(-1.0, -0.5, 0.0);
        assert_eq!(
            rotation_direction(&center, &reference, &a, &b, &c, false),
            RotationDirection::Clockwise
        );
    }

    #[test]
    fn tilted_view_axis_matches_untilted() {
        let rotation = Rotation3::from_euler_angles(0.4, -1.1, 2.3);
        let center = p(0.3, -0.2, 1.0);
        let moved = |q: Point3<f64>| center + rotation * q.coords;
        let reference = moved(p(0.0, 0.0, 1.0));
        let a = moved(p(1.0, 0.0, -0.3));
        let b = moved(p(-0.5, 0.8, -0.3));
        let c = moved(p(-0.5, -0.8, -0.3));
        assert_eq!(
            rotation_direction(&center, &reference, &a, &b, &c, false),
            RotationDirection::Anticlockwise
        );
    }

    #[test]
    fn collinear_with_first_is_unknown() {
        let center = p(0.0, 0.0, 0.0);
        let reference = p(0.0, 0.0, 1.0);
        assert_eq!(
            rotation_direction(
                &center,
                &reference,
                &p(1.0, 0.0, 0.0),
                &p(-1.0, 0.0, 0.0),
                &p(0.0, 1.0, 0.0),
                false
            ),
            RotationDirection::Unknown
        );
    }
}
