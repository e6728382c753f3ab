//! Snapping rules shared by dragging and the style editor

/// Pixels within which dragged text snaps to a viewport center line
pub const CENTER_SNAP_THRESHOLD: f32 = 20.0;

/// Angles a rotation snaps to
pub const ROTATION_SNAP_POINTS: [f32; 9] =
    [0.0, 45.0, 90.0, 135.0, 180.0, -180.0, -135.0, -90.0, -45.0];

/// Degrees within which a rotation snaps
pub const ROTATION_SNAP_TOLERANCE: f32 = 5.0;

/// Snap a coordinate to `center` when strictly closer than `threshold`.
///
/// Returns the resulting coordinate and whether it snapped.
pub fn snap_to_center(candidate: f32, center: f32, threshold: f32) -> (f32, bool) {
    if (candidate - center).abs() < threshold {
        (center, true)
    } else {
        (candidate, false)
    }
}

/// Snap a rotation to the first common angle within `tolerance` (inclusive)
pub fn snap_rotation(degrees: f32, tolerance: f32) -> f32 {
    ROTATION_SNAP_POINTS
        .iter()
        .copied()
        .find(|point| (degrees - point).abs() <= tolerance)
        .unwrap_or(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_snaps_within_tolerance() {
        assert_eq!(snap_rotation(92.0, ROTATION_SNAP_TOLERANCE), 90.0);
        assert_eq!(snap_rotation(-47.5, ROTATION_SNAP_TOLERANCE), -45.0);
        assert_eq!(snap_rotation(5.0, ROTATION_SNAP_TOLERANCE), 0.0);
    }

    #[test]
    fn test_rotation_outside_tolerance_is_unchanged() {
        assert_eq!(snap_rotation(80.0, ROTATION_SNAP_TOLERANCE), 80.0);
        assert_eq!(snap_rotation(-160.0, ROTATION_SNAP_TOLERANCE), -160.0);
    }

    #[test]
    fn test_center_snap_is_strict() {
        assert_eq!(snap_to_center(210.0, 200.0, 20.0), (200.0, true));
        assert_eq!(snap_to_center(170.0, 200.0, 20.0), (170.0, false));
        assert_eq!(snap_to_center(220.0, 200.0, 20.0), (220.0, false));
    }
}
