use nalgebra::Vector2;

use super::{Location, Point2};

/// Difference `b - a` widened so that products of two deltas cannot overflow.
fn delta(a: Location, b: Location) -> (i128, i128) {
    (
        i128::from(b.x()) - i128::from(a.x()),
        i128::from(b.y()) - i128::from(a.y()),
    )
}

fn cross(u: (i128, i128), v: (i128, i128)) -> i128 {
    u.0 * v.1 - u.1 * v.0
}

/// Returns `true` if `num / den` lies in `[0, 1]`. `den` must be non-zero.
fn within_unit(num: i128, den: i128) -> bool {
    if den > 0 {
        (0..=den).contains(&num)
    } else {
        (den..=0).contains(&num)
    }
}

/// Returns `true` if the y-ranges of `[a0, a1]` and `[b0, b1]` overlap.
#[must_use]
pub fn y_range_overlap(a0: Location, a1: Location, b0: Location, b1: Location) -> bool {
    let (a_min, a_max) = min_max(a0.y(), a1.y());
    let (b_min, b_max) = min_max(b0.y(), b1.y());
    a_min.max(b_min) <= a_max.min(b_max)
}

fn min_max(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Exact intersection test of the segments `[a0, a1]` and `[b0, b1]`.
///
/// Touching at a common endpoint does not count. Every other shared point
/// does: proper crossings, an endpoint lying on the other segment, and
/// collinear overlaps. The last includes two segments that start at the same
/// point and run the same way; parallel segments are not skipped as a whole.
/// Identical segments are cancelled before this test runs, so any collinear
/// overlap left is a real defect in the input.
///
/// For crossings the returned location is the crossing point snapped to the
/// fixed-point grid; for overlaps it is the start of the shared stretch.
#[must_use]
pub fn segment_intersection(
    a0: Location,
    a1: Location,
    b0: Location,
    b1: Location,
) -> Option<Location> {
    let da = delta(a0, a1);
    let db = delta(b0, b1);
    let ab = delta(a0, b0);

    let denom = cross(da, db);
    if denom == 0 {
        if cross(ab, da) != 0 {
            // Parallel on distinct lines.
            return None;
        }
        return collinear_overlap(a0, a1, b0, b1);
    }

    let t_num = cross(ab, db);
    let u_num = cross(ab, da);
    if !within_unit(t_num, denom) || !within_unit(u_num, denom) {
        return None;
    }

    // Endpoint of both segments: the lines are not parallel, so this is the
    // one location they share.
    let t_at_end = t_num == 0 || t_num == denom;
    let u_at_end = u_num == 0 || u_num == denom;
    if t_at_end && u_at_end {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let t = t_num as f64 / denom as f64;
    #[allow(clippy::cast_precision_loss)]
    let direction = Vector2::new(da.0 as f64, da.1 as f64);
    let point = Point2::new(f64::from(a0.x()), f64::from(a0.y())) + direction * t;
    Some(snap(point))
}

#[allow(clippy::cast_possible_truncation)]
fn snap(point: Point2) -> Location {
    Location::new(point.x.round() as i32, point.y.round() as i32)
}

/// Overlap of two segments known to lie on the same line.
fn collinear_overlap(a0: Location, a1: Location, b0: Location, b1: Location) -> Option<Location> {
    // Along a line, the (x, y) ordering of `Location` is monotonic.
    let (a_lo, a_hi) = (a0.min(a1), a0.max(a1));
    let (b_lo, b_hi) = (b0.min(b1), b0.max(b1));
    let start = a_lo.max(b_lo);
    let end = a_hi.min(b_hi);
    (start < end).then_some(start)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn l(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    #[test]
    fn crossing_diagonals() {
        let hit = segment_intersection(l(0, 0), l(10, 10), l(0, 10), l(10, 0)).unwrap();
        assert_eq!(hit, l(5, 5));
    }

    #[test]
    fn crossing_point_is_snapped() {
        let hit = segment_intersection(l(0, 0), l(3, 1), l(0, 1), l(3, 0)).unwrap();
        assert_eq!(hit, l(2, 1));
    }

    #[test]
    fn shared_endpoint_is_not_an_intersection() {
        assert!(segment_intersection(l(0, 0), l(10, 0), l(10, 0), l(10, 10)).is_none());
        assert!(segment_intersection(l(0, 0), l(10, 0), l(0, 0), l(5, 7)).is_none());
    }

    #[test]
    fn t_junction_is_an_intersection() {
        let hit = segment_intersection(l(0, 0), l(10, 0), l(5, 0), l(5, 8)).unwrap();
        assert_eq!(hit, l(5, 0));
    }

    #[test]
    fn disjoint_segments() {
        assert!(segment_intersection(l(0, 0), l(1, 0), l(0, 1), l(1, 1)).is_none());
        assert!(segment_intersection(l(0, 0), l(4, 4), l(5, 0), l(9, -4)).is_none());
    }

    #[test]
    fn collinear_cases() {
        // Touching end to end.
        assert!(segment_intersection(l(0, 0), l(10, 0), l(10, 0), l(20, 0)).is_none());
        // Disjoint on one line.
        assert!(segment_intersection(l(0, 0), l(4, 0), l(6, 0), l(9, 0)).is_none());
        // Overlapping stretch.
        let hit = segment_intersection(l(0, 0), l(10, 0), l(5, 0), l(20, 0)).unwrap();
        assert_eq!(hit, l(5, 0));
        // Sharing an endpoint but running the same way.
        let hit = segment_intersection(l(0, 0), l(0, 10), l(0, 0), l(0, 4)).unwrap();
        assert_eq!(hit, l(0, 0));
    }

    #[test]
    fn y_range_overlaps() {
        assert!(y_range_overlap(l(0, 0), l(1, 5), l(9, 7), l(9, 2)));
        assert!(!y_range_overlap(l(0, 0), l(1, 1), l(9, 7), l(9, 2)));
    }

    #[test]
    fn large_coordinates_do_not_overflow() {
        let max = 1_800_000_000;
        let hit = segment_intersection(l(-max, -max), l(max, max), l(-max, max), l(max, -max));
        assert_eq!(hit, Some(l(0, 0)));
    }
}
