use super::Location;

/// Traversal direction of a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Twice the signed area of a ring (shoelace formula), computed exactly.
///
/// Positive for counter-clockwise, negative for clockwise. The ring may be
/// given closed (last equals first) or open; the closing edge is implied.
#[must_use]
pub fn signed_area_doubled(points: &[Location]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut sum = 0i128;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += i128::from(a.x()) * i128::from(b.y()) - i128::from(b.x()) * i128::from(a.y());
    }
    sum
}

/// Winding of a ring. Rings without area count as counter-clockwise.
#[must_use]
pub fn winding(points: &[Location]) -> Winding {
    if signed_area_doubled(points) < 0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(ccw: bool) -> Vec<Location> {
        let mut pts = vec![
            Location::new(0, 0),
            Location::new(10, 0),
            Location::new(10, 10),
            Location::new(0, 10),
            Location::new(0, 0),
        ];
        if !ccw {
            pts.reverse();
        }
        pts
    }

    #[test]
    fn signed_area_of_squares() {
        assert_eq!(signed_area_doubled(&square(true)), 200);
        assert_eq!(signed_area_doubled(&square(false)), -200);
    }

    #[test]
    fn open_and_closed_forms_agree() {
        let closed = square(true);
        assert_eq!(
            signed_area_doubled(&closed),
            signed_area_doubled(&closed[..closed.len() - 1])
        );
    }

    #[test]
    fn winding_of_squares() {
        assert_eq!(winding(&square(true)), Winding::CounterClockwise);
        assert_eq!(winding(&square(false)), Winding::Clockwise);
    }

    #[test]
    fn degenerate_ring() {
        assert_eq!(signed_area_doubled(&[Location::new(1, 1)]), 0);
        assert_eq!(winding(&[]), Winding::CounterClockwise);
    }
}
