use std::cmp::Ordering;

use super::Location;

/// A horizontal ray shot towards negative x.
///
/// The ray starts an infinitesimal step away from `origin` along the
/// direction towards `toward`, so it never passes exactly through a vertex.
/// All tests are exact; vertex hits are resolved by comparing slopes
/// (symbolic perturbation).
#[derive(Debug, Clone, Copy)]
pub struct LeftRay {
    origin: Location,
    dx: i128,
    dy: i128,
}

/// Position where a segment crosses a [`LeftRay`]'s line.
///
/// `x = num / den + eps * slope_num / slope_den`, dens positive.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    num: i128,
    den: i128,
    slope_num: i128,
    slope_den: i128,
}

impl PartialEq for RayHit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RayHit {}

impl PartialOrd for RayHit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RayHit {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den)
            .cmp(&(other.num * self.den))
            .then_with(|| (self.slope_num * other.slope_den).cmp(&(other.slope_num * self.slope_den)))
    }
}

impl LeftRay {
    /// Creates a ray next to `origin`, displaced towards `toward`.
    ///
    /// `toward` must differ from `origin`.
    #[must_use]
    pub fn new(origin: Location, toward: Location) -> Self {
        Self {
            origin,
            dx: i128::from(toward.x()) - i128::from(origin.x()),
            dy: i128::from(toward.y()) - i128::from(origin.y()),
        }
    }

    /// Whether the ray sits just below the origin's latitude.
    fn goes_down(&self) -> bool {
        self.dy < 0
    }

    /// Where the segment `[a, b]` crosses the line of the ray, if it does.
    ///
    /// Horizontal segments never cross.
    #[must_use]
    pub fn hit(&self, a: Location, b: Location) -> Option<RayHit> {
        let (lo, hi) = if a.y() <= b.y() { (a, b) } else { (b, a) };
        let y = self.origin.y();
        let spans = if self.goes_down() {
            lo.y() < y && y <= hi.y()
        } else {
            lo.y() <= y && y < hi.y()
        };
        if !spans {
            return None;
        }

        let dx = i128::from(hi.x()) - i128::from(lo.x());
        let dy = i128::from(hi.y()) - i128::from(lo.y());
        let rise = i128::from(y) - i128::from(lo.y());
        let sign = if self.goes_down() { -1 } else { 1 };
        Some(RayHit {
            num: i128::from(lo.x()) * dy + rise * dx,
            den: dy,
            slope_num: sign * dx,
            slope_den: dy,
        })
    }

    /// Whether `hit` lies strictly left of the ray's start.
    #[must_use]
    pub fn is_left(&self, hit: &RayHit) -> bool {
        match hit.num.cmp(&(i128::from(self.origin.x()) * hit.den)) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                if self.dy == 0 {
                    // The start is displaced along a horizontal edge, which
                    // dominates any vertical displacement.
                    true
                } else {
                    hit.slope_num * self.dy.abs() < self.dx * hit.slope_den
                }
            }
        }
    }

    /// The crossing of `[a, b]` if it lies left of the ray's start.
    #[must_use]
    pub fn left_hit(&self, a: Location, b: Location) -> Option<RayHit> {
        self.hit(a, b).filter(|h| self.is_left(h))
    }
}
