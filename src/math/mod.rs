pub mod intersect_2d;
pub mod polygon_2d;
pub mod ray_2d;

use std::fmt;

use crate::error::{AreaError, Result};

/// 2D point type, in degrees.
pub type Point2 = nalgebra::Point2<f64>;

/// Number of fixed-point units per degree.
pub const COORDINATE_PRECISION: i32 = 10_000_000;

/// A position on the map stored as fixed-point integers.
///
/// `x` is the longitude and `y` the latitude, both in units of 1e-7 degree.
/// Comparison is exact and orders by `x` first, then `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    /// Creates a location from raw fixed-point coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a location from longitude and latitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns `AreaError::InvalidLocation` if the coordinates are not finite
    /// or fall outside `[-180, 180]` x `[-90, 90]`.
    pub fn from_degrees(lon: f64, lat: f64) -> Result<Self> {
        if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 || lat.abs() > 90.0 {
            return Err(AreaError::InvalidLocation { lon, lat });
        }
        Ok(Self {
            x: double_to_fix(lon),
            y: double_to_fix(lat),
        })
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn lon(&self) -> f64 {
        fix_to_double(self.x)
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn lat(&self) -> f64 {
        fix_to_double(self.y)
    }

    /// Converts to a floating point position in degrees.
    #[must_use]
    pub fn to_point(&self) -> Point2 {
        Point2::new(self.lon(), self.lat())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7},{:.7})", self.lon(), self.lat())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn double_to_fix(value: f64) -> i32 {
    (value * f64::from(COORDINATE_PRECISION)).round() as i32
}

fn fix_to_double(value: i32) -> f64 {
    f64::from(value) / f64::from(COORDINATE_PRECISION)
}
