//! Fundamental geometric types for truss modelling.

use std::ops::{Add, Mul, Sub};

use nalgebra::Vector3;
use serde::Serialize;

/// Magnitudes at or below this value are treated as a zero-length vector.
const ZERO_MAGNITUDE: f64 = 1.0e-12;

/// Position in three dimensional space, in the units of the input file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Position {
    /// Create a [`Position`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the position into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean length of the position vector.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.to_vector().norm()
    }

    /// Angle in the x-y plane measured from the positive x axis, in `(-π, π]`.
    ///
    /// Returns `0.0` for a vector of (near) zero magnitude.
    ///
    /// # Examples
    /// ```
    /// use trussview::position;
    ///
    /// let up = position(0.0, 2.0);
    /// assert!((up.angle_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    /// assert_eq!(position(0.0, 0.0).angle_rad(), 0.0);
    /// ```
    #[must_use]
    pub fn angle_rad(self) -> f64 {
        if self.magnitude() <= ZERO_MAGNITUDE {
            return 0.0;
        }
        // `atan2(-0.0, x < 0)` is -π; adding zero folds -0.0 into +0.0.
        (self.y + 0.0).atan2(self.x)
    }

    /// Distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f64 {
        (other - self).magnitude()
    }
}

impl From<Vector3<f64>> for Position {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Position> for Vector3<f64> {
    fn from(value: Position) -> Self {
        value.to_vector()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        (self.to_vector() + rhs.to_vector()).into()
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        (self.to_vector() - rhs.to_vector()).into()
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, rhs: f64) -> Position {
        (self.to_vector() * rhs).into()
    }
}

impl Mul<Position> for f64 {
    type Output = Position;

    fn mul(self, rhs: Position) -> Position {
        rhs * self
    }
}

/// Axis aligned bounding box in model coordinates (y grows upwards).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rectangle {
    /// Largest y value.
    pub top: f64,
    /// Smallest x value.
    pub left: f64,
    /// Smallest y value.
    pub bottom: f64,
    /// Largest x value.
    pub right: f64,
}

impl Rectangle {
    /// Create a [`Rectangle`] from its four edges.
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Smallest rectangle enclosing every position.
    ///
    /// An empty iterator yields the all-zero rectangle.
    pub fn enclosing<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut positions = positions.into_iter();
        let Some(first) = positions.next() else {
            return Self::default();
        };
        positions.fold(
            Self::new(first.y, first.x, first.y, first.x),
            |rect, p| Self {
                top: rect.top.max(p.y),
                left: rect.left.min(p.x),
                bottom: rect.bottom.min(p.y),
                right: rect.right.max(p.x),
            },
        )
    }

    /// Copy of the rectangle grown by `margin` on every side.
    #[must_use]
    pub fn padded(self, margin: f64) -> Self {
        Self {
            top: self.top + margin,
            left: self.left - margin,
            bottom: self.bottom - margin,
            right: self.right + margin,
        }
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Horizontal midpoint.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.bottom + self.height() / 2.0
    }
}

/// Convenience helper for creating planar [`Position`] instances.
///
/// # Examples
/// ```
/// use trussview::position;
///
/// let p = position(3.0, 4.0);
/// assert_eq!(p.z, 0.0);
/// assert_eq!(p.magnitude(), 5.0);
/// ```
#[must_use]
pub const fn position(x: f64, y: f64) -> Position {
    Position::new(x, y, 0.0)
}
