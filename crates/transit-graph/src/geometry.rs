//! Planar geometry for station positions.
//!
//! Coordinates are logical canvas units. Mapping from device pixels is the
//! caller's job; everything here assumes it already happened.

use std::ops::{Add, Sub};

/// A position on the logical canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Origin of the canvas (top-left corner).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation: `a + t * (b - a)` on each axis.
    ///
    /// `t` is not clamped; callers decide what happens past the endpoint.
    #[inline]
    pub fn lerp(a: Point, b: Point, t: f32) -> Point {
        Point {
            x: a.x + t * (b.x - a.x),
            y: a.y + t * (b.y - a.y),
        }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f32 {
        let d = *other - *self;
        (d.x * d.x + d.y * d.y).sqrt()
    }

    /// Angle in radians of the direction from `self` toward `other`.
    ///
    /// Zero points along +x; positive angles turn toward +y (canvas down).
    #[inline]
    pub fn heading_to(&self, other: &Point) -> f32 {
        let d = *other - *self;
        d.y.atan2(d.x)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Display colour packed as `0xRRGGBB`. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);
    pub const RED: Self = Self(0xFF0000);
    pub const GREEN: Self = Self(0x008000);
    pub const BLUE: Self = Self(0x0000FF);

    /// CSS hex notation, e.g. `#0000ff`.
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 4.0);

        assert_eq!(Point::lerp(a, b, 0.0), a);
        assert_eq!(Point::lerp(a, b, 1.0), b);

        let mid = Point::lerp(a, b, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-6);
        assert!((mid.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((b.distance(&a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn heading_follows_canvas_axes() {
        let o = Point::ORIGIN;
        assert!(o.heading_to(&Point::new(10.0, 0.0)).abs() < 1e-6);
        assert!((o.heading_to(&Point::new(0.0, 10.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((o.heading_to(&Point::new(-10.0, 0.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn color_css() {
        assert_eq!(Color::BLUE.to_css(), "#0000ff");
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
        assert_eq!(Color(0x12AB3C).to_css(), "#12ab3c");
    }
}
