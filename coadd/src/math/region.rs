//! Axis-aligned pixel regions in parent coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height of a pixel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of pixels (width * height).
    pub const fn area(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in parent pixel coordinates.
///
/// Uses half-open bounds: a pixel at (x, y) is inside if
/// `x_min <= x < x_end` and `y_min <= y < y_end`. A region with
/// `x_end <= x_min` or `y_end <= y_min` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    pub x_min: i32,
    pub y_min: i32,
    pub x_end: i32,
    pub y_end: i32,
}

impl Region {
    /// The canonical empty region.
    pub const EMPTY: Region = Region {
        x_min: 0,
        y_min: 0,
        x_end: 0,
        y_end: 0,
    };

    /// Region with its minimum corner at `(x0, y0)` and the given size.
    pub fn new(x0: i32, y0: i32, width: usize, height: usize) -> Self {
        Self {
            x_min: x0,
            y_min: y0,
            x_end: x0 + width as i32,
            y_end: y0 + height as i32,
        }
    }

    pub fn from_origin(origin: (i32, i32), dimensions: Dimensions) -> Self {
        Self::new(origin.0, origin.1, dimensions.width, dimensions.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x_end <= self.x_min || self.y_end <= self.y_min
    }

    #[inline]
    pub fn width(&self) -> usize {
        (self.x_end - self.x_min).max(0) as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        (self.y_end - self.y_min).max(0) as usize
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// Number of pixels covered; 0 for an empty region.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Minimum corner in parent coordinates.
    pub const fn origin(&self) -> (i32, i32) {
        (self.x_min, self.y_min)
    }

    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x < self.x_end && y >= self.y_min && y < self.y_end
    }

    /// True when `other` lies entirely inside this region.
    pub fn contains_region(&self, other: &Region) -> bool {
        other.is_empty()
            || (other.x_min >= self.x_min
                && other.y_min >= self.y_min
                && other.x_end <= self.x_end
                && other.y_end <= self.y_end)
    }

    /// Overlap of two regions. Returns [`Region::EMPTY`] when they do not overlap.
    pub fn intersection(&self, other: &Region) -> Region {
        let clipped = Region {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_end: self.x_end.min(other.x_end),
            y_end: self.y_end.min(other.y_end),
        };
        if clipped.is_empty() {
            Region::EMPTY
        } else {
            clipped
        }
    }

    /// Position of this region's minimum corner inside an array whose
    /// origin is `origin`. The region must start at or after `origin`.
    #[inline]
    pub(crate) fn local_start(&self, origin: (i32, i32)) -> (usize, usize) {
        debug_assert!(self.x_min >= origin.0 && self.y_min >= origin.1);
        (
            (self.x_min - origin.0) as usize,
            (self.y_min - origin.1) as usize,
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        write!(
            f,
            "({}, {})..({}, {})",
            self.x_min, self.y_min, self.x_end, self.y_end
        )
    }
}
