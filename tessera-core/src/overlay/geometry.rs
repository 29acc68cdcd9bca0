//! Screen geometry used by the overlay

/// A point in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size rectangle anchored at `point`
    #[must_use]
    pub const fn zero_at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Top-left corner
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same rectangle expressed relative to `container`'s top-left corner
    #[must_use]
    pub fn relative_to(&self, container: &Self) -> Self {
        Self::new(self.x - container.x, self.y - container.y, self.width, self.height)
    }

    /// Returns true if `point` lies inside (edges inclusive)
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }

    /// Returns true if the rectangle has no area
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
