//! Plain value types shared by the zoom controller and its hosts.

/// Denominators at or below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The larger of the two sides.
    pub fn max_side(self) -> f64 {
        self.width.max(self.height)
    }

    /// Both sides multiplied by `scale`.
    pub fn scaled(self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }

    /// True when a side is zero, negative, or not finite.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= EPSILON
            || self.height <= EPSILON
    }
}

/// A position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal and vertical scroll fractions, each guaranteed to be within `[0, 1]`.
///
/// `0` means scrolled to the left/top edge, `1` to the right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    h: f64,
    v: f64,
}

impl ScrollPosition {
    /// Scrolled to the middle on both axes.
    pub const CENTER: Self = Self { h: 0.5, v: 0.5 };

    /// Creates a scroll position, clamping both fractions into `[0, 1]`.
    pub fn new(h: f64, v: f64) -> Self {
        Self {
            h: clamp_fraction(h),
            v: clamp_fraction(v),
        }
    }

    pub fn h(self) -> f64 {
        self.h
    }

    pub fn v(self) -> f64 {
        self.v
    }

    /// Pixel offsets implied by these fractions for the given scrollable spans
    /// (`scaled content - viewport` per axis).
    pub fn to_offset(self, span: Size) -> Point {
        Point::new(offset_for(self.h, span.width), offset_for(self.v, span.height))
    }

    /// Fractions for the given pixel offsets within the given scrollable spans.
    ///
    /// An axis without a positive span has nothing to scroll and yields `0`.
    pub fn from_offset(offset: Point, span: Size) -> Self {
        Self::new(
            fraction_for(offset.x, span.width),
            fraction_for(offset.y, span.height),
        )
    }
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn offset_for(fraction: f64, span: f64) -> f64 {
    if span > EPSILON { fraction * span } else { 0.0 }
}

fn fraction_for(offset: f64, span: f64) -> f64 {
    if span > EPSILON { offset / span } else { 0.0 }
}
