//! DrawingML measurement units.

use pitchkit_core::types::{MAX_POINT_SIZE, MIN_POINT_SIZE};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Default 4:3 slide width (10in).
pub const DEFAULT_SLIDE_WIDTH: i64 = 9_144_000;

/// Default 4:3 slide height (7.5in).
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// Convert inches to EMU.
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH).round() as i64
}

/// Convert points to the hundredths of a point used by `sz` attributes,
/// clamped to the range a run may carry.
pub fn font_size(points: f64) -> i64 {
    (points.clamp(MIN_POINT_SIZE, MAX_POINT_SIZE) * 100.0).round() as i64
}

/// Slide dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            cx: DEFAULT_SLIDE_WIDTH,
            cy: DEFAULT_SLIDE_HEIGHT,
        }
    }
}

impl SlideSize {
    /// Whether this is the stock 4:3 on-screen size.
    pub fn is_screen_4x3(&self) -> bool {
        *self == Self::default()
    }
}

/// A rectangle in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// Build a frame from inch measurements.
    pub fn from_inches(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            x: inches(left),
            y: inches(top),
            cx: inches(width),
            cy: inches(height),
        }
    }
}
