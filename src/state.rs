use crate::bounds::{PixelRange, lit_count};
use crate::color::Rgb;

/// Logical light state, not yet rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub power: bool,
    pub level: u8,
    pub color: Rgb,
}

impl LightState {
    /// Light as it is before anything was restored: off, full level, white.
    pub const fn new() -> Self {
        Self {
            power: false,
            level: 255,
            color: Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
        }
    }

    /// Number of lit pixels on a `total` pixel strip
    pub const fn lit_count(&self, total: usize) -> usize {
        if self.power {
            lit_count(total, self.level)
        } else {
            0
        }
    }

    /// Derive the frame to show on a `total` pixel strip
    pub const fn frame(&self, total: usize) -> Frame {
        Frame {
            lit_count: self.lit_count(total),
            color: self.color,
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the strip shows: how many pixels are lit and in which color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub lit_count: usize,
    pub color: Rgb,
}

impl Frame {
    pub const fn dark() -> Self {
        Self {
            lit_count: 0,
            color: Rgb { r: 0, g: 0, b: 0 },
        }
    }

    /// Pixels that show `color` on a `total` pixel strip
    pub const fn range(&self, total: usize) -> PixelRange {
        PixelRange::centered(total, self.lit_count)
    }
}
