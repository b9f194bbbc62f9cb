/// Contiguous range of lit pixels, centered on the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRange {
    pub start: usize,
    pub end: usize,
}

impl PixelRange {
    /// Place `lit` pixels in the middle of a `total` pixel strip
    ///
    /// `lit` is clamped to `total`. With an odd remainder the extra dark
    /// pixel ends up at the tail.
    pub const fn centered(total: usize, lit: usize) -> Self {
        let lit = if lit > total { total } else { lit };
        let start = (total - lit) / 2;
        Self {
            start,
            end: start + lit,
        }
    }

    /// Get the number of pixels in the range
    pub const fn count(self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub const fn contains(self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Number of lit pixels for `level` on a `total` pixel strip
///
/// Computed in 64-bit so large strips cannot overflow.
#[allow(clippy::cast_possible_truncation)]
pub const fn lit_count(total: usize, level: u8) -> usize {
    (total as u64 * level as u64 / 255) as usize
}
