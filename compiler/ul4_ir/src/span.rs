//! Character spans into template source.

use std::fmt;
use std::ops::Range;

/// Half-open range of character offsets.
///
/// Offsets count Unicode scalar values, not bytes, so locations stay stable
/// when a template is exchanged with implementations that index by code point.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Empty span at offset zero.
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Slice `source` by character offsets.
    ///
    /// Offsets past the end of `source` are clamped.
    pub fn slice(self, source: &str) -> &str {
        let mut indices = source
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(source.len()));
        let start = indices
            .by_ref()
            .nth(self.start as usize)
            .unwrap_or(source.len());
        let end = if self.end <= self.start {
            start
        } else {
            indices
                .nth((self.end - self.start - 1) as usize)
                .unwrap_or(source.len())
        };
        &source[start..end]
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
