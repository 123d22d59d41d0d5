//! Source location tracking for grammar nodes and segments.

use core::fmt;

use serde::Serialize;

/// An inclusive range of byte offsets in the source SQL.
///
/// Both `start` and `stop` point at bytes that belong to the construct, so a
/// single-character token at offset 7 has the span `7..=7`. Consumers rewrite
/// SQL by replacing exactly these ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// Stop byte offset (inclusive).
    pub stop: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop);
        Self { start, stop }
    }

    /// Creates a span covering the half-open byte range `start..end`.
    ///
    /// `end` must be greater than `start`.
    #[must_use]
    pub const fn from_range(start: usize, end: usize) -> Self {
        Self::new(start, end - 1)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stop - self.start + 1
    }

    /// Merges two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let stop = if self.stop > other.stop {
            self.stop
        } else {
            other.stop
        };
        Self { start, stop }
    }

    /// Returns the source text covered by this span, or `None` when the
    /// span is out of bounds or splits a character of `source`.
    #[must_use]
    pub fn get<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..=self.stop)
    }

    /// Returns the source text covered by this span.
    ///
    /// Spans must come from `source`. Debug builds panic on a span that
    /// does not; release builds return an empty string.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        let text = self.get(source);
        debug_assert!(
            text.is_some(),
            "span {self} does not fall on character boundaries of a {}-byte source",
            source.len()
        );
        text.unwrap_or_default()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.stop)
    }
}
