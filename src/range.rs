//! Compact byte span into the output buffer.
//!
//! Uses `u32` offsets (8 bytes vs 16 for a usize pair). Buffers larger
//! than 4GB are rejected before scanning, see [`crate::limits`].

/// Compact byte range into a marked buffer.
///
/// # Example
/// ```
/// use creolemark::Range;
///
/// let buffer = "a\u{1A}0000b";
/// let span: std::ops::Range<usize> = Range::placeholder_at(1).into();
/// assert_eq!(&buffer[span], "\u{1A}0000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span of the fixed-width placeholder starting at `offset`.
    #[inline]
    pub const fn placeholder_at(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset + crate::registry::PLACEHOLDER_LEN as u32,
        }
    }

    #[inline]
    pub const fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub const fn end_usize(&self) -> usize {
        self.end as usize
    }

    /// Whether the two ranges share at least one byte.
    #[inline]
    pub const fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<Range> for std::ops::Range<usize> {
    #[inline]
    fn from(r: Range) -> Self {
        r.start_usize()..r.end_usize()
    }
}
