//! Producer-side output buffer.
//!
//! The grammar pass writes literal text and markers into a [`MarkedBuffer`];
//! each marker is registered and its placeholder appended in one step, so
//! the buffer and registry cannot drift apart.

use std::fmt;

use crate::error::Result;
use crate::marker::{MarkerId, MarkerKind};
use crate::registry::{self, MarkerRegistry, SENTINEL};

/// Literal output text interspersed with marker placeholders.
///
/// # Example
/// ```
/// use creolemark::{Category, Direction, MarkedBuffer, MarkerKind};
///
/// let mut out = MarkedBuffer::new();
/// out.push_marker(MarkerKind::open(Category::Block, "p")).unwrap();
/// out.push_str("Hello");
/// out.push_marker(MarkerKind::styler(Category::Block, Direction::Container, "lead")).unwrap();
/// out.push_marker(MarkerKind::close(Category::Block, "p")).unwrap();
/// assert_eq!(out.finish().unwrap(), "<p class=\"lead\">Hello</p>");
/// ```
#[derive(Debug, Default)]
pub struct MarkedBuffer {
    text: String,
    registry: MarkerRegistry,
}

impl MarkedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated text capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            registry: MarkerRegistry::new(),
        }
    }

    /// Append literal text. It must not contain the sentinel character.
    #[inline]
    pub fn push_str(&mut self, text: &str) {
        debug_assert!(!text.contains(SENTINEL), "sentinel in literal text");
        self.text.push_str(text);
    }

    /// Register a marker and append its placeholder.
    pub fn push_marker(&mut self, kind: MarkerKind) -> Result<MarkerId> {
        let id = self.registry.register(kind)?;
        registry::write_placeholder(&mut self.text, id);
        Ok(id)
    }

    /// Buffer text with placeholders still in place.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn into_parts(self) -> (String, MarkerRegistry) {
        (self.text, self.registry)
    }

    /// Resolve all markers into final markup.
    pub fn finish(self) -> Result<String> {
        crate::resolve(self.text, self.registry)
    }
}

impl fmt::Write for MarkedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}
