//! Final literal text of each marker.
//!
//! Rendering is a pure function of a resolved marker: open and atomic tags
//! carry their class list, closes are bare, stylers vanish.

use crate::marker::{CloseMarker, MarkerKind, TagMarker};

/// HTML output writer with a pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use creolemark::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.open_tag("div", &["note".to_string()]);
/// writer.close_tag("div");
/// assert_eq!(writer.as_str(), "<div class=\"note\"></div>");
/// ```
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(64),
        }
    }

    /// Create with explicit capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Write a static string (compile-time known).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text escaped for a double-quoted attribute value.
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &str) {
        html_escape::encode_double_quoted_attribute_to_vec(attr, &mut self.out);
    }

    /// Current output length.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear output for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: only &str input and ASCII markup are ever written.
        unsafe { std::str::from_utf8_unchecked(&self.out) }
    }

    /// Take ownership as String.
    #[inline]
    pub fn into_string(self) -> String {
        // SAFETY: only &str input and ASCII markup are ever written.
        unsafe { String::from_utf8_unchecked(self.out) }
    }

    // --- Tag Helpers ---

    /// Write opening tag: `<name>` or `<name class="a b">`
    pub fn open_tag(&mut self, name: &str, classes: &[String]) {
        self.tag_head(name, classes);
        self.write_byte(b'>');
    }

    /// Write self-closing tag: `<name />` or `<name class="a" />`
    pub fn atomic_tag(&mut self, name: &str, classes: &[String]) {
        self.tag_head(name, classes);
        self.write_str(" />");
    }

    /// Write closing tag: `</name>`
    pub fn close_tag(&mut self, name: &str) {
        self.write_str("</");
        self.write_escaped_attr(name);
        self.write_byte(b'>');
    }

    fn tag_head(&mut self, name: &str, classes: &[String]) {
        self.write_byte(b'<');
        self.write_escaped_attr(name);
        if let Some((first, rest)) = classes.split_first() {
            self.write_str(" class=\"");
            self.write_escaped_attr(first);
            for class in rest {
                self.write_byte(b' ');
                self.write_escaped_attr(class);
            }
            self.write_byte(b'"');
        }
    }

    /// Write the final text of a marker.
    pub fn write_marker(&mut self, kind: &MarkerKind) {
        match kind {
            MarkerKind::Tag(TagMarker {
                name,
                atomic: true,
                classes,
                ..
            }) => self.atomic_tag(name, classes),
            MarkerKind::Tag(TagMarker { name, classes, .. }) => self.open_tag(name, classes),
            MarkerKind::Close(CloseMarker { name, .. }) => self.close_tag(name),
            MarkerKind::Styler(_) => {}
        }
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// The literal text that replaces a marker's placeholder.
pub fn marker_text(kind: &MarkerKind) -> String {
    let mut writer = HtmlWriter::with_capacity(32);
    writer.write_marker(kind);
    writer.into_string()
}
