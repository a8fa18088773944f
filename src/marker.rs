//! Marker records referenced by placeholders in the output buffer.
//!
//! A marker stands in for one tag event (open, atomic, close) or a styling
//! directive. The upstream producer registers them; the resolver appends
//! classes to tag markers; the rewriter renders them and drops them.

use std::fmt;

/// Id encoded by a placeholder's 4 hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u16);

impl MarkerId {
    /// Fixed-width uppercase hex form, as written into placeholders.
    pub fn hex(self) -> [u8; 4] {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        let v = self.0;
        [
            HEX[(v >> 12) as usize & 0xF],
            HEX[(v >> 8) as usize & 0xF],
            HEX[(v >> 4) as usize & 0xF],
            HEX[v as usize & 0xF],
        ]
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// Independent nesting domain of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Author-defined container blocks and spans.
    Jcx,
    /// Block-level HTML elements.
    Block,
    /// Inline HTML elements.
    Inline,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Jcx, Category::Block, Category::Inline];

    /// Dense index for per-category state arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Jcx => 0,
            Self::Block => 1,
            Self::Inline => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jcx => "JCX",
            Self::Block => "Block",
            Self::Inline => "Inline",
        })
    }
}

/// Which related tag a [`Styler`] targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Most recently closed (or atomic) tag of the category.
    Previous,
    /// Nearest open ancestor of the category.
    Container,
    /// Next tag of the category to open (or appear atomically).
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Previous => "previous",
            Self::Container => "container",
            Self::Next => "next",
        })
    }
}

/// An open or atomic tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagMarker {
    pub category: Category,
    pub name: String,
    /// Self-closing; never paired with a [`CloseMarker`].
    pub atomic: bool,
    /// CSS classes in application order. Append-only during resolution.
    pub classes: Vec<String>,
}

impl TagMarker {
    /// Append a class name.
    #[inline]
    pub fn add_class(&mut self, class_name: impl Into<String>) {
        self.classes.push(class_name.into());
    }
}

/// Close of the innermost open tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseMarker {
    /// Category the closed tag must belong to.
    pub category: Category,
    pub name: String,
}

/// Directive to attach a CSS class to a related tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Styler {
    pub target: Category,
    pub direction: Direction,
    pub class_name: String,
}

/// The closed set of marker variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Tag(TagMarker),
    Close(CloseMarker),
    Styler(Styler),
}

impl MarkerKind {
    /// An opening tag that needs a matching close.
    pub fn open(category: Category, name: impl Into<String>) -> Self {
        Self::Tag(TagMarker {
            category,
            name: name.into(),
            atomic: false,
            classes: Vec::new(),
        })
    }

    /// A self-closing tag.
    pub fn atomic(category: Category, name: impl Into<String>) -> Self {
        Self::Tag(TagMarker {
            category,
            name: name.into(),
            atomic: true,
            classes: Vec::new(),
        })
    }

    pub fn close(category: Category, name: impl Into<String>) -> Self {
        Self::Close(CloseMarker {
            category,
            name: name.into(),
        })
    }

    pub fn styler(target: Category, direction: Direction, class_name: impl Into<String>) -> Self {
        Self::Styler(Styler {
            target,
            direction,
            class_name: class_name.into(),
        })
    }

    /// Give an open or atomic tag initial classes.
    ///
    /// Has no effect on closes and stylers.
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Self::Tag(tag) = &mut self {
            tag.classes.extend(classes.into_iter().map(Into::into));
        }
        self
    }

    /// Strings that end up in the output buffer.
    pub(crate) fn output_strings(&self) -> impl Iterator<Item = &str> {
        let (name, classes): (Option<&str>, &[String]) = match self {
            Self::Tag(tag) => (Some(tag.name.as_str()), tag.classes.as_slice()),
            Self::Close(close) => (Some(close.name.as_str()), &[]),
            Self::Styler(styler) => (Some(styler.class_name.as_str()), &[]),
        };
        name.into_iter().chain(classes.iter().map(String::as_str))
    }
}

/// A registered marker and where its placeholder sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub id: MarkerId,
    /// Byte offset of the placeholder's sentinel; set once by the scanner.
    pub offset: Option<u32>,
    pub kind: MarkerKind,
}

impl Marker {
    pub fn new(id: MarkerId, kind: MarkerKind) -> Self {
        Self {
            id,
            offset: None,
            kind,
        }
    }

    /// Record the placeholder offset.
    ///
    /// Returns the previously recorded offset if the marker was already
    /// located; the stored offset is left untouched in that case.
    #[inline]
    pub fn locate(&mut self, offset: u32) -> std::result::Result<(), u32> {
        match self.offset {
            Some(first) => Err(first),
            None => {
                self.offset = Some(offset);
                Ok(())
            }
        }
    }

    #[inline]
    pub fn as_tag(&self) -> Option<&TagMarker> {
        match &self.kind {
            MarkerKind::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    #[inline]
    pub fn as_tag_mut(&mut self) -> Option<&mut TagMarker> {
        match &mut self.kind {
            MarkerKind::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MarkerKind::Tag(tag) if tag.atomic => {
                write!(f, "{} <{} />", tag.category, tag.name)?;
            }
            MarkerKind::Tag(tag) => write!(f, "{} <{}>", tag.category, tag.name)?,
            MarkerKind::Close(close) => write!(f, "{} </{}>", close.category, close.name)?,
            MarkerKind::Styler(styler) => write!(
                f,
                "{} {} '{}'",
                styler.target, styler.direction, styler.class_name
            )?,
        }
        write!(f, " #{}", self.id)?;
        if let Some(offset) = self.offset {
            write!(f, "@{offset}")?;
        }
        Ok(())
    }
}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Document order: ascending offset, unlocated markers last, id as tiebreak.
impl Ord for Marker {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let key = |m: &Marker| (m.offset.is_none(), m.offset, m.id);
        key(self).cmp(&key(other))
    }
}
