//! creolemark: deferred markup resolution for wiki-text renderers
//!
//! A grammar pass writes HTML fragments into a text buffer, but cannot know
//! yet which CSS classes a tag will carry or whether its tags balance. It
//! writes a 5-byte placeholder per pending decision instead and registers a
//! marker for it. [`resolve`] then runs one pass over the buffer:
//!
//! 1. scan: locate every placeholder and check it against the registry
//! 2. resolve: walk markers in buffer order, balance tags per category and
//!    attach styler classes to their targets
//! 3. rewrite: render each marker and splice it in, last one first
//!
//! # Design Principles
//! - No backtracking: one forward walk over the sorted markers
//! - Index stacks: marker identity is a slice index, not a pointer
//! - Integrity faults and authoring faults are distinct error tiers

pub mod buffer;
pub mod error;
pub mod limits;
pub mod marker;
pub mod page;
pub mod range;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod rewrite;
pub mod scan;

// Re-export primary types
pub use buffer::MarkedBuffer;
pub use error::{PageError, ResolveError, Result};
pub use marker::{Category, Direction, Marker, MarkerId, MarkerKind};
pub use page::{Boilerplate, PageOptions};
pub use range::Range;
pub use registry::MarkerRegistry;
pub use render::HtmlWriter;

/// Resolve every marker placeholder in `buffer`.
///
/// # Example
/// ```
/// use creolemark::{Category, MarkerKind, MarkerRegistry};
///
/// let mut registry = MarkerRegistry::new();
/// registry.register(MarkerKind::open(Category::Block, "div")).unwrap();
/// registry.register(MarkerKind::close(Category::Block, "div")).unwrap();
/// let html = creolemark::resolve("\u{1A}0000X\u{1A}0001".to_string(), registry).unwrap();
/// assert_eq!(html, "<div>X</div>");
/// ```
pub fn resolve(buffer: String, registry: MarkerRegistry) -> Result<String> {
    let mut buffer = buffer;
    resolve_in_place(&mut buffer, registry)?;
    Ok(buffer)
}

/// Resolve markers, rewriting `buffer` in place.
///
/// On error the buffer is left untouched.
pub fn resolve_in_place(buffer: &mut String, registry: MarkerRegistry) -> Result<()> {
    run(buffer, registry).inspect_err(|err| {
        if err.is_internal() {
            log::error!("marker resolution aborted: {err}");
        } else {
            log::debug!("marker resolution rejected: {err}");
        }
    })
}

fn run(buffer: &mut String, mut registry: MarkerRegistry) -> Result<()> {
    scan::scan(buffer, &mut registry)?;
    if registry.is_empty() {
        return Ok(());
    }
    let mut markers = registry.into_sorted()?;
    resolve::validate_and_set_classes(&mut markers)?;
    let splices = rewrite::plan(&markers)?;
    rewrite::apply(buffer, splices);
    Ok(())
}
