//! Buffer rewriter.
//!
//! Two phases: [`plan`] renders every resolved marker into a [`Splice`]
//! (pure, markers are read-only from here on), then [`apply`] replaces the
//! placeholders in strictly descending offset order. Replacement text rarely
//! has the placeholder's 5-byte width, so applying front to back would shift
//! every placeholder not yet replaced.

use std::fmt::Write as _;

use crate::error::{ResolveError, Result};
use crate::marker::Marker;
use crate::range::Range;
use crate::registry::SENTINEL;
use crate::render::HtmlWriter;

/// Replacement of one placeholder span by literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    pub range: Range,
    pub text: String,
}

/// Render the final text of every marker.
///
/// Markers must be located; the splices come back in the markers' order.
pub fn plan(markers: &[Marker]) -> Result<Vec<Splice>> {
    let mut writer = HtmlWriter::with_capacity(64);
    let mut splices = Vec::with_capacity(markers.len());
    for marker in markers {
        let offset = marker.offset.ok_or(ResolveError::Unlocated { id: marker.id })?;
        if marker.kind.output_strings().any(|s| s.contains(SENTINEL)) {
            let err = ResolveError::SentinelInMarker { id: marker.id };
            log::error!("marker rewrite: {err}");
            return Err(err);
        }
        writer.clear();
        writer.write_marker(&marker.kind);
        splices.push(Splice {
            range: Range::placeholder_at(offset),
            text: writer.as_str().to_owned(),
        });
    }
    Ok(splices)
}

/// Apply splices to `buffer`, last placeholder first.
///
/// Splices must not overlap and must lie on char boundaries, which holds
/// for spans produced by the scanner.
pub fn apply(buffer: &mut String, mut splices: Vec<Splice>) {
    splices.sort_unstable_by(|a, b| b.range.start.cmp(&a.range.start));
    let disjoint = |w: &[Splice]| !w[0].range.overlaps(&w[1].range);
    debug_assert!(splices.windows(2).all(disjoint), "overlapping splices");

    let mut report = String::new();
    for splice in &splices {
        if log::log_enabled!(log::Level::Debug) {
            if !report.is_empty() {
                report.push_str(", ");
            }
            let _ = write!(report, "{}", splice.range.start);
        }
        buffer.replace_range(std::ops::Range::<usize>::from(splice.range), &splice.text);
    }
    log::debug!("applied {} markers at: {report}", splices.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{Category, MarkerId, MarkerKind};

    fn located(id: u16, offset: u32, kind: MarkerKind) -> Marker {
        let mut m = Marker::new(MarkerId(id), kind);
        m.offset = Some(offset);
        m
    }

    fn splice(offset: u32, text: &str) -> Splice {
        Splice {
            range: Range::placeholder_at(offset),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_plan_texts() {
        let markers = vec![
            located(0, 0, MarkerKind::open(Category::Block, "div")),
            located(1, 6, MarkerKind::close(Category::Block, "div")),
        ];
        let splices = plan(&markers).unwrap();
        assert_eq!(splices[0], splice(0, "<div>"));
        assert_eq!(splices[1], splice(6, "</div>"));
    }

    #[test]
    fn test_plan_rejects_sentinel() {
        let kind = MarkerKind::atomic(Category::Inline, "b\u{1A}r");
        let markers = vec![located(3, 0, kind)];
        assert_eq!(
            plan(&markers).unwrap_err(),
            ResolveError::SentinelInMarker { id: MarkerId(3) }
        );
    }

    #[test]
    fn test_apply_any_input_order() {
        let mut buffer = String::from("\u{1A}0000X\u{1A}0001");
        let splices = vec![splice(0, "<div>"), splice(6, "</div>")];
        apply(&mut buffer, splices);
        assert_eq!(buffer, "<div>X</div>");
    }

    #[test]
    fn test_apply_empty_replacement() {
        let mut buffer = String::from("a\u{1A}0000b");
        apply(&mut buffer, vec![splice(1, "")]);
        assert_eq!(buffer, "ab");
    }
}
