//! Nesting validation and styler class resolution.
//!
//! One walk over the markers in document order does both jobs:
//!
//! - a unified stack of open tags checks that every close matches the
//!   innermost open tag by name and category;
//! - one lane per [`Category`] keeps that category's own open-tag stack,
//!   its "most recent" tag and its queue of pending NEXT classes, so that
//!   styler targeting ignores tags of unrelated categories interleaved in
//!   between.
//!
//! Stacks hold indices into the marker slice, so stack identity checks
//! are index comparisons.

use smallvec::SmallVec;

use crate::error::{ResolveError, Result};
use crate::marker::{Category, Direction, Marker, MarkerKind, TagMarker};

/// Per-category resolver state.
#[derive(Debug, Default)]
struct Lane {
    /// Open tags of this category, innermost last.
    open: SmallVec<[usize; 16]>,
    /// Target for PREVIOUS stylers.
    previous: Option<usize>,
    /// Classes from NEXT stylers awaiting the next tag of this category.
    queued: SmallVec<[String; 4]>,
}

/// What a marker asks of the walk, copied out so the slice can be mutated.
#[derive(Clone, Copy)]
enum Step {
    Tag { category: Category, atomic: bool },
    Close { category: Category },
    Styler {
        target: Category,
        direction: Direction,
    },
}

struct Resolver<'m> {
    markers: &'m mut [Marker],
    /// All open tags regardless of category, innermost last.
    open: SmallVec<[usize; 32]>,
    lanes: [Lane; 3],
}

/// Validate tag nesting and apply styler classes to tag markers.
///
/// `markers` must be sorted ascending by offset. On success every open tag
/// has been closed, every styler class has landed on a tag, and the tag
/// markers' `classes` are final.
pub fn validate_and_set_classes(markers: &mut [Marker]) -> Result<()> {
    let mut resolver = Resolver {
        markers,
        open: SmallVec::new(),
        lanes: Default::default(),
    };
    for idx in 0..resolver.markers.len() {
        log::trace!("resolve {}", resolver.markers[idx]);
        match resolver.step(idx) {
            Step::Tag { category, atomic } => resolver.tag(idx, category, atomic),
            Step::Close { category } => resolver.close(idx, category)?,
            Step::Styler { target, direction } => resolver.styler(idx, target, direction)?,
        }
    }
    resolver.finish()
}

impl Resolver<'_> {
    fn step(&self, idx: usize) -> Step {
        match &self.markers[idx].kind {
            MarkerKind::Tag(tag) => Step::Tag {
                category: tag.category,
                atomic: tag.atomic,
            },
            MarkerKind::Close(close) => Step::Close {
                category: close.category,
            },
            MarkerKind::Styler(styler) => Step::Styler {
                target: styler.target,
                direction: styler.direction,
            },
        }
    }

    /// Tag marker at `idx`. Only called with indices the walk pushed as tags.
    fn tag_mut(&mut self, idx: usize) -> Option<&mut TagMarker> {
        self.markers[idx].as_tag_mut()
    }

    fn describe(&self, idx: usize) -> String {
        self.markers[idx].to_string()
    }

    fn tag(&mut self, idx: usize, category: Category, atomic: bool) {
        let lane = &mut self.lanes[category.index()];
        if atomic {
            // Pushing and popping at once would leave the stacks unchanged.
            lane.previous = Some(idx);
        } else {
            lane.previous = lane.open.last().copied();
            lane.open.push(idx);
            self.open.push(idx);
        }

        let queued = std::mem::take(&mut lane.queued);
        if !queued.is_empty() {
            if let Some(tag) = self.tag_mut(idx) {
                tag.classes.extend(queued);
            }
        }
    }

    fn close(&mut self, idx: usize, declared: Category) -> Result<()> {
        let close_name = match &self.markers[idx].kind {
            MarkerKind::Close(close) => close.name.as_str(),
            _ => unreachable!("step() reported a close"),
        };
        let last = self.open.last().copied();
        let last_tag = match last {
            Some(last) => match self.markers[last].as_tag() {
                Some(tag) => Some(tag),
                None => return Err(self.desync(last)),
            },
            None => None,
        };

        let last = match (last, last_tag) {
            (Some(last), Some(tag)) if tag.name == close_name => {
                if tag.category != declared {
                    return Err(ResolveError::TangledCategory {
                        close: self.describe(idx),
                        last_open: self.describe(last),
                    });
                }
                last
            }
            _ => {
                if let Some(atomic) = self.atomic_named(close_name, last, idx) {
                    return Err(ResolveError::AtomicClose {
                        close: self.describe(idx),
                        tag: self.describe(atomic),
                    });
                }
                return Err(ResolveError::TangledName {
                    close: self.describe(idx),
                    last_open: last.map(|l| self.describe(l)),
                });
            }
        };

        let lane = &mut self.lanes[declared.index()];
        if lane.open.last() != Some(&last) {
            return Err(self.desync(last));
        }
        lane.open.pop();
        lane.previous = Some(last);
        self.open.pop();
        Ok(())
    }

    /// Latest atomic tag named `name` between the innermost open tag and
    /// the close at `close`.
    ///
    /// Atomic tags never enter the stacks, so a close aimed at one surfaces
    /// as a mismatch against whatever is open; this tells the two apart.
    fn atomic_named(&self, name: &str, innermost: Option<usize>, close: usize) -> Option<usize> {
        let from = innermost.map_or(0, |open| open + 1);
        (from..close).rev().find(|&i| {
            self.markers[i]
                .as_tag()
                .is_some_and(|tag| tag.atomic && tag.name == name)
        })
    }

    fn styler(&mut self, idx: usize, target: Category, direction: Direction) -> Result<()> {
        let class_name = match &self.markers[idx].kind {
            MarkerKind::Styler(styler) => styler.class_name.clone(),
            _ => unreachable!("step() reported a styler"),
        };
        let lane = &self.lanes[target.index()];
        let target_idx = match direction {
            Direction::Previous => lane.previous.ok_or_else(|| ResolveError::NoPreviousTag {
                category: target,
                styler: self.describe(idx),
            })?,
            Direction::Container => {
                lane.open
                    .last()
                    .copied()
                    .ok_or_else(|| ResolveError::NoContainer {
                        category: target,
                        styler: self.describe(idx),
                    })?
            }
            Direction::Next => {
                self.lanes[target.index()].queued.push(class_name);
                return Ok(());
            }
        };
        match self.tag_mut(target_idx) {
            Some(tag) => {
                tag.add_class(class_name);
                Ok(())
            }
            None => Err(self.desync(target_idx)),
        }
    }

    fn finish(self) -> Result<()> {
        if !self.open.is_empty() {
            return Err(ResolveError::UnmatchedTags {
                tags: self.open.iter().map(|&i| self.describe(i)).collect(),
            });
        }
        for category in Category::ALL {
            let lane = &self.lanes[category.index()];
            if !lane.open.is_empty() {
                return Err(ResolveError::UnmatchedCategoryTags {
                    category,
                    tags: lane.open.iter().map(|&i| self.describe(i)).collect(),
                });
            }
        }
        for category in Category::ALL {
            let lane = &self.lanes[category.index()];
            if !lane.queued.is_empty() {
                return Err(ResolveError::UnappliedClasses {
                    category,
                    classes: lane.queued.to_vec(),
                });
            }
        }
        Ok(())
    }

    #[cold]
    fn desync(&self, idx: usize) -> ResolveError {
        let err = ResolveError::StackDesync {
            tag: self.describe(idx),
        };
        log::error!("marker resolve: {err}");
        err
    }
}
