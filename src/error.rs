//! Error types for marker resolution and page merge.

use thiserror::Error;

use crate::marker::{Category, MarkerId};

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Failure of one resolution run.
///
/// Variants fall into two tiers, see [`ResolveError::is_internal`]. No
/// partial output accompanies an error; the attempted buffer must be
/// discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    // --- internal-integrity faults: producer/registry desync ---
    #[error(
        "Marking too close to end of output: placeholder at {offset} overruns length {len}"
    )]
    TruncatedPlaceholder { offset: usize, len: usize },

    #[error("Malformed marking at {offset}: '{digits}' is not a 4-digit hex id")]
    MalformedPlaceholder { offset: usize, digits: String },

    #[error("Lost marker with id {id} (marking at {offset})")]
    LostMarker { id: MarkerId, offset: usize },

    #[error("Marker {id} marked twice, at {first} and at {second}")]
    MarkerLocatedTwice {
        id: MarkerId,
        first: u32,
        second: u32,
    },

    #[error(
        "Markings/markers mismatch.  {markings} markings found, but there are {markers} markers"
    )]
    CountMismatch { markings: usize, markers: usize },

    #[error("Marker {id} was never located in the buffer")]
    Unlocated { id: MarkerId },

    #[error(
        "Closing tag {tag}, but it is not on the tail of the type-specific tag stack"
    )]
    StackDesync { tag: String },

    #[error("Marker registry is full: all {capacity} placeholder ids are taken")]
    RegistryFull { capacity: usize },

    #[error("Marker id {id} is already registered")]
    DuplicateId { id: MarkerId },

    #[error("Buffer of {len} bytes exceeds the {max} byte limit")]
    BufferTooLarge { len: usize, max: usize },

    #[error("Marker {id} has a sentinel character in its tag or class name")]
    SentinelInMarker { id: MarkerId },

    // --- structural errors: malformed document ---
    #[error(
        "Tangled tag nesting.  No open tag name matches close of {close}.  Last open tag is {}.",
        .last_open.as_deref().unwrap_or("none")
    )]
    TangledName {
        close: String,
        last_open: Option<String>,
    },

    #[error(
        "Tangled tag nesting.  Wrong tag type for close of {close}.  Last open tag is {last_open}."
    )]
    TangledCategory { close: String, last_open: String },

    #[error("Close tag {close} attempted to close atomic tag {tag}.")]
    AtomicClose { close: String, tag: String },

    #[error("Unmatched tag(s) generated: [{}]", .tags.join(", "))]
    UnmatchedTags { tags: Vec<String> },

    #[error("Unmatched {category} tag(s): [{}]", .tags.join(", "))]
    UnmatchedCategoryTags {
        category: Category,
        tags: Vec<String>,
    },

    #[error("No previous {category} tag for Styler {styler}")]
    NoPreviousTag { category: Category, styler: String },

    #[error("No parent {category} container for Styler {styler}")]
    NoContainer { category: Category, styler: String },

    #[error("Unapplied Styler {category} class names: [{}]", .classes.join(", "))]
    UnappliedClasses {
        category: Category,
        classes: Vec<String>,
    },
}

impl ResolveError {
    /// True for contract violations by the upstream producer.
    ///
    /// These are defects, never caused by document content, and retrying
    /// on the same input cannot succeed. Structural errors (`false`) describe
    /// malformed markup and are suitable for showing to an author.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::TruncatedPlaceholder { .. }
                | Self::MalformedPlaceholder { .. }
                | Self::LostMarker { .. }
                | Self::MarkerLocatedTwice { .. }
                | Self::CountMismatch { .. }
                | Self::Unlocated { .. }
                | Self::StackDesync { .. }
                | Self::RegistryFull { .. }
                | Self::DuplicateId { .. }
                | Self::BufferTooLarge { .. }
                | Self::SentinelInMarker { .. }
        )
    }
}

/// Failure merging a fragment into a page boilerplate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Boilerplate contains neither $(pageContent) nor $(!pageContent)")]
    MissingContentPoint,

    #[error(
        "Style-sheets or target window set, but boilerplate has no 'pageHeaders' insertion-point"
    )]
    MissingHeadersPoint,
}
