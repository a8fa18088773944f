//! Marker registry: placeholder id to marker record.

use rustc_hash::FxBuildHasher as FastHashBuilder;
use std::collections::HashMap;

use crate::error::{ResolveError, Result};
use crate::limits;
use crate::marker::{Marker, MarkerId, MarkerKind};

/// Reserved control character that starts every placeholder.
pub const SENTINEL: char = '\u{1A}';

/// Byte form of [`SENTINEL`].
pub const SENTINEL_BYTE: u8 = 0x1A;

/// Placeholder width: sentinel plus 4 hex digits.
pub const PLACEHOLDER_LEN: usize = 5;

/// Append the placeholder for `id` to `out`.
#[inline]
pub fn write_placeholder(out: &mut String, id: MarkerId) {
    out.push(SENTINEL);
    for b in id.hex() {
        out.push(b as char);
    }
}

/// Markers of one resolution run, keyed by id.
///
/// Built by the producer before scanning, consumed by
/// [`crate::resolve()`]. A registry is never reused across runs.
#[derive(Clone, Debug, Default)]
pub struct MarkerRegistry {
    by_id: HashMap<MarkerId, Marker, FastHashBuilder>,
    next_id: u32,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a marker under the next free id.
    pub fn register(&mut self, kind: MarkerKind) -> Result<MarkerId> {
        while self.next_id <= limits::MAX_MARKER_ID {
            let id = MarkerId(self.next_id as u16);
            self.next_id += 1;
            if !self.by_id.contains_key(&id) {
                self.by_id.insert(id, Marker::new(id, kind));
                return Ok(id);
            }
        }
        Err(ResolveError::RegistryFull {
            capacity: limits::MAX_MARKER_ID as usize + 1,
        })
    }

    /// Register a marker under an id chosen by the producer.
    pub fn insert(&mut self, id: MarkerId, kind: MarkerKind) -> Result<()> {
        if self.by_id.contains_key(&id) {
            return Err(ResolveError::DuplicateId { id });
        }
        self.by_id.insert(id, Marker::new(id, kind));
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.by_id.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.by_id.get_mut(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Drain into document order. Every marker must have been located.
    pub fn into_sorted(self) -> Result<Vec<Marker>> {
        let mut markers: Vec<Marker> = self.by_id.into_values().collect();
        markers.sort_unstable();
        // Unlocated markers sort last, lowest id first.
        if let Some(m) = markers.iter().find(|m| m.offset.is_none()) {
            return Err(ResolveError::Unlocated { id: m.id });
        }
        Ok(markers)
    }
}
