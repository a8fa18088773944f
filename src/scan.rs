//! Placeholder scanner.
//!
//! Finds every sentinel in the buffer with `memchr`, decodes the 4 hex
//! digits that follow, and records the sentinel's offset on the matching
//! marker. Any disagreement between buffer and registry is an
//! internal-integrity fault.

use memchr::memchr;

use crate::error::{ResolveError, Result};
use crate::limits;
use crate::marker::MarkerId;
use crate::registry::{MarkerRegistry, PLACEHOLDER_LEN, SENTINEL_BYTE};

/// One placeholder found in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub offset: u32,
    pub id: MarkerId,
}

/// Locate every placeholder in `buffer`, left to right.
///
/// On success each registered marker carries its offset, and the returned
/// placements are in ascending offset order.
pub fn scan(buffer: &str, registry: &mut MarkerRegistry) -> Result<Vec<Placement>> {
    let bytes = buffer.as_bytes();
    if bytes.len() > limits::MAX_BUFFER_LEN {
        return fault(ResolveError::BufferTooLarge {
            len: bytes.len(),
            max: limits::MAX_BUFFER_LEN,
        });
    }

    let mut placements = Vec::with_capacity(registry.len());
    let mut pos = 0;
    while let Some(found) = memchr(SENTINEL_BYTE, &bytes[pos..]) {
        let offset = pos + found;
        let id = decode_id(bytes, offset)?;
        let marker = match registry.get_mut(id) {
            Some(marker) => marker,
            None => return fault(ResolveError::LostMarker { id, offset }),
        };
        let offset32 = offset as u32;
        if let Err(first) = marker.locate(offset32) {
            return fault(ResolveError::MarkerLocatedTwice {
                id,
                first,
                second: offset32,
            });
        }
        placements.push(Placement {
            offset: offset32,
            id,
        });
        pos = offset + PLACEHOLDER_LEN;
    }

    log::debug!(
        "{} markings: {:?}",
        placements.len(),
        placements.iter().map(|p| p.offset).collect::<Vec<_>>()
    );
    if placements.len() != registry.len() {
        return fault(ResolveError::CountMismatch {
            markings: placements.len(),
            markers: registry.len(),
        });
    }
    Ok(placements)
}

/// Decode the id of the placeholder whose sentinel sits at `offset`.
fn decode_id(bytes: &[u8], offset: usize) -> Result<MarkerId> {
    let end = offset + PLACEHOLDER_LEN;
    if end > bytes.len() {
        return fault(ResolveError::TruncatedPlaceholder {
            offset,
            len: bytes.len(),
        });
    }
    let digits = &bytes[offset + 1..end];
    let mut id: u16 = 0;
    for &b in digits {
        let nibble = match hex_value(b) {
            Some(n) => n,
            None => {
                return fault(ResolveError::MalformedPlaceholder {
                    offset,
                    digits: String::from_utf8_lossy(digits).into_owned(),
                });
            }
        };
        id = (id << 4) | u16::from(nibble);
    }
    Ok(MarkerId(id))
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cold]
fn fault<T>(err: ResolveError) -> Result<T> {
    log::error!("marker scan: {err}");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{Category, MarkerKind};

    fn registry_of(n: usize) -> MarkerRegistry {
        let mut reg = MarkerRegistry::new();
        for _ in 0..n {
            let br = MarkerKind::atomic(Category::Inline, "br");
            reg.register(br).unwrap();
        }
        reg
    }

    #[test]
    fn test_scan_empty() {
        let mut reg = MarkerRegistry::new();
        assert_eq!(scan("plain text", &mut reg).unwrap(), vec![]);
    }

    #[test]
    fn test_scan_records_offsets() {
        let mut reg = registry_of(2);
        let placements = scan("ab\u{1A}0000cd\u{1A}0001", &mut reg).unwrap();
        let offsets: Vec<u32> = placements.iter().map(|p| p.offset).collect();
        let ids: Vec<MarkerId> = placements.iter().map(|p| p.id).collect();
        assert_eq!(offsets, [2, 9]);
        assert_eq!(ids, [MarkerId(0), MarkerId(1)]);
        assert_eq!(reg.get(MarkerId(0)).unwrap().offset, Some(2));
        assert_eq!(reg.get(MarkerId(1)).unwrap().offset, Some(9));
    }

    #[test]
    fn test_scan_lowercase_hex() {
        let mut reg = MarkerRegistry::new();
        reg.insert(MarkerId(0xABCD), MarkerKind::atomic(Category::Block, "hr"))
            .unwrap();
        let placements = scan("\u{1A}abcd", &mut reg).unwrap();
        assert_eq!(placements[0].id, MarkerId(0xABCD));
    }

    #[test]
    fn test_scan_multibyte_text() {
        let mut reg = registry_of(1);
        let placements = scan("äöü\u{1A}0000", &mut reg).unwrap();
        assert_eq!(placements[0].offset, 6);
    }

    #[test]
    fn test_scan_lost_marker() {
        let mut reg = registry_of(1);
        let err = scan("\u{1A}0007", &mut reg).unwrap_err();
        assert_eq!(
            err,
            ResolveError::LostMarker {
                id: MarkerId(7),
                offset: 0
            }
        );
    }

    #[test]
    fn test_scan_located_twice() {
        let mut reg = registry_of(1);
        let err = scan("\u{1A}0000x\u{1A}0000", &mut reg).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MarkerLocatedTwice {
                id: MarkerId(0),
                first: 0,
                second: 6
            }
        );
    }

    #[test]
    fn test_scan_truncated() {
        let mut reg = registry_of(1);
        let err = scan("abc\u{1A}000", &mut reg).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TruncatedPlaceholder { offset: 3, len: 7 }
        );
    }

    #[test]
    fn test_scan_malformed() {
        let mut reg = registry_of(1);
        let err = scan("\u{1A}00g0", &mut reg).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MalformedPlaceholder { offset: 0, .. }
        ));
        assert!(err.is_internal());
    }

    #[test]
    fn test_scan_count_mismatch() {
        let mut reg = registry_of(3);
        let err = scan("\u{1A}0000\u{1A}0002", &mut reg).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CountMismatch {
                markings: 2,
                markers: 3
            }
        );
    }
}
