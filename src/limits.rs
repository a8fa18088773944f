//! DoS prevention constants.
//!
//! These limits bound the offset width and the id space, and with it the
//! depth the resolver's stacks can reach.

/// Maximum buffer length in bytes; offsets are stored as `u32`.
pub const MAX_BUFFER_LEN: usize = u32::MAX as usize;

/// Largest id a placeholder's 4 hex digits can encode.
pub const MAX_MARKER_ID: u32 = 0xFFFF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MAX_BUFFER_LEN >= 1 << 20) };
        const { assert!(MAX_MARKER_ID == u16::MAX as u32) };
    }
}
