// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for shimdb offset arithmetic.
//!
//! This standalone crate extracts the record size table and the cursor
//! step from the main crate and proves them over every small buffer.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **No panics**: record_size and advance never panic for any bytes
//! 2. **Even sizes**: every accepted record size is even and >= 2
//! 3. **Cursor bounds**: advance never returns an offset at or past the end
//! 4. **Rejection**: Byte and reserved type nibbles are always corrupt

/// Bytes before the first record.
pub const HEADER_SIZE: usize = 12;

/// Tag code plus the u32 length/offset field.
pub const LIST_HEADER_SIZE: usize = 6;

// ============================================================================
// RECORD SIZE (copied from src/binary/encoding.rs)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeError {
    Corrupt,
    Truncated,
}

pub fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let b = bytes.get(offset..end)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

pub fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let b = bytes.get(offset..end)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Fixed size for the type nibble, `Ok(None)` for length-prefixed types.
fn fixed_size(tag: u16) -> Result<Option<usize>, SizeError> {
    match tag >> 12 {
        0x1 => Ok(Some(2)),
        0x3 => Ok(Some(4)),
        0x4 | 0x6 => Ok(Some(6)),
        0x5 => Ok(Some(10)),
        0x7 | 0x8 | 0x9 => Ok(None),
        _ => Err(SizeError::Corrupt),
    }
}

pub fn record_size(buffer: &[u8], offset: usize) -> Result<usize, SizeError> {
    let tag = read_u16(buffer, offset).ok_or(SizeError::Truncated)?;
    let raw = match fixed_size(tag)? {
        Some(size) => size,
        None => {
            let len = read_u32(buffer, offset + 2).ok_or(SizeError::Truncated)?;
            LIST_HEADER_SIZE
                .checked_add(len as usize)
                .ok_or(SizeError::Truncated)?
        }
    };
    raw.checked_add(raw & 1).ok_or(SizeError::Truncated)
}

// ============================================================================
// CURSOR (copied from src/binary/cursor.rs)
// ============================================================================

pub fn advance(buffer: &[u8], offset: usize) -> Option<usize> {
    if offset & 1 != 0 {
        return None;
    }
    let offset = if offset == 0 { HEADER_SIZE } else { offset };
    read_u16(buffer, offset)?;
    let size = record_size(buffer, offset).ok()?;
    let next = offset.checked_add(size)?;
    if next >= buffer.len() {
        return None;
    }
    Some(next)
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    const BUF: usize = 24;

    fn symbolic_buffer() -> ([u8; BUF], usize) {
        let bytes: [u8; BUF] = kani::any();
        let len: usize = kani::any_where(|&n| n <= BUF);
        (bytes, len)
    }

    /// Accepted sizes are even and at least one tag code long.
    #[kani::proof]
    fn verify_record_size_even() {
        let (bytes, len) = symbolic_buffer();
        let offset: usize = kani::any_where(|&o| o <= BUF);

        if let Ok(size) = record_size(&bytes[..len], offset) {
            kani::assert(size % 2 == 0, "record size must be even");
            kani::assert(size >= 2, "record size must cover the tag code");
        }
    }

    /// Byte and reserved nibbles are rejected wherever they appear.
    #[kani::proof]
    fn verify_reserved_nibbles_rejected() {
        let tag: u16 = kani::any();
        let nibble = tag >> 12;
        kani::assume(nibble == 0 || nibble == 2 || nibble >= 0xA);

        let mut bytes = [0u8; 8];
        bytes[..2].copy_from_slice(&tag.to_le_bytes());
        kani::assert(
            record_size(&bytes, 0) == Err(SizeError::Corrupt),
            "reserved type must be corrupt",
        );
    }

    /// The cursor never rests on or past the end and always moves forward.
    #[kani::proof]
    fn verify_advance_in_bounds() {
        let (bytes, len) = symbolic_buffer();
        let offset: usize = kani::any();
        let buffer = &bytes[..len];

        if let Some(next) = advance(buffer, offset) {
            kani::assert(next < buffer.len(), "advance must stay inside the buffer");
            kani::assert(next % 2 == 0, "advance must land on an even offset");
            kani::assert(next > offset, "advance must move forward");
        }
    }
}
