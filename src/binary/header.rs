// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! File header, tag identifiers, and layout constants.
//!
//! The header is 12 bytes: two little-endian DWORDs and a 4-byte magic. The
//! tag tree starts right after it, at [`TAGID_ROOT`]. Nothing in the reader
//! depends on the header contents; they are decoded for diagnostics and for
//! the opt-in `verify_header` load option.
//!
//! Every offset computation in the crate goes through the constants here. If
//! the list header size changes in one place and not another, child walks
//! land mid-record and silently return garbage.

use std::fmt;

use serde::Serialize;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes at `[8, 12)`: "sdbf".
pub const MAGIC: [u8; 4] = *b"sdbf";

/// Size of the file header. Also the offset of the first record.
pub const HEADER_SIZE: usize = 12;

/// Reserved "no tag" identifier. Remapped to [`TAGID_ROOT`] wherever a
/// parent is accepted.
pub const TAGID_NULL: TagId = TagId(0);

/// Offset of the first top-level record.
pub const TAGID_ROOT: TagId = TagId(HEADER_SIZE as u32);

/// Size of the 2-byte tag code that starts every record.
pub const TAG_CODE_SIZE: usize = 2;

/// Tag code + 4-byte length. Children of a list start this far in.
pub const LIST_HEADER_SIZE: usize = 6;

/// Maximum StringRef hops followed before giving up.
///
/// Well-formed files need one hop. The bound only exists so that a crafted
/// file with a reference cycle terminates.
pub const MAX_STRING_REF_DEPTH: usize = 8;

/// Nesting limit for the recursive diagnostics walks (`verify`, `dump`).
/// The navigation API itself is iterative and has no depth limit.
pub const MAX_TREE_DEPTH: usize = 64;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// A raw 16-bit tag code. High nibble is the record type.
pub type Tag = u16;

/// Byte offset of a record inside the database buffer.
///
/// Valid ids are even. `TagId(0)` is the null sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct TagId(pub u32);

impl TagId {
    pub const NULL: TagId = TAGID_NULL;
    pub const ROOT: TagId = TAGID_ROOT;

    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn offset(self) -> usize {
        self.0 as usize
    }

    /// Build an id from a buffer offset. `None` if it does not fit in 32 bits.
    #[inline]
    pub fn from_offset(offset: usize) -> Option<TagId> {
        u32::try_from(offset).ok().map(TagId)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl From<u32> for TagId {
    fn from(value: u32) -> Self {
        TagId(value)
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Decoded 12-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SdbHeader {
    pub major_version: u32,
    pub minor_version: u32,
    pub magic: [u8; 4],
}

impl SdbHeader {
    pub const SIZE: usize = HEADER_SIZE;

    /// Decode the header from the start of `bytes`. `None` if the buffer is
    /// shorter than the header.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        let head = bytes.get(..Self::SIZE)?;
        Some(Self {
            major_version: u32::from_le_bytes([head[0], head[1], head[2], head[3]]),
            minor_version: u32::from_le_bytes([head[4], head[5], head[6], head[7]]),
            magic: [head[8], head[9], head[10], head[11]],
        })
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }
}
