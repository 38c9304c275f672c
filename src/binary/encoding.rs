// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record layout: type nibbles, record sizes, and payload decoding.
//!
//! Every record is a 2-byte tag code followed by a payload whose shape is
//! fixed by the type nibble:
//!
//! ```text
//! type        nibble  payload                      total (padded to even)
//! ──────────  ──────  ───────────────────────────  ──────────────────────
//! NULL        0x1     none                         2
//! BYTE        0x2     undefined (corrupt)          -
//! WORD        0x3     u16                          4
//! DWORD       0x4     u32                          6
//! QWORD       0x5     u64                          10
//! STRINGREF   0x6     u32 offset into string table 6
//! LIST        0x7     u32 content length, children 6 + length
//! STRING      0x8     u32 length, UTF-16LE bytes   6 + length
//! BINARY      0x9     u32 length, raw bytes        6 + length
//! ```
//!
//! [`record_size`] is the only place sizes are computed. The reads here never
//! alias the buffer as a struct; each field is pulled out with
//! `from_le_bytes` on a bounds-checked slice.

use serde::Serialize;

use super::header::{Tag, LIST_HEADER_SIZE, TAG_CODE_SIZE};
use crate::error::LoadError;
use crate::strings::WideStr;
use crate::verify::contracts::check_record_size_even;

// ============================================================================
// TAG TYPES
// ============================================================================

/// Record type, taken from the high nibble of the tag code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    Null,
    Byte,
    Word,
    Dword,
    Qword,
    StringRef,
    List,
    String,
    Binary,
}

impl TagType {
    pub const MASK: Tag = 0xF000;

    /// Decode the type nibble. Reserved nibbles (`0x0`, `0xA`–`0xF`) give `None`.
    #[inline]
    pub fn of(tag: Tag) -> Option<TagType> {
        match tag >> 12 {
            0x1 => Some(TagType::Null),
            0x2 => Some(TagType::Byte),
            0x3 => Some(TagType::Word),
            0x4 => Some(TagType::Dword),
            0x5 => Some(TagType::Qword),
            0x6 => Some(TagType::StringRef),
            0x7 => Some(TagType::List),
            0x8 => Some(TagType::String),
            0x9 => Some(TagType::Binary),
            _ => None,
        }
    }

    /// The type bits as they appear in a tag code (`0x7000` for List).
    pub fn bits(self) -> Tag {
        let nibble: Tag = match self {
            TagType::Null => 0x1,
            TagType::Byte => 0x2,
            TagType::Word => 0x3,
            TagType::Dword => 0x4,
            TagType::Qword => 0x5,
            TagType::StringRef => 0x6,
            TagType::List => 0x7,
            TagType::String => 0x8,
            TagType::Binary => 0x9,
        };
        nibble << 12
    }

    /// Unpadded size of records with a fixed layout.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            TagType::Null => Some(2),
            TagType::Word => Some(4),
            TagType::Dword => Some(6),
            TagType::Qword => Some(10),
            TagType::StringRef => Some(6),
            TagType::Byte | TagType::List | TagType::String | TagType::Binary => None,
        }
    }

    /// Types whose payload starts with a u32 length.
    pub fn is_length_prefixed(self) -> bool {
        matches!(self, TagType::List | TagType::String | TagType::Binary)
    }

    pub fn name(self) -> &'static str {
        match self {
            TagType::Null => "NULL",
            TagType::Byte => "BYTE",
            TagType::Word => "WORD",
            TagType::Dword => "DWORD",
            TagType::Qword => "QWORD",
            TagType::StringRef => "STRINGREF",
            TagType::List => "LIST",
            TagType::String => "STRING",
            TagType::Binary => "BINARY",
        }
    }
}

// ============================================================================
// PRIMITIVE READS
// ============================================================================

#[inline]
pub fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let b = bytes.get(offset..end)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

#[inline]
pub fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let b = bytes.get(offset..end)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[inline]
pub fn read_u64(bytes: &[u8], offset: usize) -> Option<u64> {
    let end = offset.checked_add(8)?;
    let b = bytes.get(offset..end)?;
    Some(u64::from_le_bytes([
        b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
    ]))
}

/// Round a byte count up to the next even number.
#[inline]
pub const fn pad_to_word(size: usize) -> usize {
    size + (size & 1)
}

// ============================================================================
// RECORD SIZE
// ============================================================================

/// Total padded size of the record at `offset`.
///
/// Lists report header plus content, so adding the size to a list's offset
/// lands on its next sibling. The validating scan in `Database::load` is the
/// one caller that deliberately steps into lists instead.
///
/// # Errors
///
/// - `CorruptDatabase` for the Byte type or a reserved nibble. There is no
///   way to find the next record, so callers must abandon the whole buffer.
/// - `TruncatedRecord` when the tag code or a length field is past the end.
pub fn record_size(buffer: &[u8], offset: usize) -> Result<usize, LoadError> {
    let tag = read_u16(buffer, offset).ok_or(LoadError::TruncatedRecord { offset })?;

    let raw = match TagType::of(tag) {
        Some(TagType::Byte) | None => return Err(LoadError::CorruptDatabase { offset, tag }),
        Some(kind) => match kind.fixed_size() {
            Some(size) => size,
            None => {
                let len = read_u32(buffer, offset + TAG_CODE_SIZE)
                    .ok_or(LoadError::TruncatedRecord { offset })?;
                LIST_HEADER_SIZE
                    .checked_add(len as usize)
                    .ok_or(LoadError::TruncatedRecord { offset })?
            }
        },
    };

    let size = raw
        .checked_add(raw & 1)
        .ok_or(LoadError::TruncatedRecord { offset })?;
    check_record_size_even(offset, size);
    Ok(size)
}

// ============================================================================
// PAYLOAD DECODING
// ============================================================================

/// A decoded record payload. String and binary data borrow from the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagValue<'a> {
    Null,
    Word(u16),
    Dword(u32),
    Qword(u64),
    /// Offset relative to the string table.
    StringRef(u32),
    /// Byte length of the children that follow the header.
    List { content_len: u32 },
    String(WideStr<'a>),
    Binary(&'a [u8]),
}

impl<'a> TagValue<'a> {
    /// Decode the payload of the record at `offset`.
    ///
    /// `None` when the type has no layout or any part of the payload lies
    /// outside the buffer.
    pub fn decode(buffer: &'a [u8], offset: usize) -> Option<TagValue<'a>> {
        let tag = read_u16(buffer, offset)?;
        let body = offset.checked_add(TAG_CODE_SIZE)?;

        let value = match TagType::of(tag)? {
            TagType::Null => TagValue::Null,
            TagType::Byte => return None,
            TagType::Word => TagValue::Word(read_u16(buffer, body)?),
            TagType::Dword => TagValue::Dword(read_u32(buffer, body)?),
            TagType::Qword => TagValue::Qword(read_u64(buffer, body)?),
            TagType::StringRef => TagValue::StringRef(read_u32(buffer, body)?),
            TagType::List => TagValue::List {
                content_len: read_u32(buffer, body)?,
            },
            TagType::String => TagValue::String(WideStr::new(length_prefixed(buffer, body)?)),
            TagType::Binary => TagValue::Binary(length_prefixed(buffer, body)?),
        };
        Some(value)
    }

    pub fn tag_type(&self) -> TagType {
        match self {
            TagValue::Null => TagType::Null,
            TagValue::Word(_) => TagType::Word,
            TagValue::Dword(_) => TagType::Dword,
            TagValue::Qword(_) => TagType::Qword,
            TagValue::StringRef(_) => TagType::StringRef,
            TagValue::List { .. } => TagType::List,
            TagValue::String(_) => TagType::String,
            TagValue::Binary(_) => TagType::Binary,
        }
    }
}

/// `[u32 len][len bytes]` starting at `at`.
fn length_prefixed(buffer: &[u8], at: usize) -> Option<&[u8]> {
    let len = read_u32(buffer, at)? as usize;
    let start = at.checked_add(4)?;
    let end = start.checked_add(len)?;
    buffer.get(start..end)
}
