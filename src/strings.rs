// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! UTF-16 string payloads and string-table indirection.
//!
//! Most strings in an SDB are not stored where they are used. A STRINGREF
//! record holds an offset relative to the STRINGTABLE list, and the actual
//! UTF-16LE text lives in a STRING item inside that table. [`resolve`]
//! follows the reference; inline STRING records resolve to themselves.
//!
//! A reference can point at another reference. Real files never do this,
//! but nothing stops a crafted one from forming a cycle, so the chain is cut
//! after [`MAX_STRING_REF_DEPTH`] hops.

use std::fmt;

use tracing::warn;

use crate::binary::{get, TagId, TagValue, LIST_HEADER_SIZE, MAX_STRING_REF_DEPTH};

/// Borrowed UTF-16LE text. The buffer is not necessarily 2-byte aligned, so
/// this is a byte slice decoded on demand, never a `&[u16]` cast.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WideStr<'a> {
    bytes: &'a [u8],
}

impl<'a> WideStr<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Raw UTF-16LE bytes, including any terminator stored in the file.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of whole code units. A trailing odd byte is ignored.
    pub fn len(&self) -> usize {
        self.bytes.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn units(&self) -> impl Iterator<Item = u16> + 'a {
        self.bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }

    /// Code units up to (not including) the first NUL.
    pub fn text_units(&self) -> impl Iterator<Item = u16> + 'a {
        self.units().take_while(|&u| u != 0)
    }

    /// Decode up to the first NUL. Unpaired surrogates become U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        char::decode_utf16(self.text_units())
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Copy code units into `out`, stopping at whichever runs out first.
    /// Returns the number of units written.
    pub fn copy_to(&self, out: &mut [u16]) -> usize {
        let mut written = 0;
        for (slot, unit) in out.iter_mut().zip(self.units()) {
            *slot = unit;
            written += 1;
        }
        written
    }
}

impl fmt::Debug for WideStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideStr({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for WideStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// Resolve `id` to string data.
///
/// - STRING: its own payload.
/// - STRINGREF: the record at `string_table + offset`, resolved again.
///   Offset zero is the one exception: it would name the table list itself,
///   so it is read as offset 6, the table's first item. Offsets 0 and 6
///   therefore resolve to the same string; every other offset is literal.
/// - Anything else, or no string table: `None`.
pub fn resolve(buffer: &[u8], string_table: Option<TagId>, id: TagId) -> Option<WideStr<'_>> {
    resolve_at(buffer, string_table, id, 0)
}

fn resolve_at(
    buffer: &[u8],
    string_table: Option<TagId>,
    id: TagId,
    depth: usize,
) -> Option<WideStr<'_>> {
    match get(buffer, id)?.value()? {
        TagValue::String(text) => Some(text),
        TagValue::StringRef(relative) => {
            // INVARIANT: reference chains are cut after MAX_STRING_REF_DEPTH hops.
            if depth >= MAX_STRING_REF_DEPTH {
                warn!(
                    id = %id,
                    depth,
                    "string reference chain too deep, giving up"
                );
                return None;
            }
            let table = string_table?;
            let mut target = table.offset().checked_add(relative as usize)?;
            // Only zero is remapped; see `resolve`.
            if relative == 0 {
                target = target.checked_add(LIST_HEADER_SIZE)?;
            }
            resolve_at(buffer, string_table, TagId::from_offset(target)?, depth + 1)
        }
        _ => None,
    }
}
