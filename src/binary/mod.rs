// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary layout of shim database (SDB) files.
//!
//! An SDB file is a flat buffer holding a tree. There are no pointers and no
//! index to trust: structure comes entirely from walking records in order and
//! knowing how long each one is. Get one size wrong and every offset after it
//! is garbage, which is why sizes live in exactly one function
//! ([`record_size`]) and every read is bounds-checked.
//!
//! # Security Considerations
//!
//! Files are treated as untrusted:
//! - Every field read goes through a checked slice, never a pointer cast
//! - Offset arithmetic uses `checked_add`
//! - Unknown record types fail the load instead of being skipped
//! - String reference chains are capped at `MAX_STRING_REF_DEPTH` hops
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (12 bytes)                                          │
//! │   major_version: u32                                       │
//! │   minor_version: u32                                       │
//! │   magic: [u8; 4] = "sdbf"                                  │
//! ├────────────────────────────────────────────────────────────┤
//! │ RECORDS (from offset 0xC = TAGID_ROOT)                     │
//! │   tag: u16 (high nibble = type, low 12 bits = index)       │
//! │   payload: type-dependent, record padded to even length    │
//! │                                                            │
//! │   LIST  [tag][u32 len] ┬ child record                      │
//! │                        ├ child record                      │
//! │                        └ ... exactly `len` bytes           │
//! │                                                            │
//! │   STRINGTABLE (a LIST) holds STRING items that STRINGREF   │
//! │   records point at, relative to the table's own offset     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod cursor;
mod encoding;
mod header;

pub use cursor::{advance, get, TagView};
pub use encoding::{pad_to_word, read_u16, read_u32, read_u64, record_size, TagType, TagValue};
pub use header::{
    SdbHeader, Tag, TagId, HEADER_SIZE, LIST_HEADER_SIZE, MAGIC, MAX_STRING_REF_DEPTH,
    MAX_TREE_DEPTH, TAGID_NULL, TAGID_ROOT, TAG_CODE_SIZE,
};
