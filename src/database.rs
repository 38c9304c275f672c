// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The loaded database: one immutable buffer plus the string table location.
//!
//! Loading reads the whole file, then makes a single linear pass to prove
//! every record on the path has a known layout and to remember where the
//! STRINGTABLE list is. After that the buffer is never written again, so a
//! `&Database` can be shared across threads freely (it is `Send + Sync`
//! because it is just a `Vec<u8>` and an offset).
//!
//! # The validating scan
//!
//! The scan steps over fixed-size records and over string/binary payloads,
//! but it steps *into* lists: after a list header it continues with the
//! list's first child as if it were a top-level record. That way a string
//! table nested anywhere in the tree is found without a recursive descent,
//! and every record inside every list gets its type checked. The cost is
//! that list content lengths are not checked here; `verify::verify` does
//! that for callers who want it.
//!
//! # Readers
//!
//! Typed readers never fail. Asking for a DWORD from a STRING record, or from
//! an id that points nowhere, gives back the caller's default (or `None` for
//! strings and binaries). Databases from the wild contain surprises and a
//! query should survive them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crc32fast::Hasher as Crc32Hasher;
use tracing::{debug, trace, warn};

use crate::binary::{
    get, read_u16, record_size, SdbHeader, Tag, TagId, TagType, TagValue, TagView, HEADER_SIZE,
    LIST_HEADER_SIZE, TAG_CODE_SIZE,
};
use crate::error::LoadError;
use crate::strings::{resolve, WideStr};
use crate::tags::{tag_name, TAG_NULL, TAG_STRINGTABLE};
use crate::walker::{self, Children};

// ============================================================================
// LOAD OPTIONS
// ============================================================================

/// Knobs for [`Database::open_with`] and [`Database::from_bytes_with`].
///
/// The defaults accept exactly what the format's reference reader accepts:
/// no header check and no size cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Require the "sdbf" magic at bytes `[8, 12)`.
    pub verify_header: bool,
    /// Refuse files larger than this many bytes.
    pub max_file_size: Option<u64>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_check(mut self) -> Self {
        self.verify_header = true;
        self
    }

    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = Some(limit);
        self
    }
}

// ============================================================================
// DATABASE
// ============================================================================

/// A validated, read-only shim database.
#[derive(Debug, Clone)]
pub struct Database {
    buffer: Vec<u8>,
    string_table: Option<TagId>,
}

impl Database {
    /// Read and validate the file at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::open_with(path, &LoadOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        if let Some(limit) = options.max_file_size {
            let size = file.metadata()?.len();
            if size > limit {
                return Err(LoadError::TooLarge { size, limit });
            }
        }

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        let db = Self::from_bytes_with(buffer, options)?;
        debug!(
            path = %path.display(),
            size = db.len(),
            string_table = ?db.string_table,
            "opened shim database"
        );
        Ok(db)
    }

    /// Validate an in-memory buffer with default options.
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, LoadError> {
        Self::from_bytes_with(buffer, &LoadOptions::default())
    }

    pub fn from_bytes_with(buffer: Vec<u8>, options: &LoadOptions) -> Result<Self, LoadError> {
        let size = buffer.len() as u64;
        let limit = options
            .max_file_size
            .unwrap_or(u64::MAX)
            .min(u64::from(u32::MAX));
        if size > limit {
            return Err(LoadError::TooLarge { size, limit });
        }

        if options.verify_header {
            check_header(&buffer)?;
        }

        let string_table = scan(&buffer)?;
        Ok(Self {
            buffer,
            string_table,
        })
    }

    /// Release the buffer. Dropping the database does the same; this exists
    /// so the release point can be spelled out. Taking `self` by value means
    /// no reader can still hold a borrow and a second close cannot compile.
    pub fn close(self) {}

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Offset of the last STRINGTABLE list seen by the load scan.
    pub fn string_table(&self) -> Option<TagId> {
        self.string_table
    }

    /// Header fields, if the file is at least 12 bytes long. Not validated.
    pub fn header(&self) -> Option<SdbHeader> {
        SdbHeader::read(&self.buffer)
    }

    /// CRC32 of the whole file, for identifying databases in tooling output.
    pub fn checksum(&self) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(&self.buffer);
        hasher.finalize()
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn get(&self, id: TagId) -> Option<TagView<'_>> {
        get(&self.buffer, id)
    }

    /// Tag code at `id`, or `TAG_NULL` when nothing readable is there.
    pub fn tag_of(&self, id: TagId) -> Tag {
        walker::tag_at(&self.buffer, id).unwrap_or(TAG_NULL)
    }

    pub fn first_child(&self, parent: TagId) -> Option<TagId> {
        walker::first_child(&self.buffer, parent)
    }

    pub fn next_child(&self, parent: TagId, prev: TagId) -> Option<TagId> {
        walker::next_child(&self.buffer, parent, prev)
    }

    pub fn find_first_tag(&self, parent: TagId, tag: Tag) -> Option<TagId> {
        walker::find_first_tag(&self.buffer, parent, tag)
    }

    /// Next sibling with the same tag code as `prev` (see
    /// [`walker::find_next_tag`]).
    pub fn find_next_tag(&self, parent: TagId, prev: TagId) -> Option<TagId> {
        walker::find_next_tag(&self.buffer, parent, prev)
    }

    pub fn children(&self, parent: TagId) -> Children<'_> {
        walker::children(&self.buffer, parent)
    }

    // ------------------------------------------------------------------------
    // Typed readers
    // ------------------------------------------------------------------------

    fn value(&self, id: TagId) -> Option<TagValue<'_>> {
        self.get(id)?.value()
    }

    pub fn read_word(&self, id: TagId, default: u16) -> u16 {
        match self.value(id) {
            Some(TagValue::Word(v)) => v,
            _ => default,
        }
    }

    pub fn read_dword(&self, id: TagId, default: u32) -> u32 {
        match self.value(id) {
            Some(TagValue::Dword(v)) => v,
            _ => default,
        }
    }

    pub fn read_qword(&self, id: TagId, default: u64) -> u64 {
        match self.value(id) {
            Some(TagValue::Qword(v)) => v,
            _ => default,
        }
    }

    /// Resolved string payload, borrowed from the buffer.
    pub fn string_ptr(&self, id: TagId) -> Option<WideStr<'_>> {
        resolve(&self.buffer, self.string_table, id)
    }

    /// Resolved string as text, up to the first NUL.
    pub fn read_string(&self, id: TagId) -> Option<String> {
        self.string_ptr(id).map(|s| s.to_string_lossy())
    }

    /// Copy the resolved string's code units into `out`, truncating to its
    /// length. `false` if `id` does not resolve to a string.
    pub fn read_string_into(&self, id: TagId, out: &mut [u16]) -> bool {
        match self.string_ptr(id) {
            Some(s) => {
                s.copy_to(out);
                true
            }
            None => false,
        }
    }

    pub fn read_binary(&self, id: TagId) -> Option<&[u8]> {
        match self.value(id)? {
            TagValue::Binary(data) => Some(data),
            _ => None,
        }
    }

    /// Payload length of a BINARY record; 0 for any other type.
    pub fn binary_size(&self, id: TagId) -> usize {
        self.read_binary(id).map_or(0, |data| data.len())
    }
}

// ============================================================================
// LOAD HELPERS
// ============================================================================

fn check_header(buffer: &[u8]) -> Result<(), LoadError> {
    match SdbHeader::read(buffer) {
        Some(header) if header.has_valid_magic() => {
            debug!(
                major = header.major_version,
                minor = header.minor_version,
                "header check passed"
            );
            Ok(())
        }
        Some(header) => Err(LoadError::InvalidHeader {
            magic: Some(header.magic),
        }),
        None => Err(LoadError::InvalidHeader { magic: None }),
    }
}

/// Linear validating pass. Returns the string table location.
fn scan(buffer: &[u8]) -> Result<Option<TagId>, LoadError> {
    let mut offset = HEADER_SIZE;
    let mut string_table = None;

    while offset < buffer.len() {
        // A lone trailing byte cannot hold a tag code.
        let Some(tag) = read_u16(buffer, offset) else {
            break;
        };

        let size = record_size(buffer, offset).inspect_err(|e| {
            warn!(
                offset,
                tag,
                name = tag_name(tag),
                error = %e,
                "rejecting database"
            );
        })?;

        if tag == TAG_STRINGTABLE {
            trace!(offset, "found string table");
            string_table = TagId::from_offset(offset);
        }

        let step = if TagType::of(tag) == Some(TagType::List) {
            LIST_HEADER_SIZE
        } else {
            size
        };
        // INVARIANT: every step moves forward by at least a tag code.
        debug_assert!(step >= TAG_CODE_SIZE);

        match offset.checked_add(step) {
            Some(next) => offset = next,
            None => break,
        }
    }

    Ok(string_table)
}
