// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, benches and
//! fuzz targets.
//!
//! This module is always compiled but hidden from documentation. It lays out
//! raw record bytes so tests can describe a buffer in a few lines instead of
//! hand-counting offsets. It is not a database writer: there is no index
//! generation, no string deduplication, and lists must be closed by hand.

#![doc(hidden)]

use crate::binary::{Tag, TagId, HEADER_SIZE, LIST_HEADER_SIZE, MAGIC};

/// An open list whose length is patched by [`SdbFixture::end_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMark {
    id: TagId,
}

impl ListMark {
    pub fn id(&self) -> TagId {
        self.id
    }
}

/// Append-only record layout for building test buffers.
#[derive(Debug, Clone)]
pub struct SdbFixture {
    buf: Vec<u8>,
}

impl Default for SdbFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SdbFixture {
    /// Header with version 2.1 and the "sdbf" magic.
    pub fn new() -> Self {
        Self::with_header(2, 1, MAGIC)
    }

    pub fn with_header(major: u32, minor: u32, magic: [u8; 4]) -> Self {
        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(&major.to_le_bytes());
        buf.extend_from_slice(&minor.to_le_bytes());
        buf.extend_from_slice(&magic);
        debug_assert_eq!(buf.len(), HEADER_SIZE);
        Self { buf }
    }

    /// Id the next record will get.
    pub fn here(&self) -> TagId {
        TagId(self.buf.len() as u32)
    }

    fn start(&mut self, tag: Tag) -> TagId {
        let id = self.here();
        self.buf.extend_from_slice(&tag.to_le_bytes());
        id
    }

    fn pad(&mut self) {
        if self.buf.len() % 2 == 1 {
            self.buf.push(0);
        }
    }

    pub fn null(&mut self, tag: Tag) -> TagId {
        self.start(tag)
    }

    pub fn word(&mut self, tag: Tag, value: u16) -> TagId {
        let id = self.start(tag);
        self.buf.extend_from_slice(&value.to_le_bytes());
        id
    }

    pub fn dword(&mut self, tag: Tag, value: u32) -> TagId {
        let id = self.start(tag);
        self.buf.extend_from_slice(&value.to_le_bytes());
        id
    }

    pub fn qword(&mut self, tag: Tag, value: u64) -> TagId {
        let id = self.start(tag);
        self.buf.extend_from_slice(&value.to_le_bytes());
        id
    }

    /// A reference `offset` bytes past the string table's own offset.
    pub fn string_ref(&mut self, tag: Tag, offset: u32) -> TagId {
        self.dword(tag, offset)
    }

    /// UTF-16LE text without a terminator.
    pub fn string(&mut self, tag: Tag, text: &str) -> TagId {
        let units: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        self.binary(tag, &units)
    }

    /// UTF-16LE text followed by a NUL unit, the way compiled databases
    /// store it.
    pub fn string_nul(&mut self, tag: Tag, text: &str) -> TagId {
        let mut units: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        units.extend_from_slice(&[0, 0]);
        self.binary(tag, &units)
    }

    /// Length-prefixed payload, padded to even. Also used for strings.
    pub fn binary(&mut self, tag: Tag, data: &[u8]) -> TagId {
        let id = self.start(tag);
        self.buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(data);
        self.pad();
        id
    }

    pub fn begin_list(&mut self, tag: Tag) -> ListMark {
        let id = self.start(tag);
        self.buf.extend_from_slice(&0u32.to_le_bytes());
        ListMark { id }
    }

    /// Patch the list's content length to cover everything written since
    /// `begin_list`.
    pub fn end_list(&mut self, mark: ListMark) {
        let content_start = mark.id.offset() + LIST_HEADER_SIZE;
        let len = (self.buf.len() - content_start) as u32;
        let at = mark.id.offset() + 2;
        self.buf[at..at + 4].copy_from_slice(&len.to_le_bytes());
    }

    /// Arbitrary bytes, no padding. For building malformed input.
    pub fn raw(&mut self, bytes: &[u8]) -> TagId {
        let id = self.here();
        self.buf.extend_from_slice(bytes);
        id
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// UTF-16LE bytes for `text`, no terminator.
pub fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}
