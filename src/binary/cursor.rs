// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounds-checked access to records by offset.
//!
//! [`get`] is the gate every query passes through: it rejects odd offsets and
//! offsets with no room for a tag code, and maps the null id to the root.
//! What comes back is a [`TagView`], a borrowed window onto the buffer. No
//! bytes are copied until a caller asks for a typed value.

use super::encoding::{read_u16, record_size, TagType, TagValue};
use super::header::{Tag, TagId, TAGID_ROOT, TAG_CODE_SIZE};
use crate::verify::contracts::check_tag_id_aligned;

/// A record located in the buffer.
#[derive(Debug, Clone, Copy)]
pub struct TagView<'a> {
    id: TagId,
    tag: Tag,
    buffer: &'a [u8],
}

impl<'a> TagView<'a> {
    /// Where the record lives. Never null: a null request is reported as root.
    #[inline]
    pub fn id(&self) -> TagId {
        self.id
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn tag_type(&self) -> Option<TagType> {
        TagType::of(self.tag)
    }

    #[inline]
    pub fn is(&self, kind: TagType) -> bool {
        self.tag_type() == Some(kind)
    }

    /// Bytes after the tag code, up to end of buffer. The record's own
    /// payload is a prefix of this.
    pub fn payload(&self) -> &'a [u8] {
        &self.buffer[self.id.offset() + TAG_CODE_SIZE..]
    }

    /// Decoded payload, `None` if the record is truncated or has no layout.
    pub fn value(&self) -> Option<TagValue<'a>> {
        TagValue::decode(self.buffer, self.id.offset())
    }

    /// Content length of a list record; `None` for any other type.
    pub fn list_content_len(&self) -> Option<u32> {
        match self.value()? {
            TagValue::List { content_len } => Some(content_len),
            _ => None,
        }
    }

    /// Padded record size, `None` if the layout is unknown.
    pub fn size(&self) -> Option<usize> {
        record_size(self.buffer, self.id.offset()).ok()
    }
}

/// Locate the record at `id`.
///
/// `None` when the id is odd or there is no room for a tag code at it.
/// `TAGID_NULL` reads the root record.
pub fn get(buffer: &[u8], id: TagId) -> Option<TagView<'_>> {
    if id.0 & 1 != 0 {
        return None;
    }
    let id = if id.is_null() { TAGID_ROOT } else { id };
    check_tag_id_aligned(id);

    let tag = read_u16(buffer, id.offset())?;
    Some(TagView { id, tag, buffer })
}

/// Offset immediately after the record at `id`.
///
/// `None` if `id` is not readable, the record has no layout, or the result
/// would be at or past end of buffer. A cursor never rests on the end.
pub fn advance(buffer: &[u8], id: TagId) -> Option<TagId> {
    let view = get(buffer, id)?;
    let size = view.size()?;
    let next = view.id().offset().checked_add(size)?;
    // INVARIANT: a cursor never rests on or past the end of the buffer.
    if next >= buffer.len() {
        return None;
    }
    TagId::from_offset(next)
}
