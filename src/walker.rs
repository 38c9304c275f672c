// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parent/child navigation over the flat record buffer.
//!
//! A list's children are the records in `[list + 6, list + 6 + content_len)`.
//! Walking them is just "start after the header, add record sizes, stop at
//! the end of the range". The null id stands for the top level, whose range
//! is the rest of the buffer from [`TAGID_ROOT`].
//!
//! Navigation is fail-soft. A child that cannot be read ends the walk with
//! "not found"; nothing here returns an error.

use crate::binary::{advance, get, Tag, TagId, TagType, LIST_HEADER_SIZE, TAGID_ROOT};
use crate::verify::contracts::check_child_in_list;

/// First child of `parent`.
///
/// Null parent gives the root. A parent that is not a list has no children.
/// For a list this is always `parent + 6`, even when the list is empty; use
/// [`children`] to get only ids that lie inside the list.
pub fn first_child(buffer: &[u8], parent: TagId) -> Option<TagId> {
    if parent.is_null() {
        return Some(TAGID_ROOT);
    }
    let view = get(buffer, parent)?;
    if !view.is(TagType::List) {
        return None;
    }
    TagId::from_offset(view.id().offset().checked_add(LIST_HEADER_SIZE)?)
}

/// Sibling after `prev` inside `parent`, or `None` past the end of the list.
pub fn next_child(buffer: &[u8], parent: TagId, prev: TagId) -> Option<TagId> {
    let next = advance(buffer, prev)?;
    if parent.is_null() {
        return Some(next);
    }

    let end = list_end(buffer, parent)?;
    let start = parent.offset() + LIST_HEADER_SIZE;
    if next.offset() < start || next.offset() >= end {
        return None;
    }
    check_child_in_list(parent, end, next);
    Some(next)
}

/// First child of `parent` whose tag code is `wanted`.
pub fn find_first_tag(buffer: &[u8], parent: TagId, wanted: Tag) -> Option<TagId> {
    children(buffer, parent).find(|&id| tag_at(buffer, id) == Some(wanted))
}

/// Next sibling after `prev` carrying the same tag code as `prev`.
///
/// The code searched for is `prev`'s own, not a caller-supplied one. Callers
/// iterate "all NAME children" as `find_first_tag` then `find_next_tag`.
/// The search stops at the end of `parent`; a `prev` outside `parent`
/// finds nothing.
pub fn find_next_tag(buffer: &[u8], parent: TagId, prev: TagId) -> Option<TagId> {
    let wanted = get(buffer, prev)?.tag();
    Children::after(buffer, parent, prev).find(|&id| tag_at(buffer, id) == Some(wanted))
}

/// Iterate the children of `parent` in file order.
pub fn children(buffer: &[u8], parent: TagId) -> Children<'_> {
    let next = first_child(buffer, parent).filter(|&id| within(buffer, parent, id));
    Children {
        buffer,
        parent,
        next,
    }
}

/// Iterator over a parent's children. Stops at the end of the parent or at
/// the first record that cannot be read.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    buffer: &'a [u8],
    parent: TagId,
    next: Option<TagId>,
}

impl<'a> Children<'a> {
    /// Siblings strictly after `prev`.
    pub fn after(buffer: &'a [u8], parent: TagId, prev: TagId) -> Self {
        Self {
            buffer,
            parent,
            next: next_child(buffer, parent, prev),
        }
    }
}

impl Iterator for Children<'_> {
    type Item = TagId;

    fn next(&mut self) -> Option<TagId> {
        let current = self.next.take()?;
        get(self.buffer, current)?;
        self.next = next_child(self.buffer, self.parent, current);
        Some(current)
    }
}

/// Tag code at `id`, `None` if unreadable.
#[inline]
pub fn tag_at(buffer: &[u8], id: TagId) -> Option<Tag> {
    get(buffer, id).map(|view| view.tag())
}

/// Exclusive end offset of a list's children.
fn list_end(buffer: &[u8], parent: TagId) -> Option<usize> {
    let view = get(buffer, parent)?;
    let content_len = view.list_content_len()?;
    view.id()
        .offset()
        .checked_add(LIST_HEADER_SIZE)?
        .checked_add(content_len as usize)
}

fn within(buffer: &[u8], parent: TagId, id: TagId) -> bool {
    if parent.is_null() {
        return id.offset() < buffer.len();
    }
    list_end(buffer, parent).is_some_and(|end| id.offset() < end)
}
