// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Owned, serializable snapshot of the tag tree.
//!
//! The navigation API hands out offsets; tooling usually wants a tree it can
//! print or serialize. [`snapshot`] walks from a parent using the same
//! fail-soft walker as everything else and copies out names and decoded
//! values. String references are shown with the text they resolve to.

use serde::Serialize;

use crate::binary::{Tag, TagId, TagType, TagValue, MAX_TREE_DEPTH};
use crate::database::Database;
use crate::tags::tag_name;

/// Bytes of a BINARY payload included in the hex preview.
pub const BINARY_PREVIEW_BYTES: usize = 32;

/// One record and, for lists, its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagNode {
    pub id: TagId,
    pub tag: Tag,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: Option<TagType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<NodeValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TagNode>,
}

/// Decoded payload in a display-friendly shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Integer(u64),
    Text(String),
    StringRef {
        offset: u32,
        resolved: Option<String>,
    },
    Binary {
        len: usize,
        preview: String,
    },
    List {
        content_len: u32,
    },
}

/// Children of `parent`, descending at most `max_depth` list levels
/// (clamped to `MAX_TREE_DEPTH`).
pub fn snapshot(db: &Database, parent: TagId, max_depth: usize) -> Vec<TagNode> {
    collect(db, parent, max_depth.min(MAX_TREE_DEPTH))
}

fn collect(db: &Database, parent: TagId, depth_left: usize) -> Vec<TagNode> {
    db.children(parent)
        .filter_map(|id| node(db, id, depth_left))
        .collect()
}

fn node(db: &Database, id: TagId, depth_left: usize) -> Option<TagNode> {
    let view = db.get(id)?;
    let tag = view.tag();
    let decoded = view.value();

    let value = decoded.map(|v| match v {
        TagValue::Null => None,
        TagValue::Word(w) => Some(NodeValue::Integer(w.into())),
        TagValue::Dword(d) => Some(NodeValue::Integer(d.into())),
        TagValue::Qword(q) => Some(NodeValue::Integer(q)),
        TagValue::StringRef(offset) => Some(NodeValue::StringRef {
            offset,
            resolved: db.read_string(id),
        }),
        TagValue::List { content_len } => Some(NodeValue::List { content_len }),
        TagValue::String(text) => Some(NodeValue::Text(text.to_string_lossy())),
        TagValue::Binary(data) => Some(NodeValue::Binary {
            len: data.len(),
            preview: hex_preview(data),
        }),
    });

    let children = match decoded {
        Some(TagValue::List { .. }) if depth_left > 0 => collect(db, id, depth_left - 1),
        _ => Vec::new(),
    };

    Some(TagNode {
        id,
        tag,
        name: tag_name(tag),
        kind: view.tag_type(),
        value: value.flatten(),
        children,
    })
}

fn hex_preview(data: &[u8]) -> String {
    let mut out: String = data
        .iter()
        .take(BINARY_PREVIEW_BYTES)
        .map(|b| format!("{:02x}", b))
        .collect();
    if data.len() > BINARY_PREVIEW_BYTES {
        out.push_str("..");
    }
    out
}
