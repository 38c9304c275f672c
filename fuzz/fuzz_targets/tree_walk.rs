// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Navigation over loaded but hostile trees.
//!
//! Lists can claim more content than the file holds, overlap their
//! siblings, or nest far deeper than any real catalog. Walking them must
//! stay in bounds and terminate.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shimdb::{verify, Database, TagId, TagType, MAX_TREE_DEPTH};

fn walk(db: &Database, parent: TagId, depth: usize) {
    if depth > MAX_TREE_DEPTH {
        return;
    }
    let end = db
        .get(parent)
        .and_then(|v| v.list_content_len())
        .map(|n| parent.offset() + 6 + n as usize);

    for child in db.children(parent) {
        // INVARIANT: ids are even and children stay inside their list.
        assert_eq!(child.0 % 2, 0);
        if let (false, Some(end)) = (parent.is_null(), end) {
            assert!(child.offset() >= parent.offset() + 6 && child.offset() < end);
        }

        let tag = db.tag_of(child);
        if let Some(found) = db.find_first_tag(parent, tag) {
            assert_eq!(db.tag_of(found), tag);
        }
        if let Some(next) = db.find_next_tag(parent, child) {
            assert_eq!(db.tag_of(next), tag);
            assert!(next > child);
        }

        if db.get(child).is_some_and(|v| v.is(TagType::List)) {
            walk(db, child, depth + 1);
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(db) = Database::from_bytes(data.to_vec()) else {
        return;
    };
    walk(&db, TagId::NULL, 0);
    let _ = verify(&db);
});
