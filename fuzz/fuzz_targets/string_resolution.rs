// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String reference resolution with attacker-chosen offsets.
//!
//! References can point at themselves, at each other, or anywhere past the
//! end of the file. Resolution must give up after a bounded number of hops.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shimdb::tags::{TAG_NAME, TAG_STRINGTABLE, TAG_STRINGTABLE_ITEM};
use shimdb::testing::SdbFixture;
use shimdb::Database;

#[derive(Debug, Arbitrary)]
struct Input {
    refs: Vec<u32>,
    items: Vec<String>,
    probe: Vec<u16>,
}

fuzz_target!(|input: Input| {
    let mut fx = SdbFixture::new();
    let table = fx.begin_list(TAG_STRINGTABLE);
    let mut ids = Vec::new();
    for offset in input.refs.iter().take(32) {
        ids.push(fx.string_ref(TAG_NAME, *offset));
    }
    for text in input.items.iter().take(32) {
        ids.push(fx.string_nul(TAG_STRINGTABLE_ITEM, text));
    }
    fx.end_list(table);

    let Ok(db) = Database::from_bytes(fx.into_bytes()) else {
        return;
    };

    for id in ids {
        let text = db.read_string(id);
        let mut out = vec![0u16; input.probe.len().min(64)];
        // INVARIANT: the two readers agree on whether a string exists.
        assert_eq!(text.is_some(), db.read_string_into(id, &mut out));
    }
});
