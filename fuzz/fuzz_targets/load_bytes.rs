// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Database loading under adversarial input.
//!
//! An .sdb file from disk is untrusted. The loader must either accept it or
//! return a typed error, never panic and never hand back a half-scanned
//! database.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shimdb::{Database, TagType};

fuzz_target!(|data: &[u8]| {
    let Ok(db) = Database::from_bytes(data.to_vec()) else {
        return;
    };

    // INVARIANT: a cached string table is a STRINGTABLE list inside the buffer.
    if let Some(table) = db.string_table() {
        let view = db.get(table).expect("string table must be readable");
        assert_eq!(view.tag(), shimdb::tags::TAG_STRINGTABLE);
        assert!(view.is(TagType::List));
    }

    assert_eq!(db.len(), data.len());
});
