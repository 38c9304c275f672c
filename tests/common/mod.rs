//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::io::Write;

use shimdb::tags::*;
use shimdb::{Database, TagId};
use tempfile::NamedTempFile;

// Re-export canonical builders from shimdb::testing
pub use shimdb::testing::{utf16le, ListMark, SdbFixture};

// ============================================================================
// FIXTURE DATABASES
// ============================================================================

/// Ids of interest inside [`example_database`].
pub struct ExampleIds {
    pub database: TagId,
    pub name: TagId,
    pub string_table: TagId,
    pub item: TagId,
}

/// DATABASE list holding one NAME reference at offset 0, followed by a
/// string table whose only item is "Example".
pub fn example_database() -> (Vec<u8>, ExampleIds) {
    let mut fx = SdbFixture::new();
    let database = fx.begin_list(TAG_DATABASE);
    let name = fx.string_ref(TAG_NAME, 0);
    fx.end_list(database);
    let table = fx.begin_list(TAG_STRINGTABLE);
    let item = fx.string_nul(TAG_STRINGTABLE_ITEM, "Example");
    fx.end_list(table);

    let ids = ExampleIds {
        database: database.id(),
        name,
        string_table: table.id(),
        item,
    };
    (fx.into_bytes(), ids)
}

/// A small but realistic layout: database with a library of two
/// executables, each with name, size and checksum, plus a string table.
pub fn shim_catalog() -> Vec<u8> {
    let mut fx = SdbFixture::new();
    let database = fx.begin_list(TAG_DATABASE);
    fx.qword(TAG_TIME, 0x01d9_0000_0000_0000);
    fx.string_ref(TAG_NAME, 0);

    let library = fx.begin_list(TAG_LIBRARY);
    fx.end_list(library);

    for (name_offset, size) in [(0x1Cu32, 1024u32), (0x36u32, 2048u32)] {
        let exe = fx.begin_list(TAG_EXE);
        fx.string_ref(TAG_NAME, name_offset);
        fx.dword(TAG_SIZE, size);
        fx.binary(TAG_EXE_ID, &[0x11; 16]);
        fx.end_list(exe);
    }
    fx.end_list(database);

    let table = fx.begin_list(TAG_STRINGTABLE);
    fx.string_nul(TAG_STRINGTABLE_ITEM, "Catalog"); // +0x06
    fx.string_nul(TAG_STRINGTABLE_ITEM, "setup.exe"); // +0x1C
    fx.string_nul(TAG_STRINGTABLE_ITEM, "game.exe"); // +0x36
    fx.end_list(table);
    fx.into_bytes()
}

/// Write `bytes` to a fresh temp file.
pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub fn load(bytes: Vec<u8>) -> Database {
    Database::from_bytes(bytes).expect("fixture should load")
}
