//! Negative tests for load-time validation.
//!
//! Untrusted files must either load completely or fail with a typed error.
//! None of these inputs may panic.

use shimdb::tags::*;
use shimdb::{Database, LoadError, LoadOptions, TagId};

use crate::common::{write_temp, SdbFixture};

#[test]
fn byte_type_at_top_level_fails() {
    let mut fx = SdbFixture::new();
    fx.dword(TAG_SIZE, 1);
    fx.raw(&0x2003u16.to_le_bytes());
    fx.raw(&[0, 0]);

    let err = Database::from_bytes(fx.into_bytes()).unwrap_err();
    assert!(err.is_corrupt());
    assert!(matches!(
        err,
        LoadError::CorruptDatabase {
            offset: 18,
            tag: 0x2003
        }
    ));
}

#[test]
fn reserved_type_deep_in_tree_fails() {
    let mut fx = SdbFixture::new();
    let db = fx.begin_list(TAG_DATABASE);
    let exe = fx.begin_list(TAG_EXE);
    fx.dword(TAG_SIZE, 1);
    fx.raw(&0xF001u16.to_le_bytes());
    fx.end_list(exe);
    fx.end_list(db);

    let err = Database::from_bytes(fx.into_bytes()).unwrap_err();
    assert!(err.is_corrupt());
    assert!(err.to_string().contains("0xF001"), "{}", err);
}

#[test]
fn corrupt_file_on_disk_fails_open() {
    let mut fx = SdbFixture::new();
    fx.raw(&0xA000u16.to_le_bytes());
    let file = write_temp(fx.as_bytes());

    assert!(Database::open(file.path()).unwrap_err().is_corrupt());
}

#[test]
fn truncated_length_fails() {
    let mut fx = SdbFixture::new();
    fx.raw(&TAG_STRINGTABLE_ITEM.to_le_bytes());
    fx.raw(&[4, 0]);

    assert!(matches!(
        Database::from_bytes(fx.into_bytes()),
        Err(LoadError::TruncatedRecord { offset: 12 })
    ));
}

#[test]
fn empty_and_short_buffers_load() {
    for len in [0usize, 1, 11, 12] {
        let db = Database::from_bytes(vec![0; len]).unwrap();
        assert_eq!(db.len(), len);
        assert_eq!(db.string_table(), None);
        assert_eq!(db.find_first_tag(TagId::NULL, TAG_DATABASE), None);
        assert_eq!(db.read_string(TagId::NULL), None);
    }
}

#[test]
fn bad_magic_only_fails_when_checked() {
    let mut fx = SdbFixture::with_header(2, 1, *b"XXXX");
    fx.dword(TAG_SIZE, 1);
    let bytes = fx.into_bytes();

    assert!(Database::from_bytes(bytes.clone()).is_ok());
    let err =
        Database::from_bytes_with(bytes, &LoadOptions::new().with_header_check()).unwrap_err();
    assert!(matches!(err, LoadError::InvalidHeader { .. }));
}

#[test]
fn self_referencing_string_ref_terminates() {
    let mut fx = SdbFixture::new();
    let table = fx.begin_list(TAG_STRINGTABLE);
    // Points back at itself: table + 6 is this record.
    let looped = fx.string_ref(TAG_NAME, 6);
    fx.end_list(table);

    let db = Database::from_bytes(fx.into_bytes()).unwrap();
    assert_eq!(db.read_string(looped), None);
}

#[test]
fn odd_and_out_of_range_ids_are_absent() {
    let mut fx = SdbFixture::new();
    let db_list = fx.begin_list(TAG_DATABASE);
    fx.dword(TAG_SIZE, 5);
    fx.end_list(db_list);
    let db = Database::from_bytes(fx.into_bytes()).unwrap();

    for id in [TagId(13), TagId(1 << 20), TagId(u32::MAX - 1)] {
        assert_eq!(db.read_dword(id, 9), 9);
        assert_eq!(db.first_child(id), None);
        assert_eq!(db.next_child(db_list.id(), id), None);
        assert_eq!(db.tag_of(id), TAG_NULL);
    }
}
