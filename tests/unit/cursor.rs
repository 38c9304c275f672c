//! Cursor bounds and alignment tests.

use shimdb::binary::{advance, get, record_size};
use shimdb::tags::*;
use shimdb::{TagId, TAGID_ROOT};

use crate::common::SdbFixture;

#[test]
fn odd_ids_are_rejected() {
    let mut fx = SdbFixture::new();
    fx.dword(TAG_SIZE, 1);
    let bytes = fx.into_bytes();

    assert!(get(&bytes, TagId(12)).is_some());
    assert!(get(&bytes, TagId(13)).is_none());
    assert!(advance(&bytes, TagId(13)).is_none());
}

#[test]
fn null_reads_root() {
    let mut fx = SdbFixture::new();
    fx.dword(TAG_SIZE, 7);
    let bytes = fx.into_bytes();

    let view = get(&bytes, TagId::NULL).unwrap();
    assert_eq!(view.id(), TAGID_ROOT);
    assert_eq!(view.tag(), TAG_SIZE);
}

#[test]
fn tag_code_must_fit() {
    let mut fx = SdbFixture::new();
    fx.raw(&[0x01]);
    let bytes = fx.into_bytes();

    assert_eq!(bytes.len(), 13);
    assert!(get(&bytes, TagId(12)).is_none());
    assert!(get(&bytes, TagId(14)).is_none());
}

#[test]
fn advance_adds_record_size() {
    let mut fx = SdbFixture::new();
    let a = fx.dword(TAG_SIZE, 1);
    let b = fx.binary(TAG_EXE_ID, &[9; 5]);
    let c = fx.null(TAG_INCLUDE);
    let bytes = fx.into_bytes();

    assert_eq!(advance(&bytes, a), Some(b));
    assert_eq!(
        advance(&bytes, b).map(|id| id.offset()),
        Some(b.offset() + record_size(&bytes, b.offset()).unwrap())
    );
    assert_eq!(advance(&bytes, b), Some(c));
}

#[test]
fn advance_never_lands_on_end() {
    let mut fx = SdbFixture::new();
    let only = fx.dword(TAG_SIZE, 1);
    let bytes = fx.into_bytes();

    assert_eq!(only.offset() + 6, bytes.len());
    assert_eq!(advance(&bytes, only), None);
}

#[test]
fn view_exposes_payload() {
    let mut fx = SdbFixture::new();
    let id = fx.binary(TAG_EXE_ID, &[1, 2, 3, 4]);
    let bytes = fx.into_bytes();

    let view = get(&bytes, id).unwrap();
    assert_eq!(view.size(), Some(10));
    assert_eq!(&view.payload()[4..8], &[1, 2, 3, 4]);
}
