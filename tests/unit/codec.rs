//! Record size and payload decoding tests.

use shimdb::binary::{record_size, TagType, TagValue};
use shimdb::tags::*;
use shimdb::LoadError;

use crate::common::SdbFixture;

// ============================================================================
// SIZE TABLE
// ============================================================================

#[test]
fn fixed_width_records_have_fixed_sizes() {
    let mut fx = SdbFixture::new();
    let null = fx.null(TAG_INCLUDE);
    let word = fx.word(TAG_MATCH_MODE, 1);
    let dword = fx.dword(TAG_SIZE, 2);
    let qword = fx.qword(TAG_TIME, 3);
    let sref = fx.string_ref(TAG_NAME, 4);
    let bytes = fx.into_bytes();

    assert_eq!(record_size(&bytes, null.offset()).unwrap(), 2);
    assert_eq!(record_size(&bytes, word.offset()).unwrap(), 4);
    assert_eq!(record_size(&bytes, dword.offset()).unwrap(), 6);
    assert_eq!(record_size(&bytes, qword.offset()).unwrap(), 10);
    assert_eq!(record_size(&bytes, sref.offset()).unwrap(), 6);
}

#[test]
fn length_prefixed_records_round_up_to_even() {
    let mut fx = SdbFixture::new();
    let odd = fx.binary(TAG_EXE_ID, &[1, 2, 3]);
    let even = fx.binary(TAG_EXE_ID, &[1, 2, 3, 4]);
    let text = fx.string(TAG_STRINGTABLE_ITEM, "abc");
    let bytes = fx.into_bytes();

    assert_eq!(record_size(&bytes, odd.offset()).unwrap(), 10);
    assert_eq!(record_size(&bytes, even.offset()).unwrap(), 10);
    assert_eq!(record_size(&bytes, text.offset()).unwrap(), 12);
}

#[test]
fn list_size_covers_children() {
    let mut fx = SdbFixture::new();
    let list = fx.begin_list(TAG_EXE);
    fx.dword(TAG_SIZE, 1);
    fx.qword(TAG_TIME, 2);
    fx.end_list(list);
    let bytes = fx.into_bytes();

    assert_eq!(record_size(&bytes, list.id().offset()).unwrap(), 6 + 6 + 10);
}

#[test]
fn every_reserved_nibble_is_corrupt() {
    for nibble in [0x0u16, 0x2, 0xA, 0xB, 0xC, 0xD, 0xE, 0xF] {
        let tag = (nibble << 12) | 0x001;
        let mut fx = SdbFixture::new();
        fx.raw(&tag.to_le_bytes());
        fx.raw(&[0; 8]);
        let bytes = fx.into_bytes();

        match record_size(&bytes, 12) {
            Err(LoadError::CorruptDatabase { offset: 12, tag: t }) => assert_eq!(t, tag),
            other => panic!("nibble {:X}: expected corrupt, got {:?}", nibble, other),
        }
    }
}

#[test]
fn missing_length_field_is_truncated() {
    let mut fx = SdbFixture::new();
    fx.raw(&TAG_EXE_ID.to_le_bytes());
    fx.raw(&[0x10, 0x00]);
    let bytes = fx.into_bytes();

    assert!(matches!(
        record_size(&bytes, 12),
        Err(LoadError::TruncatedRecord { offset: 12 })
    ));
}

// ============================================================================
// DECODING
// ============================================================================

#[test]
fn values_decode_little_endian() {
    let mut fx = SdbFixture::new();
    let word = fx.word(TAG_MATCH_MODE, 0xBEEF);
    let dword = fx.dword(TAG_SIZE, 0xDEAD_BEEF);
    let qword = fx.qword(TAG_TIME, 0x0102_0304_0506_0708);
    let bytes = fx.into_bytes();

    assert_eq!(
        TagValue::decode(&bytes, word.offset()),
        Some(TagValue::Word(0xBEEF))
    );
    assert_eq!(
        TagValue::decode(&bytes, dword.offset()),
        Some(TagValue::Dword(0xDEAD_BEEF))
    );
    assert_eq!(
        TagValue::decode(&bytes, qword.offset()),
        Some(TagValue::Qword(0x0102_0304_0506_0708))
    );
}

#[test]
fn payload_past_end_does_not_decode() {
    let mut fx = SdbFixture::new();
    fx.raw(&TAG_EXE_ID.to_le_bytes());
    fx.raw(&100u32.to_le_bytes());
    fx.raw(&[0xAA; 4]);
    let bytes = fx.into_bytes();

    assert_eq!(TagValue::decode(&bytes, 12), None);
}

#[test]
fn type_nibble_matches_constants() {
    assert_eq!(TagType::of(TAG_DATABASE), Some(TagType::List));
    assert_eq!(TagType::of(TAG_NAME), Some(TagType::StringRef));
    assert_eq!(TagType::of(TAG_STRINGTABLE_ITEM), Some(TagType::String));
    assert_eq!(TagType::of(TAG_EXE_ID), Some(TagType::Binary));
    assert_eq!(TagType::of(TAG_TIME), Some(TagType::Qword));
    assert_eq!(TagType::of(TAG_SIZE), Some(TagType::Dword));
    assert_eq!(TagType::of(TAG_MATCH_MODE), Some(TagType::Word));
    assert_eq!(TagType::of(TAG_INCLUDE), Some(TagType::Null));
}
