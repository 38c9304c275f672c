//! String table resolution properties.

use proptest::prelude::*;
use shimdb::tags::*;
use shimdb::{Database, TagId, MAX_STRING_REF_DEPTH};

use crate::common::SdbFixture;

/// Lay out a database whose NAME references point, in order, at each item of
/// a string table holding `texts`. Returns the reference ids and item ids.
fn referenced_table(texts: &[String]) -> (Database, Vec<TagId>, Vec<TagId>) {
    let mut fx = SdbFixture::new();
    let root = fx.begin_list(TAG_DATABASE);
    let refs: Vec<TagId> = texts.iter().map(|_| fx.string_ref(TAG_NAME, 0)).collect();
    fx.end_list(root);

    let table = fx.begin_list(TAG_STRINGTABLE);
    let items: Vec<TagId> = texts
        .iter()
        .map(|t| fx.string_nul(TAG_STRINGTABLE_ITEM, t))
        .collect();
    fx.end_list(table);

    // Patch each reference with its item's offset relative to the table.
    let mut bytes = fx.into_bytes();
    for (r, item) in refs.iter().zip(&items) {
        let rel = item.0 - table.id().0;
        let at = r.offset() + 2;
        bytes[at..at + 4].copy_from_slice(&rel.to_le_bytes());
    }
    (Database::from_bytes(bytes).unwrap(), refs, items)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: resolving a reference reads the same bytes as reading the
    /// string record at table + offset directly.
    #[test]
    fn prop_reference_matches_direct(texts in prop::collection::vec("\\PC{0,16}", 1..8)) {
        let (db, refs, items) = referenced_table(&texts);
        for ((r, item), text) in refs.iter().zip(&items).zip(&texts) {
            let via_ref = db.string_ptr(*r).unwrap();
            let direct = db.string_ptr(*item).unwrap();
            prop_assert_eq!(via_ref, direct);
            let read = db.read_string(*r);
            prop_assert_eq!(read.as_deref(), Some(text.as_str()));
        }
    }

    /// Property: read_string_into copies at most the caller's capacity and
    /// leaves the rest of the buffer untouched.
    #[test]
    fn prop_read_into_respects_capacity(text in "[a-z]{0,24}", cap in 0usize..32) {
        let (db, refs, _) = referenced_table(std::slice::from_ref(&text));
        let mut out = vec![0xFFFFu16; cap];
        prop_assert!(db.read_string_into(refs[0], &mut out));

        let mut units: Vec<u16> = text.encode_utf16().collect();
        units.push(0);
        let copied = cap.min(units.len());
        prop_assert_eq!(&out[..copied], &units[..copied]);
        prop_assert!(out[copied..].iter().all(|&u| u == 0xFFFF));
    }

    /// Property: offsets that land outside the table or on non-strings
    /// resolve to nothing instead of panicking.
    #[test]
    fn prop_wild_offsets_are_absent(offset in any::<u32>()) {
        let mut fx = SdbFixture::new();
        let name = fx.string_ref(TAG_NAME, offset);
        let table = fx.begin_list(TAG_STRINGTABLE);
        let item = fx.string_nul(TAG_STRINGTABLE_ITEM, "only");
        fx.end_list(table);
        let db = Database::from_bytes(fx.into_bytes()).unwrap();

        let hit = offset == 0 || u64::from(table.id().0) + u64::from(offset) == u64::from(item.0);
        prop_assert_eq!(db.read_string(name).is_some(), hit);
    }
}

#[test]
fn reference_chain_is_bounded() {
    // Each reference points at the next; the last points at a string.
    let hops = MAX_STRING_REF_DEPTH + 2;
    let mut fx = SdbFixture::new();
    let table = fx.begin_list(TAG_STRINGTABLE);
    let chain: Vec<TagId> = (0..hops)
        .map(|i| fx.string_ref(TAG_NAME, 6 + 6 * (i as u32 + 1)))
        .collect();
    fx.string_nul(TAG_STRINGTABLE_ITEM, "end");
    fx.end_list(table);
    let db = Database::from_bytes(fx.into_bytes()).unwrap();

    assert_eq!(db.read_string(chain[hops - 1]).as_deref(), Some("end"));
    assert_eq!(db.read_string(chain[hops - 3]).as_deref(), Some("end"));
    assert_eq!(db.read_string(chain[0]), None);
}
