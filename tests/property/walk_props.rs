//! Navigation invariants over generated trees.

use proptest::prelude::*;
use shimdb::binary::{advance, record_size};
use shimdb::tags::*;
use shimdb::{verify, Database, LoadError, Tag, TagId, TagType, TAGID_ROOT};

use crate::common::SdbFixture;

// ============================================================================
// STRATEGIES
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Null(Tag),
    Word(Tag, u16),
    Dword(Tag, u32),
    Qword(Tag, u64),
    Binary(Vec<u8>),
    Text(String),
    List(Tag, Vec<Node>),
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null(TAG_INCLUDE)),
        any::<u16>().prop_map(|v| Node::Word(TAG_MATCH_MODE, v)),
        any::<u32>().prop_map(|v| Node::Dword(TAG_SIZE, v)),
        any::<u32>().prop_map(|v| Node::Dword(TAG_OFFSET, v)),
        any::<u64>().prop_map(|v| Node::Qword(TAG_TIME, v)),
        prop::collection::vec(any::<u8>(), 0..9).prop_map(Node::Binary),
        "[a-zA-Z0-9 .]{0,12}".prop_map(Node::Text),
    ]
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        (
            prop::sample::select(vec![TAG_EXE, TAG_LIBRARY, TAG_SHIM_REF]),
            prop::collection::vec(inner, 0..6),
        )
            .prop_map(|(tag, kids)| Node::List(tag, kids))
    })
}

fn layout(fx: &mut SdbFixture, node: &Node) {
    match node {
        Node::Null(tag) => {
            fx.null(*tag);
        }
        Node::Word(tag, v) => {
            fx.word(*tag, *v);
        }
        Node::Dword(tag, v) => {
            fx.dword(*tag, *v);
        }
        Node::Qword(tag, v) => {
            fx.qword(*tag, *v);
        }
        Node::Binary(data) => {
            fx.binary(TAG_EXE_ID, data);
        }
        Node::Text(text) => {
            fx.string(TAG_STRINGTABLE_ITEM, text);
        }
        Node::List(tag, kids) => {
            let mark = fx.begin_list(*tag);
            for kid in kids {
                layout(fx, kid);
            }
            fx.end_list(mark);
        }
    }
}

fn build(nodes: &[Node]) -> Database {
    let mut fx = SdbFixture::new();
    let root = fx.begin_list(TAG_DATABASE);
    for node in nodes {
        layout(&mut fx, node);
    }
    fx.end_list(root);
    Database::from_bytes(fx.into_bytes()).unwrap()
}

/// Every list reachable from the root, root included.
fn all_lists(db: &Database) -> Vec<TagId> {
    let mut out = Vec::new();
    let mut stack = vec![TAGID_ROOT];
    while let Some(list) = stack.pop() {
        out.push(list);
        for child in db.children(list) {
            if db.get(child).is_some_and(|v| v.is(TagType::List)) {
                stack.push(child);
            }
        }
    }
    out
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: advance(t) is t + record_size(t), or None at end of buffer.
    #[test]
    fn prop_advance_adds_size(nodes in prop::collection::vec(tree(), 0..6)) {
        let db = build(&nodes);
        let bytes = db.as_bytes();
        for list in all_lists(&db) {
            for child in db.children(list) {
                let expected = child.offset() + record_size(bytes, child.offset()).unwrap();
                match advance(bytes, child) {
                    Some(next) => {
                        prop_assert_eq!(next.offset(), expected);
                        prop_assert!(expected < bytes.len());
                    }
                    None => prop_assert!(expected >= bytes.len()),
                }
            }
        }
    }

    /// Property: children of a list stay inside [L + 6, L + 6 + N).
    #[test]
    fn prop_children_inside_list(nodes in prop::collection::vec(tree(), 0..6)) {
        let db = build(&nodes);
        for list in all_lists(&db) {
            let content = db.get(list).unwrap().list_content_len().unwrap() as usize;
            let start = list.offset() + 6;
            let mut count = 0usize;
            let mut bytes_seen = 0usize;
            for child in db.children(list) {
                prop_assert!(child.offset() >= start);
                prop_assert!(child.offset() < start + content);
                bytes_seen += db.get(child).unwrap().size().unwrap();
                count += 1;
            }
            prop_assert_eq!(bytes_seen, content);
            prop_assert_eq!(count == 0, content == 0);
        }
    }

    /// Property: find_first_tag / find_next_tag only return matching tags and
    /// together enumerate exactly the matching children.
    #[test]
    fn prop_find_returns_matching(
        nodes in prop::collection::vec(tree(), 0..8),
        wanted in prop::sample::select(vec![TAG_SIZE, TAG_EXE, TAG_TIME, TAG_EXE_ID, TAG_NAME]),
    ) {
        let db = build(&nodes);
        for list in all_lists(&db) {
            let expected: Vec<_> = db.children(list).filter(|&id| db.tag_of(id) == wanted).collect();

            let mut found = Vec::new();
            let mut cursor = db.find_first_tag(list, wanted);
            while let Some(id) = cursor {
                prop_assert_eq!(db.tag_of(id), wanted);
                found.push(id);
                cursor = db.find_next_tag(list, id);
            }
            prop_assert_eq!(found, expected);
        }
    }

    /// Property: generated trees pass structural verification.
    #[test]
    fn prop_generated_trees_verify(nodes in prop::collection::vec(tree(), 0..6)) {
        let db = build(&nodes);
        let report = verify(&db);
        prop_assert!(report.is_clean(), "{:?}", report.issues);
        prop_assert_eq!(report.lists, all_lists(&db).len());
    }

    /// Property: one record with a reserved type nibble fails the whole load.
    #[test]
    fn prop_reserved_nibble_fails_load(
        nodes in prop::collection::vec(tree(), 0..4),
        nibble in prop::sample::select(vec![0x0u16, 0x2, 0xA, 0xB, 0xC, 0xD, 0xE, 0xF]),
        index in 0u16..0x1000,
    ) {
        let mut fx = SdbFixture::new();
        let root = fx.begin_list(TAG_DATABASE);
        for node in &nodes {
            layout(&mut fx, node);
        }
        let bad_at = fx.raw(&((nibble << 12) | index).to_le_bytes());
        fx.raw(&[0, 0, 0, 0]);
        fx.end_list(root);

        match Database::from_bytes(fx.into_bytes()) {
            Err(LoadError::CorruptDatabase { offset, .. }) => prop_assert_eq!(offset, bad_at.offset()),
            other => prop_assert!(false, "expected corrupt, got {:?}", other.map(|db| db.len())),
        }
    }

    /// Property: arbitrary bytes never panic the loader or the walker.
    #[test]
    fn prop_arbitrary_bytes_are_safe(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(db) = Database::from_bytes(bytes) {
            let _ = verify(&db);
            for id in db.children(TagId::NULL).take(64) {
                let _ = db.read_string(id);
                let _ = db.read_dword(id, 0);
                let _ = db.children(id).count();
            }
        }
    }
}
