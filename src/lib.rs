//! Reader for shim application databases (SDB files).
//!
//! An SDB file is a little-endian tag tree: a 12-byte header followed by
//! typed records, some of which are lists containing further records. This
//! crate loads such a file into memory once and then answers navigation and
//! typed-read queries against the immutable buffer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  binary/    │────▶│  walker.rs   │────▶│ database.rs  │
//! │ (TagType,   │     │ (first_child,│     │ (Database,   │
//! │  TagView,   │     │  next_child, │     │  read_*,     │
//! │  record_size│     │  Children)   │     │  find_*)     │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────┐                         ┌──────────────┐
//! │ strings.rs  │◀────────────────────────│  verify/     │
//! │ (WideStr,   │                         │  dump.rs     │
//! │  resolve)   │                         │ (tooling)    │
//! └─────────────┘                         └──────────────┘
//! ```
//!
//! # Failure Model
//!
//! | Stage      | On bad input                                      |
//! |------------|---------------------------------------------------|
//! | load       | `Err(LoadError)`, nothing is kept                 |
//! | navigation | `None` ("not found")                              |
//! | typed read | caller's default, `None` or `false`               |
//!
//! # Usage
//!
//! ```ignore
//! use shimdb::{tags, Database, TagId};
//!
//! let db = Database::open("sysmain.sdb")?;
//! let root = db.find_first_tag(TagId::NULL, tags::TAG_DATABASE).unwrap();
//! let name = db.find_first_tag(root, tags::TAG_NAME).unwrap();
//! println!("{}", db.read_string(name).unwrap_or_default());
//! ```

pub mod binary;
mod database;
pub mod dump;
mod error;
pub mod strings;
pub mod tags;
#[doc(hidden)]
pub mod testing;
pub mod verify;
mod walker;

pub use binary::{
    SdbHeader, Tag, TagId, TagType, TagValue, TagView, HEADER_SIZE, LIST_HEADER_SIZE,
    MAX_STRING_REF_DEPTH, MAX_TREE_DEPTH, TAGID_NULL, TAGID_ROOT,
};
pub use database::{Database, LoadOptions};
pub use dump::{snapshot, NodeValue, TagNode};
pub use error::LoadError;
pub use strings::WideStr;
pub use tags::{known_tags, tag_from_name, tag_name, INVALID_TAG_NAME};
pub use verify::{verify, StructureIssue, VerificationReport};
pub use walker::{
    children, find_first_tag, find_next_tag, first_child, next_child, tag_at, Children,
};
