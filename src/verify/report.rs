// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Whole-tree structural verification.
//!
//! Loading only proves that every record has a known layout. It does not
//! prove that lists are nested properly or that string references land on
//! strings. [`verify`] walks the tree recursively and reports every place
//! where the structure disagrees with itself. It never mutates anything and
//! never fails: a report with no issues is the success case.

use std::fmt;

use serde::Serialize;

use crate::binary::{get, TagId, TagValue, LIST_HEADER_SIZE, MAX_TREE_DEPTH};
use crate::database::Database;

/// One structural problem found by [`verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureIssue {
    /// A child's record extends past the end of its parent.
    ChildOverrunsParent {
        parent: TagId,
        child: TagId,
        parent_end: usize,
        child_end: usize,
    },
    /// A child position that holds no readable record.
    UnreadableChild { parent: TagId, child: TagId },
    /// A STRINGREF whose target is not a string.
    UnresolvedStringRef { id: TagId, offset: u32 },
    /// STRINGREF records exist but the file has no STRINGTABLE.
    MissingStringTable { id: TagId },
    /// Lists nested deeper than the walk is willing to follow.
    TooDeep { id: TagId },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::ChildOverrunsParent {
                parent,
                child,
                parent_end,
                child_end,
            } => write!(
                f,
                "child {} ends at 0x{:X}, past end of parent {} (0x{:X})",
                child, child_end, parent, parent_end
            ),
            StructureIssue::UnreadableChild { parent, child } => {
                write!(f, "no readable record at {} inside {}", child, parent)
            }
            StructureIssue::UnresolvedStringRef { id, offset } => write!(
                f,
                "string reference {} (table offset 0x{:X}) does not resolve",
                id, offset
            ),
            StructureIssue::MissingStringTable { id } => {
                write!(f, "string reference {} but no string table", id)
            }
            StructureIssue::TooDeep { id } => {
                write!(f, "list {} nested deeper than {}", id, MAX_TREE_DEPTH)
            }
        }
    }
}

/// Result of a verification walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Records visited, lists included.
    pub records: usize,
    pub lists: usize,
    pub string_refs: usize,
    /// Deepest list nesting seen (top level is 0).
    pub max_depth: usize,
    pub issues: Vec<StructureIssue>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Walk every record reachable from the top level and report problems.
pub fn verify(db: &Database) -> VerificationReport {
    let mut report = VerificationReport::default();
    let start = TagId::ROOT.offset();
    if start < db.len() {
        walk(db, TagId::NULL, start, db.len(), 0, &mut report);
    }
    report
}

fn walk(
    db: &Database,
    parent: TagId,
    start: usize,
    end: usize,
    depth: usize,
    report: &mut VerificationReport,
) {
    report.max_depth = report.max_depth.max(depth);
    let buffer = db.as_bytes();
    let mut cursor = start;

    while cursor < end {
        let Some(child) = TagId::from_offset(cursor) else {
            return;
        };
        let Some((view, size)) = get(buffer, child).and_then(|v| Some((v, v.size()?))) else {
            report
                .issues
                .push(StructureIssue::UnreadableChild { parent, child });
            return;
        };

        let child_end = cursor.saturating_add(size);
        if child_end > end {
            report.issues.push(StructureIssue::ChildOverrunsParent {
                parent,
                child,
                parent_end: end,
                child_end,
            });
            return;
        }
        report.records += 1;

        match view.value() {
            Some(TagValue::List { .. }) => {
                report.lists += 1;
                if depth + 1 > MAX_TREE_DEPTH {
                    report.issues.push(StructureIssue::TooDeep { id: child });
                } else {
                    walk(
                        db,
                        child,
                        cursor + LIST_HEADER_SIZE,
                        child_end,
                        depth + 1,
                        report,
                    );
                }
            }
            Some(TagValue::StringRef(offset)) => {
                report.string_refs += 1;
                if db.string_table().is_none() {
                    report
                        .issues
                        .push(StructureIssue::MissingStringTable { id: child });
                } else if db.string_ptr(child).is_none() {
                    report
                        .issues
                        .push(StructureIssue::UnresolvedStringRef { id: child, offset });
                }
            }
            _ => {}
        }

        cursor = child_end;
    }
}
