// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the offset arithmetic.
//!
//! These are `debug_assert!`s: free in release builds, loud in tests and
//! fuzzing. Each one states a property the reader relies on so that a
//! regression in the size table or the walker fails at the point of damage
//! instead of three records later.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                  | Property                                      |
//! |---------------------------|-----------------------------------------------|
//! | `check_record_size_even`  | every record size is even and at least 2      |
//! | `check_tag_id_aligned`    | ids handed to the buffer are even             |
//! | `check_child_in_list`     | a returned child lies inside its parent list  |

use crate::binary::TagId;

/// INVARIANT: record sizes are even and never smaller than a tag code.
#[inline]
pub fn check_record_size_even(offset: usize, size: usize) {
    debug_assert!(
        size % 2 == 0 && size >= 2,
        "Contract violation: record at 0x{:X} has size {}",
        offset,
        size
    );
}

/// INVARIANT: the cursor only dereferences even offsets.
#[inline]
pub fn check_tag_id_aligned(id: TagId) {
    debug_assert!(
        id.0 % 2 == 0,
        "Contract violation: unaligned tag id {}",
        id
    );
}

/// INVARIANT: `parent + 6 <= child < end` for every child the walker returns.
#[inline]
pub fn check_child_in_list(parent: TagId, end: usize, child: TagId) {
    debug_assert!(
        child.offset() >= parent.offset() + crate::binary::LIST_HEADER_SIZE && child.offset() < end,
        "Contract violation: child {} outside list {} (end 0x{:X})",
        child,
        parent,
        end
    );
}
