// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: structural reports and runtime contracts.
//!
//! Two complementary approaches to catching bad structure:
//!
//! 1. **Reports** (`verify`) that walk a loaded database and list every place
//!    where lists, children and string references disagree. For tooling and
//!    for callers who want more than the load scan guarantees.
//!
//! 2. **Runtime contracts** that panic in debug builds when the reader's own
//!    offset arithmetic breaks an invariant. Zero-cost in release, but catch
//!    bugs during development and fuzzing.

pub mod contracts;
mod report;

pub use report::*;
