// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Load errors.
//!
//! Loading is the only fallible operation in the crate. Once a [`Database`]
//! exists, navigation and reads answer with `Option` or a caller default.
//!
//! [`Database`]: crate::Database

use std::error::Error;
use std::fmt;
use std::io;

use crate::binary::Tag;
use crate::tags::tag_name;

/// Why a database could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// Opening or reading the file failed. The original `io::Error` is kept
    /// so callers can branch on `NotFound` / `PermissionDenied`.
    Io(io::Error),
    /// A record with no defined layout (Byte type or a reserved nibble).
    /// Nothing past this point can be located, so the whole load fails.
    CorruptDatabase { offset: usize, tag: Tag },
    /// A variable-length record whose length field runs past end of file.
    TruncatedRecord { offset: usize },
    /// Header check requested and failed.
    InvalidHeader { magic: Option<[u8; 4]> },
    /// File is larger than the configured limit.
    TooLarge { size: u64, limit: u64 },
}

impl LoadError {
    /// The I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            LoadError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            LoadError::CorruptDatabase { .. } | LoadError::TruncatedRecord { .. }
        )
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::CorruptDatabase { offset, tag } => write!(
                f,
                "corrupt database: tag 0x{:04X} ({}) at offset 0x{:X} has no known layout",
                tag,
                tag_name(*tag),
                offset
            ),
            LoadError::TruncatedRecord { offset } => write!(
                f,
                "corrupt database: record at offset 0x{:X} is truncated",
                offset
            ),
            LoadError::InvalidHeader { magic: Some(magic) } => {
                write!(f, "invalid header: expected magic \"sdbf\", got {:?}", magic)
            }
            LoadError::InvalidHeader { magic: None } => {
                write!(f, "invalid header: file shorter than 12 bytes")
            }
            LoadError::TooLarge { size, limit } => {
                write!(f, "file is {} bytes, limit is {}", size, limit)
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}
