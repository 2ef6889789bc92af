//! Error types for the table, the ndnb encoder/decoder and the framer.
//!
//! Only runtime conditions are represented here. Misuse of the table
//! (leaked or foreign enumerators, rehash or drop while enumerators are
//! open) is a programming error and panics instead.

use std::collections::TryReserveError;
use thiserror::Error;

/// Failure reported by fallible `HashTb` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashTbError {
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Sticky decoder error, one per terminal error state of the skeleton decoder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    #[error("numeric value exceeds the representable range")]
    Overflow,
    #[error("attribute outside of an open tag")]
    Attr,
    #[error("unrecognized token type")]
    Coding,
    #[error("unbalanced element nesting")]
    Nest,
    #[error("decoder made no progress on a pending payload")]
    Bug,
}

/// Misuse of `NdnbEncoder`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("tag and attribute names must not be empty")]
    EmptyName,
    #[error("unbalanced element nesting")]
    Unbalanced,
}

/// Failure while splitting a byte stream into ndnb objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("malformed ndnb input: {0}")]
    Decode(#[from] DecodeError),

    #[error("object exceeds {limit} bytes (scanned {size})")]
    Oversized { size: usize, limit: usize },
}
