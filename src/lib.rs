//! ndnx-core: the byte-keyed hash table and the ndnb skeleton decoder that
//! sit underneath a content-centric networking stack.
//!
//! Internal Design:
//!
//! Summary
//! - Two leaf components with no coupling between them:
//!   - HashTb<V, C>: hash table keyed by byte strings, with bucket chains
//!     kept sorted by hash, cursors (`Enumerator`) that survive inserts and
//!     deletes, and deferred reclamation of entries removed while more than
//!     one cursor is open.
//!   - SkeletonDecoder: resumable scanner for the ndnb binary encoding that
//!     finds token and object boundaries across arbitrarily fragmented input.
//! - Around the decoder: `coding` (wire constants and an encoder) and
//!   `framer` (splits a byte stream into whole top-level objects).
//!
//! Constraints
//! - Single-threaded: no internal locking; callers serialize access.
//! - Tables store nodes in a generational arena (`slotmap`); bucket chains
//!   and the deferred list hold handles, never pointers, so unlinking and
//!   deferring are plain ownership moves between the chain and a queue.
//! - Misuse is fatal: too many open enumerators, dropping an enumerator
//!   without closing it, rehashing or dropping a table while enumerators are
//!   open, or using an enumerator on a foreign table all panic. Allocation
//!   failure is an ordinary `Err`.
//!
//! Deferred reclamation
//! - Each open enumerator counts against the table. Deleting through the
//!   only open enumerator finalizes and frees the entry at once. Otherwise
//!   the entry is unlinked, so lookups and other cursors no longer reach it,
//!   and parked until the last enumerator closes. The finalize callback runs
//!   exactly once per entry, at the moment the entry is released.
//!
//! Decoder state
//! - `SkeletonDecoder` is a small `Copy` record (state enum, pause flag,
//!   tag sub-state, depth, accumulator, offsets). A zeroed decoder is a valid
//!   start state; error states are sticky.
//!
//! Notes and non-goals
//! - No persistence of table contents.
//! - The decoder does not build a tree or validate the dictionary of dtags.
//! - The hash is bit-compatible with existing ndnx deployments.

pub mod coding;
pub mod enumerator;
pub mod error;
pub mod framer;
pub mod hashtb;
mod hashtb_proptest;
pub mod skeleton;

// Public surface
pub use coding::{NdnbEncoder, Tt};
pub use enumerator::Enumerator;
pub use error::{DecodeError, EncodeError, FrameError, HashTbError};
pub use framer::{FramerConfig, ObjectFramer};
pub use hashtb::{Entry, HashTb, HashTbConfig, Seek, TableParam};
pub use skeleton::{DState, SkeletonDecoder};
