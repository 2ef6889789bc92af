//! Enumerator: a cursor over a `HashTb` that stays valid while entries are
//! inserted or removed.
//!
//! An enumerator is linear: it must be handed back with `HashTb::close`.
//! Dropping one any other way panics; a leaked enumerator keeps the table
//! from ever reclaiming deferred entries.

use crate::hashtb::{Entry, HashTb, NodeKey};
use core::marker::PhantomData;

#[derive(Debug)]
pub struct Enumerator {
    pub(crate) table: u64,
    pub(crate) pos: Option<NodeKey>,
    closed: bool,
    // Single-threaded like the table it points into.
    _nosend: PhantomData<*mut ()>,
}

impl Enumerator {
    pub(crate) fn new(table: u64, pos: Option<NodeKey>) -> Self {
        Self {
            table,
            pos,
            closed: false,
            _nosend: PhantomData,
        }
    }

    pub(crate) fn release(&mut self) {
        self.closed = true;
    }

    /// True when positioned past the last entry.
    pub fn is_end(&self) -> bool {
        self.pos.is_none()
    }

    pub fn entry<'a, V, C>(&self, tb: &'a HashTb<V, C>) -> Option<Entry<'a, V>> {
        tb.node_at(self).map(|n| n.entry())
    }

    pub fn key<'a, V, C>(&self, tb: &'a HashTb<V, C>) -> Option<&'a [u8]> {
        tb.node_at(self).map(|n| n.key())
    }

    pub fn keysize<V, C>(&self, tb: &HashTb<V, C>) -> usize {
        tb.node_at(self).map_or(0, |n| n.key().len())
    }

    pub fn ext<'a, V, C>(&self, tb: &'a HashTb<V, C>) -> Option<&'a [u8]> {
        tb.node_at(self).map(|n| n.ext())
    }

    pub fn ext_mut<'a, V, C>(&self, tb: &'a mut HashTb<V, C>) -> Option<&'a mut [u8]> {
        tb.node_at_mut(self).map(|n| n.ext_mut())
    }

    pub fn extsize<V, C>(&self, tb: &HashTb<V, C>) -> usize {
        tb.node_at(self).map_or(0, |n| n.ext().len())
    }

    pub fn data<'a, V, C>(&self, tb: &'a HashTb<V, C>) -> Option<&'a V> {
        tb.node_at(self).map(|n| n.data())
    }

    pub fn data_mut<'a, V, C>(&self, tb: &'a mut HashTb<V, C>) -> Option<&'a mut V> {
        tb.node_at_mut(self).map(|n| n.data_mut())
    }

    /// Size of the item payload, or 0 past the end.
    pub fn datasize<V, C>(&self, tb: &HashTb<V, C>) -> usize {
        tb.node_at(self)
            .map_or(0, |_| core::mem::size_of::<V>())
    }
}

impl Drop for Enumerator {
    fn drop(&mut self) {
        if !self.closed && !std::thread::panicking() {
            panic!("Enumerator dropped without HashTb::close");
        }
    }
}
