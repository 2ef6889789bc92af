//! HashTb: byte-keyed hash table with hash-sorted bucket chains,
//! enumerator cursors and deferred reclamation.

use crate::enumerator::Enumerator;
use crate::error::HashTbError;
use core::fmt;
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

new_key_type! {
    /// Generational handle of a node in the table's arena.
    pub(crate) struct NodeKey;
}

/// Initial bucket count of a table created with the default config.
pub const DEFAULT_BUCKETS: usize = 7;
/// Default bound on simultaneously open enumerators per table.
pub const MAX_ENUMERATORS: usize = 30;
/// Default load factor (entries per bucket) above which `seek` grows the table.
pub const MAX_LOAD: usize = 3;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Order-sensitive rolling hash over `key`, seeded by its length.
///
/// The digest is stable across releases and matches existing ndnx
/// deployments on the same word size.
pub fn hash(key: &[u8]) -> usize {
    let mut h = key.len().wrapping_add(23);
    for &b in key {
        h = ((h << 6) ^ (h >> 27)).wrapping_add(b as usize);
    }
    h
}

/// Client callback run exactly once per entry, when its storage is released.
pub type Finalize<V, C> = Box<dyn FnMut(Entry<'_, V>, &mut C)>;

/// Client parameters supplied at creation.
pub struct TableParam<V, C = ()> {
    pub finalize: Option<Finalize<V, C>>,
    pub finalize_data: C,
}

impl<V, C> TableParam<V, C> {
    pub fn new(finalize_data: C) -> Self {
        Self {
            finalize: None,
            finalize_data,
        }
    }

    pub fn with_finalize<F>(finalize: F, finalize_data: C) -> Self
    where
        F: FnMut(Entry<'_, V>, &mut C) + 'static,
    {
        Self {
            finalize: Some(Box::new(finalize)),
            finalize_data,
        }
    }
}

impl<V, C: Default> Default for TableParam<V, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

/// Sizing and safety bounds of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashTbConfig {
    pub initial_buckets: usize,
    /// Opening more enumerators than this panics; it is a leak detector.
    pub max_enumerators: usize,
    pub max_load: usize,
}

impl Default for HashTbConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKETS,
            max_enumerators: MAX_ENUMERATORS,
            max_load: MAX_LOAD,
        }
    }
}

impl HashTbConfig {
    pub fn with_initial_buckets(mut self, n: usize) -> Self {
        self.initial_buckets = n;
        self
    }

    pub fn with_max_enumerators(mut self, n: usize) -> Self {
        self.max_enumerators = n;
        self
    }

    pub fn with_max_load(mut self, n: usize) -> Self {
        self.max_load = n;
        self
    }
}

/// Read-only view of one entry.
#[derive(Debug)]
pub struct Entry<'a, V> {
    key: &'a [u8],
    ext: &'a [u8],
    data: &'a V,
}

impl<'a, V> Entry<'a, V> {
    pub fn key(&self) -> &'a [u8] {
        self.key
    }
    pub fn keysize(&self) -> usize {
        self.key.len()
    }
    /// Extension bytes requested at creation, stored right after the key.
    pub fn ext(&self) -> &'a [u8] {
        self.ext
    }
    pub fn extsize(&self) -> usize {
        self.ext.len()
    }
    pub fn data(&self) -> &'a V {
        self.data
    }
}

#[derive(Debug)]
pub(crate) struct Node<V> {
    link: Option<NodeKey>,
    hash: usize,
    keysize: usize,
    // false once unlinked and parked on the deferred list
    linked: bool,
    data: V,
    bytes: Box<[u8]>, // key followed by extension
}

impl<V> Node<V> {
    pub(crate) fn key(&self) -> &[u8] {
        &self.bytes[..self.keysize]
    }
    pub(crate) fn ext(&self) -> &[u8] {
        &self.bytes[self.keysize..]
    }
    pub(crate) fn ext_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.keysize..]
    }
    pub(crate) fn data(&self) -> &V {
        &self.data
    }
    pub(crate) fn data_mut(&mut self) -> &mut V {
        &mut self.data
    }
    pub(crate) fn entry(&self) -> Entry<'_, V> {
        Entry {
            key: self.key(),
            ext: self.ext(),
            data: &self.data,
        }
    }
}

/// Outcome of a successful `HashTb::seek`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Seek {
    /// The key was present; the enumerator now points at it.
    Found,
    /// A fresh entry was inserted with a default payload and zeroed extension.
    Created,
}

pub struct HashTb<V, C = ()> {
    id: u64,
    buckets: Vec<Option<NodeKey>>,
    nodes: SlotMap<NodeKey, Node<V>>, // live and deferred nodes
    refcount: usize,
    deferred: Vec<NodeKey>,
    param: TableParam<V, C>,
    config: HashTbConfig,
}

fn empty_buckets(n: usize) -> Result<Vec<Option<NodeKey>>, HashTbError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(n)?;
    buckets.resize(n, None);
    Ok(buckets)
}

impl<V, C> HashTb<V, C> {
    pub fn create(param: TableParam<V, C>) -> Result<Self, HashTbError> {
        Self::with_config(param, HashTbConfig::default())
    }

    pub fn with_config(param: TableParam<V, C>, config: HashTbConfig) -> Result<Self, HashTbError> {
        let config = HashTbConfig {
            initial_buckets: config.initial_buckets.max(1),
            max_enumerators: config.max_enumerators.max(1),
            max_load: config.max_load.max(1),
        };
        let buckets = empty_buckets(config.initial_buckets)?;
        Ok(Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            buckets,
            nodes: SlotMap::with_key(),
            refcount: 0,
            deferred: Vec::new(),
            param,
            config,
        })
    }

    /// Number of live entries; entries awaiting deferred reclamation are not counted.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.deferred.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
    pub fn open_enumerators(&self) -> usize {
        self.refcount
    }
    /// Entries removed while other enumerators were open, not yet finalized.
    pub fn pending_reclaim(&self) -> usize {
        self.deferred.len()
    }
    pub fn config(&self) -> &HashTbConfig {
        &self.config
    }

    pub fn has_finalize(&self) -> bool {
        self.param.finalize.is_some()
    }
    pub fn finalize_data(&self) -> &C {
        &self.param.finalize_data
    }
    pub fn finalize_data_mut(&mut self) -> &mut C {
        &mut self.param.finalize_data
    }

    #[inline]
    fn bucket_index(&self, h: usize) -> usize {
        h % self.buckets.len()
    }

    fn find_node(&self, key: &[u8]) -> Option<NodeKey> {
        let h = hash(key);
        let mut cur = self.buckets[self.bucket_index(h)];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.hash > h {
                break;
            }
            if node.hash == h && node.key() == key {
                return Some(k);
            }
            cur = node.link;
        }
        None
    }

    pub fn lookup(&self, key: &[u8]) -> Option<&V> {
        self.find_node(key).map(|k| &self.nodes[k].data)
    }

    pub fn lookup_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let k = self.find_node(key)?;
        self.nodes.get_mut(k).map(|n| &mut n.data)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find_node(key).is_some()
    }

    /// Iterate live entries in bucket order without opening an enumerator.
    pub fn iter(&self) -> Iter<'_, V, C> {
        Iter {
            table: self,
            next: self.scan_buckets(0),
        }
    }

    fn scan_buckets(&self, from: usize) -> Option<NodeKey> {
        self.buckets.get(from..)?.iter().find_map(|b| *b)
    }

    /// Next live node after `k`. A node that was unlinked keeps its last
    /// link, so a cursor parked on it resumes at its former successor.
    fn successor(&self, k: NodeKey) -> Option<NodeKey> {
        let node = self.nodes.get(k)?;
        let b = self.bucket_index(node.hash);
        let mut next = node.link;
        while let Some(nk) = next {
            match self.nodes.get(nk) {
                Some(n) if n.linked && self.bucket_index(n.hash) == b => return Some(nk),
                Some(n) if !n.linked => next = n.link,
                _ => break,
            }
        }
        self.scan_buckets(b + 1)
    }

    pub(crate) fn check_owner(&self, e: &Enumerator) {
        assert_eq!(
            e.table, self.id,
            "enumerator used with a table that did not open it"
        );
    }

    pub(crate) fn node_at(&self, e: &Enumerator) -> Option<&Node<V>> {
        self.check_owner(e);
        self.nodes.get(e.pos?)
    }

    pub(crate) fn node_at_mut(&mut self, e: &Enumerator) -> Option<&mut Node<V>> {
        self.check_owner(e);
        self.nodes.get_mut(e.pos?)
    }

    /// Open an enumerator positioned on the first entry.
    ///
    /// Panics when more than `config().max_enumerators` would be open at
    /// once; that almost always means an enumerator is never closed.
    pub fn open(&mut self) -> Enumerator {
        assert!(
            self.refcount < self.config.max_enumerators,
            "more than {} open enumerators; an enumerator is probably never closed",
            self.config.max_enumerators
        );
        self.refcount += 1;
        Enumerator::new(self.id, self.scan_buckets(0))
    }

    pub fn advance(&self, e: &mut Enumerator) {
        self.check_owner(e);
        e.pos = e.pos.and_then(|k| self.successor(k));
    }

    /// Remove the entry under the cursor and move the cursor to the next one.
    ///
    /// With other enumerators open the entry is only unlinked; finalize and
    /// release happen when the last enumerator closes. Returns false when
    /// the cursor is past the end or on an entry that is already removed.
    pub fn delete(&mut self, e: &mut Enumerator) -> bool {
        self.check_owner(e);
        let Some(k) = e.pos else {
            return false;
        };
        let (h, link) = match self.nodes.get(k) {
            Some(n) if n.linked => (n.hash, n.link),
            _ => return false,
        };
        let b = self.bucket_index(h);
        self.unlink(b, k, link);
        e.pos = link.or_else(|| self.scan_buckets(b + 1));
        if self.refcount == 1 {
            if let Some(node) = self.nodes.remove(k) {
                self.finalize(node);
            }
        } else {
            self.nodes[k].linked = false;
            self.deferred.push(k);
            trace!(pending = self.deferred.len(), "entry reclamation deferred");
        }
        true
    }

    fn unlink(&mut self, b: usize, k: NodeKey, link: Option<NodeKey>) {
        if self.buckets[b] == Some(k) {
            self.buckets[b] = link;
            return;
        }
        let mut cur = self.buckets[b];
        while let Some(c) = cur {
            let node = &mut self.nodes[c];
            if node.link == Some(k) {
                node.link = link;
                return;
            }
            cur = node.link;
        }
        unreachable!("linked node missing from its bucket chain");
    }

    fn finalize(&mut self, node: Node<V>) {
        if let Some(f) = self.param.finalize.as_mut() {
            f(node.entry(), &mut self.param.finalize_data);
        }
    }

    /// Close an enumerator. Closing the last one reclaims deferred entries.
    pub fn close(&mut self, mut e: Enumerator) {
        self.check_owner(&e);
        assert!(self.refcount > 0, "enumerator closed twice");
        if self.refcount == 1 && !self.deferred.is_empty() {
            trace!(count = self.deferred.len(), "reclaiming deferred entries");
            while let Some(k) = self.deferred.pop() {
                if let Some(node) = self.nodes.remove(k) {
                    self.finalize(node);
                }
            }
        }
        self.refcount -= 1;
        e.release();
    }

    /// Resize the bucket array, keeping every chain sorted by hash.
    ///
    /// Panics if any enumerator is open. On allocation failure the table
    /// is left untouched.
    pub fn rehash(&mut self, n_buckets: usize) -> Result<(), HashTbError> {
        assert!(
            self.refcount == 0,
            "rehash with {} open enumerators",
            self.refcount
        );
        self.relink(n_buckets)
    }

    fn relink(&mut self, n_buckets: usize) -> Result<(), HashTbError> {
        if n_buckets == 0 || n_buckets == self.buckets.len() {
            return Ok(());
        }
        let mut buckets = empty_buckets(n_buckets)?;
        for i in 0..self.buckets.len() {
            let mut cur = self.buckets[i];
            while let Some(k) = cur {
                let (next, h) = {
                    let node = &self.nodes[k];
                    (node.link, node.hash)
                };
                let b = h % n_buckets;
                let mut prev = None;
                let mut at = buckets[b];
                while let Some(a) = at {
                    let node = &self.nodes[a];
                    if node.hash >= h {
                        break;
                    }
                    prev = Some(a);
                    at = node.link;
                }
                self.nodes[k].link = at;
                match prev {
                    Some(p) => self.nodes[p].link = Some(k),
                    None => buckets[b] = Some(k),
                }
                cur = next;
            }
        }
        debug!(
            from = self.buckets.len(),
            to = n_buckets,
            entries = self.len(),
            "rehashed table"
        );
        self.buckets = buckets;
        Ok(())
    }

    /// Finalize and release every entry, then the table itself.
    pub fn destroy(self) {
        drop(self);
    }

    #[cfg(test)]
    pub(crate) fn chain_hashes(&self) -> Vec<Vec<usize>> {
        self.buckets
            .iter()
            .map(|head| {
                let mut out = Vec::new();
                let mut cur = *head;
                while let Some(k) = cur {
                    out.push(self.nodes[k].hash);
                    cur = self.nodes[k].link;
                }
                out
            })
            .collect()
    }
}

impl<V: Default, C> HashTb<V, C> {
    /// Position `e` on `key`, inserting a new entry when it is absent.
    ///
    /// A new entry gets `V::default()` and `extsize` zeroed extension bytes.
    /// When `e` is the only open enumerator and the load factor exceeds
    /// `max_load`, the table first grows to `2 * len + 1` buckets.
    pub fn seek(&mut self, e: &mut Enumerator, key: &[u8], extsize: usize) -> Result<Seek, HashTbError> {
        self.check_owner(e);
        let n = self.len();
        if self.refcount == 1 && n > self.buckets.len().saturating_mul(self.config.max_load) {
            if let Err(err) = self.relink(2 * n + 1) {
                debug!(error = %err, "table growth skipped");
            }
        }

        let h = hash(key);
        let b = self.bucket_index(h);
        let mut prev = None;
        let mut cur = self.buckets[b];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.hash > h {
                break;
            }
            if node.hash == h && node.key() == key {
                e.pos = Some(k);
                return Ok(Seek::Found);
            }
            prev = Some(k);
            cur = node.link;
        }

        let size = key.len().saturating_add(extsize);
        let mut bytes = Vec::new();
        if let Err(err) = bytes
            .try_reserve_exact(size)
            .and_then(|()| self.nodes.try_reserve(1))
        {
            e.pos = None;
            return Err(err.into());
        }
        bytes.extend_from_slice(key);
        bytes.resize(size, 0);
        let k = self.nodes.insert(Node {
            link: cur,
            hash: h,
            keysize: key.len(),
            linked: true,
            data: V::default(),
            bytes: bytes.into_boxed_slice(),
        });
        match prev {
            Some(p) => self.nodes[p].link = Some(k),
            None => self.buckets[b] = Some(k),
        }
        e.pos = Some(k);
        Ok(Seek::Created)
    }
}

impl<V, C> Drop for HashTb<V, C> {
    fn drop(&mut self) {
        if self.refcount != 0 {
            if std::thread::panicking() {
                return;
            }
            panic!("table dropped with {} open enumerators", self.refcount);
        }
        let mut e = self.open();
        while e.pos.is_some() {
            if !self.delete(&mut e) {
                self.advance(&mut e);
            }
        }
        self.close(e);
    }
}

impl<V, C> fmt::Debug for HashTb<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTb")
            .field("len", &self.len())
            .field("buckets", &self.buckets.len())
            .field("refcount", &self.refcount)
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

/// Iterator over live entries of a `HashTb`, in bucket order.
pub struct Iter<'a, V, C> {
    table: &'a HashTb<V, C>,
    next: Option<NodeKey>,
}

impl<'a, V, C> Iterator for Iter<'a, V, C> {
    type Item = Entry<'a, V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let table = self.table;
        let k = self.next?;
        self.next = table.successor(k);
        table.nodes.get(k).map(|n| n.entry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn table() -> HashTb<u32> {
        HashTb::create(TableParam::default()).unwrap()
    }

    fn insert(tb: &mut HashTb<u32>, key: &[u8], v: u32) -> Seek {
        let mut e = tb.open();
        let res = tb.seek(&mut e, key, 0).unwrap();
        *e.data_mut(tb).unwrap() = v;
        tb.close(e);
        res
    }

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(hash(b""), 23);
        assert_eq!(hash(b"a"), 1633);
        assert_eq!(hash(b"ab"), 108706);
        assert_ne!(hash(b"ab"), hash(b"ba"));
    }

    #[test]
    fn create_uses_small_prime_bucket_count() {
        let tb = table();
        assert_eq!(tb.bucket_count(), DEFAULT_BUCKETS);
        assert!(tb.is_empty());
        assert_eq!(tb.open_enumerators(), 0);
    }

    #[test]
    fn seek_creates_then_finds_existing() {
        let mut tb = table();
        assert_eq!(insert(&mut tb, b"alpha", 1), Seek::Created);
        assert_eq!(insert(&mut tb, b"alpha", 2), Seek::Found);
        assert_eq!(tb.len(), 1);
        assert_eq!(tb.lookup(b"alpha"), Some(&2));
        assert_eq!(tb.lookup(b"alph"), None);
    }

    #[test]
    fn chains_stay_sorted_by_hash() {
        let mut tb = table();
        for i in 0..200u32 {
            insert(&mut tb, format!("/ndn/k{i}").as_bytes(), i);
        }
        for chain in tb.chain_hashes() {
            assert!(chain.windows(2).all(|w| w[0] <= w[1]), "{chain:?}");
        }
        assert_eq!(tb.len(), 200);
    }

    #[test]
    fn seek_grows_past_load_factor() {
        let mut tb = table();
        // 7 buckets hold up to 21 entries before growing.
        for i in 0..22u32 {
            insert(&mut tb, &i.to_be_bytes(), i);
        }
        assert_eq!(tb.bucket_count(), 7);
        insert(&mut tb, b"one more", 99);
        assert_eq!(tb.bucket_count(), 2 * 22 + 1);
        for i in 0..22u32 {
            assert_eq!(tb.lookup(&i.to_be_bytes()), Some(&i));
        }
    }

    #[test]
    fn no_growth_with_a_second_enumerator_open() {
        let mut tb = table();
        for i in 0..30u32 {
            insert(&mut tb, &i.to_be_bytes(), i);
        }
        // Growth happened while inserting; reset to a tiny table.
        tb.rehash(1).unwrap();
        let outer = tb.open();
        let mut e = tb.open();
        tb.seek(&mut e, b"x", 0).unwrap();
        assert_eq!(tb.bucket_count(), 1);
        tb.close(e);
        tb.close(outer);
    }

    #[test]
    fn huge_max_load_disables_growth() {
        let mut tb: HashTb<u32> = HashTb::with_config(
            TableParam::default(),
            HashTbConfig::default().with_max_load(usize::MAX),
        )
        .unwrap();
        for i in 0..64u32 {
            assert_eq!(insert(&mut tb, &i.to_le_bytes(), i), Seek::Created);
        }
        assert_eq!(tb.bucket_count(), DEFAULT_BUCKETS);
        assert_eq!(tb.lookup(&7u32.to_le_bytes()), Some(&7));
    }

    #[test]
    fn oversized_entry_reports_alloc_failure() {
        let mut tb = table();
        insert(&mut tb, b"kept", 1);
        let mut e = tb.open();
        let err = tb.seek(&mut e, b"big", usize::MAX).unwrap_err();
        assert!(matches!(err, HashTbError::Alloc(_)));
        assert!(e.is_end());
        tb.close(e);
        assert_eq!(tb.len(), 1);
        assert_eq!(tb.lookup(b"kept"), Some(&1));
    }

    #[test]
    fn extension_bytes_are_zeroed_and_writable() {
        let mut tb = table();
        let mut e = tb.open();
        tb.seek(&mut e, b"key", 4).unwrap();
        assert_eq!(e.ext(&tb), Some(&[0u8; 4][..]));
        e.ext_mut(&mut tb).unwrap().copy_from_slice(b"wxyz");
        assert_eq!(e.keysize(&tb), 3);
        assert_eq!(e.extsize(&tb), 4);
        tb.close(e);

        let mut e = tb.open();
        // Extension size only applies at creation.
        assert_eq!(tb.seek(&mut e, b"key", 16).unwrap(), Seek::Found);
        assert_eq!(e.ext(&tb), Some(&b"wxyz"[..]));
        tb.close(e);
    }

    #[test]
    fn delete_with_sole_enumerator_finalizes_immediately() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let param = TableParam::with_finalize(
            move |entry: Entry<'_, u32>, calls: &mut usize| {
                *calls += 1;
                sink.borrow_mut().push(entry.key().to_vec());
            },
            0usize,
        );
        let mut tb: HashTb<u32, usize> = HashTb::create(param).unwrap();
        let mut e = tb.open();
        tb.seek(&mut e, b"gone", 0).unwrap();
        assert!(tb.delete(&mut e));
        assert_eq!(*tb.finalize_data(), 1);
        assert_eq!(seen.borrow().as_slice(), &[b"gone".to_vec()]);
        assert!(e.is_end());
        tb.close(e);
        assert!(tb.is_empty());
    }

    #[test]
    fn delete_past_end_is_noop() {
        let mut tb = table();
        let mut e = tb.open();
        assert!(e.is_end());
        assert!(!tb.delete(&mut e));
        tb.close(e);
    }

    #[test]
    fn rehash_preserves_entries_and_order() {
        let mut tb = table();
        for i in 0..64u32 {
            insert(&mut tb, format!("n{i}").as_bytes(), i);
        }
        for n in [1, 3, 97, 13] {
            tb.rehash(n).unwrap();
            assert_eq!(tb.bucket_count(), n);
            for chain in tb.chain_hashes() {
                assert!(chain.windows(2).all(|w| w[0] <= w[1]));
            }
            for i in 0..64u32 {
                assert_eq!(tb.lookup(format!("n{i}").as_bytes()), Some(&i));
            }
        }
        tb.rehash(0).unwrap();
        assert_eq!(tb.bucket_count(), 13);
    }

    #[test]
    fn rehash_with_open_enumerator_panics() {
        let mut tb = table();
        let e = tb.open();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = tb.rehash(11);
        }));
        assert!(res.is_err());
        tb.close(e);
        assert_eq!(tb.bucket_count(), DEFAULT_BUCKETS);
    }

    #[test]
    fn iter_visits_each_live_entry() {
        let mut tb = table();
        for i in 0..40u32 {
            insert(&mut tb, &i.to_le_bytes(), i);
        }
        let mut seen: Vec<u32> = tb.iter().map(|e| *e.data()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn lookup_mut_updates_payload() {
        let mut tb = table();
        insert(&mut tb, b"k", 1);
        *tb.lookup_mut(b"k").unwrap() += 41;
        assert_eq!(tb.lookup(b"k"), Some(&42));
        assert!(tb.lookup_mut(b"missing").is_none());
    }
}
