#![cfg(test)]

// Property tests for HashTb kept inside the crate so they can inspect the
// bucket chains directly.

use crate::hashtb::{Entry, HashTb, HashTbConfig, Seek, TableParam};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<Vec<u8>>>>;

// Pool-indexed operations: indices shrink to earlier keys and op lists
// shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Seek(usize, usize, u32),
    Delete(usize),
    DeleteUnderOuter(usize),
    Lookup(usize),
    Enumerate,
    Rehash(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..6), 1..=12).prop_flat_map(
        |pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                4 => (idx.clone(), 0usize..4, any::<u32>()).prop_map(|(i, x, v)| OpI::Seek(i, x, v)),
                2 => idx.clone().prop_map(OpI::Delete),
                2 => idx.clone().prop_map(OpI::DeleteUnderOuter),
                1 => idx.clone().prop_map(OpI::Lookup),
                1 => Just(OpI::Enumerate),
                1 => (1usize..40).prop_map(OpI::Rehash),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn logging_table(log: &Log) -> HashTb<u32> {
    let sink = log.clone();
    let param = TableParam::with_finalize(
        move |e: Entry<'_, u32>, _: &mut ()| sink.borrow_mut().push(e.key().to_vec()),
        (),
    );
    // A small table so growth and long chains both get exercised.
    HashTb::with_config(param, HashTbConfig::default().with_initial_buckets(2)).unwrap()
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `seek` creates exactly once per key and finds it afterwards; `lookup`
//   returns the stored payload for present keys and nothing otherwise.
// - Every bucket chain is sorted by hash after each operation, including
//   growth inside `seek` and explicit `rehash`.
// - Deleting through the sole enumerator finalizes immediately; deleting
//   while another enumerator is open leaves that enumerator's view intact
//   and defers finalize until the last enumerator closes.
// - Enumeration visits every live entry exactly once.
// - Dropping the table finalizes every remaining entry exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut sut = logging_table(&log);
        let mut model: HashMap<Vec<u8>, (u32, usize)> = HashMap::new();
        let mut finalized: Vec<Vec<u8>> = Vec::new();

        for op in ops {
            match op {
                OpI::Seek(i, ext, v) => {
                    let k = pool[i].clone();
                    let mut e = sut.open();
                    let res = sut.seek(&mut e, &k, ext).unwrap();
                    match model.get(&k) {
                        Some(&(old, old_ext)) => {
                            prop_assert_eq!(res, Seek::Found);
                            prop_assert_eq!(e.data(&sut), Some(&old));
                            prop_assert_eq!(e.extsize(&sut), old_ext);
                        }
                        None => {
                            prop_assert_eq!(res, Seek::Created);
                            prop_assert_eq!(e.data(&sut), Some(&0));
                            prop_assert_eq!(e.ext(&sut).map(|x| x.to_vec()), Some(vec![0u8; ext]));
                            *e.data_mut(&mut sut).unwrap() = v;
                            model.insert(k.clone(), (v, ext));
                        }
                    }
                    prop_assert_eq!(e.key(&sut), Some(&k[..]));
                    sut.close(e);
                }
                OpI::Delete(i) => {
                    let k = pool[i].clone();
                    if model.remove(&k).is_some() {
                        let mut e = sut.open();
                        prop_assert_eq!(sut.seek(&mut e, &k, 0).unwrap(), Seek::Found);
                        prop_assert!(sut.delete(&mut e));
                        finalized.push(k.clone());
                        prop_assert_eq!(&*log.borrow(), &finalized);
                        sut.close(e);
                    }
                    prop_assert!(sut.lookup(&k).is_none());
                }
                OpI::DeleteUnderOuter(i) => {
                    let k = pool[i].clone();
                    let outer = sut.open();
                    let before_key = outer.key(&sut).map(|x| x.to_vec());
                    let before_data = outer.data(&sut).copied();
                    let mut inner = sut.open();
                    let present = model.remove(&k).is_some();
                    if present {
                        prop_assert_eq!(sut.seek(&mut inner, &k, 0).unwrap(), Seek::Found);
                        prop_assert!(sut.delete(&mut inner));
                    }
                    sut.close(inner);
                    prop_assert!(sut.lookup(&k).is_none());
                    prop_assert_eq!(outer.key(&sut).map(|x| x.to_vec()), before_key);
                    prop_assert_eq!(outer.data(&sut).copied(), before_data);
                    prop_assert_eq!(&*log.borrow(), &finalized, "finalize must wait for the outer enumerator");
                    prop_assert_eq!(sut.pending_reclaim(), usize::from(present));
                    sut.close(outer);
                    if present {
                        finalized.push(k);
                    }
                    prop_assert_eq!(&*log.borrow(), &finalized);
                    prop_assert_eq!(sut.pending_reclaim(), 0);
                }
                OpI::Lookup(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.lookup(k), model.get(k).map(|(v, _)| v));
                }
                OpI::Enumerate => {
                    let mut e = sut.open();
                    let mut seen = BTreeSet::new();
                    while let Some(k) = e.key(&sut) {
                        prop_assert!(seen.insert(k.to_vec()), "entry visited twice");
                        sut.advance(&mut e);
                    }
                    sut.close(e);
                    let expected: BTreeSet<Vec<u8>> = model.keys().cloned().collect();
                    prop_assert_eq!(&seen, &expected);
                    let via_iter: BTreeSet<Vec<u8>> = sut.iter().map(|e| e.key().to_vec()).collect();
                    prop_assert_eq!(via_iter, expected);
                }
                OpI::Rehash(n) => {
                    sut.rehash(n).unwrap();
                    prop_assert_eq!(sut.bucket_count(), n);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.open_enumerators(), 0);
            for chain in sut.chain_hashes() {
                prop_assert!(chain.windows(2).all(|w| w[0] <= w[1]), "unsorted chain {:?}", chain);
            }
        }

        let remaining: BTreeSet<Vec<u8>> = model.keys().cloned().collect();
        drop(sut);
        let log = log.borrow();
        prop_assert_eq!(log.len(), finalized.len() + remaining.len());
        let dropped: BTreeSet<Vec<u8>> = log[finalized.len()..].iter().cloned().collect();
        prop_assert_eq!(dropped, remaining);
    }
}
