#![cfg(test)]

// Property tests for SlotMap kept inside the crate so they can check the
// private structural invariants after every operation.

use crate::policy::{ErasePolicy, Ordered, SwapPop};
use crate::{Handle, InvalidHandle, SlotMap};
use hashbrown::HashMap;
use proptest::prelude::*;
use slotmap::{DefaultKey, SlotMap as Oracle};

// Indices select among handles issued so far (live or stale), which keeps
// shrinking meaningful: smaller indices point at older handles.
#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Erase(usize),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Retain(i32),
    Clear,
    Iterate,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => any::<i32>().prop_map(Op::Insert),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => any::<usize>().prop_map(Op::Remove),
        2 => any::<usize>().prop_map(Op::Get),
        1 => (any::<usize>(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
        1 => (1i32..5).prop_map(Op::Retain),
        1 => Just(Op::Clear),
        1 => Just(Op::Iterate),
    ];
    proptest::collection::vec(op, 1..80)
}

fn pick(issued: &[Handle], i: usize) -> Option<Handle> {
    if issued.is_empty() {
        None
    } else {
        Some(issued[i % issued.len()])
    }
}

// State-machine equivalence against `slotmap::SlotMap`, which provides the
// reference generational semantics. `keys` maps every handle ever issued to
// the oracle key created alongside it.
fn run<P: ErasePolicy>(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut sut: SlotMap<i32, P> = SlotMap::new();
    let mut oracle: Oracle<DefaultKey, i32> = Oracle::new();
    let mut keys: HashMap<Handle, DefaultKey> = HashMap::new();
    let mut issued: Vec<Handle> = Vec::new();
    // Live handles in insertion order, for the ordered policy's order check.
    let mut order: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(v) => {
                let h = sut.insert(v);
                prop_assert_eq!(sut.get(h), Ok(&v), "fresh handle must resolve");
                let prev = keys.insert(h, oracle.insert(v));
                prop_assert!(prev.is_none(), "handle {:?} issued twice", h);
                issued.push(h);
                order.push(h);
            }
            Op::Erase(i) => {
                if let Some(h) = pick(&issued, i) {
                    let was_live = oracle.remove(keys[&h]).is_some();
                    let before = sut.len();
                    sut.erase(h);
                    prop_assert_eq!(sut.len(), before - usize::from(was_live));
                    order.retain(|&o| o != h);
                }
            }
            Op::Remove(i) => {
                if let Some(h) = pick(&issued, i) {
                    let expected = oracle.remove(keys[&h]);
                    prop_assert_eq!(sut.remove(h), expected);
                    order.retain(|&o| o != h);
                }
            }
            Op::Get(i) => {
                if let Some(h) = pick(&issued, i) {
                    match (sut.get(h), oracle.get(keys[&h])) {
                        (Ok(a), Some(b)) => {
                            prop_assert_eq!(a, b);
                        }
                        (Err(_), None) => {}
                        (a, b) => {
                            prop_assert!(false, "divergence for {:?}: {:?} vs {:?}", h, a, b);
                        }
                    }
                }
            }
            Op::Mutate(i, d) => {
                if let Some(h) = pick(&issued, i) {
                    if let (Ok(a), Some(b)) = (sut.get_mut(h), oracle.get_mut(keys[&h])) {
                        *a = a.wrapping_add(d);
                        *b = b.wrapping_add(d);
                    }
                }
            }
            Op::Retain(m) => {
                sut.retain(|_, v| v.rem_euclid(m) == 0);
                oracle.retain(|_, v| v.rem_euclid(m) == 0);
                order.retain(|&h| sut.contains(h));
            }
            Op::Clear => {
                sut.clear();
                oracle.clear();
                for &h in &issued {
                    prop_assert!(
                        matches!(sut.get(h), Err(InvalidHandle::OutOfBounds { .. })),
                        "handle survived clear"
                    );
                }
                // Ids restart after a clear, so earlier handles are retired.
                issued.clear();
                keys.clear();
                order.clear();
            }
            Op::Iterate => {
                let mut ours: Vec<i32> = sut.iter().copied().collect();
                let mut theirs: Vec<i32> = oracle.values().copied().collect();
                ours.sort_unstable();
                theirs.sort_unstable();
                prop_assert_eq!(ours, theirs);
            }
        }

        // Post-conditions after each op
        sut.check_invariants();
        prop_assert_eq!(sut.len(), oracle.len());
        prop_assert_eq!(sut.is_empty(), oracle.is_empty());
        for &h in &issued {
            prop_assert_eq!(sut.contains(h), oracle.contains_key(keys[&h]));
        }
        for (h, v) in sut.iter_with_handles() {
            prop_assert_eq!(Some(v), oracle.get(keys[&h]));
        }
        if P::PRESERVES_ORDER {
            let live: Vec<i32> = order.iter().map(|&h| sut[h]).collect();
            prop_assert_eq!(live.as_slice(), sut.as_slice());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_swap_pop_state_machine(ops in arb_ops()) {
        run::<SwapPop>(ops)?;
    }

    #[test]
    fn prop_ordered_state_machine(ops in arb_ops()) {
        run::<Ordered>(ops)?;
    }
}

// Property: the n-th value in dense order is always owned by a handle that
// resolves to it, for any interleaving of inserts and erasures.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_handles_point_back(steps in proptest::collection::vec(any::<bool>(), 1..200)) {
        let mut sut: SlotMap<usize> = SlotMap::new();
        let mut live: Vec<Handle> = Vec::new();
        for (n, insert) in steps.into_iter().enumerate() {
            if insert || live.is_empty() {
                live.push(sut.insert(n));
            } else {
                let h = live.swap_remove(n % live.len());
                sut.erase(h);
            }
            let handles: Vec<Handle> = sut.handles().collect();
            for (position, h) in handles.iter().enumerate() {
                prop_assert_eq!(&sut[*h], &sut.as_slice()[position]);
            }
        }
    }
}
