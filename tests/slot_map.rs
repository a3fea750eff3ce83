// SlotMap unit test suite (public API).
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Round-trip: a fresh handle resolves to the value it was issued for.
// - Generational invalidation: erased handles (and wrappers) fail forever,
//   even after their id is reused.
// - Non-interference: erasing one value never changes what other handles
//   resolve to.
// - Dense packing: iteration yields exactly the live values.
// - Ownership: every value is dropped exactly once (erase, clear, or drop of
//   the map) unless moved out through `remove`.
use dense_slotmap::{
    DenseSlotMap, ErasePolicy, Handle, InvalidHandle, Ordered, OrderedSlotMap, SlotMap, SwapPop,
};
use std::cell::Cell;
use std::rc::Rc;

// Test: the two-string scenario.
// Verifies: iteration order before/after erase, lookup of the survivor, and
// failure of the erased handle directly and through a wrapper.
#[test]
fn hello_bye_scenario() {
    let mut m: SlotMap<&str> = SlotMap::new();
    let h1 = m.insert("Hello!");
    let h2 = m.insert("Buh-bye!");
    assert_eq!(m.iter().copied().collect::<Vec<_>>(), ["Hello!", "Buh-bye!"]);

    m.erase(h1);
    assert_eq!(m.iter().copied().collect::<Vec<_>>(), ["Buh-bye!"]);
    assert_eq!(m[h2], "Buh-bye!");
    assert!(m.get(h1).is_err());
    assert!(m.as_wrap(h1).get().is_err());
}

// Test: identifier reuse safety.
// Verifies: the fourth insert reuses h2's id with a new generation; the old
// h2 stays invalid while the new handle works.
#[test]
fn reused_identifier_scenario() {
    fn check<P: ErasePolicy>() {
        let mut m: SlotMap<u32, P> = SlotMap::new();
        let _h1 = m.insert(1);
        let h2 = m.insert(2);
        let _h3 = m.insert(3);
        m.erase(h2);
        let h4 = m.insert(4);

        assert_eq!(h4.id(), h2.id());
        assert_ne!(h4.generation(), h2.generation());
        let old_copy = h2;
        assert!(matches!(m.get(old_copy), Err(InvalidHandle::Stale { .. })));
        assert_eq!(m.get(h4), Ok(&4));
    }
    check::<SwapPop>();
    check::<Ordered>();
}

// Test: non-interference.
// Verifies: after erasing every other value, all surviving handles resolve to
// their original values under both policies.
#[test]
fn erasing_leaves_other_handles_alone() {
    fn check<P: ErasePolicy>() {
        let mut m: SlotMap<String, P> = SlotMap::with_capacity(32);
        let hs: Vec<(Handle, String)> = (0..32)
            .map(|i| {
                let v = format!("v{i}");
                (m.insert(v.clone()), v)
            })
            .collect();
        for (h, _) in hs.iter().step_by(2) {
            m.erase(*h);
        }
        assert_eq!(m.len(), 16);
        for (i, (h, v)) in hs.iter().enumerate() {
            if i % 2 == 0 {
                assert!(!m.contains(*h));
            } else {
                assert_eq!(&m[*h], v);
            }
        }
    }
    check::<SwapPop>();
    check::<Ordered>();
}

// Test: idempotent erase.
// Verifies: erasing twice drops the value once and leaves the rest intact.
#[test]
fn double_erase_drops_once() {
    let drops = Rc::new(Cell::new(0));
    struct Counted(Rc<Cell<usize>>);
    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let mut m: DenseSlotMap<Counted> = SlotMap::new();
    let h = m.insert(Counted(drops.clone()));
    let _keep = m.insert(Counted(drops.clone()));
    m.erase(h);
    m.erase(h);
    assert_eq!(drops.get(), 1);
    assert_eq!(m.len(), 1);

    // remove hands the value to the caller instead of dropping it
    let k = m.insert(Counted(drops.clone()));
    let taken = m.remove(k).expect("live handle");
    assert_eq!(drops.get(), 1);
    drop(taken);
    assert_eq!(drops.get(), 2);

    drop(m);
    assert_eq!(drops.get(), 3);
}

// Test: reverse and owned iteration.
// Verifies: `.rev()` mirrors forward iteration; consuming iteration yields
// the dense order.
#[test]
fn reverse_and_owned_iteration() {
    let mut m: OrderedSlotMap<i32> = SlotMap::new();
    let hs: Vec<_> = (1..=5).map(|i| m.insert(i)).collect();
    m.erase(hs[2]);
    assert_eq!(m.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 2, 1]);
    for v in &mut m {
        *v *= 10;
    }
    let mut sum = 0;
    for v in &m {
        sum += *v;
    }
    assert_eq!(sum, 120);
    assert_eq!(m.into_iter().collect::<Vec<_>>(), [10, 20, 40, 50]);
}

// Test: handle-yielding iteration.
// Verifies: each pair resolves through the map; handles() matches it.
#[test]
fn entries_resolve_through_map() {
    let mut m: SlotMap<char> = SlotMap::new();
    let a = m.insert('a');
    m.insert('b');
    m.insert('c');
    m.erase(a);
    let pairs: Vec<_> = m.iter_with_handles().map(|(h, c)| (h, *c)).collect();
    for (h, c) in &pairs {
        assert_eq!(m[*h], *c);
    }
    let handles: Vec<_> = m.handles().collect();
    assert_eq!(handles, pairs.iter().map(|(h, _)| *h).collect::<Vec<_>>());
    assert!(!handles.contains(&a));
}

// Test: clear.
// Verifies: every issued handle is out of bounds afterwards and the map is
// reusable from a clean id space.
#[test]
fn clear_resets_id_space() {
    let mut m: SlotMap<u8> = SlotMap::new();
    let hs: Vec<_> = (0..4).map(|i| m.insert(i)).collect();
    m.erase(hs[1]);
    m.clear();
    for h in &hs {
        assert_eq!(
            m.get(*h),
            Err(InvalidHandle::OutOfBounds { id: h.id(), len: 0 })
        );
    }
    let fresh = m.insert(9);
    assert_eq!(fresh.id(), 0);
    // The id space restarts, so a pre-clear handle can collide with a new one.
    assert_eq!(fresh, hs[0]);
    assert_eq!(m[fresh], 9);
}

// Test: Index panics on a stale handle, carrying the error message.
#[test]
#[should_panic(expected = "out of bounds")]
fn index_out_of_bounds_panics() {
    let mut m: SlotMap<u8> = SlotMap::new();
    let h = m.insert(1);
    m.clear();
    let _ = m[h];
}

// Test: the policy constant documents the iteration-order guarantee.
#[test]
fn policy_order_flags() {
    assert!(!<SwapPop as ErasePolicy>::PRESERVES_ORDER);
    assert!(<Ordered as ErasePolicy>::PRESERVES_ORDER);
}
