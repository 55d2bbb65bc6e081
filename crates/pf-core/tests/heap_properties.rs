use pf_core::BinaryHeap;
use proptest::prelude::*;

proptest! {
    /// Popping a heap loaded with any sequence of values always yields them
    /// in non-decreasing order.
    #[test]
    fn pop_order_is_sorted(values in prop::collection::vec(any::<i32>(), 0..256)) {
        let mut heap = BinaryHeap::new();
        for v in &values {
            heap.add(*v);
        }
        let mut out = Vec::with_capacity(values.len());
        while !heap.empty() {
            out.push(heap.pop().unwrap());
        }
        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(out, expected);
    }

    /// `count` always matches the number of successful `add`s minus
    /// successful `pop`s.
    #[test]
    fn count_matches_pushes_and_pops(values in prop::collection::vec(any::<i32>(), 0..128)) {
        let mut heap = BinaryHeap::new();
        let mut expected = 0usize;
        for v in values {
            heap.add(v);
            expected += 1;
            prop_assert_eq!(heap.count(), expected);
        }
        while expected > 0 {
            heap.pop().unwrap();
            expected -= 1;
            prop_assert_eq!(heap.count(), expected);
        }
        prop_assert!(heap.empty());
    }

    /// `peek` never removes an element, and always agrees with the next `pop`.
    #[test]
    fn peek_is_idempotent_and_matches_pop(values in prop::collection::vec(any::<i32>(), 1..64)) {
        let mut heap = BinaryHeap::new();
        for v in values {
            heap.add(v);
        }
        let seen = *heap.peek().unwrap();
        let seen_again = *heap.peek().unwrap();
        prop_assert_eq!(seen, seen_again);
        prop_assert_eq!(heap.pop().unwrap(), seen);
    }
}
