//! Property-based tests for `PersistentTreeSet`.

use persistent_rbtree::persistent::PersistentTreeSet;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arbitrary_treeset(max_size: usize) -> impl Strategy<Value = PersistentTreeSet<i16>> {
    prop::collection::vec(-200_i16..200, 0..max_size)
        .prop_map(|elements| elements.into_iter().collect::<PersistentTreeSet<i16>>())
}

fn model(set: &PersistentTreeSet<i16>) -> BTreeSet<i16> {
    set.iter().copied().collect()
}

proptest! {
    /// Insert and remove keep the tree valid and match `BTreeSet`.
    #[test]
    fn prop_matches_btreeset(
        inserts in prop::collection::vec(-100_i16..100, 0..150),
        removes in prop::collection::vec(-100_i16..100, 0..150)
    ) {
        let mut set = PersistentTreeSet::new();
        let mut reference = BTreeSet::new();
        for element in inserts {
            set = set.insert(element);
            reference.insert(element);
        }
        for element in removes {
            set = set.remove(&element);
            reference.remove(&element);
            prop_assert!(set.validate().is_ok());
        }
        prop_assert_eq!(set.len(), reference.len());
        prop_assert!(set.iter().eq(reference.iter()));
    }

    /// Law: union is commutative.
    #[test]
    fn prop_union_commutative(left in arbitrary_treeset(50), right in arbitrary_treeset(50)) {
        prop_assert_eq!(left.union(&right), right.union(&left));
    }

    /// Law: intersection is a subset of both operands.
    #[test]
    fn prop_intersection_is_subset(
        left in arbitrary_treeset(50),
        right in arbitrary_treeset(50)
    ) {
        let intersection = left.intersection(&right);
        prop_assert!(intersection.is_subset(&left));
        prop_assert!(intersection.is_subset(&right));
        prop_assert!(intersection.validate().is_ok());
    }

    /// Law: the difference and the subtrahend are disjoint, and together with
    /// the intersection they rebuild the minuend.
    #[test]
    fn prop_difference_partitions_left(
        left in arbitrary_treeset(50),
        right in arbitrary_treeset(50)
    ) {
        let difference = left.difference(&right);
        prop_assert!(difference.is_disjoint(&right));
        prop_assert_eq!(difference.union(&left.intersection(&right)), left.clone());
        prop_assert_eq!(
            model(&difference),
            model(&left).difference(&model(&right)).copied().collect::<BTreeSet<_>>()
        );
    }

    /// Law: filter keeps exactly the matching elements.
    #[test]
    fn prop_filter_matches_model(set in arbitrary_treeset(80), divisor in 1_i16..7) {
        let filtered = set.filter(|element| element % divisor == 0);
        let expected: BTreeSet<i16> =
            model(&set).into_iter().filter(|element| element % divisor == 0).collect();
        prop_assert_eq!(model(&filtered), expected);
        prop_assert!(filtered.validate().is_ok());
    }
}
