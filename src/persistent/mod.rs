//! Persistent (immutable) ordered collections.
//!
//! - [`PersistentTreeMap`]: ordered map on a red-black tree
//! - [`PersistentTreeSet`]: ordered set sharing the same tree engine
//!
//! # Structural Sharing
//!
//! Updates never modify a node that an existing collection can reach. They
//! rebuild the nodes on the search path and point the rebuilt nodes at the
//! untouched subtrees of the original, so old and new versions coexist
//! cheaply.
//!
//! ## `PersistentTreeMap`
//!
//! ```rust
//! use persistent_rbtree::persistent::PersistentTreeMap;
//!
//! let map = PersistentTreeMap::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! let updated = map.insert(1, "ONE");
//! assert_eq!(map.get(&1), Some(&"one"));     // Original unchanged
//! assert_eq!(updated.get(&1), Some(&"ONE")); // New version
//! ```
//!
//! ## `PersistentTreeSet`
//!
//! ```rust
//! use persistent_rbtree::persistent::PersistentTreeSet;
//!
//! let set: PersistentTreeSet<i32> = (1..=5).collect();
//! let evens = set.filter(|element| element % 2 == 0);
//! assert_eq!(evens.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
//! assert_eq!(set.len(), 5);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod rbtree;
mod treemap;
mod treeset;

pub use error::InvariantViolation;
pub use treemap::PersistentTreeMap;
pub use treemap::PersistentTreeMapIntoIterator;
pub use treemap::PersistentTreeMapIterator;
pub use treeset::PersistentTreeSet;
pub use treeset::PersistentTreeSetIntoIterator;
pub use treeset::PersistentTreeSetIterator;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentTreeMap<i32, String>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentTreeSet<String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentTreeMap<i32, String>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentTreeSet<String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_unwrap_or_clone_moves_unique_value() {
        let unique: ReferenceCounter<String> = ReferenceCounter::new("node".to_string());
        assert_eq!(ReferenceCounter::unwrap_or_clone(unique), "node");
    }

    #[rstest]
    fn test_unwrap_or_clone_copies_shared_value() {
        let shared: ReferenceCounter<String> = ReferenceCounter::new("node".to_string());
        let other = ReferenceCounter::clone(&shared);
        assert_eq!(ReferenceCounter::unwrap_or_clone(shared), "node");
        assert_eq!(ReferenceCounter::strong_count(&other), 1);
    }
}
