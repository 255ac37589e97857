//! # persistent-rbtree
//!
//! Persistent (immutable, structurally shared) ordered maps and sets built on
//! a red-black tree.
//!
//! Every update returns a new collection and leaves the original untouched.
//! The two versions share every subtree the update did not touch, so an
//! insertion or removal allocates only the O(log N) nodes on its search path.
//!
//! ## Collections
//!
//! - [`PersistentTreeMap`](persistent::PersistentTreeMap): ordered key-value map
//! - [`PersistentTreeSet`](persistent::PersistentTreeSet): ordered set
//!
//! Both are generic over a comparator from the [`compare`] crate, defaulting
//! to the key type's natural order.
//!
//! ## Feature Flags
//!
//! - `arc`: share tree nodes through `Arc` instead of `Rc`, making every
//!   collection `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` implementations
//!
//! ## Quick Start
//!
//! ```rust
//! use persistent_rbtree::prelude::*;
//!
//! let map = PersistentTreeMap::new()
//!     .insert(5, "five")
//!     .insert(3, "three")
//!     .insert(8, "eight");
//!
//! let without_three = map.remove(&3);
//! assert_eq!(map.get(&3), Some(&"three"));
//! assert_eq!(without_three.get(&3), None);
//!
//! let reversed = PersistentTreeSet::with_comparator(natural::<i32>().rev())
//!     .insert(1)
//!     .insert(2);
//! assert_eq!(reversed.first(), Some(&2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the collections, their iterators, and the comparator
/// vocabulary from [`compare`].
///
/// # Usage
///
/// ```rust
/// use persistent_rbtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
    pub use compare::{Compare, Natural, natural};
}

pub mod persistent;
