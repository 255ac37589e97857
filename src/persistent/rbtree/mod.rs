//! The red-black tree engine shared by the map and set facades.
//!
//! Everything here works on bare [`Link`]s and an injected comparator. The
//! facades own the root, the binding count and the comparator instance.

mod insert;
mod iter;
mod node;
mod remove;

pub(crate) use insert::insert;
pub(crate) use iter::{IntoIter, Iter};
pub(crate) use node::{Link, count, find, first, height, last, map_values, validate};
pub(crate) use remove::{remove, remove_first, remove_last};
