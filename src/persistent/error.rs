//! Diagnostic errors for the red-black tree engine.
//!
//! None of the map or set operations can fail. These types only surface from
//! [`PersistentTreeMap::validate`](super::PersistentTreeMap::validate) and
//! [`PersistentTreeSet::validate`](super::PersistentTreeSet::validate), which
//! audit a snapshot against the balance and ordering invariants.

use std::fmt;

/// A broken structural invariant found while validating a tree.
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::InvariantViolation;
///
/// let error = InvariantViolation::BlackHeightMismatch { left: 2, right: 3 };
/// assert_eq!(
///     format!("{error}"),
///     "black-height mismatch: left subtree has 2, right subtree has 3"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    RedRedViolation,
    /// Two sibling subtrees have different black-heights.
    BlackHeightMismatch {
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
    /// A key is not strictly between the bounds imposed by its ancestors.
    OrderViolation,
    /// The recorded number of bindings disagrees with the tree contents.
    LengthMismatch {
        /// The length stored alongside the root.
        recorded: usize,
        /// The number of nodes actually reachable from the root.
        actual: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root node is red"),
            Self::RedRedViolation => write!(formatter, "red node has a red child"),
            Self::BlackHeightMismatch { left, right } => write!(
                formatter,
                "black-height mismatch: left subtree has {left}, right subtree has {right}"
            ),
            Self::OrderViolation => write!(formatter, "keys are not in strictly ascending order"),
            Self::LengthMismatch { recorded, actual } => write!(
                formatter,
                "length mismatch: recorded {recorded}, found {actual} nodes"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InvariantViolation::RedRoot, "root node is red")]
    #[case(InvariantViolation::RedRedViolation, "red node has a red child")]
    #[case(
        InvariantViolation::OrderViolation,
        "keys are not in strictly ascending order"
    )]
    #[case(
        InvariantViolation::LengthMismatch { recorded: 4, actual: 3 },
        "length mismatch: recorded 4, found 3 nodes"
    )]
    fn test_display(#[case] error: InvariantViolation, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(InvariantViolation::BlackHeightMismatch { left: 1, right: 2 });
        assert!(error.source().is_none());
    }
}
