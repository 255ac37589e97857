//! Pure deletion.
//!
//! A node with two children trades places with its in-order successor, so
//! every removal unlinks a node with at most one child. Unlinking a black
//! leaf leaves its path one black node short; that deficiency travels back up
//! as [`Removal::Deficient`] and is resolved by inspecting the sibling:
//!
//! | sibling | sibling children      | action                                   |
//! |---------|-----------------------|------------------------------------------|
//! | red     | (both black)          | rotate so the sibling becomes black      |
//! | black   | far child red         | single rotation, resolved                |
//! | black   | near child red        | double rotation, resolved                |
//! | black   | both black            | recolor sibling red, push deficiency up  |
//!
//! A deficiency that survives to the root shortens every path equally and is
//! simply dropped.

use compare::Compare;
use std::cmp::Ordering;

use super::node::{Color, Link, Node, blacken, split_red, unshare};

/// Outcome of removing a binding from a subtree.
///
/// Never stored in a node: the parent frame consumes it immediately.
pub(crate) enum Removal<K, V> {
    /// The subtree kept its black-height.
    Balanced(Link<K, V>),
    /// The subtree lost one unit of black-height.
    Deficient(Link<K, V>),
}

use Removal::{Balanced, Deficient};

// =============================================================================
// Entry Points
// =============================================================================

/// Removes the binding for `key`.
///
/// Returns `None` when the key is absent, so callers can keep the original
/// root instead of a rebuilt copy.
pub(crate) fn remove<K, V, C, Q>(root: &Link<K, V>, cmp: &C, key: &Q) -> Option<Link<K, V>>
where
    K: Clone,
    V: Clone,
    C: Compare<Q, K>,
    Q: ?Sized,
{
    remove_from(root, cmp, key).map(finish)
}

/// Removes the smallest binding, returning the new root and that binding.
pub(crate) fn remove_first<K, V>(root: &Link<K, V>) -> Option<(Link<K, V>, K, V)>
where
    K: Clone,
    V: Clone,
{
    root.as_deref().map(|node| {
        let (removal, key, value) = remove_first_of(node);
        (finish(removal), key, value)
    })
}

/// Removes the largest binding, returning the new root and that binding.
pub(crate) fn remove_last<K, V>(root: &Link<K, V>) -> Option<(Link<K, V>, K, V)>
where
    K: Clone,
    V: Clone,
{
    root.as_deref().map(|node| {
        let (removal, key, value) = remove_last_of(node);
        (finish(removal), key, value)
    })
}

fn finish<K: Clone, V: Clone>(removal: Removal<K, V>) -> Link<K, V> {
    match removal {
        Balanced(root) => blacken(root),
        Deficient(root) => {
            log::trace!("deficiency reached the root; black-height shrinks by one");
            blacken(root)
        }
    }
}

// =============================================================================
// Descent
// =============================================================================

fn remove_from<K, V, C, Q>(link: &Link<K, V>, cmp: &C, key: &Q) -> Option<Removal<K, V>>
where
    K: Clone,
    V: Clone,
    C: Compare<Q, K>,
    Q: ?Sized,
{
    let node = link.as_deref()?;
    match cmp.compare(key, &node.key) {
        Ordering::Less => {
            let left = remove_from(&node.left, cmp, key)?;
            Some(rebuild_left(
                node.color,
                left,
                node.key.clone(),
                node.value.clone(),
                node.right.clone(),
            ))
        }
        Ordering::Greater => {
            let right = remove_from(&node.right, cmp, key)?;
            Some(rebuild_right(
                node.color,
                node.left.clone(),
                node.key.clone(),
                node.value.clone(),
                right,
            ))
        }
        Ordering::Equal => Some(remove_node(node)),
    }
}

/// Removes `node` itself from its subtree.
fn remove_node<K: Clone, V: Clone>(node: &Node<K, V>) -> Removal<K, V> {
    match (&node.left, node.right.as_deref()) {
        (Some(_), Some(right)) => {
            let (right, key, value) = remove_first_of(right);
            rebuild_right(node.color, node.left.clone(), key, value, right)
        }
        (left, None) => unlink(node.color, left.clone()),
        (None, Some(_)) => unlink(node.color, node.right.clone()),
    }
}

fn remove_first_of<K: Clone, V: Clone>(node: &Node<K, V>) -> (Removal<K, V>, K, V) {
    match node.left.as_deref() {
        None => (
            unlink(node.color, node.right.clone()),
            node.key.clone(),
            node.value.clone(),
        ),
        Some(left) => {
            let (left, key, value) = remove_first_of(left);
            let rebuilt = rebuild_left(
                node.color,
                left,
                node.key.clone(),
                node.value.clone(),
                node.right.clone(),
            );
            (rebuilt, key, value)
        }
    }
}

fn remove_last_of<K: Clone, V: Clone>(node: &Node<K, V>) -> (Removal<K, V>, K, V) {
    match node.right.as_deref() {
        None => (
            unlink(node.color, node.left.clone()),
            node.key.clone(),
            node.value.clone(),
        ),
        Some(right) => {
            let (right, key, value) = remove_last_of(right);
            let rebuilt = rebuild_right(
                node.color,
                node.left.clone(),
                node.key.clone(),
                node.value.clone(),
                right,
            );
            (rebuilt, key, value)
        }
    }
}

/// Replaces a node that has at most one child by that child.
///
/// In a balanced tree a lone child is always a red leaf under a black node,
/// so painting it black restores the path. A red leaf disappears for free;
/// a black leaf leaves a deficiency.
fn unlink<K: Clone, V: Clone>(color: Color, child: Link<K, V>) -> Removal<K, V> {
    match (color, child) {
        (_, Some(child)) => Balanced(blacken(Some(child))),
        (Color::Red, None) => Balanced(None),
        (Color::Black, None) => Deficient(None),
    }
}

// =============================================================================
// Unwinding
// =============================================================================

fn rebuild_left<K: Clone, V: Clone>(
    color: Color,
    left: Removal<K, V>,
    key: K,
    value: V,
    right: Link<K, V>,
) -> Removal<K, V> {
    match left {
        Balanced(left) => Balanced(Node::new(color, left, key, value, right).into_link()),
        Deficient(left) => fix_left(color, left, key, value, right),
    }
}

fn rebuild_right<K: Clone, V: Clone>(
    color: Color,
    left: Link<K, V>,
    key: K,
    value: V,
    right: Removal<K, V>,
) -> Removal<K, V> {
    match right {
        Balanced(right) => Balanced(Node::new(color, left, key, value, right).into_link()),
        Deficient(right) => fix_right(color, left, key, value, right),
    }
}

/// Resolves a deficiency in the left subtree of a node.
fn fix_left<K: Clone, V: Clone>(
    color: Color,
    left: Link<K, V>,
    key: K,
    value: V,
    sibling: Link<K, V>,
) -> Removal<K, V> {
    // The sibling of a deficient subtree carries at least one black node.
    let Some(sibling) = sibling else {
        return Deficient(Node::new(color, left, key, value, None).into_link());
    };
    let Node {
        color: sibling_color,
        left: near,
        key: sibling_key,
        value: sibling_value,
        right: far,
    } = unshare(sibling);

    if sibling_color == Color::Red {
        // Rotate left; the near nephew becomes the new, black sibling.
        return match fix_left(Color::Red, left, key, value, near) {
            Balanced(inner) => {
                Balanced(Node::black(inner, sibling_key, sibling_value, far).into_link())
            }
            Deficient(inner) => fix_left(Color::Black, inner, sibling_key, sibling_value, far),
        };
    }

    match split_red(far) {
        Ok(far) => Balanced(
            Node::new(
                color,
                Node::black(left, key, value, near).into_link(),
                sibling_key,
                sibling_value,
                Node::black(far.left, far.key, far.value, far.right).into_link(),
            )
            .into_link(),
        ),
        Err(far) => match split_red(near) {
            Ok(near) => Balanced(
                Node::new(
                    color,
                    Node::black(left, key, value, near.left).into_link(),
                    near.key,
                    near.value,
                    Node::black(near.right, sibling_key, sibling_value, far).into_link(),
                )
                .into_link(),
            ),
            Err(near) => {
                let sibling = Node::red(near, sibling_key, sibling_value, far).into_link();
                let node = Node::black(left, key, value, sibling).into_link();
                if color == Color::Red {
                    Balanced(node)
                } else {
                    Deficient(node)
                }
            }
        },
    }
}

/// Resolves a deficiency in the right subtree of a node.
fn fix_right<K: Clone, V: Clone>(
    color: Color,
    sibling: Link<K, V>,
    key: K,
    value: V,
    right: Link<K, V>,
) -> Removal<K, V> {
    let Some(sibling) = sibling else {
        return Deficient(Node::new(color, None, key, value, right).into_link());
    };
    let Node {
        color: sibling_color,
        left: far,
        key: sibling_key,
        value: sibling_value,
        right: near,
    } = unshare(sibling);

    if sibling_color == Color::Red {
        return match fix_right(Color::Red, near, key, value, right) {
            Balanced(inner) => {
                Balanced(Node::black(far, sibling_key, sibling_value, inner).into_link())
            }
            Deficient(inner) => fix_right(Color::Black, far, sibling_key, sibling_value, inner),
        };
    }

    match split_red(far) {
        Ok(far) => Balanced(
            Node::new(
                color,
                Node::black(far.left, far.key, far.value, far.right).into_link(),
                sibling_key,
                sibling_value,
                Node::black(near, key, value, right).into_link(),
            )
            .into_link(),
        ),
        Err(far) => match split_red(near) {
            Ok(near) => Balanced(
                Node::new(
                    color,
                    Node::black(far, sibling_key, sibling_value, near.left).into_link(),
                    near.key,
                    near.value,
                    Node::black(near.right, key, value, right).into_link(),
                )
                .into_link(),
            ),
            Err(near) => {
                let sibling = Node::red(far, sibling_key, sibling_value, near).into_link();
                let node = Node::black(sibling, key, value, right).into_link();
                if color == Color::Red {
                    Balanced(node)
                } else {
                    Deficient(node)
                }
            }
        },
    }
}
