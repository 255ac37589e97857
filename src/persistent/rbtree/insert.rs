//! Pure insertion with Okasaki rebalancing.
//!
//! The new binding always enters as a red leaf. On the way back up, a black
//! node whose child and grandchild on the insertion path are both red is
//! rotated into a red node with two black children. Only nodes on the path
//! are rebuilt; every other subtree is shared with the input tree.

use compare::Compare;
use std::cmp::Ordering;

use super::node::{Color, Link, Node, split_red};
use crate::persistent::ReferenceCounter;

/// Inserts `key` bound to `value`, superseding any existing binding.
///
/// Returns the new root and `true` if the key was not present before.
pub(crate) fn insert<K, V, C>(
    root: &Link<K, V>,
    cmp: &C,
    key: K,
    value: V,
) -> (Link<K, V>, bool)
where
    K: Clone,
    V: Clone,
    C: Compare<K>,
{
    let (mut node, added) = insert_into(root.as_ref(), cmp, key, value);
    if node.is_red() {
        log::trace!("recoloring red root after insertion; black-height grows by one");
        node.color = Color::Black;
    }
    (node.into_link(), added)
}

fn insert_into<K, V, C>(
    link: Option<&ReferenceCounter<Node<K, V>>>,
    cmp: &C,
    key: K,
    value: V,
) -> (Node<K, V>, bool)
where
    K: Clone,
    V: Clone,
    C: Compare<K>,
{
    let Some(node) = link else {
        return (Node::red(None, key, value, None), true);
    };

    match cmp.compare(&key, &node.key) {
        Ordering::Less => {
            let (left, added) = insert_into(node.left.as_ref(), cmp, key, value);
            let balanced = balance_left(
                node.color,
                left,
                node.key.clone(),
                node.value.clone(),
                node.right.clone(),
            );
            (balanced, added)
        }
        Ordering::Greater => {
            let (right, added) = insert_into(node.right.as_ref(), cmp, key, value);
            let balanced = balance_right(
                node.color,
                node.left.clone(),
                node.key.clone(),
                node.value.clone(),
                right,
            );
            (balanced, added)
        }
        // Same position, same color, same children: only the binding changes.
        Ordering::Equal => (
            Node::new(node.color, node.left.clone(), key, value, node.right.clone()),
            false,
        ),
    }
}

/// Rebuilds a node whose left child was just rebuilt by an insertion.
fn balance_left<K, V>(
    color: Color,
    left: Node<K, V>,
    key: K,
    value: V,
    right: Link<K, V>,
) -> Node<K, V>
where
    K: Clone,
    V: Clone,
{
    if color == Color::Red || !left.is_red() {
        return Node::new(color, left.into_link(), key, value, right);
    }

    let Node {
        left: outer,
        key: left_key,
        value: left_value,
        right: inner,
        ..
    } = left;

    match split_red(outer) {
        // left-left
        Ok(outer) => Node::red(
            Node::black(outer.left, outer.key, outer.value, outer.right).into_link(),
            left_key,
            left_value,
            Node::black(inner, key, value, right).into_link(),
        ),
        Err(outer) => match split_red(inner) {
            // left-right
            Ok(inner) => Node::red(
                Node::black(outer, left_key, left_value, inner.left).into_link(),
                inner.key,
                inner.value,
                Node::black(inner.right, key, value, right).into_link(),
            ),
            Err(inner) => Node::new(
                color,
                Node::red(outer, left_key, left_value, inner).into_link(),
                key,
                value,
                right,
            ),
        },
    }
}

/// Rebuilds a node whose right child was just rebuilt by an insertion.
fn balance_right<K, V>(
    color: Color,
    left: Link<K, V>,
    key: K,
    value: V,
    right: Node<K, V>,
) -> Node<K, V>
where
    K: Clone,
    V: Clone,
{
    if color == Color::Red || !right.is_red() {
        return Node::new(color, left, key, value, right.into_link());
    }

    let Node {
        left: inner,
        key: right_key,
        value: right_value,
        right: outer,
        ..
    } = right;

    match split_red(outer) {
        // right-right
        Ok(outer) => Node::red(
            Node::black(left, key, value, inner).into_link(),
            right_key,
            right_value,
            Node::black(outer.left, outer.key, outer.value, outer.right).into_link(),
        ),
        Err(outer) => match split_red(inner) {
            // right-left
            Ok(inner) => Node::red(
                Node::black(left, key, value, inner.left).into_link(),
                inner.key,
                inner.value,
                Node::black(inner.right, right_key, right_value, outer).into_link(),
            ),
            Err(inner) => Node::new(
                color,
                left,
                key,
                value,
                Node::red(inner, right_key, right_value, outer).into_link(),
            ),
        },
    }
}
