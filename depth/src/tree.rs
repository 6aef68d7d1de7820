//! The aggregating price tree
//!
//! [`DepthTree`] maps a price to the running sum of every signed delta
//! applied at that price. Insert-or-accumulate is the only mutation; price
//! levels are never removed, even when their total returns to zero, so the
//! tree never rebalances downward.

use crate::node::{Node, Slots};
use common::{Px, Qty};
use std::mem;

/// Order-preserving map from price to accumulated quantity.
///
/// Backed by a B+tree of fixed-capacity nodes. The root starts as a single
/// leaf and gains height only when it splits; all leaves stay at the same
/// depth, and insertion cost is bounded by that height. The handle itself is
/// stable across height growth.
///
/// Dropping the tree releases nodes post-order through child ownership; the
/// sibling links are non-owning and never followed during teardown.
///
/// Not safe for concurrent mutation; wrap it or shard it per worker when
/// threads are involved.
pub struct DepthTree {
    root: Box<Node>,
    prices: usize,
}

// SAFETY: the tree exclusively owns every node it references; the sibling
// links only address nodes owned by the same tree, and there is no interior
// mutability.
unsafe impl Send for DepthTree {}
// SAFETY: shared references permit only reads; see above for aliasing.
unsafe impl Sync for DepthTree {}

impl DepthTree {
    /// Create an empty tree: a single leaf root with no occupied slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Box::new(Node::leaf()),
            prices: 0,
        }
    }

    /// Add `delta` to the total at `price`, inserting the price with a zero
    /// accumulator first when it is absent, and return the new total.
    ///
    /// Totals may reach zero or go negative; the level stays in the tree
    /// either way. Applying a zero delta to an existing price changes
    /// nothing.
    pub fn accumulate(&mut self, price: Px, delta: Qty) -> Qty {
        let applied = self.root.insert(price, delta);
        if applied.fresh {
            self.prices += 1;
        }
        if applied.overflow {
            self.grow();
        }
        applied.total
    }

    /// Root split: the old root keeps the lower half, the upper half moves to
    /// a fresh right sibling, and a new inner root adopts both under one
    /// separator key. This is the only operation that increases tree height.
    fn grow(&mut self) {
        let (sep, right) = self.root.split();
        let left = mem::replace(&mut self.root, Box::new(Node::inner()));
        let root = &mut *self.root;
        root.keys[0] = sep;
        root.len = 1;
        let Slots::Inner { children } = &mut root.slots else {
            unreachable!("grow installed an inner root")
        };
        children[0] = Some(left);
        children[1] = Some(right);
    }

    /// Number of distinct prices ever inserted.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.prices
    }

    /// True when no price has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.prices == 0
    }

    /// Levels between the root and the leaves, inclusive; an empty tree has
    /// height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut node = &*self.root;
        let mut height = 1;
        while let Slots::Inner { children } = &node.slots {
            node = children[0].as_deref().expect("inner node has a first child");
            height += 1;
        }
        height
    }

    /// Lowest price and its total, if any price was inserted.
    #[must_use]
    pub fn first(&self) -> Option<(Px, Qty)> {
        let leaf = self.leftmost();
        match &leaf.slots {
            Slots::Leaf { qtys } if leaf.len > 0 => Some((leaf.keys[0], qtys[0])),
            _ => None,
        }
    }

    /// Highest price and its total, if any price was inserted.
    #[must_use]
    pub fn last(&self) -> Option<(Px, Qty)> {
        let mut node = &*self.root;
        loop {
            match &node.slots {
                Slots::Leaf { qtys } => {
                    return (node.len > 0).then(|| (node.keys[node.len - 1], qtys[node.len - 1]));
                }
                Slots::Inner { children } => {
                    node = children[node.len]
                        .as_deref()
                        .expect("inner node has len + 1 children");
                }
            }
        }
    }

    /// Iterate every `(price, total)` pair in ascending price order by
    /// walking the leaf chain left to right.
    #[must_use]
    pub fn iter(&self) -> DepthIter<'_> {
        DepthIter {
            leaf: Some(self.leftmost()),
            slot: 0,
        }
    }

    fn leftmost(&self) -> &Node {
        let mut node = &*self.root;
        while let Slots::Inner { children } = &node.slots {
            node = children[0].as_deref().expect("inner node has a first child");
        }
        node
    }
}

impl Default for DepthTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DepthTree {
    type Item = (Px, Qty);
    type IntoIter = DepthIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over price levels; follows the non-owning leaf chain
/// instead of re-descending from the root.
pub struct DepthIter<'a> {
    leaf: Option<&'a Node>,
    slot: usize,
}

impl<'a> Iterator for DepthIter<'a> {
    type Item = (Px, Qty);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.leaf?;
            if self.slot < leaf.len {
                let Slots::Leaf { qtys } = &leaf.slots else {
                    unreachable!("the chain links leaves to leaves")
                };
                let item = (leaf.keys[self.slot], qtys[self.slot]);
                self.slot += 1;
                return Some(item);
            }
            // SAFETY: sibling pointers address nodes owned by this tree,
            // which stays immutably borrowed for 'a; the only writers are
            // splits, which cannot run during the borrow.
            self.leaf = leaf.next.map(|next| unsafe { &*next.as_ptr() });
            self.slot = 0;
        }
    }
}
