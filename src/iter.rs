//! Depth-first iterators over CHAMP tries.
//!
//! Inline entries of a node are yielded before its sub-nodes are visited.
//! The stack is bounded by [`MAX_DEPTH`](crate::node::MAX_DEPTH), so it
//! lives in an `ArrayVec` instead of the heap.

use arrayvec::ArrayVec;

use crate::node::{Entry, Link, MAX_DEPTH, Node, ReferenceCounter};

/// One level of the traversal: the node, the next entry to yield, the next
/// child to descend into.
struct Frame<N> {
    node: N,
    entry_cursor: usize,
    child_cursor: usize,
}

impl<N> Frame<N> {
    const fn new(node: N) -> Self {
        Self {
            node,
            entry_cursor: 0,
            child_cursor: 0,
        }
    }
}

/// Borrowing iterator over the entries of a trie, in no specified order.
pub struct Iter<'a, K, V> {
    stack: ArrayVec<Frame<&'a Node<K, V>>, MAX_DEPTH>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator over the subtree rooted at `root`, which holds
    /// `len` entries.
    pub(crate) fn new(root: &'a Node<K, V>, len: usize) -> Self {
        let mut stack = ArrayVec::new();
        stack.push(Frame::new(root));
        Self { stack, remaining: len }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.node;

            if let Some(entry) = node.entries().get(frame.entry_cursor) {
                frame.entry_cursor += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(entry);
            }

            let child = match node {
                Node::Bitmap(inner) => inner.nodes.get(frame.child_cursor),
                Node::Collision(_) => None,
            };
            if let Some(child) = child {
                frame.child_cursor += 1;
                self.stack.push(Frame::new(&**child));
                continue;
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self
                .stack
                .iter()
                .map(|frame| Frame {
                    node: frame.node,
                    entry_cursor: frame.entry_cursor,
                    child_cursor: frame.child_cursor,
                })
                .collect(),
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over the entries of a trie, in no specified order.
///
/// Holds links to the nodes it still has to visit, so it keeps the tree
/// alive independently of the collection it came from. Entries are cloned
/// out of the shared nodes.
pub struct IntoIter<K, V> {
    stack: ArrayVec<Frame<Link<K, V>>, MAX_DEPTH>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize) -> Self {
        let mut stack = ArrayVec::new();
        stack.push(Frame::new(root));
        Self { stack, remaining: len }
    }
}

impl<K: Clone, V: Clone> Iterator for IntoIter<K, V> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;

            if let Some(entry) = frame.node.entries().get(frame.entry_cursor) {
                frame.entry_cursor += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(entry.clone());
            }

            let child = match &*frame.node {
                Node::Bitmap(inner) => inner.nodes.get(frame.child_cursor).map(ReferenceCounter::clone),
                Node::Collision(_) => None,
            };
            if let Some(child) = child {
                frame.child_cursor += 1;
                self.stack.push(Frame::new(child));
                continue;
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for IntoIter<K, V> {}

/// Adapts an iterator over entries to `(&key, &value)` pairs.
#[derive(Clone)]
pub struct Pairs<I> {
    inner: I,
}

impl<I> Pairs<I> {
    pub(crate) const fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'a, K: 'a, V: 'a, I> Iterator for Pairs<I>
where
    I: Iterator<Item = &'a Entry<K, V>>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, I> ExactSizeIterator for Pairs<I> where I: ExactSizeIterator<Item = &'a Entry<K, V>> {}

/// Adapts an iterator over entries to keys; what sets iterate over.
#[derive(Clone)]
pub struct Keys<I> {
    inner: I,
}

impl<I> Keys<I> {
    pub(crate) const fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'a, K: 'a, V: 'a, I> Iterator for Keys<I>
where
    I: Iterator<Item = &'a Entry<K, V>>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, I> ExactSizeIterator for Keys<I> where I: ExactSizeIterator<Item = &'a Entry<K, V>> {}
