use std::iter;

use crate::buffer::GrowableBuffer;
use crate::error::SolveError;
use crate::problem::SetId;

/// The position of an element node in the shared node arena of a
/// [`Problem`](crate::Problem).
pub type NodeIndex = usize;

/// One occurrence of an element value inside one set.
///
/// `prev` and `next` are kept as they were when the node is unlinked, so an
/// unlinked node still remembers where it used to be. Whether it is live is
/// decided by its neighbours, see [`ElementList::is_live`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementNode {
    pub value: usize,
    pub set: SetId,
    pub prev: Option<NodeIndex>,
    pub next: Option<NodeIndex>,
}

/// Doubly linked list of the uncovered elements of one set, threaded through
/// the node arena.
#[derive(Clone, Debug, Default)]
pub struct ElementList {
    head: Option<NodeIndex>,
    // Only meaningful while the list is being built.
    last: Option<NodeIndex>,
    len: usize,
}

impl ElementList {
    pub fn new() -> ElementList {
        ElementList::default()
    }

    /// First live node, or `None` once every element has been covered.
    #[inline(always)]
    pub fn head(&self) -> Option<NodeIndex> {
        self.head
    }

    /// Number of live nodes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends a fresh node for `value` at the end of the list. Only valid
    /// before any node of this list has been unlinked.
    pub(crate) fn append(&mut self, nodes: &mut GrowableBuffer<ElementNode>, set: SetId, value: usize) -> NodeIndex {
        let pos = nodes.push(ElementNode { value, set, prev: self.last, next: None });
        match self.last {
            Some(last) => nodes[last].next = Some(pos),
            None => self.head = Some(pos),
        }
        self.last = Some(pos);
        self.len += 1;
        pos
    }

    /// A node is live iff its predecessor still points at it, or it has no
    /// predecessor and is the head.
    #[inline(always)]
    pub fn is_live(&self, nodes: &GrowableBuffer<ElementNode>, pos: NodeIndex) -> bool {
        match nodes[pos].prev {
            None => self.head == Some(pos),
            Some(prev) => nodes[prev].next == Some(pos),
        }
    }

    /// Disconnects the node at `pos` from its neighbours in constant time.
    ///
    /// Returns `Ok(false)` without touching anything if the node was already
    /// unlinked, so covering the same element twice is harmless.
    pub fn unlink(&mut self, nodes: &mut GrowableBuffer<ElementNode>, pos: NodeIndex) -> Result<bool, SolveError> {
        if !self.is_live(nodes, pos) {
            return Ok(false);
        }
        let ElementNode { set, prev, next, .. } = nodes[pos];
        let corrupt = |reason| SolveError::InternalInconsistency { set, node: pos, reason };
        if self.len == 0 {
            return Err(corrupt("live node in a list whose live count is zero"));
        }
        if let Some(next) = next {
            if nodes[next].prev != Some(pos) {
                return Err(corrupt("successor does not link back"));
            }
        }
        match (prev, next) {
            // last remaining node
            (None, None) => {
                if self.len != 1 {
                    return Err(corrupt("list ends while its live count is above one"));
                }
                self.head = None;
            }
            // head
            (None, Some(next)) => {
                self.head = Some(next);
                nodes[next].prev = None;
            }
            // tail
            (Some(prev), None) => nodes[prev].next = None,
            (Some(prev), Some(next)) => {
                nodes[prev].next = Some(next);
                nodes[next].prev = Some(prev);
            }
        }
        self.len -= 1;
        Ok(true)
    }

    /// Walks the live nodes from the head.
    pub fn iter<'a>(&self, nodes: &'a GrowableBuffer<ElementNode>) -> impl Iterator<Item = NodeIndex> + 'a {
        iter::successors(self.head, move |&pos| nodes[pos].next)
    }
}
