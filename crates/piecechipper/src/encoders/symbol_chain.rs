//! # Symbol Chain
//!
//! The working state of a single encode: a doubly linked list of symbols,
//! stored as an index-addressed arena over the normalized text.
//!
//! Merging never moves or removes a node; the right node of a merge
//! becomes a tombstone (an empty range), and is unlinked from the chain.
//! The head is always node `0`.

use crate::{alloc::vec::Vec, encoders::merge_queue::MergeCandidate, vocab::PrefixMatcher};

/// A symbol in a [`SymbolChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolNode {
    /// The previous live node.
    pub prev: Option<usize>,

    /// The next live node.
    pub next: Option<usize>,

    /// Is this a user-defined symbol, which never merges?
    pub no_merge: bool,

    /// The start byte offset in the text.
    pub start: usize,

    /// The end byte offset in the text.
    pub end: usize,
}

impl SymbolNode {
    /// The byte length of the symbol.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Has this node been merged away?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An index-addressed linked list of symbols over a text.
#[derive(Debug, Clone)]
pub struct SymbolChain<'a> {
    text: &'a str,
    nodes: Vec<SymbolNode>,
    live: usize,
}

impl<'a> SymbolChain<'a> {
    /// Split `text` into initial symbols.
    ///
    /// At each position, the longest user-defined symbol from `matcher` is
    /// taken as a `no_merge` symbol; otherwise a single `char`.
    pub fn segment(
        text: &'a str,
        matcher: &PrefixMatcher,
    ) -> Self {
        let mut nodes: Vec<SymbolNode> = Vec::with_capacity(text.len());

        let mut start = 0;
        while start < text.len() {
            let rest = &text[start..];
            let (len, no_merge) = match matcher.find_prefix_len(rest) {
                0 => (rest.chars().next().map_or(rest.len(), char::len_utf8), false),
                n => (n, true),
            };

            let idx = nodes.len();
            let end = start + len;
            nodes.push(SymbolNode {
                prev: idx.checked_sub(1),
                next: (end < text.len()).then_some(idx + 1),
                no_merge,
                start,
                end,
            });
            start = end;
        }

        let live = nodes.len();
        Self { text, nodes, live }
    }

    /// The text the chain is over.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The number of nodes, including tombstones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the chain empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of live symbols.
    pub fn live_len(&self) -> usize {
        self.live
    }

    /// Get the node at `idx`.
    pub fn node(
        &self,
        idx: usize,
    ) -> &SymbolNode {
        &self.nodes[idx]
    }

    /// The text of the node at `idx`.
    pub fn symbol(
        &self,
        idx: usize,
    ) -> &'a str {
        let node = &self.nodes[idx];
        &self.text[node.start..node.end]
    }

    /// The concatenated text of the adjacent live nodes `left` and `right`.
    ///
    /// Returns `None` if either node refuses to merge.
    pub fn pair_text(
        &self,
        left: usize,
        right: usize,
    ) -> Option<&'a str> {
        let (l, r) = (&self.nodes[left], &self.nodes[right]);
        if l.no_merge || r.no_merge {
            return None;
        }
        debug_assert_eq!(l.end, r.start);
        Some(&self.text[l.start..r.end])
    }

    /// Is `candidate` out of date?
    ///
    /// A candidate is stale once either side has been merged away,
    /// or either side has grown since the candidate was made.
    pub fn is_stale(
        &self,
        candidate: &MergeCandidate,
    ) -> bool {
        let (l, r) = (&self.nodes[candidate.left], &self.nodes[candidate.right]);
        l.is_empty() || r.is_empty() || l.len() + r.len() != candidate.merged_len
    }

    /// Merge the live node `right` into its predecessor `left`.
    ///
    /// ## Returns
    /// The ``(prev, next)`` neighbors of the merged node.
    pub fn merge(
        &mut self,
        left: usize,
        right: usize,
    ) -> (Option<usize>, Option<usize>) {
        let r = self.nodes[right];
        debug_assert_eq!(self.nodes[left].next, Some(right));

        let l = &mut self.nodes[left];
        l.end = r.end;
        l.next = r.next;
        let prev = l.prev;

        if let Some(next) = r.next {
            self.nodes[next].prev = Some(left);
        }

        self.nodes[right] = SymbolNode {
            prev: None,
            next: None,
            no_merge: r.no_merge,
            start: r.end,
            end: r.end,
        };
        self.live -= 1;

        (prev, r.next)
    }

    /// Iterate over the live symbol texts, in order.
    pub fn symbols(&self) -> impl Iterator<Item = &'a str> + '_ {
        let head = (!self.nodes.is_empty()).then_some(0);
        core::iter::successors(head, |&idx| self.nodes[idx].next).map(|idx| self.symbol(idx))
    }
}
