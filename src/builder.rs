//! The greedy merge loop of Huffman's algorithm.
//!
//! Both builders merge the two least probable trees until one is left. They
//! pick the same pairs in the same order: among trees of equal probability
//! the most recently created one counts as the lower. [`Strategy::Heap`]
//! does it with a binary heap in `O(n log n)`, [`ForestBuilder`] walks the
//! loop one merge at a time on a sorted [`Forest`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::forest::{Forest, Tree};
use crate::node::{write_tree, Arena, NodeId};
use crate::table::CodeTable;

/// Which builder [`CodeTable::build_with`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Priority queue keyed by probability and insertion order.
    #[default]
    Heap,
    /// Re-sort the whole forest before each merge.
    SortedForest,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    probability: f64,
    seq: usize,
    root: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry: make that the least probable
        // one, and among equals the latest inserted.
        other
            .probability
            .total_cmp(&self.probability)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Entry {}

pub(crate) fn build_with_heap(alphabet: &Alphabet) -> Result<CodeTable> {
    let mut arena = Arena::with_leaves(alphabet);
    let mut heap = BinaryHeap::with_capacity(alphabet.len());
    for (seq, symbol) in alphabet.iter().enumerate() {
        heap.push(Entry {
            probability: symbol.probability,
            seq,
            root: seq,
        });
    }
    let mut seq = alphabet.len();
    while let Some(second) = heap.pop() {
        let first = match heap.pop() {
            Some(first) => first,
            None => return Ok(CodeTable::new(arena.into_nodes(), second.root)),
        };
        let root = arena.merge(first.root, second.root);
        heap.push(Entry {
            probability: arena.get(root).probability(),
            seq,
            root,
        });
        seq += 1;
    }
    Err(Error::EmptyAlphabet)
}

/// Huffman's loop over an explicit [`Forest`], one merge per
/// [`step`](Self::step).
///
/// # Examples
///
/// ```
/// use huffman_table::{Alphabet, ForestBuilder};
///
/// let alphabet = Alphabet::new(vec![("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap();
/// let mut builder = ForestBuilder::new(&alphabet);
/// assert_eq!(builder.forest().size(), 3);
/// while builder.step() {}
/// assert_eq!(builder.forest().size(), 1);
///
/// let table = builder.into_table().unwrap();
/// assert_eq!(table.code_for("a").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ForestBuilder {
    arena: Arena,
    forest: Forest,
}

impl ForestBuilder {
    /// Starts with one single-leaf tree per symbol, in alphabet order.
    pub fn new(alphabet: &Alphabet) -> Self {
        let arena = Arena::with_leaves(alphabet);
        let mut forest = Forest::new();
        for root in 0..arena.len() {
            forest.append(Tree::new(root, arena.get(root).probability()));
        }
        ForestBuilder { arena, forest }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn is_done(&self) -> bool {
        self.forest.size() <= 1
    }

    /// Sorts the forest and merges its two least probable trees. Returns
    /// `false`, doing nothing, once a single tree is left.
    pub fn step(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.forest.sort_descending();
        let (first, second) = match self.forest.last_pair() {
            Some(pair) => pair,
            None => return false,
        };
        let root = self.arena.merge(first.root(), second.root());
        self.forest.remove(second.root());
        self.forest.remove(first.root());
        self.forest
            .append(Tree::new(root, self.arena.get(root).probability()));
        true
    }

    /// Runs the loop to the end.
    pub fn finish(mut self) -> Result<CodeTable> {
        while self.step() {}
        self.into_table()
    }

    /// The finished table.
    ///
    /// # Errors
    ///
    /// [`Error::IncompleteForest`] while more than one tree is left.
    pub fn into_table(self) -> Result<CodeTable> {
        match self.forest.size() {
            0 => Err(Error::EmptyAlphabet),
            1 => {
                let root = self.forest.first().map(Tree::root).unwrap_or_default();
                Ok(CodeTable::new(self.arena.into_nodes(), root))
            }
            n => Err(Error::IncompleteForest(n)),
        }
    }
}

/// Renders every tree of the forest, in forest order, separated by spaces.
impl fmt::Display for ForestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tree) in self.forest.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write_tree(f, self.arena.nodes(), tree.root())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn example() -> Alphabet {
        Alphabet::new(vec![
            ("a1", 0.15),
            ("a2", 0.04),
            ("a3", 0.26),
            ("a4", 0.05),
            ("a5", 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn step() {
        let mut builder = ForestBuilder::new(&example());
        assert!(!builder.is_done());
        for size in (1..5).rev() {
            assert!(builder.step());
            assert_eq!(builder.forest().size(), size);
        }
        assert!(builder.is_done());
        assert!(!builder.step());
        assert_eq!(builder.forest().first().map(|t| t.root()), Some(8));
    }

    #[test]
    fn merge_order() {
        let mut builder = ForestBuilder::new(&example());
        builder.step();
        // a4 and a2 are merged first; the new tree goes to the back.
        let last = *builder.forest().last().unwrap();
        assert_eq!(last.root(), 5);
        assert!((last.probability() - 0.09).abs() < 1e-12);
        assert_eq!(builder.forest().size(), 4);
    }

    #[test]
    fn into_table() {
        let mut builder = ForestBuilder::new(&example());
        builder.step();
        assert_eq!(
            builder.clone().into_table().unwrap_err(),
            Error::IncompleteForest(4)
        );
        assert!(builder.finish().is_ok());
    }

    #[test]
    fn display() {
        let alphabet = Alphabet::new(vec![("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap();
        let mut builder = ForestBuilder::new(&alphabet);
        assert_eq!(
            builder.to_string(),
            "{('a', 0.5, -)} {('b', 0.3, -)} {('c', 0.2, -)}"
        );
        builder.step();
        assert_eq!(
            builder.to_string(),
            "{('a', 0.5, -)} {{('b', 0.3, 1)}<-('bc', 0.5, -)->{('c', 0.2, 0)}}"
        );
        builder.step();
        assert_eq!(
            builder.to_string(),
            builder.clone().into_table().unwrap().to_string()
        );
    }

    #[test]
    fn heap_matches_forest() {
        let heap = CodeTable::build_with(&example(), Strategy::Heap).unwrap();
        let forest = CodeTable::build_with(&example(), Strategy::SortedForest).unwrap();
        assert_eq!(heap.codes(), forest.codes());
        assert_eq!(heap.to_string(), forest.to_string());
    }

    #[test]
    fn ties() {
        // Equal probabilities: the latest tree is the lower one.
        let alphabet = Alphabet::new(vec![("a", 0.25), ("b", 0.25), ("c", 0.25), ("d", 0.25)])
            .unwrap();
        for strategy in [Strategy::Heap, Strategy::SortedForest] {
            let table = CodeTable::build_with(&alphabet, strategy).unwrap();
            assert_eq!(table.root().key(), "cdab");
        }
    }
}
