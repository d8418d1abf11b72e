//! The finished code tree and the lookups it answers.

use std::collections::HashMap;
use std::fmt;

use bitvec::prelude::*;

use crate::alphabet::Alphabet;
use crate::builder::{self, ForestBuilder, Strategy};
use crate::error::{Error, Result};
use crate::node::{write_tree, Node, NodeId};
use crate::{Codebook, Encoded};

/// A complete Huffman tree, read-only once built.
#[derive(Debug, Clone)]
pub struct CodeTable {
    nodes: Vec<Node>,
    root: NodeId,
    leaves: HashMap<String, NodeId>,
}

impl CodeTable {
    pub(crate) fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        let leaves = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(id, node)| (node.key().to_string(), id))
            .collect();
        log::info!(
            "code table complete: {} symbols, {} nodes",
            (nodes.len() + 1) / 2,
            nodes.len()
        );
        CodeTable {
            nodes,
            root,
            leaves,
        }
    }

    /// Builds the table for `alphabet` with the heap builder.
    pub fn build(alphabet: &Alphabet) -> Result<Self> {
        Self::build_with(alphabet, Strategy::default())
    }

    pub fn build_with(alphabet: &Alphabet, strategy: Strategy) -> Result<Self> {
        match strategy {
            Strategy::Heap => builder::build_with_heap(alphabet),
            Strategy::SortedForest => ForestBuilder::new(alphabet).finish(),
        }
    }

    /// The code of `symbol`, read from the root down to its leaf.
    ///
    /// The walk starts at the root and descends into whichever child holds
    /// the symbol's leaf, collecting the branch bits on the way. The only
    /// symbol of a one-symbol alphabet has the empty code.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitvec::prelude::*;
    /// use huffman_table::{Alphabet, CodeTable, Error};
    ///
    /// let alphabet = Alphabet::new(vec![("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap();
    /// let table = CodeTable::build(&alphabet).unwrap();
    /// assert_eq!(table.code_for("a").unwrap(), bitvec![0]);
    /// assert_eq!(table.code_for("b").unwrap(), bitvec![1, 1]);
    /// assert_eq!(table.code_for("c").unwrap(), bitvec![1, 0]);
    /// assert_eq!(
    ///     table.code_for("d"),
    ///     Err(Error::SymbolNotFound("d".to_string()))
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::SymbolNotFound`] if `symbol` is not in the table.
    pub fn code_for(&self, symbol: &str) -> Result<Encoded> {
        let not_found = || Error::SymbolNotFound(symbol.to_string());
        let leaf = *self.leaves.get(symbol).ok_or_else(not_found)?;
        let mut code = Encoded::new();
        let mut at = self.root;
        loop {
            let node = &self.nodes[at];
            if let Some(bit) = node.code() {
                code.push(bit);
            }
            if at == leaf {
                log::trace!("code for {:?}: {} bits", symbol, code.len());
                return Ok(code);
            }
            at = match node.children() {
                Some([first, _]) if self.nodes[first].contains(leaf) => first,
                Some([_, second]) if self.nodes[second].contains(leaf) => second,
                _ => return Err(not_found()),
            };
        }
    }

    /// The codes of all symbols.
    pub fn codes(&self) -> Codebook {
        let mut codes = Codebook::with_capacity(self.leaves.len());
        let mut stack = vec![(self.root, Encoded::new())];
        while let Some((id, mut prefix)) = stack.pop() {
            let node = &self.nodes[id];
            if let Some(bit) = node.code() {
                prefix.push(bit);
            }
            match node.children() {
                None => {
                    codes.insert(node.key().to_string(), prefix);
                }
                Some([first, second]) => {
                    stack.push((second, prefix.clone()));
                    stack.push((first, prefix));
                }
            }
        }
        codes
    }

    /// The symbol whose code is exactly `bits`, found by following the
    /// branch bits stored on the nodes from the root.
    ///
    /// Returns `None` if `bits` runs past a leaf, stops at an internal node
    /// or takes a branch that does not exist.
    pub fn resolve(&self, bits: &BitSlice) -> Option<&str> {
        let mut at = self.root;
        for bit in bits.iter().by_vals() {
            let [first, second] = self.nodes[at].children()?;
            at = if self.nodes[first].code() == Some(bit) {
                first
            } else if self.nodes[second].code() == Some(bit) {
                second
            } else {
                return None;
            };
        }
        let node = &self.nodes[at];
        if node.is_leaf() {
            Some(node.key())
        } else {
            None
        }
    }

    /// Number of edges between the leaf of `symbol` and the root, counted
    /// by following parent links.
    pub fn depth_of(&self, symbol: &str) -> Result<usize> {
        let mut at = *self
            .leaves
            .get(symbol)
            .ok_or_else(|| Error::SymbolNotFound(symbol.to_string()))?;
        let mut depth = 0;
        while let Some(parent) = self.nodes[at].parent() {
            depth += 1;
            at = parent;
        }
        Ok(depth)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.leaves.contains_key(symbol)
    }
}

/// Renders the tree as `{first<-('key', probability, code)->second}`, leaves
/// as `{('key', probability, code)}`, with `-` for the root's missing code.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, &self.nodes, self.root)
    }
}
