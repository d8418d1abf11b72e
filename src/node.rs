//! Tree nodes and the arena that owns them.

use std::fmt;

use bitvec::prelude::*;

use crate::alphabet::Alphabet;
use crate::{ONE, ZERO};

/// Index of a node in its arena. Leaves are numbered `0..n` in alphabet
/// order, so a leaf's id doubles as the identity of its symbol.
pub type NodeId = usize;

/// A symbol, or a merged group of symbols, of the code tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: String,
    probability: f64,
    code: Option<bool>,
    parent: Option<NodeId>,
    children: Option<[NodeId; 2]>,
    leaves: BitVec,
}

impl Node {
    /// The symbol of a leaf, or the concatenated symbols of an internal node.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The branch bit relative to the parent; `None` only for the root.
    pub fn code(&self) -> Option<bool> {
        self.code
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Both children of an internal node, `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether the leaf `leaf` lies in the subtree rooted at this node.
    pub fn contains(&self, leaf: NodeId) -> bool {
        leaf < self.leaves.len() && self.leaves[leaf]
    }
}

/// Owner of every node created while building a tree.
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// Creates one leaf per symbol, with ids matching the alphabet order.
    pub(crate) fn with_leaves(alphabet: &Alphabet) -> Self {
        let n = alphabet.len();
        let mut nodes = Vec::with_capacity(2 * n - 1);
        for (id, symbol) in alphabet.iter().enumerate() {
            let mut leaves = bitvec![0; n];
            leaves.set(id, true);
            nodes.push(Node {
                key: symbol.id.clone(),
                probability: symbol.probability,
                code: None,
                parent: None,
                children: None,
                leaves,
            });
        }
        Arena { nodes }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Joins `first` and `second` under a new internal node and returns its id.
    ///
    /// The more probable operand is labelled `1`; on a tie `first` gets `0`.
    pub(crate) fn merge(&mut self, first: NodeId, second: NodeId) -> NodeId {
        let id = self.nodes.len();
        let (a, b) = (&self.nodes[first], &self.nodes[second]);

        let mut key = String::with_capacity(a.key.len() + b.key.len());
        key.push_str(&a.key);
        key.push_str(&b.key);
        let probability = a.probability + b.probability;
        let mut leaves = a.leaves.clone();
        for leaf in b.leaves.iter_ones() {
            leaves.set(leaf, true);
        }
        let (first_code, second_code) = if a.probability > b.probability {
            (ONE, ZERO)
        } else {
            (ZERO, ONE)
        };
        log::debug!(
            "merging {:?} ({}) as {} with {:?} ({}) as {}",
            a.key,
            a.probability,
            first_code as u8,
            b.key,
            b.probability,
            second_code as u8
        );

        self.nodes.push(Node {
            key,
            probability,
            code: None,
            parent: None,
            children: Some([first, second]),
            leaves,
        });
        for (child, code) in [(first, first_code), (second, second_code)] {
            let node = &mut self.nodes[child];
            node.code = Some(code);
            node.parent = Some(id);
        }
        id
    }
}

enum Step {
    Enter(NodeId),
    Label(NodeId),
    Text(&'static str),
}

/// Writes the tree rooted at `root` as `{first<-('key', probability, code)->second}`,
/// walking it with an explicit stack.
pub(crate) fn write_tree(
    f: &mut fmt::Formatter<'_>,
    nodes: &[Node],
    root: NodeId,
) -> fmt::Result {
    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Text(s) => f.write_str(s)?,
            Step::Label(id) => {
                let node = &nodes[id];
                let code = match node.code {
                    Some(true) => "1",
                    Some(false) => "0",
                    None => "-",
                };
                write!(f, "('{}', {}, {})", node.key, node.probability, code)?;
            }
            Step::Enter(id) => {
                f.write_str("{")?;
                stack.push(Step::Text("}"));
                match nodes[id].children {
                    Some([first, second]) => {
                        stack.push(Step::Enter(second));
                        stack.push(Step::Text("->"));
                        stack.push(Step::Label(id));
                        stack.push(Step::Text("<-"));
                        stack.push(Step::Enter(first));
                    }
                    None => stack.push(Step::Label(id)),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::node::*;

    fn arena() -> Arena {
        Arena::with_leaves(&Alphabet::new(vec![("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap())
    }

    #[test]
    fn leaves() {
        let arena = arena();
        assert_eq!(arena.len(), 3);
        let b = arena.get(1);
        assert_eq!(b.key(), "b");
        assert_eq!(b.probability(), 0.3);
        assert_eq!(b.code(), None);
        assert_eq!(b.parent(), None);
        assert!(b.is_leaf());
        assert!(b.contains(1));
        assert!(!b.contains(0));
        assert!(!b.contains(7));
    }

    #[test]
    fn merge() {
        let mut arena = arena();
        let bc = arena.merge(1, 2);
        assert_eq!(bc, 3);
        let node = arena.get(bc);
        assert_eq!(node.key(), "bc");
        assert_eq!(node.probability(), 0.5);
        assert_eq!(node.children(), Some([1, 2]));
        assert_eq!(node.code(), None);
        assert!(node.contains(1) && node.contains(2) && !node.contains(0));
        // The more probable operand is labelled 1.
        assert_eq!(arena.get(1).code(), Some(true));
        assert_eq!(arena.get(2).code(), Some(false));
        assert_eq!(arena.get(1).parent(), Some(bc));

        // Equal probabilities: the first operand is labelled 0.
        let root = arena.merge(bc, 0);
        assert_eq!(arena.get(bc).code(), Some(false));
        assert_eq!(arena.get(0).code(), Some(true));
        assert_eq!(arena.get(root).key(), "bca");
        assert!((0..3).all(|leaf| arena.get(root).contains(leaf)));
    }
}
