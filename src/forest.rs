//! The working collection of not-yet-merged trees.

use crate::node::NodeId;

/// Membership handle of a rooted tree in a [`Forest`]: the root's id and the
/// root's probability. The nodes themselves live in the builder's arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    root: NodeId,
    probability: f64,
}

impl Tree {
    pub fn new(root: NodeId, probability: f64) -> Self {
        Tree { root, probability }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// An ordered collection of trees.
///
/// Trees are identified by their root id. Sorting only ever moves a tree one
/// step towards the back, so trees of equal probability keep their relative
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new() -> Self {
        Forest { trees: Vec::new() }
    }

    /// Adds `tree` at the back. Returns `false`, leaving the forest as it
    /// was, if a tree with the same root is already a member.
    pub fn append(&mut self, tree: Tree) -> bool {
        if self.index_of(tree.root).is_some() {
            log::warn!("tree rooted at {} is already in the forest", tree.root);
            return false;
        }
        self.trees.push(tree);
        true
    }

    /// Takes the tree rooted at `root` out of the forest, keeping the order
    /// of the others. Returns `None` if there is no such tree.
    pub fn remove(&mut self, root: NodeId) -> Option<Tree> {
        let at = self.index_of(root)?;
        Some(self.trees.remove(at))
    }

    /// Swaps the tree rooted at `root` with its successor. Returns `false`
    /// without touching anything when the tree is last or absent.
    pub fn reposition_down(&mut self, root: NodeId) -> bool {
        match self.index_of(root) {
            Some(at) if at + 1 < self.trees.len() => {
                self.trees.swap(at, at + 1);
                true
            }
            _ => false,
        }
    }

    /// Orders the trees by descending probability with repeated passes of
    /// adjacent swaps, until a pass swaps nothing. A tree is only moved down
    /// when it is strictly less probable than its successor.
    ///
    /// Returns the total number of swaps.
    pub fn sort_descending(&mut self) -> usize {
        let mut total = 0;
        loop {
            let mut swaps = 0;
            let mut at = 0;
            while at + 1 < self.trees.len() {
                if self.trees[at].probability < self.trees[at + 1].probability {
                    self.trees.swap(at, at + 1);
                    swaps += 1;
                }
                at += 1;
            }
            log::trace!("sort pass over {} trees: {} swaps", self.trees.len(), swaps);
            total += swaps;
            if swaps == 0 {
                return total;
            }
        }
    }

    /// The last two trees, in forest order. After
    /// [`sort_descending`](Self::sort_descending) these are the two least
    /// probable ones.
    pub fn last_pair(&self) -> Option<(Tree, Tree)> {
        match self.trees.as_slice() {
            [.., first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    /// Number of trees.
    pub fn size(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn first(&self) -> Option<&Tree> {
        self.trees.first()
    }

    pub fn last(&self) -> Option<&Tree> {
        self.trees.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tree> {
        self.trees.iter()
    }

    fn index_of(&self, root: NodeId) -> Option<usize> {
        self.trees.iter().position(|t| t.root == root)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn forest(probabilities: &[f64]) -> Forest {
        let mut forest = Forest::new();
        for (root, &p) in probabilities.iter().enumerate() {
            forest.append(Tree::new(root, p));
        }
        forest
    }

    fn roots(forest: &Forest) -> Vec<NodeId> {
        forest.iter().map(|t| t.root()).collect()
    }

    #[test]
    fn append() {
        let mut f = Forest::new();
        assert!(f.is_empty());
        assert_eq!(f.first(), None);
        assert_eq!(f.last(), None);
        assert!(f.append(Tree::new(4, 0.5)));
        assert_eq!(f.first(), f.last());
        assert!(f.append(Tree::new(2, 0.5)));
        assert_eq!(f.first().map(Tree::root), Some(4));
        assert_eq!(f.last().map(Tree::root), Some(2));
        assert_eq!(f.size(), 2);
    }

    #[test]
    fn append_duplicate_root() {
        let mut f = Forest::new();
        assert!(f.append(Tree::new(0, 0.9)));
        assert!(!f.append(Tree::new(0, 0.1)));
        assert!(f.append(Tree::new(5, 0.5)));
        assert_eq!(roots(&f), vec![0, 5]);
        assert_eq!(f.first().map(Tree::probability), Some(0.9));
        // Sorting terminates and moves by position.
        assert_eq!(f.sort_descending(), 0);
        assert!(f.append(Tree::new(1, 0.95)));
        assert_eq!(f.sort_descending(), 2);
        assert_eq!(roots(&f), vec![1, 0, 5]);
    }

    #[test]
    fn remove() {
        let mut f = forest(&[0.1, 0.2, 0.3, 0.4]);
        // first
        assert_eq!(f.remove(0), Some(Tree::new(0, 0.1)));
        assert_eq!(roots(&f), vec![1, 2, 3]);
        // last
        assert_eq!(f.remove(3).map(|t| t.root()), Some(3));
        assert_eq!(f.last().map(Tree::root), Some(2));
        // absent
        assert_eq!(f.remove(3), None);
        assert_eq!(f.size(), 2);
        f.remove(1);
        // single
        f.remove(2);
        assert!(f.is_empty());
        assert_eq!(f.first(), None);
        assert_eq!(f.remove(2), None);
    }

    #[test]
    fn reposition_down() {
        let mut f = forest(&[0.1, 0.2, 0.3]);
        assert!(f.reposition_down(0));
        assert_eq!(roots(&f), vec![1, 0, 2]);
        assert_eq!(f.first().map(Tree::root), Some(1));
        assert!(f.reposition_down(0));
        assert_eq!(roots(&f), vec![1, 2, 0]);
        assert_eq!(f.last().map(Tree::root), Some(0));
        assert!(!f.reposition_down(0));
        assert!(!f.reposition_down(9));
        assert_eq!(roots(&f), vec![1, 2, 0]);
    }

    #[test]
    fn sort_descending() {
        let mut f = forest(&[0.15, 0.04, 0.26, 0.05, 0.5]);
        assert!(f.sort_descending() > 0);
        assert_eq!(roots(&f), vec![4, 2, 0, 3, 1]);
        assert_eq!(f.sort_descending(), 0);

        // Ties keep their order.
        let mut f = forest(&[0.2, 0.5, 0.2, 0.5, 0.1]);
        f.sort_descending();
        assert_eq!(roots(&f), vec![1, 3, 0, 2, 4]);

        let mut f = Forest::new();
        assert_eq!(f.sort_descending(), 0);
    }

    #[test]
    fn last_pair() {
        assert_eq!(forest(&[1.0]).last_pair(), None);
        assert_eq!(
            forest(&[0.5, 0.3, 0.2]).last_pair(),
            Some((Tree::new(1, 0.3), Tree::new(2, 0.2)))
        );
    }
}
