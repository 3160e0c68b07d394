use crate::{
    error::{Error, Result},
    frequency::FrequencyTable,
    heap::MinHeap,
};

/// index of a node inside its tree's arena
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// a symbol and its frequency
    Leaf { symbol: u8, weight: u64 },
    /// two subtrees; weight is the sum of theirs
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// pending subtree in the priority queue
///
/// arena indices grow with creation order, leaves first in ascending symbol
/// order, so equal weights resolve to the subtree that was created earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    weight: u64,
    node: NodeId,
}

/// Huffman code tree stored as an arena, parents refer to children by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl CodeTree {
    /// build the tree from parallel symbol and weight lists
    ///
    /// the first node taken from the queue becomes the left child, the second
    /// the right one. Rebuilding from the same lists gives the same tree.
    pub fn build(symbols: &[u8], weights: &[u64]) -> Result<Self> {
        if symbols.len() != weights.len() {
            return Err(Error::malformed(format!(
                "{} symbols but {} frequencies",
                symbols.len(),
                weights.len()
            )));
        }
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }

        let size = symbols.len();
        let mut nodes = Vec::with_capacity(2 * size - 1);
        let mut pending = Vec::with_capacity(size);
        for (&symbol, &weight) in symbols.iter().zip(weights) {
            pending.push(Pending {
                weight,
                node: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, weight });
        }

        let mut queue = MinHeap::build(pending);
        while queue.len() > 1 {
            let left = queue.extract_min()?;
            let right = queue.extract_min()?;
            let weight = left.weight + right.weight;
            queue.insert(Pending {
                weight,
                node: nodes.len(),
            });
            nodes.push(Node::Internal {
                weight,
                left: left.node,
                right: right.node,
            });
        }
        let root = queue.extract_min()?.node;

        Ok(CodeTree { nodes, root })
    }

    /// build the tree for every byte present in `table`
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        let (symbols, weights) = table.to_parallel();
        Self::build(&symbols, &weights)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// follow one edge: `false` goes left, `true` goes right.
    /// returns None at a leaf
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    /// sum of all leaf weights, i.e. the number of symbols the tree was built from
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    pub fn leaf_count(&self) -> usize {
        // a full binary tree with n leaves has 2n - 1 nodes
        (self.nodes.len() + 1) / 2
    }

    /// length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    /// symbols and weights of all leaves, in arena order
    pub fn leaves(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.nodes.iter().filter_map(|node| match *node {
            Node::Leaf { symbol, weight } => Some((symbol, weight)),
            Node::Internal { .. } => None,
        })
    }
}
