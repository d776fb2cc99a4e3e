//! Deterministic debug rendering of items and tree structure.

use std::fmt;

use super::node::{Item, Node, NodeIdx};
use super::tree::MerkleMap;

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for byte in self.key.as_bytes() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ", ")?;
        for byte in &self.data {
            write!(f, "{byte:02X}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for MerkleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for item in self {
            writeln!(f, "    {item}")?;
        }
        write!(f, "}}")
    }
}

/// Structural dump adapter returned by [`MerkleMap::dump`].
pub struct TreeDump<'a> {
    map: &'a MerkleMap,
}

impl MerkleMap {
    /// Renders the node structure, one node per line, children indented
    /// under their parent. Debugging aid only; the format is not stable.
    pub fn dump(&self) -> TreeDump<'_> {
        TreeDump { map: self }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.map.dump_node(f, self.map.root_idx(), 0)
    }
}

impl MerkleMap {
    fn dump_node(&self, f: &mut fmt::Formatter<'_>, idx: NodeIdx, indent: usize) -> fmt::Result {
        match self.node(idx) {
            Node::Leaf(leaf) => writeln!(f, "{:indent$}leaf {:?}", "", leaf.key()),
            Node::Inner(inner) => {
                writeln!(
                    f,
                    "{:indent$}inner depth={} common={:?} mask={:#06x}",
                    "",
                    inner.depth(),
                    inner.common(),
                    inner.occupied,
                )?;
                for branch in 0..16 {
                    if let Some(child) = inner.child(branch) {
                        self.dump_node(f, child, indent + 2)?;
                    }
                }
                Ok(())
            }
        }
    }
}
