//! The ordered radix map: node types, container, cursors, debug dumps.

mod cursor;
mod debug;
mod node;
mod tree;


pub use cursor::{Cursor, Iter};
pub use debug::TreeDump;
pub use node::{InnerNode, Item, LeafNode, Node, NodeId, NodeIdx, LEAF_DEPTH};
pub use tree::{MapError, MerkleMap};
