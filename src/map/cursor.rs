//! Positional cursors over the map.
//!
//! A cursor records the leaf it points at and the descent path reaching
//! it. It holds no reference into the container: dereferencing and
//! advancing go through [`MerkleMap`] accessors. Any structural mutation
//! other than the [`MerkleMap::erase`] call that produced a cursor
//! invalidates it.

use primitive_types::H256;

use super::node::{Item, NodeIdx};
use super::tree::{MerkleMap, NodeStack};

/// Forward cursor over the map, in ascending key order.
///
/// The past-the-end position carries no item. Cursors compare equal when
/// they point at the same item; comparing cursors obtained from
/// different maps is meaningless.
#[derive(Clone, Debug)]
pub struct Cursor {
    pub(crate) item: Option<NodeIdx>,
    pub(crate) stack: NodeStack,
}

impl Cursor {
    pub(crate) fn at(item: NodeIdx, stack: NodeStack) -> Self {
        Self {
            item: Some(item),
            stack,
        }
    }

    /// The past-the-end cursor.
    pub fn end() -> Self {
        Self {
            item: None,
            stack: NodeStack::new(),
        }
    }

    /// Returns true if this cursor is past the end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.item.is_none()
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl Eq for Cursor {}

impl MerkleMap {
    /// The item a cursor points at, or `None` for `end`.
    pub fn item(&self, cursor: &Cursor) -> Option<&Item> {
        cursor.item.map(|idx| self.leaf(idx).item())
    }

    /// The key a cursor points at, or `None` for `end`.
    pub fn key_at(&self, cursor: &Cursor) -> Option<H256> {
        self.item(cursor).map(|item| item.key)
    }

    /// The stored hash of the leaf a cursor points at, or `None` for
    /// `end`.
    pub fn hash_at(&self, cursor: &Cursor) -> Option<H256> {
        cursor.item.map(|idx| *self.leaf(idx).hash())
    }

    /// Advances a cursor to its in-order successor.
    ///
    /// Advancing `end` is a contract violation; debug builds assert.
    pub fn advance(&self, cursor: &mut Cursor) {
        debug_assert!(!cursor.is_end(), "advance past end");
        let Some(idx) = cursor.item else { return };
        let key = *self.leaf(idx).key();
        cursor.item = self.peek_next_item(&key, &mut cursor.stack);
    }

    /// Iterates the items in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            map: self,
            cursor: self.begin(),
        }
    }
}

/// Borrowing iterator over the map in ascending key order.
pub struct Iter<'a> {
    map: &'a MerkleMap,
    cursor: Cursor,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor.item?;
        let item = self.map.leaf(idx).item();
        self.map.advance(&mut self.cursor);
        Some(item)
    }
}

impl<'a> IntoIterator for &'a MerkleMap {
    type Item = &'a Item;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(first: u8) -> H256 {
        let mut bytes = [0u8; 32];
        bytes[0] = first;
        H256(bytes)
    }

    #[test]
    fn test_end_cursors_compare_equal() {
        let map = MerkleMap::new();
        assert_eq!(map.end(), Cursor::end());
        assert!(map.end().is_end());
        assert_eq!(map.item(&map.end()), None);
        assert_eq!(map.key_at(&map.end()), None);
        assert_eq!(map.hash_at(&map.end()), None);
    }

    #[test]
    fn test_iteration_order() {
        let mut map = MerkleMap::new();
        for first in [0x30u8, 0x10, 0xF0, 0x20] {
            map.insert(H256::zero(), Item::new(key(first), vec![first]));
        }
        let keys: Vec<H256> = map.iter().map(|item| item.key).collect();
        assert_eq!(keys, vec![key(0x10), key(0x20), key(0x30), key(0xF0)]);
        assert_eq!(map.iter().count(), 4);
    }

    #[test]
    fn test_for_loop_over_reference() {
        let mut map = MerkleMap::new();
        map.insert(H256::zero(), Item::new(key(1), vec![]));
        map.insert(H256::zero(), Item::new(key(2), vec![]));
        let mut seen = 0;
        let mut last = H256::zero();
        for item in &map {
            assert!(item.key > last);
            last = item.key;
            seen += 1;
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_manual_advance_reaches_end() {
        let mut map = MerkleMap::new();
        map.insert(H256::zero(), Item::new(key(5), vec![]));
        map.insert(H256::zero(), Item::new(key(7), vec![]));
        let mut cursor = map.begin();
        assert_eq!(map.key_at(&cursor), Some(key(5)));
        map.advance(&mut cursor);
        assert_eq!(map.key_at(&cursor), Some(key(7)));
        map.advance(&mut cursor);
        assert!(cursor.is_end());
        assert_eq!(cursor, map.end());
    }

    #[test]
    fn test_find_and_begin_agree() {
        let mut map = MerkleMap::new();
        map.insert(H256::zero(), Item::new(key(9), vec![]));
        assert_eq!(map.begin(), map.find_key(&key(9)));
    }
}
