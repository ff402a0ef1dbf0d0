use std::ops::Range;

/// Caller-assigned item identifier. Any id below [`ItemId::FIRST_VALID`] used as a
/// `parent_id` marks the item as a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Smallest id an item may carry.
    pub const FIRST_VALID: ItemId = ItemId(0);
    /// Conventional parent id for top-level items.
    pub const ROOT: ItemId = ItemId(-1);

    /// Whether this id, used as a parent reference, denotes "no parent".
    pub fn is_root_sentinel(self) -> bool {
        self < Self::FIRST_VALID
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId(value)
    }
}

/// A single weighted node in the flat arena.
///
/// Children are never referenced directly: after [`organize`](super::organize)
/// they occupy `children_offset_index .. children_offset_index + children_count`
/// of the same array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub parent_id: ItemId,
    /// Non-negative weight. For internal items this is usually the sum of the children.
    pub weight: f64,
    /// Start of this item's child block (computed by the organizer).
    pub children_offset_index: u32,
    /// Number of direct children (computed by the organizer).
    pub children_count: u32,
    /// Opaque fixed-size trailer carried through the binary codec.
    pub user_data: Vec<u8>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, parent_id: impl Into<ItemId>, weight: f64) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            weight,
            ..Self::default()
        }
    }

    /// Top-level item with the conventional root parent.
    pub fn root(id: impl Into<ItemId>, weight: f64) -> Self {
        Self::new(id, ItemId::ROOT, weight)
    }

    pub fn with_user_data(mut self, user_data: Vec<u8>) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_root_sentinel()
    }

    pub fn is_leaf(&self) -> bool {
        self.children_count == 0
    }

    /// Index range of the direct children inside the organized array.
    pub fn children_range(&self) -> Range<usize> {
        let start = self.children_offset_index as usize;
        start..start + self.children_count as usize
    }
}

/// Direct children of `item` within an organized array.
pub fn children<'a>(items: &'a [Item], item: &Item) -> &'a [Item] {
    if item.is_leaf() {
        return &[];
    }
    items.get(item.children_range()).unwrap_or(&[])
}

/// Linear lookup by id.
pub fn find_item(items: &[Item], id: ItemId) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_parent_ids_are_roots() {
        assert!(Item::new(1, -1, 1.0).is_root());
        assert!(Item::new(1, -42, 1.0).is_root());
        assert!(!Item::new(1, 0, 1.0).is_root());
    }

    #[test]
    fn children_of_leaf_is_empty() {
        let items = vec![Item::root(1, 1.0), Item::new(2, 1, 1.0)];
        assert!(children(&items, &items[1]).is_empty());
    }

    #[test]
    fn children_range_out_of_bounds_is_empty() {
        let mut parent = Item::root(1, 1.0);
        parent.children_offset_index = 5;
        parent.children_count = 2;
        let items = vec![parent.clone()];
        assert!(children(&items, &parent).is_empty());
    }

    #[test]
    fn find_item_by_id() {
        let items = vec![Item::root(7, 3.0), Item::root(9, 1.0)];
        assert_eq!(find_item(&items, ItemId(9)).map(|i| i.weight), Some(1.0));
        assert!(find_item(&items, ItemId(8)).is_none());
    }
}
