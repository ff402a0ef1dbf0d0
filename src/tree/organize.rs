use std::collections::HashMap;

use super::arena::{Item, ItemId};

/// Reorder a parent-pointer item array into depth order with contiguous child blocks.
///
/// After this call items are sorted by `(depth, parent_id, descending weight)`,
/// with every root sentinel parent treated as one id (stable, so ties keep
/// their previous relative order), and every item's
/// `children_offset_index`/`children_count` describe its direct children.
/// Running it again on organized data reproduces the same array.
pub fn organize(items: &mut [Item]) {
    if items.is_empty() {
        return;
    }

    let depths = compute_depths(items);

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        depths[a]
            .cmp(&depths[b])
            .then_with(|| sibling_group(&items[a]).cmp(&sibling_group(&items[b])))
            .then_with(|| items[b].weight.total_cmp(&items[a].weight))
    });

    let mut taken: Vec<Item> = items.iter_mut().map(std::mem::take).collect();
    for (slot, &src) in items.iter_mut().zip(&order) {
        *slot = std::mem::take(&mut taken[src]);
    }

    assign_child_ranges(items);

    tracing::debug!(
        "Organized {} items, max depth {}",
        items.len(),
        depths.iter().copied().max().unwrap_or(0)
    );
}

/// Parent id used for grouping; every root sentinel is the same top-level block.
fn sibling_group(item: &Item) -> ItemId {
    if item.is_root() {
        ItemId::ROOT
    } else {
        item.parent_id
    }
}

/// Depth of every item, indexed like `items`.
///
/// Fixed-point iteration bounded by `items.len()` passes, so parent cycles
/// terminate with unspecified depths instead of looping.
fn compute_depths(items: &[Item]) -> Vec<u32> {
    let index: HashMap<ItemId, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id, i))
        .collect();

    let parents: Vec<Option<usize>> = items
        .iter()
        .map(|item| {
            if item.is_root() {
                None
            } else {
                index.get(&item.parent_id).copied()
            }
        })
        .collect();

    let orphans = items
        .iter()
        .zip(&parents)
        .filter(|(item, parent)| !item.is_root() && parent.is_none())
        .count();
    if orphans > 0 {
        tracing::warn!("{} items reference a parent id that does not exist", orphans);
    }

    let mut depths = vec![0u32; items.len()];
    for _ in 0..items.len() {
        let mut changed = false;
        for (i, parent) in parents.iter().enumerate() {
            let depth = match parent {
                Some(p) => depths[*p].saturating_add(1),
                None => 0,
            };
            if depths[i] != depth {
                depths[i] = depth;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    depths
}

/// Record each parent's child block. Relies on the sort grouping siblings.
fn assign_child_ranges(items: &mut [Item]) {
    let mut blocks: HashMap<ItemId, (u32, u32)> = HashMap::new();
    for (j, item) in items.iter().enumerate() {
        if item.is_root() {
            continue;
        }
        blocks
            .entry(item.parent_id)
            .and_modify(|(_, count)| *count += 1)
            .or_insert((j as u32, 1));
    }

    for item in items.iter_mut() {
        let (offset, count) = blocks.get(&item.id).copied().unwrap_or((0, 0));
        item.children_offset_index = offset;
        item.children_count = count;
    }
}
