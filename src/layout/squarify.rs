use std::collections::HashMap;

use super::{Model, Rect, RectBuffer, Stats};
use crate::error::LayoutError;
use crate::tree::{Item, ItemId};

/// Compute the squarified treemap of `model.items` inside `area`.
///
/// Organizes the items on the first call (tracked by the model's sorted flag),
/// then clears `rects` and `stats` and emits one rect per item level by level:
/// all root rects first, then the children of every internal item in organized
/// (ascending depth) order. Each parent's rect is the first rect already
/// emitted with its id.
pub fn layout(model: &mut Model, area: Rect) -> Result<(), LayoutError> {
    model.prepare();
    model.stats = Stats::default();
    model.rects.clear();

    if model.items.is_empty() {
        return Ok(());
    }

    let Model {
        items, rects, stats, ..
    } = model;

    let root_count = items.iter().take_while(|i| i.is_root()).count();
    tracing::debug!(
        "Laying out {} root items of {} in {:.0}x{:.0} area",
        root_count,
        items.len(),
        area.width,
        area.height
    );
    squarify_level(&items[..root_count], area, rects, stats)?;

    // Rect position by id, first emission wins
    let mut positions: HashMap<ItemId, usize> = HashMap::with_capacity(items.len());
    index_new_rects(rects, 0, &mut positions);

    for parent in items.iter() {
        if parent.is_leaf() {
            continue;
        }
        let Some(parent_rect) = positions.get(&parent.id).map(|&i| rects[i]) else {
            tracing::debug!("Item {:?} has no rect, skipping its children", parent.id);
            continue;
        };
        let Some(children) = items.get(parent.children_range()) else {
            continue;
        };
        let emitted = rects.len();
        squarify_level(children, parent_rect, rects, stats)?;
        index_new_rects(rects, emitted, &mut positions);
    }

    if rects.len() != items.len() {
        tracing::warn!(
            "Layout produced {} rects for {} items (unreachable items?)",
            rects.len(),
            items.len()
        );
    }
    Ok(())
}

fn index_new_rects(rects: &RectBuffer, from: usize, positions: &mut HashMap<ItemId, usize>) {
    for (i, rect) in rects.iter().enumerate().skip(from) {
        positions.entry(rect.id).or_insert(i);
    }
}

/// Squarified layout of one sibling block (sorted by descending weight) inside `area`.
pub(crate) fn squarify_level(
    items: &[Item],
    area: Rect,
    rects: &mut RectBuffer,
    stats: &mut Stats,
) -> Result<(), LayoutError> {
    if items.is_empty() {
        return Ok(());
    }

    let total = total_weight(items);
    let total_area = area.area();
    if !(total > 0.0 && total_area > 0.0) {
        return collapse(items, area, rects, stats);
    }
    let scale = total_area / total;

    let mut remaining = area;
    let mut start = 0;
    while start < items.len() {
        let side = remaining.short_side();
        if side <= 0.0 {
            // Nothing left to split; rounding ate the region
            return collapse(&items[start..], remaining, rects, stats);
        }

        let end = start + row_len(&items[start..], scale, side);
        let row = &items[start..end];
        let row_weight = total_weight(row);
        let row_length = if row_weight > 0.0 {
            (row_weight / total) * (total_area / side)
        } else {
            0.0
        };

        // Wide regions take rows as columns on the left, tall ones as strips on top
        let wide = remaining.is_wide();
        let row_rect = if wide {
            let r = Rect {
                width: row_length,
                ..remaining
            };
            remaining.x += row_length;
            remaining.width -= row_length;
            r
        } else {
            let r = Rect {
                height: row_length,
                ..remaining
            };
            remaining.y += row_length;
            remaining.height -= row_length;
            r
        };

        layout_row(row, row_rect, wide, rects, stats)?;
        start = end;
    }

    Ok(())
}

/// Number of leading items that form the next row.
///
/// Grows the row while the worst aspect ratio does not increase; the first
/// item is always taken.
fn row_len(items: &[Item], scale: f64, side: f64) -> usize {
    let mut worst = f64::INFINITY;
    let mut row_area = 0.0;
    let mut max_w = f64::NEG_INFINITY;
    let mut min_w = f64::INFINITY;

    for (k, item) in items.iter().enumerate() {
        let w = item.weight * scale;
        row_area += w;
        max_w = max_w.max(w);
        min_w = min_w.min(w);

        let next = worst_aspect_ratio(max_w, min_w, row_area, side);
        if k > 0 && next > worst {
            return k;
        }
        worst = next;
    }
    items.len()
}

/// Classic squarified-treemap worst ratio for a row of scaled areas.
fn worst_aspect_ratio(max_w: f64, min_w: f64, row_area: f64, side: f64) -> f64 {
    let side_sq = side * side;
    let sum_sq = row_area * row_area;
    let a = (side_sq * max_w) / sum_sq;
    let b = sum_sq / (side_sq * min_w);
    a.max(b)
}

/// Place one finished row. In a column items stack top-to-bottom, in a strip left-to-right.
fn layout_row(
    row: &[Item],
    row_rect: Rect,
    column: bool,
    rects: &mut RectBuffer,
    stats: &mut Stats,
) -> Result<(), LayoutError> {
    let row_weight = total_weight(row);
    let scale = if row_weight > 0.0 {
        row_rect.area() / row_weight
    } else {
        0.0
    };

    let mut offset = 0.0;
    for item in row {
        record_leaf(item, stats);
        let item_area = item.weight * scale;

        let rect = if column {
            let h = if row_rect.width > 0.0 {
                item_area / row_rect.width
            } else {
                0.0
            };
            let r = Rect::new(item.id, row_rect.x, row_rect.y + offset, row_rect.width, h);
            offset += h;
            r
        } else {
            let w = if row_rect.height > 0.0 {
                item_area / row_rect.height
            } else {
                0.0
            };
            let r = Rect::new(item.id, row_rect.x + offset, row_rect.y, w, row_rect.height);
            offset += w;
            r
        };
        rects.push(rect)?;
    }
    Ok(())
}

/// Degenerate block (no weight or no area): zero-size rects at the region origin.
fn collapse(
    items: &[Item],
    area: Rect,
    rects: &mut RectBuffer,
    stats: &mut Stats,
) -> Result<(), LayoutError> {
    tracing::debug!("Collapsing {} items with no area to distribute", items.len());
    for item in items {
        record_leaf(item, stats);
        rects.push(Rect::new(item.id, area.x, area.y, 0.0, 0.0))?;
    }
    Ok(())
}

fn record_leaf(item: &Item, stats: &mut Stats) {
    if item.is_leaf() {
        stats.record(item.weight);
    }
}

fn total_weight(items: &[Item]) -> f64 {
    items.iter().map(|i| i.weight).sum()
}
