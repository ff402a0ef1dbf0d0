//! Plain-text dumps of a model for the command line.

use crate::layout::{Model, Rect};

/// Area, stats and counts.
pub fn model_summary(model: &Model, area: &Rect) -> String {
    let mut out = String::new();
    out.push_str(&format!("[area]                    id: {:>16}\n", area.id.0));
    out.push_str(&format!("[area]                     x: {:>16.6}\n", area.x));
    out.push_str(&format!("[area]                     y: {:>16.6}\n", area.y));
    out.push_str(&format!("[area]                 width: {:>16.6}\n", area.width));
    out.push_str(&format!("[area]                height: {:>16.6}\n", area.height));
    out.push_str(&format!("[stats]           weight_min: {:>16.6}\n", model.stats.min));
    out.push_str(&format!("[stats]           weight_max: {:>16.6}\n", model.stats.max));
    out.push_str(&format!("[stats]           weight_sum: {:>16.6}\n", model.stats.sum));
    out.push_str(&format!("[stats]                count: {:>16}\n", model.stats.count));
    out.push_str(&format!("[model]          items_count: {:>16}\n", model.items.len()));
    out.push_str(&format!(
        "[model] items_user_data_size: {:>16}\n",
        model.items_user_data_size
    ));
    out.push_str(&format!("[model]          rects_count: {:>16}\n", model.rects.len()));
    out
}

/// One line per item in array order.
pub fn item_table(model: &Model) -> String {
    model
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "[item][{:4}] id: {:5}, parent_id: {:5}, weight: {:12.6}, children_count: {:5}, children_offset_index: {:5}\n",
                i,
                item.id.0,
                item.parent_id.0,
                item.weight,
                item.children_count,
                item.children_offset_index
            )
        })
        .collect()
}

/// One line per rect in emission order.
pub fn rect_table(model: &Model) -> String {
    model
        .rects
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "[rect][{:4}] id: {:5}, x: {:12.6}, y: {:12.6}, width: {:12.6}, height: {:12.6}\n",
                i, r.id.0, r.x, r.y, r.width, r.height
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::tree::Item;

    #[test]
    fn tables_have_one_line_per_entry() {
        let area = Rect::from_size(10.0, 10.0);
        let mut model = Model::new(vec![Item::root(1, 1.0), Item::root(2, 1.0), Item::new(3, 1, 1.0)]);
        layout(&mut model, area).unwrap();

        assert_eq!(item_table(&model).lines().count(), 3);
        assert_eq!(rect_table(&model).lines().count(), 3);
        let summary = model_summary(&model, &area);
        let rects_line = summary.lines().find(|l| l.contains("rects_count")).unwrap();
        assert_eq!(rects_line.split_whitespace().last(), Some("3"));
    }
}
