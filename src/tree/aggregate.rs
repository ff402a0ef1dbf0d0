use super::arena::Item;

/// Set every internal item's weight to the sum of its direct children (bottom-up).
///
/// Expects organized items: children always sit at higher indices than their
/// parent, so walking the array in reverse settles children before parents.
pub fn aggregate_weights(items: &mut [Item]) {
    for i in (0..items.len()).rev() {
        if items[i].is_leaf() {
            continue;
        }
        let total: f64 = items
            .get(items[i].children_range())
            .map(|block| block.iter().map(|child| child.weight).sum())
            .unwrap_or(0.0);
        items[i].weight = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::organize;

    #[test]
    fn internal_weights_are_sums_of_descendants() {
        let mut items = vec![
            Item::root(0, 0.0),
            Item::new(1, 0, 0.0),
            Item::new(2, 1, 4.0),
            Item::new(3, 1, 6.0),
            Item::new(4, 0, 5.0),
            Item::root(5, 2.0),
        ];
        organize(&mut items);
        aggregate_weights(&mut items);

        let weight = |id: i64| {
            items
                .iter()
                .find(|i| i.id.0 == id)
                .map(|i| i.weight)
                .unwrap_or(f64::NAN)
        };
        assert_eq!(weight(1), 10.0);
        assert_eq!(weight(0), 15.0);
        assert_eq!(weight(5), 2.0);
    }
}
