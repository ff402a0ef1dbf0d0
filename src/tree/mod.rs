pub mod aggregate;
pub mod arena;
pub mod organize;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

pub use self::aggregate::aggregate_weights;
pub use self::arena::{children, find_item, Item, ItemId};
pub use self::organize::organize;
use crate::scanner::types::RawFileEntry;

/// Items built from a directory scan, with the entry names kept alongside.
#[derive(Debug, Clone, Default)]
pub struct ScannedTree {
    /// Organized items; directory weights are the aggregated size of their contents.
    pub items: Vec<Item>,
    /// Entry name per item, indexed by `ItemId` (ids are dense from 0).
    pub names: Vec<CompactString>,
}

impl ScannedTree {
    pub fn name(&self, id: ItemId) -> Option<&str> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(|n| n.as_str())
    }
}

/// Build a flat item array from scanner output.
///
/// Every entry becomes one item, ids follow entry order. Entries directly under
/// `root` are top-level items; anything whose parent directory was not scanned
/// is attached to the top level as well.
pub fn build_items(root: &Path, entries: &[RawFileEntry]) -> ScannedTree {
    let dir_count = entries.iter().filter(|e| e.is_dir).count();
    tracing::info!(
        "Building items from {} entries ({} dirs, {} files)",
        entries.len(),
        dir_count,
        entries.len() - dir_count
    );

    // Map from path → ItemId for parent lookups
    let path_map: HashMap<&Path, ItemId> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.path.as_path(), ItemId(i as i64)))
        .collect();

    let mut items = Vec::with_capacity(entries.len());
    let mut names = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let parent_id = parent_path(entry)
            .filter(|p| p.as_path() != root)
            .and_then(|p| path_map.get(p.as_path()).copied())
            .unwrap_or(ItemId::ROOT);

        let weight = if entry.is_dir { 0.0 } else { entry.size as f64 };
        items.push(Item::new(i as i64, parent_id, weight));

        let name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        names.push(CompactString::new(&name));
    }

    organize(&mut items);
    aggregate_weights(&mut items);
    // Directory weights changed, so sibling order has to be recomputed
    organize(&mut items);

    let root_count = items.iter().take_while(|i| i.is_root()).count();
    tracing::info!(
        "Items built: {} total, {} top-level",
        items.len(),
        root_count
    );

    ScannedTree { items, names }
}

fn parent_path(entry: &RawFileEntry) -> Option<PathBuf> {
    entry
        .parent
        .clone()
        .or_else(|| entry.path.parent().map(Path::to_path_buf))
}
