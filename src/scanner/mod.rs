pub mod types;

use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

pub use self::types::{RawFileEntry, ScanConfig};

/// Walk `root` and return one entry per file and directory below it (the root itself excluded).
///
/// Entries come back in sorted walk order, so item ids assigned from them are
/// stable between runs over an unchanged directory.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<Vec<RawFileEntry>> {
    let meta = std::fs::metadata(root)
        .with_context(|| format!("cannot read scan root {}", root.display()))?;
    anyhow::ensure!(meta.is_dir(), "{} is not a directory", root.display());

    tracing::info!("Scanning {}", root.display());
    let start = std::time::Instant::now();

    let mut walk = jwalk::WalkDir::new(root)
        .sort(true)
        .skip_hidden(config.skip_hidden)
        .follow_links(config.follow_links);
    if let Some(depth) = config.max_depth {
        walk = walk.max_depth(depth);
    }

    let mut entries = Vec::new();
    for dir_entry in walk {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                // Unreadable directories are skipped, not fatal
                tracing::warn!("Scan error: {}", e);
                continue;
            }
        };
        if dir_entry.depth == 0 {
            continue;
        }
        entries.push(RawFileEntry {
            path: dir_entry.path(),
            size: 0,
            is_dir: dir_entry.file_type().is_dir(),
            parent: Some(dir_entry.parent_path().to_path_buf()),
        });
    }

    // Stat file sizes in parallel; the walk only gave us types
    entries
        .par_iter_mut()
        .filter(|e| !e.is_dir)
        .for_each(|e| match std::fs::symlink_metadata(&e.path) {
            Ok(m) => e.size = m.len(),
            Err(err) => tracing::debug!("stat failed for {}: {}", e.path.display(), err),
        });

    let total_bytes: u64 = entries.iter().map(|e| e.size).sum();
    tracing::info!(
        "Scan completed: {} entries, {} bytes in {:.2}s",
        entries.len(),
        total_bytes,
        start.elapsed().as_secs_f64()
    );

    Ok(entries)
}
