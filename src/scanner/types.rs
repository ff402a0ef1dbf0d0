use std::path::PathBuf;

/// Raw file entry collected during scanning, before item construction.
#[derive(Debug, Clone)]
pub struct RawFileEntry {
    /// Full path to the file or directory
    pub path: PathBuf,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Whether this entry is a directory
    pub is_dir: bool,
    /// Parent directory path
    pub parent: Option<PathBuf>,
}

/// Options for a directory walk.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Skip dot-files and dot-directories
    pub skip_hidden: bool,
    /// Maximum depth below the scan root (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            skip_hidden: false,
            max_depth: None,
        }
    }
}
