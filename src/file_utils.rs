use anyhow::Result;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    /// Check whether a path carries one of the given extensions, ignoring case
    pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        let Some(ext) = path.as_ref().extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        extensions
            .iter()
            .any(|wanted| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
    }

    /// Find container files in a directory
    ///
    /// Only the directory itself is scanned unless `recursive` is set.
    /// Results are sorted by file name within each directory. Entries that
    /// cannot be read (permissions, symlink loops) are skipped with a warning.
    pub fn find_containers<P: AsRef<Path>>(
        dir: P,
        extensions: &[String],
        recursive: bool,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut walker = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut result = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_file() && Self::has_extension(path, extensions) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }
}
