//! Recursive directory mirroring

use super::copy::copy_file;
use crate::types::CopyError;
use std::fs;
use std::path::Path;

/// Totals for one directory copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files copied
    pub files: u64,
    /// Directories created or reused (including the root)
    pub dirs: u64,
    /// Bytes copied across all files
    pub bytes: u64,
}

impl CopyStats {
    fn absorb(&mut self, other: CopyStats) {
        self.files += other.files;
        self.dirs += other.dirs;
        self.bytes += other.bytes;
    }
}

/// Called after each file copy with the destination path and its size
pub type FileCallback<'a> = &'a dyn Fn(&Path, u64);

/// Recursively mirror `src` into `dest`
///
/// `dest` and missing parents are created. Entries are visited in name order;
/// symlinks are followed. The first failure aborts the remaining entries and
/// is returned as-is.
pub fn copy_dir(
    src: &Path,
    dest: &Path,
    on_file: Option<FileCallback<'_>>,
) -> Result<CopyStats, CopyError> {
    fs::create_dir_all(dest).map_err(|source| CopyError::CreateDir {
        path: dest.to_path_buf(),
        source,
    })?;

    let read_err = |source| CopyError::ReadDir {
        path: src.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(src)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut stats = CopyStats {
        dirs: 1,
        ..Default::default()
    };

    for entry in entries {
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        let metadata = fs::metadata(&src_path).map_err(|source| CopyError::ReadDir {
            path: src_path.clone(),
            source,
        })?;

        if metadata.is_dir() {
            stats.absorb(copy_dir(&src_path, &dest_path, on_file)?);
        } else {
            let bytes = copy_file(&src_path, &dest_path)?;
            stats.files += 1;
            stats.bytes += bytes;
            if let Some(callback) = on_file {
                callback(&dest_path, bytes);
            }
        }
    }

    Ok(stats)
}
