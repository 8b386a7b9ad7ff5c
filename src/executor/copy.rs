//! Whole-file copy implementation

use crate::types::CopyError;
use std::fs::File;
use std::io;
use std::path::Path;

/// Copy the bytes of `src` into `dest`, overwriting `dest` if present
///
/// 1. Open the source for reading
/// 2. Create or truncate the destination
/// 3. Stream every byte across
/// 4. Sync the destination to stable storage
///
/// Both handles are dropped on every return path. The destination's parent
/// directory must already exist.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(CopyError)` - `SourceOpen`, `DestinationCreate`, `Copy` or `Flush`
///
/// # Example
/// ```no_run
/// use copyfile::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), copyfile::types::CopyError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, CopyError> {
    let mut src_file = File::open(src).map_err(|source| CopyError::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;

    let mut dest_file = File::create(dest).map_err(|source| CopyError::DestinationCreate {
        path: dest.to_path_buf(),
        source,
    })?;

    let total_bytes =
        io::copy(&mut src_file, &mut dest_file).map_err(|source| CopyError::Copy {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source,
        })?;

    dest_file.sync_all().map_err(|source| CopyError::Flush {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(total_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_source_is_source_open_error() {
        let temp = TempDir::new().expect("create tempdir");
        let err = copy_file(&temp.path().join("nope"), &temp.path().join("out"))
            .expect_err("missing source must fail");

        assert!(matches!(err, CopyError::SourceOpen { .. }));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_missing_parent_is_destination_create_error() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("src.txt");
        fs::write(&src, b"data").expect("write source");

        let err = copy_file(&src, &temp.path().join("no/such/dir/out.txt"))
            .expect_err("missing parent must fail");
        assert!(matches!(err, CopyError::DestinationCreate { .. }));
    }

    #[test]
    fn test_overwrite_truncates_longer_destination() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("src.txt");
        let dest = temp.path().join("dest.txt");
        fs::write(&src, b"short").expect("write source");
        fs::write(&dest, b"a much longer previous body").expect("write dest");

        let bytes = copy_file(&src, &dest).expect("copy should succeed");
        assert_eq!(bytes, 5);
        assert_eq!(fs::read(&dest).unwrap(), b"short");
    }
}
