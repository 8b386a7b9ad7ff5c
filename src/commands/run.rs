//! Main copy command: execute every task in the manifest, in order

use crate::executor::{copy_dir, copy_file};
use crate::paths::{canonical_lossy, PathResolver};
use crate::types::{CopyError, CopyTask, DestinationIntent};
use crate::ui::ProgressReporter;
use crate::Config;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Totals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Tasks whose copy finished
    pub completed: usize,
    /// Tasks skipped because the source was missing
    pub skipped: usize,
    pub files_copied: u64,
    pub bytes_copied: u64,
}

/// How a single task was carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Directory tree mirrored into `dest`
    Directory { dest: PathBuf },
    /// Single file written to `dest`
    File { dest: PathBuf },
}

/// Run the copy tasks with a live progress spinner
pub fn run(config: &Config) -> Result<RunReport, CopyError> {
    let mut progress = ProgressReporter::new();
    run_with_progress(config, &mut progress)
}

/// Run the copy tasks, reporting through `progress`
///
/// A missing source skips its task; any other error stops the run and is
/// returned before later tasks execute.
pub fn run_with_progress(
    config: &Config,
    progress: &mut ProgressReporter,
) -> Result<RunReport, CopyError> {
    let resolver = PathResolver::new(&config.base_dir)?;
    let mut report = RunReport::default();

    progress.start(config.manifest.len() as u64);

    for (idx, task) in config.manifest.tasks.iter().enumerate() {
        match run_task(idx + 1, task, &resolver, progress) {
            Ok(_) => report.completed += 1,
            Err(err) if err.is_tolerated() => {
                progress.suspend(|| warn!("{}. Skip.", err));
                report.skipped += 1;
            }
            Err(err) => {
                progress.abandon();
                return Err(err);
            }
        }
        progress.finish_task();
    }

    report.files_copied = progress.copied_files();
    report.bytes_copied = progress.copied_bytes();
    progress.finish(report.completed, report.skipped);
    info!("All done!");

    Ok(report)
}

/// Resolve, classify and execute one task
pub fn run_task(
    index: usize,
    task: &CopyTask,
    resolver: &PathResolver,
    progress: &ProgressReporter,
) -> Result<TaskOutcome, CopyError> {
    let src = resolver.resolve(&task.source);
    let dest = resolver.resolve(&task.destination);

    progress.suspend(|| {
        info!(
            "Task {}: Copy file from [{}] to [{}].",
            index,
            src.display(),
            dest.display()
        )
    });
    progress.start_task(index, &src);

    let src_meta = match fs::metadata(&src) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CopyError::SourceMissing { path: src })
        }
        Err(source) => return Err(CopyError::SourceOpen { path: src, source }),
    };

    let intent = DestinationIntent::probe(&dest)?;
    let on_file = |path: &Path, bytes: u64| progress.file_copied(path, bytes);

    if src_meta.is_dir() {
        if intent == DestinationIntent::AsFile {
            return Err(CopyError::DestinationNotDirectory { path: dest });
        }
        if canonical_lossy(&dest).starts_with(canonical_lossy(&src)) {
            return Err(CopyError::DestinationInsideSource { src, dest });
        }
        copy_dir(&src, &dest, Some(&on_file))?;
        return Ok(TaskOutcome::Directory { dest });
    }

    let target = file_target(&src, &dest, intent)?;
    if canonical_lossy(&target) == canonical_lossy(&src) {
        return Err(CopyError::SameFile { path: src });
    }
    let bytes = copy_file(&src, &target)?;
    on_file(&target, bytes);

    Ok(TaskOutcome::File { dest: target })
}

/// Pick the file path a single-file task writes to
///
/// An existing file is overwritten in place. Otherwise the destination is a
/// directory (created when absent) that receives the source's base name.
fn file_target(
    src: &Path,
    dest: &Path,
    intent: DestinationIntent,
) -> Result<PathBuf, CopyError> {
    match intent {
        DestinationIntent::AsFile => Ok(dest.to_path_buf()),
        DestinationIntent::AsDirectory | DestinationIntent::Unknown => {
            if intent == DestinationIntent::Unknown {
                fs::create_dir_all(dest).map_err(|source| CopyError::CreateDir {
                    path: dest.to_path_buf(),
                    source,
                })?;
            }
            // Only `/` lacks a file name, and it is a directory.
            let name = src.file_name().unwrap_or_default();
            Ok(dest.join(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(source: &str, destination: &str) -> CopyTask {
        CopyTask {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn test_file_target_policies() {
        let temp = TempDir::new().expect("create tempdir");
        let src = Path::new("/src/app.conf");

        let existing = temp.path().join("existing.conf");
        fs::write(&existing, b"old").unwrap();
        assert_eq!(
            file_target(src, &existing, DestinationIntent::AsFile).unwrap(),
            existing
        );

        assert_eq!(
            file_target(src, temp.path(), DestinationIntent::AsDirectory).unwrap(),
            temp.path().join("app.conf")
        );

        let fresh = temp.path().join("fresh/dir");
        assert_eq!(
            file_target(src, &fresh, DestinationIntent::Unknown).unwrap(),
            fresh.join("app.conf")
        );
        assert!(fresh.is_dir());
    }

    #[test]
    fn test_run_task_file_onto_itself_keeps_contents() {
        let temp = TempDir::new().expect("create tempdir");
        fs::write(temp.path().join("a.txt"), b"precious").unwrap();
        let resolver = PathResolver::new(temp.path()).unwrap();
        let progress = ProgressReporter::hidden();

        let err = run_task(1, &task("a.txt", "./a.txt"), &resolver, &progress)
            .expect_err("copying a file onto itself must fail");
        assert!(matches!(err, CopyError::SameFile { .. }));
        assert!(err.is_fatal());
        assert_eq!(fs::read(temp.path().join("a.txt")).unwrap(), b"precious");

        // Same file reached through its parent directory.
        let err = run_task(2, &task("a.txt", "."), &resolver, &progress)
            .expect_err("copying into the source's own directory must fail");
        assert!(matches!(err, CopyError::SameFile { .. }));
        assert_eq!(fs::read(temp.path().join("a.txt")).unwrap(), b"precious");
    }

    #[test]
    fn test_run_task_directory_onto_itself_keeps_contents() {
        let temp = TempDir::new().expect("create tempdir");
        fs::create_dir(temp.path().join("d")).unwrap();
        fs::write(temp.path().join("d/inner.txt"), b"precious").unwrap();
        let resolver = PathResolver::new(temp.path()).unwrap();
        let progress = ProgressReporter::hidden();

        let err = run_task(1, &task("d", "./d/"), &resolver, &progress)
            .expect_err("copying a directory onto itself must fail");
        assert!(matches!(err, CopyError::DestinationInsideSource { .. }));
        assert_eq!(fs::read(temp.path().join("d/inner.txt")).unwrap(), b"precious");
    }

    #[test]
    fn test_run_task_destination_nested_in_source_is_rejected() {
        let temp = TempDir::new().expect("create tempdir");
        fs::create_dir(temp.path().join("site")).unwrap();
        fs::write(temp.path().join("site/index.html"), b"<html/>").unwrap();
        let resolver = PathResolver::new(temp.path()).unwrap();
        let progress = ProgressReporter::hidden();

        let err = run_task(1, &task("./site", "./site/backup"), &resolver, &progress)
            .expect_err("destination inside source must fail");
        assert!(matches!(err, CopyError::DestinationInsideSource { .. }));
        assert!(!temp.path().join("site/backup").exists());
    }

    #[test]
    fn test_run_task_sibling_with_shared_prefix_is_allowed() {
        let temp = TempDir::new().expect("create tempdir");
        fs::create_dir(temp.path().join("site")).unwrap();
        fs::write(temp.path().join("site/index.html"), b"<html/>").unwrap();
        let resolver = PathResolver::new(temp.path()).unwrap();
        let progress = ProgressReporter::hidden();

        run_task(1, &task("site", "site-backup"), &resolver, &progress)
            .expect("sibling destination should copy");
        assert_eq!(
            fs::read(temp.path().join("site-backup/index.html")).unwrap(),
            b"<html/>"
        );
    }

    #[test]
    fn test_run_task_missing_source_is_tolerated() {
        let temp = TempDir::new().expect("create tempdir");
        let resolver = PathResolver::new(temp.path()).unwrap();
        let progress = ProgressReporter::hidden();

        let err = run_task(1, &task("nope.txt", "out"), &resolver, &progress)
            .expect_err("missing source should be reported");
        assert!(err.is_tolerated());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_run_task_file_into_new_directory() {
        let temp = TempDir::new().expect("create tempdir");
        fs::write(temp.path().join("app.conf"), b"key=value").unwrap();
        let resolver = PathResolver::new(temp.path()).unwrap();
        let progress = ProgressReporter::hidden();

        let outcome = run_task(1, &task("app.conf", "dist"), &resolver, &progress)
            .expect("task should succeed");

        let expected = resolver.resolve("dist/app.conf");
        assert_eq!(outcome, TaskOutcome::File { dest: expected.clone() });
        assert_eq!(fs::read(expected).unwrap(), b"key=value");
        assert_eq!(progress.copied_files(), 1);
        assert_eq!(progress.copied_bytes(), 9);
    }
}
