//! Path resolution: environment expansion plus absolute normalization

use crate::types::CopyError;
use std::path::{Component, Path, PathBuf};

/// Resolves raw configuration paths against an explicit base directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `base`
    ///
    /// A relative `base` is anchored to the process working directory.
    pub fn new(base: impl AsRef<Path>) -> Result<Self, CopyError> {
        let base = base.as_ref();
        let base = if base.is_absolute() {
            normalize(base)
        } else {
            normalize(&current_dir(&base.to_string_lossy())?.join(base))
        };
        Ok(Self { base })
    }

    /// Create a resolver rooted at the process working directory
    pub fn from_current_dir() -> Result<Self, CopyError> {
        Ok(Self {
            base: current_dir("")?,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Expand `$VAR` / `${VAR}` from the process environment and make absolute
    pub fn resolve(&self, raw: &str) -> PathBuf {
        self.resolve_with(raw, |name| std::env::var(name).ok())
    }

    /// Like [`PathResolver::resolve`] with a custom variable lookup
    pub fn resolve_with<F>(&self, raw: &str, lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        absolutize(&self.base, Path::new(&expand_env(raw, lookup)))
    }
}

fn current_dir(input: &str) -> Result<PathBuf, CopyError> {
    std::env::current_dir().map_err(|source| CopyError::PathResolve {
        input: input.to_string(),
        source,
    })
}

/// Substitute environment references in `input`
///
/// Unset variables expand to the empty string. A `$` that is not followed by
/// a name or `{` is kept, as is an unterminated `${`.
pub fn expand_env<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                    rest = &braced[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
            continue;
        }

        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if name_len == 0 {
            out.push('$');
        } else {
            out.push_str(&lookup(&after[..name_len]).unwrap_or_default());
        }
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

/// Join `path` onto `base` when relative, then normalize
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Lexically remove `.` and `..` segments
///
/// `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Canonicalize the longest existing prefix of `path`, keep the rest as-is
///
/// Symlinks in the existing part are resolved, so two spellings of the same
/// location compare equal even when the tail has not been created yet.
pub fn canonical_lossy(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut tail = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return tail.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => return normalize(path),
        }
    }
}
