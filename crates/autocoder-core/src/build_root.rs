//! Build-root anchored path resolution.
//!
//! Generated artifact identity (include guards, namespaces) is derived from
//! where generation runs relative to the build root. `BUILD_ROOT` holds one or
//! more root directories separated by `:`; a location must sit under exactly
//! one of them.
//!
//! Resolution failures are returned, never swallowed. Deciding to terminate the
//! process is left to the caller (see the `autocoder` binary).

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::AnchorError;

/// Environment variable naming the build root(s).
pub const BUILD_ROOT_ENV: &str = "BUILD_ROOT";

/// Separator between roots in [`BUILD_ROOT_ENV`].
pub const ROOT_SEPARATOR: char = ':';

/// The configured build roots, normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRoots {
    roots: Vec<PathBuf>,
}

impl BuildRoots {
    /// Build from explicit root directories. Fails with [`AnchorError::Unset`]
    /// when no roots are given.
    pub fn new<I, P>(roots: I) -> Result<Self, AnchorError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut normalized: Vec<PathBuf> = Vec::new();
        for root in roots {
            let root = normalize(root.as_ref());
            if !normalized.contains(&root) {
                normalized.push(root);
            }
        }
        if normalized.is_empty() {
            return Err(AnchorError::Unset);
        }
        Ok(Self { roots: normalized })
    }

    /// Parse a `:`-separated root list. Empty entries are ignored.
    pub fn parse(value: &str) -> Result<Self, AnchorError> {
        Self::new(
            value
                .split(ROOT_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    /// Read roots from `BUILD_ROOT`.
    pub fn from_env() -> Result<Self, AnchorError> {
        Self::from_var(std::env::var_os(BUILD_ROOT_ENV))
    }

    fn from_var(value: Option<OsString>) -> Result<Self, AnchorError> {
        let value = value
            .ok_or(AnchorError::Unset)?
            .into_string()
            .map_err(AnchorError::NotUnicode)?;
        Self::parse(&value)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Express `path` relative to the single root containing it.
    ///
    /// The root itself resolves to an empty path. Matching is per path
    /// component, so `/project` never contains `/project-old`.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf, AnchorError> {
        let path = normalize(path);
        let containing: Vec<&PathBuf> = self.roots.iter().filter(|r| path.starts_with(r)).collect();

        match containing.as_slice() {
            [] => Err(AnchorError::NotFound {
                path,
                roots: self.roots.clone(),
            }),
            [root] => Ok(path
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_default()),
            many => Err(AnchorError::Collision {
                roots: many.iter().map(|r| (*r).clone()).collect(),
                path,
            }),
        }
    }

    /// Find where a root-relative path lives on disk.
    ///
    /// Returns the joined path under the one root where it exists.
    pub fn locate(&self, relative: &Path) -> Result<PathBuf, AnchorError> {
        let found: Vec<PathBuf> = self
            .roots
            .iter()
            .map(|r| r.join(relative))
            .filter(|candidate| candidate.exists())
            .collect();

        match found.len() {
            0 => Err(AnchorError::NotFound {
                path: relative.to_path_buf(),
                roots: self.roots.clone(),
            }),
            1 => Ok(normalize(&found[0])),
            _ => Err(AnchorError::Collision {
                path: relative.to_path_buf(),
                roots: self
                    .roots
                    .iter()
                    .filter(|r| r.join(relative).exists())
                    .cloned()
                    .collect(),
            }),
        }
    }
}

impl std::fmt::Display for BuildRoots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(":");
        f.write_str(&joined)
    }
}

/// Current execution location relative to `BUILD_ROOT`.
///
/// On failure a diagnostic naming the current location and the resolution
/// error is reported to `sink` before the error is returned.
pub fn relative_path(sink: &dyn DiagnosticsSink) -> Result<PathBuf, AnchorError> {
    let location = match std::env::current_dir() {
        Ok(location) => location,
        Err(e) => {
            let err = AnchorError::CurrentDir(e);
            sink.report(Diagnostic::error(err.to_string()));
            return Err(err);
        }
    };
    let resolved = BuildRoots::from_env().and_then(|roots| roots.relative_path(&location));
    report_resolution(&location, resolved, sink)
}

/// [`relative_path`] against explicit roots and location.
pub fn relative_path_in(
    roots: &BuildRoots,
    location: &Path,
    sink: &dyn DiagnosticsSink,
) -> Result<PathBuf, AnchorError> {
    report_resolution(location, roots.relative_path(location), sink)
}

fn report_resolution(
    location: &Path,
    resolved: Result<PathBuf, AnchorError>,
    sink: &dyn DiagnosticsSink,
) -> Result<PathBuf, AnchorError> {
    match resolved {
        Ok(relative) => {
            sink.report(
                Diagnostic::debug(format!("relative path: {}", relative.display())).at(location),
            );
            Ok(relative)
        }
        Err(err) => {
            sink.report(
                Diagnostic::error(format!(
                    "BUILD_ROOT and current execution path ({}) not consistent: {err}",
                    location.display()
                ))
                .at(location),
            );
            Err(err)
        }
    }
}

/// Canonicalise paths that exist. Otherwise fold `.` and `..` lexically and,
/// for absolute paths, canonicalise the longest existing ancestor before
/// re-appending the missing tail, so a not-yet-created directory under a
/// symlinked root compares equal to its resolved form.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let lexical = normalize_lexically(path);
    if !lexical.has_root() {
        return lexical;
    }

    let mut missing: Vec<&OsStr> = Vec::new();
    let mut ancestor = lexical.as_path();
    while let (Some(parent), Some(name)) = (ancestor.parent(), ancestor.file_name()) {
        missing.push(name);
        ancestor = parent;
        if let Ok(canonical) = ancestor.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc, name| acc.join(name));
        }
    }
    lexical
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
