//! Error taxonomy for the phase contract and build-root resolution.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::phase::Phase;
use crate::role::Role;

/// Errors raised while resolving a path against the configured build roots.
///
/// Every variant is fatal for the whole generation run: nothing that depends
/// on a relative location can proceed once the anchor is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    #[error("BUILD_ROOT is not set or lists no directories")]
    Unset,

    #[error("BUILD_ROOT is not valid UTF-8: {}", .0.to_string_lossy())]
    NotUnicode(OsString),

    #[error("cannot determine current execution path: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("path {} is not inside any build root ({})", .path.display(), join_roots(.roots))]
    NotFound { path: PathBuf, roots: Vec<PathBuf> },

    #[error("path {} is inside multiple build roots ({})", .path.display(), join_roots(.roots))]
    Collision { path: PathBuf, roots: Vec<PathBuf> },
}

impl AnchorError {
    /// The location the failed resolution was about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            AnchorError::NotFound { path, .. } | AnchorError::Collision { path, .. } => Some(path),
            AnchorError::Unset | AnchorError::NotUnicode(_) | AnchorError::CurrentDir(_) => None,
        }
    }
}

fn join_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(":")
}

/// Errors produced while invoking generation phases.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    #[error("{role} phase {phase} is not implemented: supply a concrete implementation")]
    Unimplemented { role: Role, phase: Phase },

    #[error("phase {phase} failed: {source}")]
    Failed {
        phase: Phase,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("build root error: {0}")]
    Anchor(#[from] AnchorError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PhaseError {
    /// Wrap a concrete phase implementation's own failure.
    pub fn failed(
        phase: Phase,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        PhaseError::Failed {
            phase,
            source: source.into(),
        }
    }

    /// The phase this error names, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            PhaseError::Unimplemented { phase, .. } | PhaseError::Failed { phase, .. } => {
                Some(*phase)
            }
            PhaseError::Anchor(_) | PhaseError::Io(_) => None,
        }
    }
}

/// Result type for a single phase invocation.
pub type PhaseResult<T = ()> = std::result::Result<T, PhaseError>;
