//! Autocoder Core - the phase contract for model-driven code generators.
//!
//! Every generator turns one model element (a port, a component, a
//! dictionary entry) into an artifact by implementing the same ordered set of
//! phases. Two role families share that contract:
//!
//! - **inspection** generators decide what an artifact should contain
//! - **emission** generators physically write it
//!
//! # Module layout
//!
//! - [`phase`]: `Phase`, `PhaseSequence` and the fixed phase orderings
//! - [`role`]: `Role`, `RoleKind` and the `Inspection` / `Emission` markers
//! - [`contract`]: `PhaseContract`, `Inspector`, `Emitter`, `GenerationOutcome`
//! - [`partial`]: `PartialGenerator`, a hook-table generator assembled at run time
//! - [`runner`]: `run_phases`, `write_artifact`, `inspect_artifact`, `PhaseReport`
//! - [`build_root`]: `BuildRoots`, `relative_path`
//! - [`tokens`]: `is_sync`, `is_async`, `is_serial`, `is_input`, `classify`
//! - [`diagnostics`]: `DiagnosticsSink`, `TracingSink`, `MemorySink`
//! - [`error`]: `PhaseError`, `AnchorError`

pub mod build_root;
pub mod contract;
pub mod diagnostics;
pub mod error;
pub mod partial;
pub mod phase;
pub mod role;
pub mod runner;
pub mod telemetry;
pub mod tokens;

pub use build_root::{relative_path, relative_path_in, BuildRoots, BUILD_ROOT_ENV};
pub use contract::{Emitter, GenerationOutcome, Inspector, PhaseContract};
pub use diagnostics::{Diagnostic, DiagnosticsSink, MemorySink, Severity, TracingSink};
pub use error::{AnchorError, PhaseError, PhaseResult};
pub use partial::{PartialGenerator, PhaseHook};
pub use phase::{Phase, PhaseSequence};
pub use role::{Emission, Inspection, Role, RoleKind};
pub use runner::{inspect_artifact, run_dictionary, run_phases, write_artifact, PhaseReport};
pub use telemetry::init_tracing;
pub use tokens::{classify, is_async, is_input, is_serial, is_sync, TokenKind};
