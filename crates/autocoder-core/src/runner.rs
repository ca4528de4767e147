//! Ordered phase execution for one model element.
//!
//! Drivers call [`run_phases`] (or one of the role-specific wrappers) once per
//! artifact. The runner walks the sequence in contract order, stops at the
//! first failing phase, and reports the generator's empty-file flag afterwards.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::contract::{Emitter, Inspector, PhaseContract};
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::PhaseResult;
use crate::phase::{Phase, PhaseSequence};
use crate::role::{Emission, Inspection, Role, RoleKind};

/// Result of running one phase sequence to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    /// Role family the generator belongs to.
    pub role: Role,

    /// Sequence that was run.
    pub sequence: PhaseSequence,

    /// Phases executed, in order.
    pub phases_run: Vec<Phase>,

    /// Value of the generator's empty-file flag after the last phase.
    pub empty_file: bool,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl PhaseReport {
    /// Whether the driver should materialise this artifact without a body.
    pub fn is_empty_artifact(&self) -> bool {
        self.empty_file
    }

    /// Whether every phase of the sequence ran.
    pub fn completed(&self) -> bool {
        self.phases_run.as_slice() == self.sequence.phases()
    }
}

/// Run every phase of `sequence` on `generator`, in contract order.
///
/// The first error is reported to `sink` and returned unchanged; later phases
/// are not invoked.
pub fn run_phases<R, E, G>(
    generator: &mut G,
    element: &E,
    sequence: PhaseSequence,
    sink: &dyn DiagnosticsSink,
) -> PhaseResult<PhaseReport>
where
    R: RoleKind,
    E: ?Sized,
    G: PhaseContract<R, E> + ?Sized,
{
    let start = Instant::now();
    let role = R::ROLE;
    let span = tracing::info_span!("autocoder.artifact", role = %role, sequence = %sequence);
    let _guard = span.enter();

    let mut phases_run = Vec::with_capacity(sequence.phases().len());
    for &phase in sequence.phases() {
        debug!(event = "phase.started", phase = %phase);
        if let Err(err) = generator.invoke(phase, element) {
            sink.report(Diagnostic::error(format!(
                "{role} {sequence} run stopped at phase {phase}: {err}"
            )));
            return Err(err);
        }
        phases_run.push(phase);
    }

    let empty_file = generator.generate_empty_file();
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        event = "artifact.finished",
        phases = phases_run.len(),
        empty_file = empty_file,
        duration_ms = duration_ms,
    );

    Ok(PhaseReport {
        role,
        sequence,
        phases_run,
        empty_file,
        duration_ms,
    })
}

/// Run the artifact sequence on an inspection generator.
pub fn inspect_artifact<E, G>(
    generator: &mut G,
    element: &E,
    sink: &dyn DiagnosticsSink,
) -> PhaseResult<PhaseReport>
where
    E: ?Sized,
    G: Inspector<E> + ?Sized,
{
    run_phases::<Inspection, E, G>(generator, element, PhaseSequence::Artifact, sink)
}

/// Run the artifact sequence on an emission generator, writing the whole file.
pub fn write_artifact<E, G>(
    generator: &mut G,
    element: &E,
    sink: &dyn DiagnosticsSink,
) -> PhaseResult<PhaseReport>
where
    E: ?Sized,
    G: Emitter<E> + ?Sized,
{
    run_phases::<Emission, E, G>(generator, element, PhaseSequence::Artifact, sink)
}

/// Run the dictionary sub-sequence for a dictionary entry.
pub fn run_dictionary<R, E, G>(
    generator: &mut G,
    element: &E,
    sink: &dyn DiagnosticsSink,
) -> PhaseResult<PhaseReport>
where
    R: RoleKind,
    E: ?Sized,
    G: PhaseContract<R, E> + ?Sized,
{
    run_phases::<R, E, G>(generator, element, PhaseSequence::Dictionary, sink)
}
