//! The phase contract shared by both role families.
//!
//! This module defines:
//! - `GenerationOutcome`: the per-generator "generate empty file" flag
//! - `PhaseContract`: one required method per [`Phase`], parameterised by role
//! - `Inspector` / `Emitter`: the two role families as blanket traits
//!
//! No phase has a default body. A generator that leaves a phase out does not
//! compile; generators assembled at run time go through
//! [`PartialGenerator`](crate::partial::PartialGenerator), which reports the
//! missing phase by name instead.

use std::cell::Cell;

use crate::error::PhaseResult;
use crate::phase::Phase;
use crate::role::{Emission, Inspection, RoleKind};

/// Per-generator flag requesting that the artifact be materialised empty.
///
/// Starts `false`. [`set_generate_empty_file`](Self::set_generate_empty_file)
/// is the only transition and it is one-way. It takes `&self`; nothing clears
/// the flag on a live value.
///
/// Hooks and drivers only ever see `&GenerationOutcome`, so replacing it is
/// rejected at compile time:
///
/// ```compile_fail
/// use autocoder_core::{GenerationOutcome, Inspection, PartialGenerator, Phase};
///
/// let _gen: PartialGenerator<Inspection, str> =
///     PartialGenerator::new().on(Phase::InitFiles, |_, outcome| {
///         *outcome = GenerationOutcome::new();
///         Ok(())
///     });
/// ```
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    empty_file: Cell<bool>,
}

impl GenerationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an empty artifact. It is up to the phases to honour this for
    /// whatever content they produce; the driver reads it afterwards.
    pub fn set_generate_empty_file(&self) {
        self.empty_file.set(true);
    }

    /// Whether an empty artifact was requested.
    pub fn generate_empty_file(&self) -> bool {
        self.empty_file.get()
    }
}

/// The ordered generation phases for one model element.
///
/// `R` selects the role family, `E` is the model element. The element is
/// opaque to the contract and borrowed for a single phase call.
pub trait PhaseContract<R: RoleKind, E: ?Sized> {
    /// Prepare or open the output artifact(s).
    fn init_files(&mut self, element: &E) -> PhaseResult;

    /// Leading boilerplate (file header, guards).
    fn start_source_files(&mut self, element: &E) -> PhaseResult;

    /// Base-type and port-type includes.
    fn includes_primary(&mut self, element: &E) -> PhaseResult;

    /// Data-type and system includes.
    fn includes_secondary(&mut self, element: &E) -> PhaseResult;

    /// Namespace opening and structural preconditions.
    fn namespace_open(&mut self, element: &E) -> PhaseResult;

    fn public_section(&mut self, element: &E) -> PhaseResult;

    fn protected_section(&mut self, element: &E) -> PhaseResult;

    fn private_section(&mut self, element: &E) -> PhaseResult;

    /// Closing boilerplate.
    fn finish_source_files(&mut self, element: &E) -> PhaseResult;

    fn dict_start(&mut self, element: &E) -> PhaseResult;

    fn dict_header(&mut self, element: &E) -> PhaseResult;

    fn dict_body(&mut self, element: &E) -> PhaseResult;

    /// The generator's empty-file latch. Only a shared borrow is exposed.
    fn outcome(&self) -> &GenerationOutcome;

    /// Request an empty artifact for this generator.
    fn set_generate_empty_file(&self) {
        self.outcome().set_generate_empty_file();
    }

    /// Whether this generator requested an empty artifact.
    fn generate_empty_file(&self) -> bool {
        self.outcome().generate_empty_file()
    }

    /// Dispatch a phase by name to its method.
    fn invoke(&mut self, phase: Phase, element: &E) -> PhaseResult {
        match phase {
            Phase::InitFiles => self.init_files(element),
            Phase::StartSourceFiles => self.start_source_files(element),
            Phase::IncludesPrimary => self.includes_primary(element),
            Phase::IncludesSecondary => self.includes_secondary(element),
            Phase::NamespaceOpen => self.namespace_open(element),
            Phase::PublicSection => self.public_section(element),
            Phase::ProtectedSection => self.protected_section(element),
            Phase::PrivateSection => self.private_section(element),
            Phase::FinishSourceFiles => self.finish_source_files(element),
            Phase::DictStart => self.dict_start(element),
            Phase::DictHeader => self.dict_header(element),
            Phase::DictBody => self.dict_body(element),
        }
    }
}

/// Inspection family: decides what to generate for an element.
pub trait Inspector<E: ?Sized>: PhaseContract<Inspection, E> {}

impl<T, E> Inspector<E> for T
where
    T: PhaseContract<Inspection, E> + ?Sized,
    E: ?Sized,
{
}

/// Emission family: physically writes the decided content.
pub trait Emitter<E: ?Sized>: PhaseContract<Emission, E> {}

impl<T, E> Emitter<E> for T
where
    T: PhaseContract<Emission, E> + ?Sized,
    E: ?Sized,
{
}
