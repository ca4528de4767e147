//! Generators assembled from per-phase hooks at run time.
//!
//! `PartialGenerator` satisfies [`PhaseContract`] for any role. Phases without
//! a registered hook fail with [`PhaseError::Unimplemented`] naming the phase,
//! so registering some hooks never grants a silent default to the others.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::contract::{GenerationOutcome, PhaseContract};
use crate::error::{PhaseError, PhaseResult};
use crate::phase::Phase;
use crate::role::RoleKind;

/// A single phase implementation. Hooks receive the generator's outcome flag
/// by shared reference, so they can request an empty artifact but never clear
/// one.
pub type PhaseHook<E> = Box<dyn FnMut(&E, &GenerationOutcome) -> PhaseResult>;

/// Hook-table generator for role `R` over model element `E`.
pub struct PartialGenerator<R: RoleKind, E: ?Sized> {
    hooks: BTreeMap<Phase, PhaseHook<E>>,
    outcome: GenerationOutcome,
    _role: PhantomData<fn() -> R>,
}

impl<R: RoleKind, E: ?Sized> PartialGenerator<R, E> {
    /// A generator with no phases implemented.
    pub fn new() -> Self {
        Self {
            hooks: BTreeMap::new(),
            outcome: GenerationOutcome::new(),
            _role: PhantomData,
        }
    }

    /// Register `hook` for `phase`, replacing any previous hook.
    pub fn on<F>(mut self, phase: Phase, hook: F) -> Self
    where
        F: FnMut(&E, &GenerationOutcome) -> PhaseResult + 'static,
    {
        self.set_hook(phase, hook);
        self
    }

    pub fn set_hook<F>(&mut self, phase: Phase, hook: F)
    where
        F: FnMut(&E, &GenerationOutcome) -> PhaseResult + 'static,
    {
        self.hooks.insert(phase, Box::new(hook));
    }

    /// Whether `phase` has a hook.
    pub fn implements(&self, phase: Phase) -> bool {
        self.hooks.contains_key(&phase)
    }

    /// Phases with a hook, in contract order.
    pub fn implemented_phases(&self) -> Vec<Phase> {
        self.hooks.keys().copied().collect()
    }

    /// Phases still lacking a hook, in contract order.
    pub fn missing_phases(&self) -> Vec<Phase> {
        Phase::ALL
            .into_iter()
            .filter(|p| !self.hooks.contains_key(p))
            .collect()
    }

    fn call(&mut self, phase: Phase, element: &E) -> PhaseResult {
        match self.hooks.get_mut(&phase) {
            Some(hook) => hook(element, &self.outcome),
            None => Err(PhaseError::Unimplemented {
                role: R::ROLE,
                phase,
            }),
        }
    }
}

impl<R: RoleKind, E: ?Sized> Default for PartialGenerator<R, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RoleKind, E: ?Sized> std::fmt::Debug for PartialGenerator<R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialGenerator")
            .field("role", &R::ROLE)
            .field("phases", &self.implemented_phases())
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl<R: RoleKind, E: ?Sized> PhaseContract<R, E> for PartialGenerator<R, E> {
    fn init_files(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::InitFiles, element)
    }

    fn start_source_files(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::StartSourceFiles, element)
    }

    fn includes_primary(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::IncludesPrimary, element)
    }

    fn includes_secondary(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::IncludesSecondary, element)
    }

    fn namespace_open(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::NamespaceOpen, element)
    }

    fn public_section(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::PublicSection, element)
    }

    fn protected_section(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::ProtectedSection, element)
    }

    fn private_section(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::PrivateSection, element)
    }

    fn finish_source_files(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::FinishSourceFiles, element)
    }

    fn dict_start(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::DictStart, element)
    }

    fn dict_header(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::DictHeader, element)
    }

    fn dict_body(&mut self, element: &E) -> PhaseResult {
        self.call(Phase::DictBody, element)
    }

    fn outcome(&self) -> &GenerationOutcome {
        &self.outcome
    }
}
