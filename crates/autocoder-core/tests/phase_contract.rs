//! Contract tests for the phase protocol.
//!
//! Any conforming generator, in either role, must satisfy these: every phase
//! is named and ordered identically, missing phases fail loudly by name, and
//! the empty-file flag only ever latches on.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use autocoder_core::{
    inspect_artifact, is_async, is_input, is_sync, run_dictionary, run_phases, write_artifact,
    Emission, GenerationOutcome, Inspection, MemorySink, PartialGenerator, Phase, PhaseContract,
    PhaseError, PhaseResult, PhaseSequence, Role, RoleKind,
};

// ===========================================================================
// Role conformance
// ===========================================================================

fn unimplemented_surface<R: RoleKind>() -> Vec<(Phase, String)> {
    let mut generator: PartialGenerator<R, str> = PartialGenerator::new();
    Phase::ALL
        .into_iter()
        .map(|phase| {
            let err = generator.invoke(phase, "element").unwrap_err();
            match &err {
                PhaseError::Unimplemented { role, phase: named } => {
                    assert_eq!(*role, R::ROLE);
                    assert_eq!(*named, phase);
                }
                other => panic!("expected unimplemented error, got {other:?}"),
            }
            (phase, err.to_string())
        })
        .collect()
}

#[test]
fn every_phase_fails_by_name_on_an_empty_inspector() {
    for (phase, message) in unimplemented_surface::<Inspection>() {
        assert!(message.contains(phase.name()), "{message}");
        assert!(message.contains("inspection"), "{message}");
    }
}

#[test]
fn every_phase_fails_by_name_on_an_empty_emitter() {
    for (phase, message) in unimplemented_surface::<Emission>() {
        assert!(message.contains(phase.name()), "{message}");
        assert!(message.contains("emission"), "{message}");
    }
}

#[test]
fn both_roles_expose_identical_phase_surfaces() {
    let inspection = unimplemented_surface::<Inspection>();
    let emission = unimplemented_surface::<Emission>();

    let inspection_phases: Vec<Phase> = inspection.iter().map(|(p, _)| *p).collect();
    let emission_phases: Vec<Phase> = emission.iter().map(|(p, _)| *p).collect();
    assert_eq!(inspection_phases, emission_phases);

    for ((_, a), (_, b)) in inspection.iter().zip(&emission) {
        assert_eq!(
            a.replace("inspection", "ROLE"),
            b.replace("emission", "ROLE")
        );
    }
}

#[test]
fn overriding_public_section_only_leaves_includes_primary_unimplemented() {
    let mut generator: PartialGenerator<Inspection, str> =
        PartialGenerator::new().on(Phase::PublicSection, |_, _| Ok(()));

    assert!(generator.public_section("port").is_ok());
    let err = generator.includes_primary("port").unwrap_err();
    assert!(matches!(
        err,
        PhaseError::Unimplemented {
            role: Role::Inspection,
            phase: Phase::IncludesPrimary,
        }
    ));
    assert!(err.to_string().contains("includes_primary"));
}

#[test]
fn fresh_generators_start_without_empty_file_request() {
    let inspector: PartialGenerator<Inspection, str> = PartialGenerator::new();
    let emitter: PartialGenerator<Emission, str> = PartialGenerator::new();
    assert!(!inspector.generate_empty_file());
    assert!(!emitter.generate_empty_file());
}

#[test]
fn empty_file_flag_never_reverts() {
    let mut generator: PartialGenerator<Emission, str> = PartialGenerator::new();
    generator.set_generate_empty_file();
    assert!(generator.generate_empty_file());

    for phase in Phase::ALL {
        let _ = generator.invoke(phase, "element");
        assert!(generator.generate_empty_file(), "cleared by {phase}");
    }
    generator.set_generate_empty_file();
    assert!(generator.generate_empty_file());
}

#[test]
fn only_the_setter_raises_the_flag() {
    let mut generator: PartialGenerator<Inspection, str> = PartialGenerator::new();
    for phase in Phase::ALL {
        generator.set_hook(phase, |_, _| Ok(()));
    }
    let sink = MemorySink::new();
    inspect_artifact(&mut generator, "element", &sink).unwrap();
    run_dictionary::<Inspection, _, _>(&mut generator, "element", &sink).unwrap();
    assert!(!generator.generate_empty_file());
}

#[test]
fn flag_raised_by_a_hook_survives_later_hooks_and_runs() {
    let seen_by_later_hook = Rc::new(RefCell::new(Vec::new()));
    let mut generator: PartialGenerator<Emission, str> = PartialGenerator::new();
    for phase in Phase::ALL {
        let seen = Rc::clone(&seen_by_later_hook);
        generator.set_hook(phase, move |element, outcome| {
            if phase == Phase::IncludesPrimary && element.is_empty() {
                outcome.set_generate_empty_file();
            }
            seen.borrow_mut().push(outcome.generate_empty_file());
            Ok(())
        });
    }
    let sink = MemorySink::new();

    write_artifact(&mut generator, "", &sink).unwrap();
    assert_eq!(
        *seen_by_later_hook.borrow(),
        vec![false, false, true, true, true, true, true, true, true]
    );

    // A second run on a non-empty element does not lower it.
    let report = write_artifact(&mut generator, "port", &sink).unwrap();
    assert!(report.is_empty_artifact());
    run_dictionary::<Emission, _, _>(&mut generator, "port", &sink).unwrap();
    assert!(generator.generate_empty_file());
    assert!(generator.outcome().generate_empty_file());
}

// ===========================================================================
// A statically implemented generator pair
// ===========================================================================

/// Minimal port model used as the opaque element.
struct PortSpec {
    name: &'static str,
    namespace: &'static str,
    kind: Option<&'static str>,
    direction: Option<&'static str>,
    args: Vec<&'static str>,
}

impl PortSpec {
    fn sample() -> Self {
        Self {
            name: "CmdReg",
            namespace: "Fw",
            kind: Some("Sync"),
            direction: Some("INPUT"),
            args: vec!["U32", "FwOpcodeType"],
        }
    }
}

/// Decides the include set and whether the port body is empty.
#[derive(Default)]
struct PortInspector {
    outcome: GenerationOutcome,
    includes: BTreeSet<String>,
    visited: Vec<Phase>,
}

impl PortInspector {
    fn visit(&mut self, phase: Phase) -> PhaseResult {
        self.visited.push(phase);
        Ok(())
    }
}

impl PhaseContract<Inspection, PortSpec> for PortInspector {
    fn init_files(&mut self, port: &PortSpec) -> PhaseResult {
        if port.args.is_empty() {
            self.outcome.set_generate_empty_file();
        }
        self.visit(Phase::InitFiles)
    }
    fn start_source_files(&mut self, _: &PortSpec) -> PhaseResult {
        self.visit(Phase::StartSourceFiles)
    }
    fn includes_primary(&mut self, _: &PortSpec) -> PhaseResult {
        self.includes.insert("Fw/Port/InputPortBase.hpp".to_string());
        self.visit(Phase::IncludesPrimary)
    }
    fn includes_secondary(&mut self, port: &PortSpec) -> PhaseResult {
        for arg in &port.args {
            if arg.starts_with("Fw") {
                self.includes.insert("Fw/Types/BasicTypes.hpp".to_string());
            }
        }
        self.visit(Phase::IncludesSecondary)
    }
    fn namespace_open(&mut self, _: &PortSpec) -> PhaseResult {
        self.visit(Phase::NamespaceOpen)
    }
    fn public_section(&mut self, _: &PortSpec) -> PhaseResult {
        self.visit(Phase::PublicSection)
    }
    fn protected_section(&mut self, _: &PortSpec) -> PhaseResult {
        self.visit(Phase::ProtectedSection)
    }
    fn private_section(&mut self, _: &PortSpec) -> PhaseResult {
        self.visit(Phase::PrivateSection)
    }
    fn finish_source_files(&mut self, _: &PortSpec) -> PhaseResult {
        self.visit(Phase::FinishSourceFiles)
    }
    fn dict_start(&mut self, _: &PortSpec) -> PhaseResult {
        Err(PhaseError::failed(Phase::DictStart, "ports are not dictionary entries"))
    }
    fn dict_header(&mut self, _: &PortSpec) -> PhaseResult {
        Err(PhaseError::failed(Phase::DictHeader, "ports are not dictionary entries"))
    }
    fn dict_body(&mut self, _: &PortSpec) -> PhaseResult {
        Err(PhaseError::failed(Phase::DictBody, "ports are not dictionary entries"))
    }
    fn outcome(&self) -> &GenerationOutcome {
        &self.outcome
    }
}

/// Writes the decided content into an in-memory buffer.
struct PortEmitter {
    outcome: GenerationOutcome,
    includes: Vec<String>,
    out: String,
}

impl PortEmitter {
    fn new(includes: impl IntoIterator<Item = String>) -> Self {
        Self {
            outcome: GenerationOutcome::new(),
            includes: includes.into_iter().collect(),
            out: String::new(),
        }
    }

    fn line(&mut self, text: &str) -> PhaseResult {
        self.out.push_str(text);
        self.out.push('\n');
        Ok(())
    }
}

impl PhaseContract<Emission, PortSpec> for PortEmitter {
    fn init_files(&mut self, _: &PortSpec) -> PhaseResult {
        self.out.clear();
        Ok(())
    }
    fn start_source_files(&mut self, port: &PortSpec) -> PhaseResult {
        let guard = format!("{}_{}_PORT_HPP", port.namespace, port.name).to_uppercase();
        self.line(&format!("#ifndef {guard}"))?;
        self.line(&format!("#define {guard}"))
    }
    fn includes_primary(&mut self, _: &PortSpec) -> PhaseResult {
        let includes = std::mem::take(&mut self.includes);
        for include in &includes {
            self.line(&format!("#include <{include}>"))?;
        }
        self.includes = includes;
        Ok(())
    }
    fn includes_secondary(&mut self, _: &PortSpec) -> PhaseResult {
        Ok(())
    }
    fn namespace_open(&mut self, port: &PortSpec) -> PhaseResult {
        self.line(&format!("namespace {} {{", port.namespace))
    }
    fn public_section(&mut self, port: &PortSpec) -> PhaseResult {
        let mut decl = format!("class Input{}Port {{ public:", port.name);
        if is_sync(port.kind) {
            decl.push_str(" // sync");
        } else if is_async(port.kind) {
            decl.push_str(" // async");
        }
        self.line(&decl)
    }
    fn protected_section(&mut self, _: &PortSpec) -> PhaseResult {
        self.line("protected:")
    }
    fn private_section(&mut self, port: &PortSpec) -> PhaseResult {
        let direction = if is_input(port.direction) { "input" } else { "output" };
        self.line(&format!("private: // {direction}, {} args", port.args.len()))
    }
    fn finish_source_files(&mut self, _: &PortSpec) -> PhaseResult {
        self.line("}; }")?;
        self.line("#endif")
    }
    fn dict_start(&mut self, _: &PortSpec) -> PhaseResult {
        Err(PhaseError::failed(Phase::DictStart, "ports are not dictionary entries"))
    }
    fn dict_header(&mut self, _: &PortSpec) -> PhaseResult {
        Err(PhaseError::failed(Phase::DictHeader, "ports are not dictionary entries"))
    }
    fn dict_body(&mut self, _: &PortSpec) -> PhaseResult {
        Err(PhaseError::failed(Phase::DictBody, "ports are not dictionary entries"))
    }
    fn outcome(&self) -> &GenerationOutcome {
        &self.outcome
    }
}

#[test]
fn inspection_then_emission_renders_a_port() {
    let port = PortSpec::sample();
    let sink = MemorySink::new();

    let mut inspector = PortInspector::default();
    let decided = inspect_artifact(&mut inspector, &port, &sink).unwrap();
    assert!(decided.completed());
    assert!(!decided.is_empty_artifact());
    assert_eq!(inspector.visited, Phase::ARTIFACT.to_vec());

    let mut emitter = PortEmitter::new(inspector.includes.clone());
    let written = write_artifact(&mut emitter, &port, &sink).unwrap();
    assert_eq!(written.role, Role::Emission);

    let text = &emitter.out;
    assert!(text.starts_with("#ifndef FW_CMDREG_PORT_HPP\n"));
    assert!(text.contains("#include <Fw/Port/InputPortBase.hpp>"));
    assert!(text.contains("#include <Fw/Types/BasicTypes.hpp>"));
    assert!(text.contains("namespace Fw {"));
    assert!(text.contains("// sync"));
    assert!(text.contains("private: // input, 2 args"));
    assert!(text.trim_end().ends_with("#endif"));

    let public = text.find("public:").unwrap();
    let protected = text.find("protected:").unwrap();
    let private = text.find("private:").unwrap();
    assert!(public < protected && protected < private);
    assert!(sink.errors().is_empty());
}

#[test]
fn inspector_requests_empty_file_for_argless_port() {
    let port = PortSpec {
        args: Vec::new(),
        ..PortSpec::sample()
    };
    let sink = MemorySink::new();
    let mut inspector = PortInspector::default();

    let report = inspect_artifact(&mut inspector, &port, &sink).unwrap();

    assert!(report.is_empty_artifact());
    assert!(report.completed());
}

#[test]
fn dictionary_sequence_on_a_port_generator_fails_at_dict_start() {
    let port = PortSpec::sample();
    let sink = MemorySink::new();
    let mut emitter = PortEmitter::new(Vec::new());

    let err = run_dictionary::<Emission, _, _>(&mut emitter, &port, &sink).unwrap_err();

    assert_eq!(err.phase(), Some(Phase::DictStart));
    assert!(emitter.out.is_empty());
    assert_eq!(sink.errors().len(), 1);
}

#[test]
fn one_type_may_implement_both_roles() {
    #[derive(Default)]
    struct Both {
        outcome: GenerationOutcome,
    }

    macro_rules! all_ok {
        ($role:ty) => {
            impl PhaseContract<$role, str> for Both {
                fn init_files(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn start_source_files(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn includes_primary(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn includes_secondary(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn namespace_open(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn public_section(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn protected_section(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn private_section(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn finish_source_files(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn dict_start(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn dict_header(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn dict_body(&mut self, _: &str) -> PhaseResult { Ok(()) }
                fn outcome(&self) -> &GenerationOutcome { &self.outcome }
            }
        };
    }
    all_ok!(Inspection);
    all_ok!(Emission);

    let sink = MemorySink::new();
    let mut both = Both::default();
    let inspected = inspect_artifact(&mut both, "tlm", &sink).unwrap();
    let written = write_artifact(&mut both, "tlm", &sink).unwrap();
    assert_eq!(inspected.role, Role::Inspection);
    assert_eq!(written.role, Role::Emission);

    let dict = run_phases::<Emission, _, _>(&mut both, "tlm", PhaseSequence::Dictionary, &sink)
        .unwrap();
    assert_eq!(dict.phases_run, Phase::DICTIONARY.to_vec());
}

#[test]
fn hooks_can_share_state_across_phases() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut generator: PartialGenerator<Emission, str> = PartialGenerator::new();
    for phase in Phase::DICTIONARY {
        let seen = Rc::clone(&seen);
        generator.set_hook(phase, move |entry, _| {
            seen.borrow_mut().push(format!("{phase}:{entry}"));
            Ok(())
        });
    }
    let sink = MemorySink::new();

    run_dictionary::<Emission, _, _>(&mut generator, "CMD_NO_OP", &sink).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            "dict_start:CMD_NO_OP".to_string(),
            "dict_header:CMD_NO_OP".to_string(),
            "dict_body:CMD_NO_OP".to_string(),
        ]
    );
}
