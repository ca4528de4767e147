//! Phase vocabulary and the fixed phase orderings.

use serde::{Deserialize, Serialize};

/// The named generation phases, in contract order.
///
/// The first nine phases build one source artifact. The last three form the
/// dictionary sub-sequence used only for command/telemetry dictionary entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Prepare or open the output artifact(s) for a model element.
    InitFiles,

    /// Leading boilerplate: file header, include guards.
    StartSourceFiles,

    /// Includes for base types and port types.
    IncludesPrimary,

    /// Includes for data types and system headers.
    IncludesSecondary,

    /// Namespace opening and any structural preconditions.
    NamespaceOpen,

    /// Public-visibility content block.
    PublicSection,

    /// Protected-visibility content block.
    ProtectedSection,

    /// Private-visibility content block.
    PrivateSection,

    /// Closing boilerplate.
    FinishSourceFiles,

    /// Start of a dictionary artifact.
    DictStart,

    /// Dictionary header.
    DictHeader,

    /// Dictionary body.
    DictBody,
}

impl Phase {
    /// Artifact phases, in the order every driver must invoke them.
    pub const ARTIFACT: [Phase; 9] = [
        Phase::InitFiles,
        Phase::StartSourceFiles,
        Phase::IncludesPrimary,
        Phase::IncludesSecondary,
        Phase::NamespaceOpen,
        Phase::PublicSection,
        Phase::ProtectedSection,
        Phase::PrivateSection,
        Phase::FinishSourceFiles,
    ];

    /// Dictionary sub-sequence.
    pub const DICTIONARY: [Phase; 3] = [Phase::DictStart, Phase::DictHeader, Phase::DictBody];

    /// Every phase of the contract.
    pub const ALL: [Phase; 12] = [
        Phase::InitFiles,
        Phase::StartSourceFiles,
        Phase::IncludesPrimary,
        Phase::IncludesSecondary,
        Phase::NamespaceOpen,
        Phase::PublicSection,
        Phase::ProtectedSection,
        Phase::PrivateSection,
        Phase::FinishSourceFiles,
        Phase::DictStart,
        Phase::DictHeader,
        Phase::DictBody,
    ];

    /// Get the phase name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::InitFiles => "init_files",
            Phase::StartSourceFiles => "start_source_files",
            Phase::IncludesPrimary => "includes_primary",
            Phase::IncludesSecondary => "includes_secondary",
            Phase::NamespaceOpen => "namespace_open",
            Phase::PublicSection => "public_section",
            Phase::ProtectedSection => "protected_section",
            Phase::PrivateSection => "private_section",
            Phase::FinishSourceFiles => "finish_source_files",
            Phase::DictStart => "dict_start",
            Phase::DictHeader => "dict_header",
            Phase::DictBody => "dict_body",
        }
    }

    /// The sequence this phase belongs to.
    pub fn sequence(&self) -> PhaseSequence {
        match self {
            Phase::DictStart | Phase::DictHeader | Phase::DictBody => PhaseSequence::Dictionary,
            _ => PhaseSequence::Artifact,
        }
    }

    /// Look up a phase by its [`name`](Phase::name).
    pub fn from_name(name: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which ordered sub-sequence of the contract a driver is running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PhaseSequence {
    /// Phases `init_files` through `finish_source_files`.
    Artifact,

    /// Phases `dict_start`, `dict_header`, `dict_body`.
    Dictionary,
}

impl PhaseSequence {
    /// The phases of this sequence, in order.
    pub fn phases(&self) -> &'static [Phase] {
        match self {
            PhaseSequence::Artifact => &Phase::ARTIFACT,
            PhaseSequence::Dictionary => &Phase::DICTIONARY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhaseSequence::Artifact => "artifact",
            PhaseSequence::Dictionary => "dictionary",
        }
    }
}

impl std::fmt::Display for PhaseSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
