//! Role vocabulary: the two parallel phase-contract families.
//!
//! An inspection generator decides what an artifact should contain; an
//! emission generator physically writes it. Both expose the same phases in
//! the same order, so the markers below only tag which family a
//! [`PhaseContract`](crate::contract::PhaseContract) implementation belongs to.

use serde::{Deserialize, Serialize};

/// The two role families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Inspection,
    Emission,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Inspection, Role::Emission];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Inspection => "inspection",
            Role::Emission => "emission",
        };
        write!(f, "{s}")
    }
}

/// Type-level tag selecting a role family.
pub trait RoleKind: 'static {
    const ROLE: Role;
}

/// Marker for the inspection family ("what should be generated").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inspection;

/// Marker for the emission family ("how it is physically written").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emission;

impl RoleKind for Inspection {
    const ROLE: Role = Role::Inspection;
}

impl RoleKind for Emission {
    const ROLE: Role = Role::Emission;
}
