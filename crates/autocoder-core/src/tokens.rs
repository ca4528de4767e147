//! Classification of model attribute tokens.
//!
//! Ports and commands carry kind attributes such as `kind="sync"` or
//! `direction="input"`. These predicates are total: an absent attribute is
//! simply none of the kinds.

use serde::{Deserialize, Serialize};

/// The attribute kinds phase implementations branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Sync,
    Async,
    Serial,
    Input,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Sync,
        TokenKind::Async,
        TokenKind::Serial,
        TokenKind::Input,
    ];

    /// Canonical lowercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Sync => "sync",
            TokenKind::Async => "async",
            TokenKind::Serial => "serial",
            TokenKind::Input => "input",
        }
    }

    /// Case-insensitive exact match.
    pub fn matches(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| t.eq_ignore_ascii_case(self.as_str()))
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single kind `token` spells, if any.
pub fn classify(token: Option<&str>) -> Option<TokenKind> {
    TokenKind::ALL.into_iter().find(|k| k.matches(token))
}

pub fn is_sync(token: Option<&str>) -> bool {
    TokenKind::Sync.matches(token)
}

pub fn is_async(token: Option<&str>) -> bool {
    TokenKind::Async.matches(token)
}

pub fn is_serial(token: Option<&str>) -> bool {
    TokenKind::Serial.matches(token)
}

pub fn is_input(token: Option<&str>) -> bool {
    TokenKind::Input.matches(token)
}
