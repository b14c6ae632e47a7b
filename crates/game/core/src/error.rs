//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`CombatError`, `MapError`) live next to the rules
//! that produce them. Every one of them describes a command that was refused
//! before any state was touched; none of them is fatal to a run.

/// Severity level of an error, used by callers to pick a handling strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The command names something that does not exist or cannot be chosen.
    ///
    /// Examples: card not in hand, unknown node, node not available.
    /// Usually a desync between the caller's view and the current state.
    Validation,

    /// The command is well formed but cannot apply right now.
    ///
    /// Examples: not enough energy, an upgrade selection is pending.
    Recoverable,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Recoverable => "recoverable",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    ///
    /// Useful for log fields and for matching in tests.
    fn error_code(&self) -> &'static str;
}
