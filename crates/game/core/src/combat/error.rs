//! Reasons a combat command is refused.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardInstanceId, CombatPhase};

/// A combat command that was rejected before touching any state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("card {0} is not in hand")]
    CardNotInHand(CardInstanceId),

    #[error("card costs {cost} energy but only {available} is available")]
    InsufficientEnergy { cost: u32, available: u32 },

    #[error("no living enemy at target index {index}")]
    InvalidTarget { index: usize },

    #[error("combat is not accepting commands in phase {0:?}")]
    WrongPhase(CombatPhase),

    #[error("a card selection must be resolved first")]
    SelectionPending,

    #[error("no card selection is pending")]
    NoSelectionPending,

    #[error("card {0} cannot be upgraded")]
    CardNotUpgradable(CardInstanceId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CardNotInHand(_) | Self::InvalidTarget { .. } | Self::CardNotUpgradable(_) => {
                ErrorSeverity::Validation
            }
            Self::InsufficientEnergy { .. }
            | Self::WrongPhase(_)
            | Self::SelectionPending
            | Self::NoSelectionPending => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CardNotInHand(_) => "COMBAT_CARD_NOT_IN_HAND",
            Self::InsufficientEnergy { .. } => "COMBAT_INSUFFICIENT_ENERGY",
            Self::InvalidTarget { .. } => "COMBAT_INVALID_TARGET",
            Self::WrongPhase(_) => "COMBAT_WRONG_PHASE",
            Self::SelectionPending => "COMBAT_SELECTION_PENDING",
            Self::NoSelectionPending => "COMBAT_NO_SELECTION_PENDING",
            Self::CardNotUpgradable(_) => "COMBAT_CARD_NOT_UPGRADABLE",
        }
    }
}
