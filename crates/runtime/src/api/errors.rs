//! Error types surfaced by the store API.
//!
//! Two families live here. [`CommandRejection`] explains why a command was
//! ignored; it never aborts a run and the state is untouched whenever one is
//! produced. [`RuntimeError`] covers failures while building the store.
use std::fmt;

use game_content::ContentError;
use game_core::{CardInstanceId, CombatError, ErrorSeverity, GameError, MapError};
use thiserror::Error;

pub use crate::repository::RepositoryError;
use crate::snapshot::GamePhase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("content catalog is inconsistent")]
    InvalidContent(#[source] ContentError),
}

/// Run-scoped currencies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Currency {
    DivineFavor,
    AdamantShards,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Currency::DivineFavor => "divine favor",
            Currency::AdamantShards => "adamant shards",
        };
        write!(f, "{}", label)
    }
}

/// Reason a command was ignored.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CommandRejection {
    #[error("no run in progress")]
    NoActiveRun,

    #[error("command not available during the {0:?} phase")]
    WrongPhase(GamePhase),

    #[error("no combat in progress")]
    NoCombat,

    #[error("not enough {currency}: need {needed}, have {available}")]
    InsufficientFunds {
        currency: Currency,
        needed: u32,
        available: u32,
    },

    #[error("{0} is not in the deck")]
    CardNotInDeck(CardInstanceId),

    #[error("{0} cannot be upgraded")]
    CardNotUpgradable(CardInstanceId),

    #[error("no reward waiting to be claimed")]
    NoReward,

    #[error("card '{0}' is not one of the offered choices")]
    CardNotOffered(String),

    #[error("no event in progress")]
    NoEvent,

    #[error("event has no option {0}")]
    InvalidEventOption(usize),

    #[error("settings patch is empty")]
    EmptySettingsPatch,

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl GameError for CommandRejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            Self::Map(err) => err.severity(),
            Self::CardNotInDeck(_)
            | Self::CardNotUpgradable(_)
            | Self::CardNotOffered(_)
            | Self::InvalidEventOption(_)
            | Self::Content(_) => ErrorSeverity::Validation,
            Self::NoActiveRun
            | Self::WrongPhase(_)
            | Self::NoCombat
            | Self::InsufficientFunds { .. }
            | Self::NoReward
            | Self::NoEvent
            | Self::EmptySettingsPatch => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Combat(err) => err.error_code(),
            Self::Map(err) => err.error_code(),
            Self::NoActiveRun => "STORE_NO_ACTIVE_RUN",
            Self::WrongPhase(_) => "STORE_WRONG_PHASE",
            Self::NoCombat => "STORE_NO_COMBAT",
            Self::InsufficientFunds { .. } => "STORE_INSUFFICIENT_FUNDS",
            Self::CardNotInDeck(_) => "STORE_CARD_NOT_IN_DECK",
            Self::CardNotUpgradable(_) => "STORE_CARD_NOT_UPGRADABLE",
            Self::NoReward => "STORE_NO_REWARD",
            Self::CardNotOffered(_) => "STORE_CARD_NOT_OFFERED",
            Self::NoEvent => "STORE_NO_EVENT",
            Self::InvalidEventOption(_) => "STORE_INVALID_EVENT_OPTION",
            Self::EmptySettingsPatch => "STORE_EMPTY_SETTINGS_PATCH",
            Self::Content(_) => "STORE_CONTENT",
        }
    }
}
