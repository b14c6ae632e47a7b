//! Combat resolution system.
//!
//! This module resolves one encounter: the card-effect pipeline, enemy
//! intent cycling, and the turn state machine
//! `PlayerTurn → (card plays)* → EnemyTurn → PlayerTurn`, with absorbing exits
//! to `Victory` (every enemy at 0 HP) or `Defeat` (player at 0 HP).
//!
//! # Architecture
//!
//! - **Pure**: the engine borrows the combat, the player, and the run RNG;
//!   it never performs I/O and never reaches for ambient randomness
//! - **Validate, then apply**: every command is checked in full before the
//!   first mutation, so a rejected command leaves the state untouched
//! - **Closed sums**: effects and intents are matched exhaustively
//!
//! # Core Functions
//!
//! - `begin_combat`: shuffle the deck into the draw pile and draw the opening hand
//! - `CombatEngine::play_card`: resolve a hand card's effects
//! - `CombatEngine::end_turn`: discard, resolve enemy intents, refill, redraw
//! - `apply_mitigated_damage`: block-first damage application

pub mod damage;
pub mod engine;
pub mod error;
pub mod intent;

pub use damage::{DamageResult, apply_mitigated_damage};
pub use engine::{CombatEngine, CombatStatus, PlayOutcome, TurnOutcome, begin_combat};
pub use error::CombatError;
pub use intent::resolve_intent;
