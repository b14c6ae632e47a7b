//! The run/progression store.
//!
//! [`GameStore`] owns the canonical [`RunState`], [`ProgressionState`], and
//! [`Settings`]. Presentation layers issue commands against it and render the
//! [`GameSnapshot`] each command returns.
//!
//! Every command follows the same shape:
//! 1. validate against the current phase and state, touching nothing
//! 2. apply the change (delegating combat to [`game_core::CombatEngine`])
//! 3. commit: bump the revision, write the save blob, publish events
//!
//! A command that fails validation is reported as
//! [`CommandStatus::Ignored`] and leaves the state exactly as it was.
//!
//! Commands are grouped by screen: run lifecycle and persistence live here,
//! `combat` covers card play and turn flow, `nodes` covers map selection and
//! the screens behind each node, and `resources` holds the direct player
//! mutators.
mod combat;
mod nodes;
mod resources;

use game_content::ContentCatalog;
use game_core::{
    GameConfig, GameError, InstanceIdAllocator, PlayerState, ProgressionState, RunState,
    SeededRng, generate_map,
};

use crate::api::{CommandOutcome, CommandRejection, CommandStatus, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{EventBus, RunEnd, StoreEvent};
use crate::repository::{FileSaveRepository, SaveRepository};
use crate::snapshot::{GamePhase, GameSnapshot, SaveBlob, Settings, SettingsPatch};

/// Outcome of a store-level command before it is committed.
type Apply = std::result::Result<(), CommandRejection>;

/// Authoritative owner of run and cross-run state.
pub struct GameStore {
    config: GameConfig,
    catalog: ContentCatalog,

    phase: GamePhase,
    run: Option<RunState>,
    progression: ProgressionState,
    settings: Settings,
    revision: u64,

    events: EventBus,
    /// Lifecycle events raised while applying a command, published on commit.
    pending_events: Vec<StoreEvent>,
    repository: Option<Box<dyn SaveRepository>>,
}

impl GameStore {
    /// Create a new store builder
    pub fn builder() -> GameStoreBuilder {
        GameStoreBuilder::new()
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Immutable view of everything a presentation layer renders.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            revision: self.revision,
            phase: self.phase,
            run: self.run.clone(),
            progression: self.progression.clone(),
            settings: self.settings.clone(),
            pending_upgrade: self.pending_upgrade(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn game_config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// True while a played card waits for an upgrade target.
    pub fn pending_upgrade(&self) -> bool {
        self.run
            .as_ref()
            .and_then(|run| run.combat.as_ref())
            .is_some_and(|combat| combat.awaiting_selection())
    }

    /// Receive a [`StoreEvent`] for every committed change.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // ========================================================================
    // Run lifecycle
    // ========================================================================

    /// Starts a fresh run, replacing any run in progress.
    ///
    /// Without a seed one is drawn from OS entropy; every later draw in the
    /// run comes from the seeded generator, so the seed alone replays it.
    pub fn start_new_run(&mut self, seed: Option<String>) -> CommandOutcome {
        let result = self.apply_start_new_run(seed);
        self.finish("start_new_run", result)
    }

    fn apply_start_new_run(&mut self, seed: Option<String>) -> Apply {
        let seed = seed
            .filter(|seed| !seed.trim().is_empty())
            .unwrap_or_else(entropy_seed);

        let mut ids = InstanceIdAllocator::new();
        let deck = self.catalog.starting_deck(&mut ids)?;

        let mut rng = SeededRng::from_seed(&seed);
        let map = generate_map(1, &self.config.map, &mut rng);
        let player = PlayerState::new(self.config.starting_hp, self.config.starting_energy, deck);

        if let Some(previous) = &self.run {
            tracing::info!(seed = %previous.seed, "Replacing run in progress");
        }
        tracing::info!(
            seed = %seed,
            nodes = map.nodes.len(),
            "Run started"
        );

        self.run = Some(RunState::new(seed.clone(), rng, map, player, ids));
        self.phase = GamePhase::Map;
        self.pending_events.push(StoreEvent::RunStarted { seed });
        Ok(())
    }

    /// Discards the run and returns to the menu. Progression is untouched.
    pub fn abandon_run(&mut self) -> CommandOutcome {
        let result = self.apply_abandon_run();
        self.finish("abandon_run", result)
    }

    fn apply_abandon_run(&mut self) -> Apply {
        let run = self.run.take().ok_or(CommandRejection::NoActiveRun)?;
        tracing::info!(seed = %run.seed, "Run abandoned");

        self.phase = GamePhase::Menu;
        self.pending_events.push(StoreEvent::RunEnded {
            outcome: RunEnd::Abandoned,
        });
        Ok(())
    }

    /// Leaves the game-over or victory screen, destroying the finished run.
    pub fn acknowledge_game_over(&mut self) -> CommandOutcome {
        let result = self.apply_acknowledge_game_over();
        self.finish("acknowledge_game_over", result)
    }

    fn apply_acknowledge_game_over(&mut self) -> Apply {
        self.ensure_phase(&[GamePhase::GameOver, GamePhase::Victory])?;
        self.run = None;
        self.phase = GamePhase::Menu;
        Ok(())
    }

    /// Ends the run as a defeat outside of combat.
    fn end_run_in_defeat(&mut self) {
        self.phase = GamePhase::GameOver;
        self.progression.record_defeat();
        tracing::info!(
            runs_completed = self.progression.runs_completed,
            "Run lost"
        );
        self.pending_events.push(StoreEvent::RunEnded {
            outcome: RunEnd::Defeat,
        });
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn update_settings(&mut self, patch: SettingsPatch) -> CommandOutcome {
        let result = if patch.is_empty() {
            Err(CommandRejection::EmptySettingsPatch)
        } else {
            patch.apply(&mut self.settings);
            Ok(())
        };
        self.finish("update_settings", result)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Reloads state from the repository.
    ///
    /// A missing or unreadable blob falls back to fresh progression and
    /// settings with no active run. A restored run resumes in combat when
    /// one was active, on the reward screen when spoils were unclaimed, on
    /// the game-over screen when the player is dead, on the victory screen
    /// once the boss has fallen, and on the map otherwise. Shop, rest, and
    /// event screens reopen on the map.
    pub fn restore(&mut self) -> GameSnapshot {
        let blob = match self.repository.as_ref().map(|repo| repo.load()) {
            Some(Ok(blob)) => blob,
            Some(Err(e)) => {
                tracing::warn!("Discarding unreadable save: {}", e);
                None
            }
            None => None,
        };

        let blob = blob.unwrap_or_else(|| {
            SaveBlob::new(None, ProgressionState::default(), Settings::default())
        });

        let mut run = blob.run;
        self.phase = match &run {
            None => GamePhase::Menu,
            Some(run) if run.combat.is_some() => GamePhase::Combat,
            Some(run) if run.pending_reward.is_some() => GamePhase::Reward,
            Some(run) if !run.player.is_alive() => GamePhase::GameOver,
            Some(run) if run.map.boss().is_some_and(|boss| boss.visited) => GamePhase::Victory,
            Some(_) => GamePhase::Map,
        };
        // Node screens are not restored, so an unresolved event is dropped.
        if let Some(run) = run.as_mut() {
            run.current_event = None;
        }
        self.run = run;
        self.progression = blob.progression;
        self.settings = blob.settings;
        self.pending_events.clear();

        if let Some(run) = &self.run {
            tracing::info!(seed = %run.seed, phase = ?self.phase, "Run restored");
        }

        self.events.publish(StoreEvent::StateChanged {
            revision: self.revision,
            phase: self.phase,
        });
        self.snapshot()
    }

    /// Deletes the save blob. In-memory state is unaffected.
    pub fn delete_save(&self) -> Result<()> {
        if let Some(repo) = &self.repository {
            repo.clear()?;
        }
        Ok(())
    }

    fn persist(&mut self) {
        let Some(repo) = &self.repository else {
            return;
        };

        let blob = SaveBlob::new(self.run.clone(), self.progression.clone(), self.settings.clone());
        if let Err(e) = repo.save(&blob) {
            tracing::warn!("Failed to write save: {}", e);
            self.pending_events.push(StoreEvent::PersistenceFailed {
                error: e.to_string(),
            });
        }
    }

    // ========================================================================
    // Commit
    // ========================================================================

    fn ensure_phase(&self, allowed: &[GamePhase]) -> Apply {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(CommandRejection::WrongPhase(self.phase))
        }
    }

    /// Commits an applied command or reports why it was ignored.
    fn finish(&mut self, command: &'static str, result: Apply) -> CommandOutcome {
        let status = match result {
            Ok(()) => {
                self.commit();
                CommandStatus::Applied
            }
            Err(reason) => {
                self.pending_events.clear();
                tracing::debug!(
                    command,
                    code = reason.error_code(),
                    "Ignored command: {}",
                    reason
                );
                CommandStatus::Ignored(reason)
            }
        };

        CommandOutcome {
            status,
            snapshot: self.snapshot(),
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.persist();

        for event in self.pending_events.drain(..) {
            self.events.publish(event);
        }
        self.events.publish(StoreEvent::StateChanged {
            revision: self.revision,
            phase: self.phase,
        });
    }
}

fn entropy_seed() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Builder for [`GameStore`].
pub struct GameStoreBuilder {
    config: RuntimeConfig,
    catalog: Option<ContentCatalog>,
    repository: Option<Box<dyn SaveRepository>>,
}

impl GameStoreBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom content catalog instead of the built-in one
    pub fn catalog(mut self, catalog: ContentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the save repository, overriding the configured save path
    pub fn repository(mut self, repository: impl SaveRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Validate content, restore the last save, and build the store.
    pub fn build(self) -> Result<GameStore> {
        let catalog = self.catalog.unwrap_or_else(ContentCatalog::builtin);
        catalog.validate().map_err(RuntimeError::InvalidContent)?;

        let repository = match self.repository {
            Some(repository) => Some(repository),
            None if self.config.enable_persistence => {
                self.config.save_path.as_ref().map(|path| {
                    Box::new(FileSaveRepository::new(path)) as Box<dyn SaveRepository>
                })
            }
            None => None,
        };

        if repository.is_none() && self.config.enable_persistence {
            tracing::warn!("Persistence enabled but no save location is available");
        }

        let mut store = GameStore {
            config: self.config.game_config,
            catalog,
            phase: GamePhase::Menu,
            run: None,
            progression: ProgressionState::default(),
            settings: Settings::default(),
            revision: 0,
            events: EventBus::with_capacity(self.config.event_buffer_size),
            pending_events: Vec::new(),
            repository,
        };
        store.restore();

        Ok(store)
    }
}
