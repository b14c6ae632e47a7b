//! Greedy autoplay policy.
//!
//! Drives the store one command at a time from its snapshot: fights by
//! playing the first affordable card, rests when hurt, and takes the first
//! offered card from every reward.

use std::fmt;

use anyhow::{Result, bail};
use game_core::{CardInstanceId, MapNode, NodeType, RunState};
use runtime::{CommandOutcome, GamePhase, GameStore};

/// Upper bound on issued commands before the run is considered stuck.
const MAX_COMMANDS: usize = 20_000;

/// Below this fraction of max HP the policy prefers rest sites.
const REST_THRESHOLD: f64 = 0.5;

/// How a finished run went.
pub struct RunSummary {
    pub seed: String,
    pub victory: bool,
    pub rows_cleared: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub deck_size: usize,
    pub divine_favor: u32,
    pub runs_completed: u32,
    pub runs_won: u32,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.victory { "Victory" } else { "Defeat" };
        writeln!(f, "{outcome} (seed {})", self.seed)?;
        writeln!(f, "  rows cleared: {}", self.rows_cleared)?;
        writeln!(f, "  hp: {}/{}", self.hp, self.max_hp)?;
        writeln!(f, "  deck: {} cards", self.deck_size)?;
        writeln!(f, "  divine favor: {}", self.divine_favor)?;
        write!(
            f,
            "  lifetime: {} won of {} completed",
            self.runs_won, self.runs_completed
        )
    }
}

pub struct Autoplay {
    store: GameStore,
    seed: Option<String>,
    /// Last command was refused; the next combat step ends the turn.
    stalled: bool,
}

impl Autoplay {
    pub fn new(store: GameStore, seed: Option<String>) -> Self {
        Self {
            store,
            seed,
            stalled: false,
        }
    }

    /// Plays until the run ends and returns its summary.
    pub fn run(mut self) -> Result<RunSummary> {
        if self.store.phase() == GamePhase::Menu {
            self.store.start_new_run(self.seed.take());
        } else if let Some(run) = self.store.run() {
            tracing::info!(seed = %run.seed, phase = ?self.store.phase(), "Resuming saved run");
        }

        for _ in 0..MAX_COMMANDS {
            match self.store.phase() {
                GamePhase::GameOver | GamePhase::Victory => return self.finish(),
                GamePhase::Menu => bail!("run ended without reaching a result screen"),
                GamePhase::Map => self.travel()?,
                GamePhase::Combat => self.fight(),
                GamePhase::Reward => self.claim(),
                GamePhase::Rest => self.track(|store| store.rest()),
                GamePhase::Shop => self.shop(),
                GamePhase::Event => self.resolve_event(),
            }
        }

        bail!("run did not finish within {MAX_COMMANDS} commands")
    }

    fn track(&mut self, command: impl FnOnce(&mut GameStore) -> CommandOutcome) {
        let outcome = command(&mut self.store);
        if let Some(reason) = outcome.rejection() {
            tracing::debug!("Autoplay command refused: {}", reason);
        }
        self.stalled = !outcome.is_applied();
    }

    fn live_run(&self) -> Result<&RunState> {
        match self.store.run() {
            Some(run) => Ok(run),
            None => bail!("no run in progress"),
        }
    }

    // ========================================================================
    // Screens
    // ========================================================================

    fn travel(&mut self) -> Result<()> {
        let run = self.live_run()?;
        let hurt = f64::from(run.player.hp) < f64::from(run.player.max_hp) * REST_THRESHOLD;

        let mut options: Vec<&MapNode> = run.map.available_nodes().collect();
        options.sort_by_key(|node| (node_preference(node.node_type, hurt), node.column()));
        let Some(node) = options.first().map(|node| node.id) else {
            bail!("no reachable node on the map");
        };

        tracing::info!(node = %node, hp = run.player.hp, "Travelling");
        self.track(|store| store.select_node(node));
        Ok(())
    }

    fn fight(&mut self) {
        if self.store.pending_upgrade() {
            match self.upgrade_target() {
                Some(card) => self.track(|store| store.upgrade_card_in_hand(card)),
                None => self.track(|store| store.cancel_upgrade()),
            }
            return;
        }

        match self.playable_card() {
            Some(card) if !self.stalled => self.track(|store| store.play_card(card, None)),
            _ => self.track(|store| store.end_turn()),
        }
    }

    fn claim(&mut self) {
        let choice = self
            .store
            .run()
            .and_then(|run| run.pending_reward.as_ref())
            .and_then(|reward| reward.card_choices.first().cloned());
        self.track(|store| store.claim_reward(choice.as_deref()));
    }

    fn shop(&mut self) {
        let cost = self.store.game_config().shop_removal_cost;
        let removal = self.store.run().and_then(|run| {
            (run.player.divine_favor >= cost)
                .then(|| cheapest_basic_card(run))
                .flatten()
        });

        match removal {
            Some(card) if !self.stalled => self.track(|store| store.purchase_card_removal(card)),
            _ => self.track(|store| store.leave_node()),
        }
    }

    fn resolve_event(&mut self) {
        let has_event = self
            .store
            .run()
            .is_some_and(|run| run.current_event.is_some());

        if has_event && !self.stalled {
            self.track(|store| store.choose_event_option(0));
        } else {
            self.track(|store| store.leave_node());
        }
    }

    fn finish(mut self) -> Result<RunSummary> {
        let victory = self.store.phase() == GamePhase::Victory;
        let run = self.live_run()?;

        let summary = RunSummary {
            seed: run.seed.clone(),
            victory,
            rows_cleared: run.map.current_node.map_or(0, |node| node.row + 1),
            hp: run.player.hp,
            max_hp: run.player.max_hp,
            deck_size: run.player.deck.len(),
            divine_favor: run.player.divine_favor,
            runs_completed: self.store.progression().runs_completed,
            runs_won: self.store.progression().runs_won,
        };

        self.store.acknowledge_game_over();
        Ok(summary)
    }

    // ========================================================================
    // Card choices
    // ========================================================================

    fn playable_card(&self) -> Option<CardInstanceId> {
        let run = self.store.run()?;
        let combat = run.combat.as_ref()?;
        combat
            .hand
            .iter()
            .find(|card| card.cost() <= run.player.energy)
            .map(|card| card.id)
    }

    fn upgrade_target(&self) -> Option<CardInstanceId> {
        let combat = self.store.run()?.combat.as_ref()?;
        combat
            .hand
            .iter()
            .find(|card| card.can_upgrade())
            .map(|card| card.id)
    }
}

/// Lower sorts first.
fn node_preference(node_type: NodeType, hurt: bool) -> u8 {
    match node_type {
        NodeType::Rest if hurt => 0,
        NodeType::Combat => 1,
        NodeType::Event | NodeType::Shrine | NodeType::ForgeUpgrade => 2,
        NodeType::Shop => 3,
        NodeType::Rest => 4,
        NodeType::EliteCombat if hurt => 6,
        NodeType::EliteCombat => 5,
        NodeType::Boss => 7,
    }
}

/// Simplest unupgraded card in the deck, the first worth thinning out.
fn cheapest_basic_card(run: &RunState) -> Option<CardInstanceId> {
    run.player
        .deck
        .iter()
        .filter(|card| !card.upgraded)
        .min_by_key(|card| (card.card.effects.len(), card.cost()))
        .map(|card| card.id)
}
