//! Cycle orchestration.
//!
//! [`CycleOrchestrator`] runs the two visit triggers against a
//! [`PersistenceGateway`]:
//!
//! ```text
//! load:     gateway.load -> check_loss -> (refresh | rehydrate) -> gateway.save
//! complete: gateway.load -> check_loss -> complete_challenge  -> gateway.save
//! ```
//!
//! Every path produces a valid state. Stale catalog ids are resampled, and a
//! failed save is logged; the in-memory result is still returned.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Game, Message, Photo};
use crate::clock::{is_cycle_due, Clock, SystemClock};
use crate::random::{PcgRandom, RandomSource};
use crate::rotation::{message_for_streak, next_message, next_photo, record_shown};
use crate::scheduler::next_game;
use crate::state::{AppState, DailyContent, GameResult, StreakSummary};
use crate::storage::PersistenceGateway;
use crate::streak::{
    check_loss, complete_challenge, cycle_status, CompletionResult, CycleStatus, LossOutcome,
};

/// Delay after an advancing completion before the caller should reload.
pub const RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Player name recorded when none is configured.
pub const DEFAULT_PLAYER: &str = "me";

/// Everything the caller needs to render the current cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBundle {
    /// Day the content was generated.
    pub date: NaiveDate,
    pub photo: Option<Photo>,
    pub message: Option<Message>,
    pub game: Option<Game>,
    pub is_special: bool,
    /// A new bundle was generated on this load.
    pub refreshed: bool,
    pub loss: LossOutcome,
    pub status: CycleStatus,
    pub summary: StreakSummary,
}

/// Report sent by a mini-game when the player wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub game_id: String,
    pub metric: String,
    pub value: f64,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub time_secs: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    #[serde(flatten)]
    pub result: CompletionResult,
    /// Set when the streak advanced: re-run [`CycleOrchestrator::load`]
    /// after this delay to roll into the next cycle state.
    pub reload_after: Option<Duration>,
}

pub struct CycleOrchestrator<G> {
    gateway: G,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    player: String,
}

impl<G: PersistenceGateway> CycleOrchestrator<G> {
    /// Orchestrator over the system clock and an entropy-seeded PCG.
    pub fn new(gateway: G, catalog: Catalog) -> Self {
        Self {
            gateway,
            catalog,
            clock: Box::new(SystemClock),
            rng: Box::new(PcgRandom::from_entropy()),
            player: DEFAULT_PLAYER.to_string(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = player.into();
        self
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// App-open trigger.
    pub fn load(&mut self) -> DailyBundle {
        let today = self.clock.today();
        let stored = self.gateway.load();
        let (mut state, loss) = check_loss(&stored, today);

        let generated_today = state
            .daily_content
            .as_ref()
            .is_some_and(|content| content.date == today);
        let due = is_cycle_due(state.next_available_date, today);

        let (resolved, refreshed) = match state.daily_content.clone() {
            Some(content) if !due || generated_today => {
                (self.rehydrate(&mut state, content), false)
            }
            _ => (self.refresh(&mut state, today), true),
        };

        if state != stored {
            self.persist(&state);
        }

        DailyBundle {
            date: state
                .daily_content
                .as_ref()
                .map_or(today, |content| content.date),
            photo: resolved.photo,
            message: resolved.message,
            game: resolved.game,
            is_special: resolved.is_special,
            refreshed,
            loss,
            status: cycle_status(&state, today),
            summary: state.summary(),
        }
    }

    /// Mini-game win trigger.
    ///
    /// The streak only moves when the cycle is open: a report while the
    /// next cycle is still locked comes back rejected, exactly like a
    /// double submit. Rejected and repeated reports leave the stored state
    /// unchanged; the result entry is logged only when the streak advances.
    pub fn complete(&mut self, report: CompletionReport) -> CompletionOutcome {
        let today = self.clock.today();
        let stored = self.gateway.load();
        let (state, _) = check_loss(&stored, today);

        let locked_ahead = state.next_available_date.is_some_and(|next| next > today);
        let (mut next, result) = if locked_ahead && state.last_streak_update_date != Some(today) {
            tracing::debug!(
                game_id = %report.game_id,
                until = ?state.next_available_date,
                "completion rejected: cycle not yet open"
            );
            let streak = state.streak;
            (state, CompletionResult::rejected(streak))
        } else {
            complete_challenge(
                &state,
                today,
                &report.game_id,
                report.attempts,
                self.rng.as_mut(),
            )
        };

        if result.advanced() {
            next.game_results.push(GameResult {
                game_id: report.game_id,
                metric: report.metric,
                value: report.value,
                date: today,
                player: self.player.clone(),
                time_secs: report.time_secs,
            });
        }

        if next != stored {
            self.persist(&next);
        }

        CompletionOutcome {
            result,
            reload_after: result.advanced().then_some(RELOAD_DELAY),
        }
    }

    /// Current cycle state without touching storage.
    pub fn status(&self) -> (CycleStatus, StreakSummary) {
        let state = self.gateway.load();
        (cycle_status(&state, self.clock.today()), state.summary())
    }

    /// The stored state as-is.
    pub fn snapshot(&self) -> AppState {
        self.gateway.load()
    }

    /// Administrative clear: persists a default state.
    ///
    /// # Errors
    /// Returns an error if the local write fails.
    pub fn reset(&mut self) -> crate::error::Result<()> {
        self.gateway.save(&AppState::default())?;
        tracing::info!("state reset");
        Ok(())
    }

    fn persist(&self, state: &AppState) {
        if let Err(e) = self.gateway.save(state) {
            tracing::error!(error = %e, "failed to save state");
        }
    }

    /// Generate a new bundle for `today`.
    fn refresh(&mut self, state: &mut AppState, today: NaiveDate) -> Resolved {
        let rng = self.rng.as_mut();

        let photo = next_photo(&state.shown_photo_ids, &self.catalog.photos, rng).map(|pick| {
            record_shown(&mut state.shown_photo_ids, &pick);
            pick.item.clone()
        });
        let message = message_for_streak(
            state.streak,
            &mut state.shown_message_ids,
            &self.catalog,
            rng,
        );
        let is_special = message.is_some_and(|(_, special)| special);
        let message = message.map(|(message, _)| message.clone());
        let game = next_game(&self.catalog.games, &state.played_games, state.streak, rng).cloned();

        state.total_visits += 1;
        match (&photo, &message, &game) {
            (Some(photo), Some(message), Some(game)) => {
                state.current_game_id = Some(game.id.clone());
                state.daily_content = Some(DailyContent {
                    date: today,
                    photo_id: photo.id.clone(),
                    message_id: message.id.clone(),
                    minigame_id: game.id.clone(),
                    is_special,
                });
            }
            _ => {
                tracing::warn!("catalog has an empty list; no bundle generated");
                state.current_game_id = None;
                state.daily_content = None;
            }
        }

        tracing::info!(
            date = %today,
            streak = state.streak,
            photo = ?photo.as_ref().map(|p| &p.id),
            message = ?message.as_ref().map(|m| &m.id),
            game = ?game.as_ref().map(|g| &g.id),
            is_special,
            "cycle refreshed"
        );

        Resolved {
            photo,
            message,
            game,
            is_special,
        }
    }

    /// Resolve a stored bundle, resampling any id the catalog no longer has.
    fn rehydrate(&mut self, state: &mut AppState, mut content: DailyContent) -> Resolved {
        let rng = self.rng.as_mut();

        let photo = match self.catalog.photo(&content.photo_id) {
            Some(photo) => Some(photo.clone()),
            None => {
                tracing::warn!(id = %content.photo_id, "stale photo id; resampling");
                next_photo(&state.shown_photo_ids, &self.catalog.photos, rng).map(|pick| {
                    record_shown(&mut state.shown_photo_ids, &pick);
                    content.photo_id = pick.item.id.clone();
                    pick.item.clone()
                })
            }
        };

        let message = match self.catalog.message(&content.message_id) {
            Some(message) => Some(message.clone()),
            None => {
                tracing::warn!(id = %content.message_id, "stale message id; resampling");
                content.is_special = false;
                next_message(&state.shown_message_ids, &self.catalog.messages, rng).map(|pick| {
                    record_shown(&mut state.shown_message_ids, &pick);
                    content.message_id = pick.item.id.clone();
                    pick.item.clone()
                })
            }
        };

        let game = match self.catalog.game(&content.minigame_id) {
            Some(game) => Some(game.clone()),
            None => {
                tracing::warn!(id = %content.minigame_id, "stale game id; resampling");
                next_game(&self.catalog.games, &state.played_games, state.streak, rng).map(
                    |game| {
                        content.minigame_id = game.id.clone();
                        game.clone()
                    },
                )
            }
        };

        if game.is_some() {
            state.current_game_id = Some(content.minigame_id.clone());
        }
        let is_special = content.is_special;
        state.daily_content = Some(content);

        Resolved {
            photo,
            message,
            game,
            is_special,
        }
    }
}

struct Resolved {
    photo: Option<Photo>,
    message: Option<Message>,
    game: Option<Game>,
    is_special: bool,
}
