//! Streak state transitions.
//!
//! Both transitions are pure: they read the current [`AppState`] and return
//! the next one alongside an outcome the caller can report or log. The
//! conceptual states (fresh, locked, unlocked, at risk) are derived from the
//! stored dates, see [`super::status`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{add_days, days_between, CYCLE_LENGTH_DAYS};
use crate::random::RandomSource;
use crate::state::{AppState, PlayRecord, MAX_FREEZES};

/// Days since the last streak update at which a miss is charged.
///
/// One full cycle plus a day of grace.
pub const LOSS_THRESHOLD_DAYS: u32 = 4;

/// Chance that a completion earns a freeze (while below the cap).
pub const FREEZE_EARN_PROBABILITY: f64 = 0.33;

/// What the loss check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LossOutcome {
    /// Nothing completed yet, nothing to lose.
    NoHistory,
    /// The check already ran today; state untouched.
    AlreadyChecked,
    /// Still within the cycle plus grace.
    Safe { days_since_update: u32 },
    /// A freeze absorbed the miss.
    FreezeConsumed { days_since_update: u32, remaining: u8 },
    /// No freeze left; the streak was reset.
    StreakLost { days_since_update: u32, previous: u32 },
}

/// Outcome of a completion attempt, mirrored to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub success: bool,
    pub new_streak: u32,
    pub already_completed: bool,
    pub freeze_earned: bool,
}

impl CompletionResult {
    pub(crate) fn rejected(streak: u32) -> Self {
        Self {
            success: false,
            new_streak: streak,
            already_completed: true,
            freeze_earned: false,
        }
    }

    /// Whether the streak actually advanced.
    pub fn advanced(&self) -> bool {
        self.success && !self.already_completed
    }
}

/// Charge a missed cycle against the stored state.
///
/// Runs once per load. Only the gap between the stored update day and
/// `today` matters; history is not replayed. Within a single day the check
/// is a no-op after its first run.
pub fn check_loss(state: &AppState, today: NaiveDate) -> (AppState, LossOutcome) {
    if state.last_loss_check_date == Some(today) {
        return (state.clone(), LossOutcome::AlreadyChecked);
    }

    let mut next = state.clone();
    next.last_loss_check_date = Some(today);

    let Some(last_update) = state.last_streak_update_date else {
        return (next, LossOutcome::NoHistory);
    };

    let days_since_update = days_between(last_update, today);
    if days_since_update < LOSS_THRESHOLD_DAYS {
        return (next, LossOutcome::Safe { days_since_update });
    }

    if state.streak_freezes > 0 {
        next.set_freezes(i32::from(state.streak_freezes) - 1);
        tracing::info!(
            days_since_update,
            remaining = next.streak_freezes,
            streak = next.streak,
            "freeze consumed to preserve streak"
        );
        let outcome = LossOutcome::FreezeConsumed {
            days_since_update,
            remaining: next.streak_freezes,
        };
        return (next, outcome);
    }

    let previous = state.streak;
    next.streak = 0;
    tracing::info!(days_since_update, previous, "streak lost");
    (
        next,
        LossOutcome::StreakLost {
            days_since_update,
            previous,
        },
    )
}

/// Apply a won challenge.
///
/// A second completion on the same day never advances the streak: it is
/// rejected outright when the next cycle is already locked ahead, and
/// acknowledged without change otherwise.
pub fn complete_challenge(
    state: &AppState,
    today: NaiveDate,
    game_id: &str,
    attempts: Option<u32>,
    rng: &mut dyn RandomSource,
) -> (AppState, CompletionResult) {
    let completed_today = state.last_streak_update_date == Some(today);
    let locked_ahead = state
        .next_available_date
        .is_some_and(|next| next > today);

    if completed_today && locked_ahead {
        tracing::debug!(game_id, "completion rejected: cycle already consumed");
        return (state.clone(), CompletionResult::rejected(state.streak));
    }

    if completed_today {
        return (
            state.clone(),
            CompletionResult {
                success: true,
                new_streak: state.streak,
                already_completed: true,
                freeze_earned: false,
            },
        );
    }

    let mut next = state.clone();
    next.streak = state.streak.saturating_add(1);
    next.longest_streak = next.longest_streak.max(next.streak);
    next.last_streak_update_date = Some(today);
    next.next_available_date = Some(add_days(today, CYCLE_LENGTH_DAYS));
    next.played_games.push(PlayRecord {
        game_id: game_id.to_string(),
        date: today,
        won: true,
        attempts,
    });

    let mut freeze_earned = false;
    if next.streak_freezes < MAX_FREEZES && rng.next_f64() < FREEZE_EARN_PROBABILITY {
        next.set_freezes(i32::from(next.streak_freezes) + 1);
        freeze_earned = true;
    }

    tracing::info!(
        game_id,
        streak = next.streak,
        longest = next.longest_streak,
        freezes = next.streak_freezes,
        freeze_earned,
        "challenge completed"
    );

    let result = CompletionResult {
        success: true,
        new_streak: next.streak,
        already_completed: false,
        freeze_earned,
    };
    (next, result)
}
