//! Conceptual cycle state, derived from the stored dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ledger::LOSS_THRESHOLD_DAYS;
use crate::clock::days_between;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CycleStatus {
    /// No challenge completed yet.
    Fresh,
    /// This cycle's challenge is done; the next unlocks on `until`.
    Locked { until: NaiveDate },
    /// Challenge available.
    Unlocked,
    /// Overdue: the loss check charges (or has charged) this gap.
    AtRisk { days_since_update: u32 },
}

impl CycleStatus {
    pub fn is_playable(&self) -> bool {
        !matches!(self, CycleStatus::Locked { .. })
    }
}

pub fn cycle_status(state: &AppState, today: NaiveDate) -> CycleStatus {
    let Some(last_update) = state.last_streak_update_date else {
        return CycleStatus::Fresh;
    };

    if let Some(until) = state.next_available_date {
        if until > today {
            return CycleStatus::Locked { until };
        }
    }

    let days_since_update = days_between(last_update, today);
    if days_since_update >= LOSS_THRESHOLD_DAYS {
        CycleStatus::AtRisk { days_since_update }
    } else {
        CycleStatus::Unlocked
    }
}
