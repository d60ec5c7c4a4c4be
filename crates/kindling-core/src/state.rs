//! The persisted aggregate.
//!
//! `AppState` is a plain value: transitions take it by reference and hand
//! back a new one. Every field carries a serde default so snapshots written
//! by older builds load cleanly with newer fields filled in.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound for `streak_freezes`.
pub const MAX_FREEZES: u8 = 3;

/// Snapshot of the artifacts generated for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContent {
    /// Day the bundle was generated.
    pub date: NaiveDate,
    pub photo_id: String,
    pub message_id: String,
    pub minigame_id: String,
    /// Whether `message_id` is the reserved special message.
    #[serde(default)]
    pub is_special: bool,
}

/// One completed challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub game_id: String,
    pub date: NaiveDate,
    pub won: bool,
    #[serde(default)]
    pub attempts: Option<u32>,
}

/// One performance entry reported by a mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: String,
    pub metric: String,
    pub value: f64,
    pub date: NaiveDate,
    pub player: String,
    /// Seconds spent, when the game reports it.
    #[serde(default)]
    pub time_secs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub streak: u32,
    pub longest_streak: u32,
    /// Stored values outside `[0, MAX_FREEZES]` are clamped on load.
    #[serde(deserialize_with = "clamped_freezes")]
    pub streak_freezes: u8,
    pub last_streak_update_date: Option<NaiveDate>,
    pub next_available_date: Option<NaiveDate>,
    /// Day the loss check last ran; guards against draining freezes on
    /// repeated loads within one day.
    pub last_loss_check_date: Option<NaiveDate>,
    pub daily_content: Option<DailyContent>,
    pub current_game_id: Option<String>,
    pub played_games: Vec<PlayRecord>,
    pub game_results: Vec<GameResult>,
    pub shown_photo_ids: BTreeSet<String>,
    pub shown_message_ids: BTreeSet<String>,
    pub total_visits: u64,
}

fn clamped_freezes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(MAX_FREEZES)) as u8)
}

impl AppState {
    /// Set the freeze count, clamped into `[0, MAX_FREEZES]`.
    pub fn set_freezes(&mut self, freezes: i32) {
        self.streak_freezes = freezes.clamp(0, i32::from(MAX_FREEZES)) as u8;
    }

    /// Parse a stored snapshot.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Summary used by status displays.
    pub fn summary(&self) -> StreakSummary {
        StreakSummary {
            streak: self.streak,
            longest_streak: self.longest_streak,
            streak_freezes: self.streak_freezes,
            last_streak_update_date: self.last_streak_update_date,
            next_available_date: self.next_available_date,
            total_visits: self.total_visits,
            games_played: self.played_games.len(),
        }
    }
}

/// Read-only view of the streak counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub streak: u32,
    pub longest_streak: u32,
    pub streak_freezes: u8,
    pub last_streak_update_date: Option<NaiveDate>,
    pub next_available_date: Option<NaiveDate>,
    pub total_visits: u64,
    pub games_played: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_fresh() {
        let state = AppState::default();
        assert_eq!(state.streak, 0);
        assert_eq!(state.streak_freezes, 0);
        assert!(state.last_streak_update_date.is_none());
        assert!(state.daily_content.is_none());
    }

    #[test]
    fn missing_fields_merge_over_defaults() {
        let state = AppState::from_json(r#"{"streak": 4, "longest_streak": 6}"#).unwrap();
        assert_eq!(state.streak, 4);
        assert_eq!(state.longest_streak, 6);
        assert!(state.played_games.is_empty());
        assert_eq!(state.total_visits, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let state = AppState::from_json(r#"{"streak": 2, "theme": "dark"}"#).unwrap();
        assert_eq!(state.streak, 2);
    }

    #[test]
    fn stored_freezes_are_clamped() {
        let state = AppState::from_json(r#"{"streak_freezes": 9}"#).unwrap();
        assert_eq!(state.streak_freezes, MAX_FREEZES);
    }

    #[test]
    fn out_of_range_stored_freezes_keep_the_rest_of_the_snapshot() {
        let negative = AppState::from_json(
            r#"{"streak": 12, "longest_streak": 20, "streak_freezes": -1}"#,
        )
        .unwrap();
        assert_eq!(negative.streak_freezes, 0);
        assert_eq!(negative.streak, 12);
        assert_eq!(negative.longest_streak, 20);

        let huge = AppState::from_json(r#"{"streak": 5, "streak_freezes": 300}"#).unwrap();
        assert_eq!(huge.streak_freezes, MAX_FREEZES);
        assert_eq!(huge.streak, 5);
    }

    #[test]
    fn set_freezes_clamps_both_ends() {
        let mut state = AppState::default();
        state.set_freezes(-2);
        assert_eq!(state.streak_freezes, 0);
        state.set_freezes(7);
        assert_eq!(state.streak_freezes, 3);
    }

    #[test]
    fn dates_serialize_as_calendar_days() {
        let state = AppState {
            last_streak_update_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        let json = state.to_json().unwrap();
        assert!(json.contains(r#""last_streak_update_date":"2024-05-01""#));
        assert_eq!(AppState::from_json(&json).unwrap(), state);
    }
}
