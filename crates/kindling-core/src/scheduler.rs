//! Weighted, history-aware mini-game selection.
//!
//! Games are tiered by the current streak and weighted against their
//! all-time play count so that novel games come up more often while replayed
//! ones are never excluded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, Game};
use crate::random::RandomSource;
use crate::state::PlayRecord;

/// Streak at which the medium tier starts (inclusive).
pub const MEDIUM_TIER_STREAK: u32 = 10;
/// Streak at which the tier filter is lifted (inclusive).
pub const OPEN_TIER_STREAK: u32 = 30;

/// Difficulty filter applied for a given streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    Medium,
    /// No filter; every difficulty qualifies.
    All,
}

impl DifficultyTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            s if s >= OPEN_TIER_STREAK => DifficultyTier::All,
            s if s >= MEDIUM_TIER_STREAK => DifficultyTier::Medium,
            _ => DifficultyTier::Easy,
        }
    }

    pub fn admits(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyTier::Easy => difficulty == Difficulty::Easy,
            DifficultyTier::Medium => difficulty == Difficulty::Medium,
            DifficultyTier::All => true,
        }
    }
}

/// Selection weight for a game played `plays` times.
pub fn weight_for_plays(plays: usize) -> usize {
    match plays {
        0 => 3,
        1 => 2,
        _ => 1,
    }
}

/// All-time play count per game id.
pub fn play_counts(played: &[PlayRecord]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for record in played {
        *counts.entry(record.game_id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Games eligible at `tier`, falling back to the full catalog when the tier
/// filter leaves nothing.
pub fn eligible_games(catalog: &[Game], tier: DifficultyTier) -> Vec<&Game> {
    let filtered: Vec<&Game> = catalog
        .iter()
        .filter(|game| tier.admits(game.difficulty))
        .collect();
    if filtered.is_empty() {
        catalog.iter().collect()
    } else {
        filtered
    }
}

/// Expand each eligible game by its weight.
pub fn weighted_pool<'a>(
    catalog: &'a [Game],
    played: &[PlayRecord],
    streak: u32,
) -> Vec<&'a Game> {
    let counts = play_counts(played);
    let tier = DifficultyTier::for_streak(streak);

    let mut pool = Vec::new();
    for game in eligible_games(catalog, tier) {
        let plays = counts.get(game.id.as_str()).copied().unwrap_or(0);
        for _ in 0..weight_for_plays(plays) {
            pool.push(game);
        }
    }
    pool
}

/// Pick the next game. `None` only for an empty catalog.
pub fn next_game<'a>(
    catalog: &'a [Game],
    played: &[PlayRecord],
    streak: u32,
    rng: &mut dyn RandomSource,
) -> Option<&'a Game> {
    let pool = weighted_pool(catalog, played, streak);
    if pool.is_empty() {
        return None;
    }
    let game = pool[rng.choose_index(pool.len())];
    tracing::debug!(
        game_id = %game.id,
        pool_size = pool.len(),
        tier = ?DifficultyTier::for_streak(streak),
        "scheduled next game"
    );
    Some(game)
}
