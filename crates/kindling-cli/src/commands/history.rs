use clap::Subcommand;
use kindling_core::Config;

use super::open_orchestrator;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Completed challenges, oldest first
    Plays {
        /// Only the most recent N entries
        #[arg(long)]
        last: Option<usize>,
    },
    /// Reported game results, oldest first
    Results {
        /// Only results for this game
        #[arg(long)]
        game: Option<String>,
    },
}

pub fn run(config: &Config, action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_orchestrator(config)?.snapshot();

    match action {
        HistoryAction::Plays { last } => {
            let skip = last.map_or(0, |n| state.played_games.len().saturating_sub(n));
            let plays = &state.played_games[skip..];
            println!("{}", serde_json::to_string_pretty(plays)?);
        }
        HistoryAction::Results { game } => {
            let results: Vec<_> = state
                .game_results
                .iter()
                .filter(|r| game.as_deref().map_or(true, |id| r.game_id == id))
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}
