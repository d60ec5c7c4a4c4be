use clap::Args;
use kindling_core::{CompletionReport, Config};

use super::open_orchestrator;

#[derive(Args)]
pub struct CompleteArgs {
    /// Id of the game that was won
    pub game_id: String,
    /// Name of the reported metric
    #[arg(long, default_value = "score")]
    pub metric: String,
    /// Metric value
    #[arg(long, default_value_t = 0.0)]
    pub value: f64,
    /// Attempts needed
    #[arg(long)]
    pub attempts: Option<u32>,
    /// Seconds spent
    #[arg(long)]
    pub time_secs: Option<u32>,
}

pub fn run(config: &Config, args: CompleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut orchestrator = open_orchestrator(config)?;
    let outcome = orchestrator.complete(CompletionReport {
        game_id: args.game_id,
        metric: args.metric,
        value: args.value,
        attempts: args.attempts,
        time_secs: args.time_secs,
    });

    // A one-shot process has nothing to wait for; reload right away.
    let next = outcome.reload_after.map(|_| orchestrator.load());
    let output = serde_json::json!({
        "outcome": outcome,
        "next": next,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
