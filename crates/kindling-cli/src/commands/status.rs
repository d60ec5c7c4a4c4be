use kindling_core::Config;

use super::open_orchestrator;

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = open_orchestrator(config)?;
    let (status, summary) = orchestrator.status();
    let output = serde_json::json!({
        "today": orchestrator.today(),
        "status": status,
        "playable": status.is_playable(),
        "summary": summary,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
