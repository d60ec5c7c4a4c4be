use kindling_core::Config;

use super::open_orchestrator;

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut orchestrator = open_orchestrator(config)?;
    let bundle = orchestrator.load();
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
