use kindling_core::Config;

use super::open_orchestrator;

pub fn run(config: &Config, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("reset clears the streak and all history; pass --yes to confirm".into());
    }
    open_orchestrator(config)?.reset()?;
    println!("state reset");
    Ok(())
}
