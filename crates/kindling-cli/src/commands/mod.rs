pub mod complete;
pub mod completions;
pub mod config;
pub mod history;
pub mod reset;
pub mod status;
pub mod today;

use kindling_core::{Catalog, Config, CycleOrchestrator, LocalGateway};

/// Orchestrator over the on-disk cache, configured catalog and player.
pub fn open_orchestrator(
    config: &Config,
) -> Result<CycleOrchestrator<LocalGateway>, Box<dyn std::error::Error>> {
    let catalog_path = config.catalog_path();
    tracing::debug!(path = ?catalog_path, "loading catalog");
    let catalog = Catalog::load(catalog_path.as_deref())?;
    let gateway = LocalGateway::open(config)?;
    Ok(CycleOrchestrator::new(gateway, catalog).with_player(config.player.name.clone()))
}
