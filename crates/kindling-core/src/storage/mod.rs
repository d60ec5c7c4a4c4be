mod config;
pub mod database;
pub mod gateway;

pub use config::{CatalogConfig, Config, LoggingConfig, PlayerConfig, SyncConfig};
pub use database::Database;
pub use gateway::{LocalGateway, MemoryGateway, PersistenceGateway, APP_STATE_KEY};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `KINDLING_DATA_DIR` wins when set. Otherwise `~/.config/kindling[-dev]/`,
/// with `KINDLING_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("KINDLING_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("KINDLING_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("kindling-dev")
            } else {
                base_dir.join("kindling")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
