// Device ID used to key this installation's snapshot at the remote store.
// Format: "kindling-<uuid>"

use uuid::Uuid;

use crate::storage::Database;

const DEVICE_ID_KEY: &str = "device_id";
const DEVICE_ID_PREFIX: &str = "kindling-";

/// Error type for device ID operations
#[derive(Debug, thiserror::Error)]
pub enum DeviceIdError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid device ID format: {0}")]
    InvalidFormat(String),
}

/// Get or create the device ID stored in `db`.
///
/// # Returns
/// Device ID string in format "kindling-<uuid>"
pub fn get_or_create_device_id(db: &Database) -> Result<String, DeviceIdError> {
    if let Some(existing) = db.kv_get(DEVICE_ID_KEY)? {
        let device_id = existing.trim().to_string();
        if device_id.starts_with(DEVICE_ID_PREFIX) {
            return Ok(device_id);
        }
        return Err(DeviceIdError::InvalidFormat(device_id));
    }

    let device_id = format!("{}{}", DEVICE_ID_PREFIX, Uuid::new_v4());
    db.kv_set(DEVICE_ID_KEY, &device_id)?;
    Ok(device_id)
}
