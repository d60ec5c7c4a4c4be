//! Best-effort remote mirroring of the local snapshot.
//!
//! The local cache is always the source of truth for the engine; the remote
//! copy is last-write-wins and only ever written, never read back.

pub mod device_id;
pub mod mirror;
pub mod remote;

pub use device_id::{get_or_create_device_id, DeviceIdError};
pub use mirror::RemoteMirror;
pub use remote::{snapshot_url, HttpRemoteStore, RemoteStore};
