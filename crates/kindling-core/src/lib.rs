//! # Kindling Core Library
//!
//! Engine behind a streak-and-cycle habit app: every three days a new
//! photo, message and mini-game unlock, and winning the game keeps the
//! streak alive. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Clock**: calendar-day arithmetic and the 3-day cycle rule
//! - **Streak ledger**: pure loss-check and completion transitions over
//!   [`AppState`]
//! - **Selectors**: no-repeat content rotation and the weighted,
//!   difficulty-gated game scheduler
//! - **Orchestrator**: runs both visit triggers against a
//!   [`PersistenceGateway`]
//! - **Storage**: SQLite snapshot cache and TOML configuration
//! - **Sync**: fire-and-forget HTTP mirror of each saved snapshot
//!
//! ## Key Components
//!
//! - [`CycleOrchestrator`]: load/complete entry points
//! - [`AppState`]: the single persisted aggregate
//! - [`Catalog`]: photos, messages and games to draw from
//! - [`LocalGateway`]: on-disk persistence with optional remote mirror
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod clock;
pub mod error;
pub mod orchestrator;
pub mod random;
pub mod rotation;
pub mod scheduler;
pub mod state;
pub mod storage;
pub mod streak;
pub mod sync;

pub use catalog::{Catalog, Difficulty, Game, Message, Photo};
pub use clock::{Clock, FixedClock, SystemClock, CYCLE_LENGTH_DAYS};
pub use error::{CatalogError, ConfigError, CoreError, DatabaseError, SyncError};
pub use orchestrator::{CompletionOutcome, CompletionReport, CycleOrchestrator, DailyBundle};
pub use random::{PcgRandom, RandomSource, ScriptedRandom};
pub use scheduler::DifficultyTier;
pub use state::{AppState, DailyContent, GameResult, PlayRecord, StreakSummary, MAX_FREEZES};
pub use storage::{Config, Database, LocalGateway, MemoryGateway, PersistenceGateway};
pub use streak::{CompletionResult, CycleStatus, LossOutcome};
