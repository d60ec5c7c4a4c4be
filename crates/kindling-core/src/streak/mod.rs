//! Streak bookkeeping: the loss check, challenge completion and the derived
//! cycle status.
//!
//! The ledger works on 3-day cycles with one extra day of grace: a streak
//! last advanced on day `N` is only at risk from day `N + 4` onwards, and a
//! freeze, when available, absorbs the miss instead of a reset.

pub mod ledger;
pub mod status;

pub use ledger::{
    check_loss, complete_challenge, CompletionResult, LossOutcome, FREEZE_EARN_PROBABILITY,
    LOSS_THRESHOLD_DAYS,
};
pub use status::{cycle_status, CycleStatus};
