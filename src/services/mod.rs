//! Store-backed operations shared by the HTTP handlers and the dashboard.
//! Each one is a function of (pool, owner, period, now); none reads the clock.

pub mod savings;
pub mod summary;

use crate::error::{AppError, Result};

/// Rejects a missing owner before any query runs.
pub fn ensure_owner(user_id: i64) -> Result<()> {
    if user_id <= 0 {
        return Err(AppError::validation("userId is required"));
    }
    Ok(())
}
