//! Pure calculations: no database access, no clock reads.

pub mod aggregate;
pub mod format;
pub mod holidays;
pub mod kst;
pub mod progress;

/// Largest amount a single transaction, deposit, budget or goal may carry (1조 원).
/// Keeps monthly sums far away from `i64` overflow.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

pub use aggregate::{percent, BudgetUsage, DailyAmount};
pub use kst::{DateError, TimeRange};
pub use progress::{GoalProgress, SavingsTotals};
