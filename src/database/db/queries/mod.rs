/*
SQL for every table. Each function scopes its reads to one owner and to rows
whose deleted_at is NULL; deletes only stamp deleted_at.
 */

pub mod budgets;
pub mod categories;
pub mod reports;
pub mod savings;
pub mod transactions;
pub mod users;

use chrono::Utc;

pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
