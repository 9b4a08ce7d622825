pub mod budgets;
pub mod categories;
pub mod holidays;
pub mod savings;
pub mod summary;
pub mod transactions;
pub mod users;

pub async fn health() -> &'static str {
    "Backend is running"
}
