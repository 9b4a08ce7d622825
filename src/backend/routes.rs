use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::{handlers, AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Users
        .route("/api/users", post(handlers::users::create_user))
        .route(
            "/api/users/me",
            get(handlers::users::me).delete(handlers::users::delete_me),
        )
        // Categories
        .route(
            "/api/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route("/api/categories/seed", post(handlers::categories::seed_categories))
        .route(
            "/api/categories/:id",
            patch(handlers::categories::update_category).delete(handlers::categories::delete_category),
        )
        // Transactions
        .route(
            "/api/transactions",
            get(handlers::transactions::list_transactions).post(handlers::transactions::create_transaction),
        )
        .route(
            "/api/transactions/:id",
            get(handlers::transactions::get_transaction)
                .patch(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        // Budgets
        .route(
            "/api/budgets",
            get(handlers::budgets::list_budgets).put(handlers::budgets::upsert_budget),
        )
        .route("/api/budgets/:id", delete(handlers::budgets::delete_budget))
        // Savings goals
        .route(
            "/api/savings-goals",
            get(handlers::savings::list_goals).post(handlers::savings::create_goal),
        )
        .route("/api/savings-goals/summary", get(handlers::savings::goals_summary))
        .route(
            "/api/savings-goals/:id",
            patch(handlers::savings::update_goal).delete(handlers::savings::delete_goal),
        )
        .route("/api/savings-goals/:id/deposit", post(handlers::savings::deposit))
        .route("/api/savings-goals/:id/primary", post(handlers::savings::set_primary))
        // Summaries
        .route("/api/summary/today", get(handlers::summary::today))
        .route("/api/summary/monthly", get(handlers::summary::monthly))
        .route("/api/summary/expenses/daily", get(handlers::summary::daily_expenses))
        // Calendar
        .route("/api/holidays", get(handlers::holidays::list_holidays))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
