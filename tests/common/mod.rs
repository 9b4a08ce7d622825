#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sqlx::{Pool, Sqlite};

use household_finance::database::db::connection::memory_pool;
use household_finance::database::db::migrate::run_migrations;
use household_finance::database::db::queries::{categories, transactions, users};
use household_finance::database::models::{NewCategory, NewTransaction, Transaction, TransactionType};

pub async fn setup() -> Pool<Sqlite> {
    let pool = memory_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn new_user(pool: &Pool<Sqlite>, email: &str) -> i64 {
    users::create_user(pool, email, "테스트").await.unwrap().id
}

pub async fn new_category(pool: &Pool<Sqlite>, user_id: i64, name: &str, r#type: TransactionType) -> i64 {
    let c = NewCategory {
        name: name.to_string(),
        r#type,
        color: "#000000".into(),
        icon: String::new(),
        default_budget: None,
        sort_order: 0,
    };
    categories::create_category(pool, user_id, &c).await.unwrap().id
}

/// Wall-clock time in Korea.
pub fn kst(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, hh, mm, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub async fn record(
    pool: &Pool<Sqlite>,
    user_id: i64,
    r#type: TransactionType,
    amount: i64,
    occurred_at: DateTime<Utc>,
    category_id: Option<i64>,
) -> Transaction {
    let t = NewTransaction {
        r#type,
        amount,
        occurred_at,
        category_id,
        savings_goal_id: None,
        description: None,
    };
    transactions::create_transaction(pool, user_id, &t).await.unwrap()
}

pub async fn count_transactions(pool: &Pool<Sqlite>, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE user_id = ? AND deleted_at IS NULL")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
