mod common;

use common::{count_transactions, kst, new_user, setup};
use household_finance::database::db::queries::savings as goals;
use household_finance::database::models::{NewSavingsGoal, TransactionType};
use household_finance::error::AppError;
use household_finance::finance::MAX_AMOUNT;
use household_finance::services::savings;
use sqlx::{Pool, Sqlite};

async fn goal(pool: &Pool<Sqlite>, user_id: i64, name: &str, target: i64, current: i64, primary: bool) -> i64 {
    goals::create_goal(
        pool,
        user_id,
        &NewSavingsGoal {
            name: name.into(),
            icon: "💰".into(),
            target_amount: target,
            current_amount: current,
            target_year: 2026,
            target_month: 12,
            is_primary: primary,
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn deposit_updates_goal_and_records_one_expense() {
    let pool = setup().await;
    let user = new_user(&pool, "saver@example.com").await;
    let id = goal(&pool, user, "여행", 1_000_000, 100_000, false).await;
    let now = kst(2025, 6, 15, 12, 0);

    let receipt = savings::deposit(&pool, user, id, 50_000, now).await.unwrap();
    assert_eq!(receipt.goal.goal.current_amount, 150_000);
    assert_eq!(receipt.transaction.r#type, TransactionType::Expense);
    assert_eq!(receipt.transaction.amount, 50_000);
    assert_eq!(receipt.transaction.savings_goal_id, Some(id));
    assert_eq!(receipt.transaction.occurred_at, now);
    assert!(receipt.transaction.is_savings_contribution());

    let stored = goals::get_goal(&pool, user, id).await.unwrap().unwrap();
    assert_eq!(stored.current_amount, 150_000);
    assert_eq!(count_transactions(&pool, user).await, 1);
}

#[tokio::test]
async fn non_positive_deposits_change_nothing() {
    let pool = setup().await;
    let user = new_user(&pool, "zero@example.com").await;
    let id = goal(&pool, user, "여행", 1_000_000, 100_000, false).await;

    for amount in [0, -1_000] {
        let err = savings::deposit(&pool, user, id, amount, kst(2025, 6, 15, 12, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    let stored = goals::get_goal(&pool, user, id).await.unwrap().unwrap();
    assert_eq!(stored.current_amount, 100_000);
    assert_eq!(count_transactions(&pool, user).await, 0);
}

#[tokio::test]
async fn failed_contribution_rolls_back_the_goal_balance() {
    let pool = setup().await;
    let user = new_user(&pool, "rollback@example.com").await;
    let id = goal(&pool, user, "여행", 1_000_000, 100_000, false).await;

    sqlx::query(
        "CREATE TRIGGER reject_transactions BEFORE INSERT ON transactions \
         BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let err = savings::deposit(&pool, user, id, 50_000, kst(2025, 6, 15, 12, 0)).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    let stored = goals::get_goal(&pool, user, id).await.unwrap().unwrap();
    assert_eq!(stored.current_amount, 100_000);
    assert_eq!(count_transactions(&pool, user).await, 0);
}

#[tokio::test]
async fn oversized_deposit_is_rejected() {
    let pool = setup().await;
    let user = new_user(&pool, "big@example.com").await;
    let id = goal(&pool, user, "집", i64::MAX, 0, false).await;

    let err = savings::deposit(&pool, user, id, MAX_AMOUNT + 1, kst(2025, 6, 15, 12, 0)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count_transactions(&pool, user).await, 0);

    // progress math survives a target at the top of the range
    let listed = savings::list_goal_progress(&pool, user, kst(2025, 12, 1, 0, 0)).await.unwrap();
    assert_eq!(listed[0].progress.monthly_required, i64::MAX / 12 + 1);
}

#[tokio::test]
async fn deposit_into_unknown_or_foreign_goal_is_not_found() {
    let pool = setup().await;
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;
    let alices = goal(&pool, alice, "집", 10_000_000, 0, true).await;

    let err = savings::deposit(&pool, alice, 999, 10_000, kst(2025, 6, 1, 0, 0)).await.unwrap_err();
    assert_eq!(err.to_string(), "Savings goal not found");

    let err = savings::deposit(&pool, bob, alices, 10_000, kst(2025, 6, 1, 0, 0)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(count_transactions(&pool, bob).await, 0);
    let stored = goals::get_goal(&pool, alice, alices).await.unwrap().unwrap();
    assert_eq!(stored.current_amount, 0);
}

#[tokio::test]
async fn deleted_goal_takes_no_deposits() {
    let pool = setup().await;
    let user = new_user(&pool, "gone@example.com").await;
    let id = goal(&pool, user, "차", 5_000_000, 0, false).await;

    assert!(goals::soft_delete_goal(&pool, user, id).await.unwrap());
    let err = savings::deposit(&pool, user, id, 10_000, kst(2025, 6, 1, 0, 0)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn summary_over_all_goals() {
    let pool = setup().await;
    let user = new_user(&pool, "sum@example.com").await;
    goal(&pool, user, "집", 5_000_000, 1_000_000, true).await;
    goal(&pool, user, "여행", 2_000_000, 500_000, false).await;

    let s = savings::savings_summary(&pool, user).await.unwrap();
    assert_eq!(s.total_current_amount, 1_500_000);
    assert_eq!(s.total_target_amount, 7_000_000);
    assert_eq!(s.goals_count, 2);
    assert_eq!(s.progress_percent, 21);
}

#[tokio::test]
async fn listing_skips_expired_goals_and_computes_progress() {
    let pool = setup().await;
    let user = new_user(&pool, "list@example.com").await;
    let active = goal(&pool, user, "집", 5_000_000, 1_000_000, false).await;
    goals::create_goal(
        &pool,
        user,
        &NewSavingsGoal {
            name: "지난 목표".into(),
            icon: String::new(),
            target_amount: 100_000,
            current_amount: 0,
            target_year: 2024,
            target_month: 1,
            is_primary: false,
        },
    )
    .await
    .unwrap();

    // June 2025 -> December 2026 is 18 months
    let list = savings::list_goal_progress(&pool, user, kst(2025, 6, 15, 0, 0)).await.unwrap();
    assert_eq!(list.len(), 1);
    let g = &list[0];
    assert_eq!(g.goal.id, active);
    assert_eq!(g.progress.months_remaining, 18);
    assert_eq!(g.progress.amount_remaining, 4_000_000);
    assert_eq!(g.progress.monthly_required, 222_223);
    assert_eq!(g.progress.progress_percent, 20);
}

#[tokio::test]
async fn only_one_primary_goal() {
    let pool = setup().await;
    let user = new_user(&pool, "primary@example.com").await;
    let first = goal(&pool, user, "집", 5_000_000, 0, true).await;
    let second = goal(&pool, user, "여행", 2_000_000, 0, true).await;

    let list = goals::list_goals(&pool, user).await.unwrap();
    let primaries: Vec<i64> = list.iter().filter(|g| g.is_primary).map(|g| g.id).collect();
    assert_eq!(primaries, vec![second]);

    goals::set_primary(&pool, user, first).await.unwrap().unwrap();
    let list = goals::list_goals(&pool, user).await.unwrap();
    assert_eq!(list[0].id, first);
    assert!(list[0].is_primary);
    assert!(!list[1].is_primary);

    assert!(goals::set_primary(&pool, user, 999).await.unwrap().is_none());
    let still = goals::get_goal(&pool, user, first).await.unwrap().unwrap();
    assert!(still.is_primary);
}
