mod common;

use chrono::NaiveDate;
use common::{new_category, new_user, setup};
use household_finance::database::db::queries::budgets;
use household_finance::database::models::TransactionType::Expense;

fn month(m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, 1).unwrap()
}

#[tokio::test]
async fn upsert_is_idempotent_per_key() {
    let pool = setup().await;
    let user = new_user(&pool, "budget@example.com").await;
    let food = new_category(&pool, user, "식비", Expense).await;

    let first = budgets::upsert_budget(&pool, user, Some(food), month(3), 50_000).await.unwrap();
    let second = budgets::upsert_budget(&pool, user, Some(food), month(3), 70_000).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.amount, 70_000);

    let list = budgets::list_budgets(&pool, user, month(3)).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].amount, 70_000);
}

#[tokio::test]
async fn whole_month_and_category_budgets_are_separate_keys() {
    let pool = setup().await;
    let user = new_user(&pool, "keys@example.com").await;
    let food = new_category(&pool, user, "식비", Expense).await;

    let whole = budgets::upsert_budget(&pool, user, None, month(3), 1_000_000).await.unwrap();
    let again = budgets::upsert_budget(&pool, user, None, month(3), 900_000).await.unwrap();
    assert_eq!(whole.id, again.id);
    budgets::upsert_budget(&pool, user, Some(food), month(3), 300_000).await.unwrap();
    budgets::upsert_budget(&pool, user, Some(food), month(4), 300_000).await.unwrap();

    assert_eq!(budgets::list_budgets(&pool, user, month(3)).await.unwrap().len(), 2);
    assert_eq!(budgets::whole_month_budget(&pool, user, month(3)).await.unwrap(), Some(900_000));
    assert_eq!(budgets::whole_month_budget(&pool, user, month(4)).await.unwrap(), None);
}

#[tokio::test]
async fn upsert_revives_deleted_budget() {
    let pool = setup().await;
    let user = new_user(&pool, "revive@example.com").await;

    let b = budgets::upsert_budget(&pool, user, None, month(5), 100_000).await.unwrap();
    assert!(budgets::soft_delete_budget(&pool, user, b.id).await.unwrap());
    assert!(budgets::list_budgets(&pool, user, month(5)).await.unwrap().is_empty());
    assert!(!budgets::soft_delete_budget(&pool, user, b.id).await.unwrap());

    let revived = budgets::upsert_budget(&pool, user, None, month(5), 120_000).await.unwrap();
    assert_eq!(revived.id, b.id);
    assert!(revived.deleted_at.is_none());
    assert_eq!(budgets::list_budgets(&pool, user, month(5)).await.unwrap().len(), 1);
}
