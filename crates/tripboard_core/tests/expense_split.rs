use chrono::{NaiveDate, Utc};
use tripboard_core::{
    EntityKind, Expense, ExpenseCategory, ExpensePatch, Latency, Member, MemberRole, MemberStatus,
    NewExpense, Payer, RepoError, Split, TripStore,
};

fn store() -> TripStore {
    TripStore::empty(Latency::none())
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
}

fn split(member_id: &str, amount: f64, paid: bool) -> Split {
    Split {
        member_id: member_id.to_string(),
        name: format!("member {member_id}"),
        amount,
        paid,
    }
}

fn expense(trip_id: &str, amount: f64, category: ExpenseCategory) -> Expense {
    Expense {
        id: String::new(),
        trip_id: trip_id.to_string(),
        title: "shared cost".to_string(),
        description: String::new(),
        amount,
        currency: "USD".to_string(),
        category,
        date: date(),
        paid_by: Payer {
            member_id: "m1".to_string(),
            name: "member m1".to_string(),
        },
        splits: vec![split("m1", amount / 2.0, true), split("m2", amount / 2.0, false)],
        created_at: None,
        updated_at: None,
    }
}

fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        trip_id: "t1".to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        role: MemberRole::Member,
        avatar: String::new(),
        joined_at: Utc::now(),
        status: MemberStatus::Active,
    }
}

#[tokio::test]
async fn summary_totals_by_category() {
    let store = store();
    let service = store.expense_service();
    store
        .expenses()
        .create(expense("t1", 450.0, ExpenseCategory::Accommodation))
        .await;
    store
        .expenses()
        .create(expense("t1", 680.0, ExpenseCategory::Transportation))
        .await;
    store
        .expenses()
        .create(expense("t2", 99.0, ExpenseCategory::Food))
        .await;

    let summary = service.get_trip_summary("t1").await;
    assert_eq!(summary.total_amount, 1130.0);
    assert_eq!(summary.total_expenses, 2);
    assert_eq!(summary.category_summary.len(), 2);
    assert_eq!(
        summary.category_summary[&ExpenseCategory::Accommodation],
        450.0
    );
    assert_eq!(
        summary.category_summary[&ExpenseCategory::Transportation],
        680.0
    );
    assert_eq!(summary.expenses.len(), 2);
}

#[tokio::test]
async fn summary_is_recomputed_after_writes() {
    let store = store();
    let service = store.expense_service();
    let created = store
        .expenses()
        .create(expense("t1", 100.0, ExpenseCategory::Food))
        .await;
    assert_eq!(service.get_trip_summary("t1").await.total_amount, 100.0);

    store.expenses().delete(&created.id).await.unwrap();
    let summary = service.get_trip_summary("t1").await;
    assert_eq!(summary.total_amount, 0.0);
    assert!(summary.category_summary.is_empty());
}

#[tokio::test]
async fn summary_serializes_with_camel_case_category_keys() {
    let store = store();
    store
        .expenses()
        .create(expense("t1", 450.0, ExpenseCategory::Accommodation))
        .await;

    let summary = store.expense_service().get_trip_summary("t1").await;
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["totalAmount"], 450.0);
    assert_eq!(json["totalExpenses"], 1);
    assert_eq!(json["categorySummary"]["accommodation"], 450.0);
}

#[tokio::test]
async fn update_payment_status_flips_only_target_split() {
    let store = store();
    let created = store
        .expenses()
        .create(expense("t1", 200.0, ExpenseCategory::Food))
        .await;

    let updated = store
        .expense_service()
        .update_payment_status(&created.id, "m2", true)
        .await
        .unwrap();

    assert!(updated.splits.iter().all(|split| split.paid));
    assert!(updated.updated_at >= created.updated_at);
    let stored = store.expenses().get_by_id(&created.id).await.unwrap();
    assert_eq!(stored, updated);

    let reverted = store
        .expense_service()
        .update_payment_status(&created.id, "m1", false)
        .await
        .unwrap();
    assert!(!reverted.splits[0].paid);
    assert!(reverted.splits[1].paid);
}

#[tokio::test]
async fn update_payment_status_for_unknown_member_leaves_expense_unchanged() {
    let store = store();
    let created = store
        .expenses()
        .create(expense("t1", 200.0, ExpenseCategory::Food))
        .await;

    let returned = store
        .expense_service()
        .update_payment_status(&created.id, "stranger", true)
        .await
        .unwrap();
    assert_eq!(returned, created);
}

#[tokio::test]
async fn update_payment_status_on_missing_expense_is_not_found() {
    let store = store();
    let err = store
        .expense_service()
        .update_payment_status("nope", "m1", true)
        .await
        .unwrap_err();
    assert_eq!(err, RepoError::not_found(EntityKind::Expense, "nope"));
}

#[tokio::test]
async fn splits_are_not_recomputed_when_amount_changes() {
    let store = store();
    let created = store
        .expenses()
        .create(expense("t1", 200.0, ExpenseCategory::Food))
        .await;

    let patch = ExpensePatch {
        amount: Some(500.0),
        ..ExpensePatch::default()
    };
    let updated = store.expenses().update(&created.id, patch).await.unwrap();
    assert_eq!(updated.amount, 500.0);
    assert_eq!(updated.splits, created.splits);
}

#[tokio::test]
async fn equal_split_marks_only_payer_paid() {
    let store = store();
    let payer = member("m1", "Sarah");
    let participants = vec![
        payer.clone(),
        member("m2", "Mike"),
        member("m3", "Emma"),
        member("m4", "Alex"),
    ];
    let input = NewExpense {
        trip_id: "t1".to_string(),
        title: "Dinner".to_string(),
        description: "Izakaya".to_string(),
        amount: 120.0,
        currency: "USD".to_string(),
        category: ExpenseCategory::Food,
        date: date(),
    };

    let created = store
        .expense_service()
        .create_equal_split(input, &payer, &participants)
        .await
        .unwrap();

    assert_eq!(created.splits.len(), 4);
    assert!(created.splits.iter().all(|split| split.amount == 30.0));
    assert!(created.splits[0].paid);
    assert!(created.splits[1..].iter().all(|split| !split.paid));
    assert_eq!(created.paid_by.member_id, "m1");
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn equal_split_without_participants_is_rejected() {
    let store = store();
    let payer = member("m1", "Sarah");
    let input = NewExpense {
        trip_id: "t1".to_string(),
        title: "Taxi".to_string(),
        description: String::new(),
        amount: 40.0,
        currency: "USD".to_string(),
        category: ExpenseCategory::Transportation,
        date: date(),
    };

    let err = store
        .expense_service()
        .create_equal_split(input, &payer, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidInput(_)));
    assert!(store.expenses().is_empty().await);
}

#[tokio::test]
async fn outstanding_balances_sum_unpaid_splits_per_member() {
    let store = store();
    store
        .expenses()
        .create(expense("t1", 100.0, ExpenseCategory::Food))
        .await;
    store
        .expenses()
        .create(expense("t1", 60.0, ExpenseCategory::Activities))
        .await;

    let balances = store.expense_service().outstanding_balances("t1").await;
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].member_id, "m1");
    assert_eq!(balances[0].outstanding, 0.0);
    assert_eq!(balances[1].member_id, "m2");
    assert_eq!(balances[1].outstanding, 80.0);
}

#[tokio::test]
async fn expense_outstanding_counts_unpaid_splits_only() {
    let store = store();
    let service = store.expense_service();
    let created = store
        .expenses()
        .create(expense("t1", 90.0, ExpenseCategory::Transportation))
        .await;
    assert_eq!(created.outstanding(), 45.0);

    let settled = service
        .update_payment_status(&created.id, "m2", true)
        .await
        .unwrap();
    assert_eq!(settled.outstanding(), 0.0);
}
