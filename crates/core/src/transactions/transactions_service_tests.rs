use super::*;
use crate::errors::Error;
use crate::test_support::MockTransactionRepository;
use chrono::NaiveDate;
use std::sync::Arc;

fn service() -> TransactionService {
    TransactionService::new(Arc::new(MockTransactionRepository::default()))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(amount: f64, category: &str, on: NaiveDate) -> NewTransaction {
    NewTransaction {
        transaction_type: TransactionType::Expense,
        amount,
        category: category.to_string(),
        date: Some(on),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_assigns_defaults() {
    let svc = service();
    let created = svc
        .create_transaction(
            "u1",
            NewTransaction {
                transaction_type: TransactionType::Income,
                amount: 1200.0,
                category: "  salary ".to_string(),
                description: Some("   ".to_string()),
                tags: vec![" work".into(), "work".into(), "".into()],
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(created.user_id, "u1");
    assert_eq!(created.category, "salary");
    assert_eq!(created.description, None);
    assert_eq!(created.date, crate::utils::time_utils::today());
    assert!(!created.is_recurring);
    assert_eq!(created.tags, vec!["work".to_string()]);
    assert_eq!(created.created_at, created.updated_at);
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let svc = service();
    let err = svc
        .create_transaction(
            "u1",
            NewTransaction {
                amount: 0.0,
                category: " ".to_string(),
                is_recurring: true,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    match err {
        Error::Validation(v) => {
            let fields: Vec<String> = v.field_errors().into_iter().map(|f| f.field).collect();
            assert_eq!(fields, vec!["amount", "category", "recurrenceFrequency"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn recurring_transaction_keeps_frequency() {
    let svc = service();
    let created = svc
        .create_transaction(
            "u1",
            NewTransaction {
                amount: 15.99,
                category: "subscriptions".into(),
                is_recurring: true,
                recurrence_frequency: Some(RecurrenceFrequency::Monthly),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        created.recurrence_frequency,
        Some(RecurrenceFrequency::Monthly)
    );
}

#[tokio::test]
async fn list_is_scoped_filtered_and_newest_first() {
    let svc = service();
    svc.create_transaction("u1", expense(10.0, "food", date(2024, 1, 5)))
        .await
        .unwrap();
    svc.create_transaction("u1", expense(20.0, "food", date(2024, 3, 5)))
        .await
        .unwrap();
    svc.create_transaction("u1", expense(30.0, "rent", date(2024, 2, 5)))
        .await
        .unwrap();
    svc.create_transaction("u2", expense(99.0, "food", date(2024, 2, 5)))
        .await
        .unwrap();

    let all = svc
        .list_transactions("u1", TransactionFilter::default())
        .unwrap();
    let dates: Vec<NaiveDate> = all.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 3, 5), date(2024, 2, 5), date(2024, 1, 5)]
    );

    let food = svc
        .list_transactions(
            "u1",
            TransactionFilter {
                category: Some("food".into()),
                from: Some(date(2024, 2, 1)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].amount, 20.0);
}

#[tokio::test]
async fn list_rejects_inverted_range() {
    let svc = service();
    let err = svc
        .list_transactions(
            "u1",
            TransactionFilter::between(Some(date(2024, 5, 1)), Some(date(2024, 4, 1))),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn foreign_transaction_is_forbidden_and_missing_is_not_found() {
    let svc = service();
    let created = svc
        .create_transaction("u1", expense(10.0, "food", date(2024, 1, 5)))
        .await
        .unwrap();

    assert!(matches!(
        svc.get_transaction("u2", &created.id),
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        svc.delete_transaction("u2", &created.id).await,
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        svc.get_transaction("u1", "missing"),
        Err(Error::NotFound(_))
    ));
    // Still there after the rejected delete.
    assert!(svc.get_transaction("u1", &created.id).is_ok());
}

#[tokio::test]
async fn update_is_partial_and_revalidated() {
    let svc = service();
    let created = svc
        .create_transaction("u1", expense(10.0, "food", date(2024, 1, 5)))
        .await
        .unwrap();

    let updated = svc
        .update_transaction(
            "u1",
            &created.id,
            TransactionUpdate {
                amount: Some(12.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, 12.5);
    assert_eq!(updated.category, "food");
    assert_eq!(updated.date, created.date);

    let err = svc
        .update_transaction(
            "u1",
            &created.id,
            TransactionUpdate {
                amount: Some(-1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(svc.get_transaction("u1", &created.id).unwrap().amount, 12.5);
}

#[tokio::test]
async fn summary_totals_and_orders_categories() {
    let svc = service();
    svc.create_transaction(
        "u1",
        NewTransaction {
            transaction_type: TransactionType::Income,
            amount: 1000.0,
            category: "salary".into(),
            date: Some(date(2024, 1, 1)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    svc.create_transaction("u1", expense(40.0, "food", date(2024, 1, 2)))
        .await
        .unwrap();
    svc.create_transaction("u1", expense(25.5, "food", date(2024, 1, 3)))
        .await
        .unwrap();
    svc.create_transaction("u1", expense(300.0, "rent", date(2024, 1, 4)))
        .await
        .unwrap();

    let summary = svc.get_summary("u1", None, None).unwrap();
    assert_eq!(summary.total_income, 1000.0);
    assert_eq!(summary.total_expenses, 365.5);
    assert_eq!(summary.balance, 634.5);
    assert_eq!(summary.transaction_count, 4);
    let categories: Vec<&str> = summary
        .expenses_by_category
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(categories, vec!["rent", "food"]);
    assert_eq!(summary.expenses_by_category[1].count, 2);
}

#[test]
fn transaction_type_wire_format() {
    let json = serde_json::json!({ "amount": 5.0, "category": "coffee" });
    let parsed: NewTransaction = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.transaction_type, TransactionType::Expense);
    assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
}
