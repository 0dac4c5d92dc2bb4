use super::*;
use crate::errors::Error;
use crate::goals::GoalService;
use crate::test_support::{
    test_user, FailingAdvisor, MockGoalRepository, MockRecommendationRepository,
    MockTransactionRepository, StaticAdvisor, StubUserService,
};
use crate::transactions::{NewTransaction, TransactionService, TransactionServiceTrait};
use std::sync::Arc;

struct Harness {
    transactions: Arc<TransactionService>,
    repository: MockRecommendationRepository,
    service: RecommendationService,
}

fn harness(advisor: Arc<dyn AdvisorTrait>) -> Harness {
    let users = Arc::new(StubUserService::with_users(vec![
        test_user("u1", "ana@mail.com"),
        test_user("u2", "bob@mail.com"),
    ]));
    let transactions = Arc::new(TransactionService::new(Arc::new(
        MockTransactionRepository::default(),
    )));
    let goals = Arc::new(GoalService::new(
        Arc::new(MockGoalRepository::default()),
        users.clone(),
        advisor.clone(),
    ));
    let repository = MockRecommendationRepository::default();
    let service = RecommendationService::new(
        Arc::new(repository.clone()),
        transactions.clone(),
        users,
        goals,
        advisor,
    );
    Harness {
        transactions,
        repository,
        service,
    }
}

fn draft(kind: &str, title: &str) -> RecommendationDraft {
    RecommendationDraft {
        recommendation_type: kind.to_string(),
        title: title.to_string(),
        message: format!("{title} message"),
        category: Some("food".into()),
    }
}

async fn expense(h: &Harness, user_id: &str) -> String {
    h.transactions
        .create_transaction(
            user_id,
            NewTransaction {
                amount: 64.0,
                category: "food".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn advisor_failure_yields_empty_list() {
    let h = harness(Arc::new(FailingAdvisor));
    let tx = expense(&h, "u1").await;
    let recs = h.service.generate_for_transaction("u1", &tx).await.unwrap();
    assert!(recs.is_empty());
    assert!(h.repository.recommendations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn drops_unknown_types_and_caps_at_three() {
    let h = harness(Arc::new(StaticAdvisor {
        drafts: vec![
            draft("lottery", "Buy tickets"),
            draft("saving", "Round up"),
            draft("Budget", "Cap dining"),
            draft("spending", " "),
            draft("goal", "Feed the fund"),
            draft("spending", "Cook at home"),
        ],
        ..Default::default()
    }));
    let tx = expense(&h, "u1").await;
    let recs = h.service.generate_for_transaction("u1", &tx).await.unwrap();

    let kinds: Vec<RecommendationType> = recs.iter().map(|r| r.recommendation_type).collect();
    assert_eq!(
        kinds,
        vec![
            RecommendationType::Saving,
            RecommendationType::Budget,
            RecommendationType::Goal
        ]
    );
    assert!(recs
        .iter()
        .all(|r| r.transaction_id.as_deref() == Some(tx.as_str()) && r.user_id == "u1"));
    assert_eq!(h.service.list_recommendations("u1", None).unwrap().len(), 3);
}

#[tokio::test]
async fn cannot_generate_for_someone_elses_transaction() {
    let h = harness(Arc::new(StaticAdvisor {
        drafts: vec![draft("saving", "Round up")],
        ..Default::default()
    }));
    let tx = expense(&h, "u1").await;
    assert!(matches!(
        h.service.generate_for_transaction("u2", &tx).await,
        Err(Error::Forbidden(_))
    ));
}

#[tokio::test]
async fn advice_falls_back_to_local_text() {
    let h = harness(Arc::new(FailingAdvisor));
    expense(&h, "u1").await;
    let advice = h.service.get_advice("u1", Some("How do I save?".into())).await.unwrap();
    assert_eq!(advice.source, SuggestionSource::Fallback);
    assert!(advice.advice.contains("64.00"));
}

#[tokio::test]
async fn advice_from_advisor_is_trimmed() {
    let h = harness(Arc::new(StaticAdvisor {
        advice: "  Spend less on takeout.  ".into(),
        ..Default::default()
    }));
    let advice = h.service.get_advice("u1", None).await.unwrap();
    assert_eq!(advice.source, SuggestionSource::Ai);
    assert_eq!(advice.advice, "Spend less on takeout.");
}

#[tokio::test]
async fn delete_checks_owner() {
    let h = harness(Arc::new(StaticAdvisor {
        drafts: vec![draft("saving", "Round up")],
        ..Default::default()
    }));
    let tx = expense(&h, "u1").await;
    let rec = h
        .service
        .generate_for_transaction("u1", &tx)
        .await
        .unwrap()
        .remove(0);

    assert!(matches!(
        h.service.delete_recommendation("u2", &rec.id).await,
        Err(Error::Forbidden(_))
    ));
    h.service.delete_recommendation("u1", &rec.id).await.unwrap();
    assert!(matches!(
        h.service.delete_recommendation("u1", &rec.id).await,
        Err(Error::NotFound(_))
    ));
}
