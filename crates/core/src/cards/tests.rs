use super::*;
use crate::errors::{DatabaseError, Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockCardRepository {
    cards: Mutex<Vec<Card>>,
}

#[async_trait]
impl CardRepositoryTrait for MockCardRepository {
    async fn insert_card(&self, card: Card) -> Result<Card> {
        self.cards.lock().unwrap().push(card.clone());
        Ok(card)
    }

    async fn update_card(&self, card: Card) -> Result<Card> {
        let mut cards = self.cards.lock().unwrap();
        let slot = cards
            .iter_mut()
            .find(|c| c.id == card.id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(card.id.clone())))?;
        *slot = card.clone();
        Ok(card)
    }

    async fn delete_card(&self, card_id: &str) -> Result<usize> {
        let mut cards = self.cards.lock().unwrap();
        let before = cards.len();
        cards.retain(|c| c.id != card_id);
        Ok(before - cards.len())
    }

    fn find_card(&self, card_id: &str) -> Result<Option<Card>> {
        Ok(self
            .cards
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == card_id)
            .cloned())
    }

    fn load_cards(&self, user_id: &str) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .cards
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        Ok(cards)
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn service() -> CardService {
    CardService::new(Arc::new(MockCardRepository::default()))
}

fn new_card(name: &str, cutoff: NaiveDate, due: NaiveDate) -> NewCard {
    NewCard {
        name: name.to_string(),
        brand: "Visa".to_string(),
        kind: CardKind::Credit,
        cutoff_date: cutoff,
        due_date: due,
        minimum_payment: 50.0,
        no_interest_payment: 400.0,
        paid: false,
    }
}

#[tokio::test]
async fn create_trims_and_persists() {
    let svc = service();
    let card = svc
        .create_card(
            "u1",
            NewCard {
                name: "  Travel card ".into(),
                ..new_card("x", d(2024, 5, 1), d(2024, 5, 20))
            },
        )
        .await
        .unwrap();
    assert_eq!(card.name, "Travel card");
    assert_eq!(card.user_id, "u1");
    assert!(!card.paid);
    assert_eq!(svc.list_cards("u1").unwrap().len(), 1);
}

#[tokio::test]
async fn create_validates_payments_and_dates() {
    let svc = service();
    let err = svc
        .create_card(
            "u1",
            NewCard {
                brand: "".into(),
                minimum_payment: 500.0,
                no_interest_payment: 100.0,
                ..new_card("Main", d(2024, 5, 20), d(2024, 5, 1))
            },
        )
        .await
        .unwrap_err();
    match err {
        Error::Validation(v) => {
            let fields: Vec<String> = v.field_errors().into_iter().map(|f| f.field).collect();
            assert_eq!(fields, vec!["brand", "minimumPayment", "dueDate"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn ownership_is_enforced() {
    let svc = service();
    let card = svc
        .create_card("u1", new_card("Main", d(2024, 5, 1), d(2024, 5, 20)))
        .await
        .unwrap();

    assert!(matches!(
        svc.delete_card("u2", &card.id).await,
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        svc.set_paid("u2", &card.id, true).await,
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(svc.get_card("u1", "missing"), Err(Error::NotFound(_))));
}

#[tokio::test]
async fn update_revalidates() {
    let svc = service();
    let card = svc
        .create_card("u1", new_card("Main", d(2024, 5, 1), d(2024, 5, 20)))
        .await
        .unwrap();
    let err = svc
        .update_card(
            "u1",
            &card.id,
            CardUpdate {
                due_date: Some(d(2024, 4, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let updated = svc
        .update_card(
            "u1",
            &card.id,
            CardUpdate {
                minimum_payment: Some(80.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.minimum_payment, 80.0);
    assert_eq!(updated.due_date, d(2024, 5, 20));
}

#[tokio::test]
async fn upcoming_skips_paid_and_out_of_window() {
    let svc = service();
    let today = d(2024, 5, 10);
    svc.create_card("u1", new_card("Later", d(2024, 5, 1), d(2024, 5, 30)))
        .await
        .unwrap();
    let soon = svc
        .create_card("u1", new_card("Soon", d(2024, 5, 1), d(2024, 5, 12)))
        .await
        .unwrap();
    let paid = svc
        .create_card("u1", new_card("Paid", d(2024, 5, 1), d(2024, 5, 11)))
        .await
        .unwrap();
    svc.create_card("u1", new_card("Past", d(2024, 4, 1), d(2024, 5, 2)))
        .await
        .unwrap();
    svc.set_paid("u1", &paid.id, true).await.unwrap();

    let upcoming = svc.upcoming_payments("u1", today, 7).unwrap();
    let names: Vec<&str> = upcoming.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Soon"]);
    assert_eq!(upcoming[0].id, soon.id);

    let wider = svc.upcoming_payments("u1", today, 30).unwrap();
    let names: Vec<&str> = wider.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Soon", "Later"]);

    assert!(svc.upcoming_payments("u1", today, -1).is_err());
}

#[tokio::test]
async fn upcoming_rejects_windows_beyond_a_year() {
    let svc = service();
    let today = d(2024, 1, 1);
    svc.create_card("u1", new_card("Soon", d(2023, 12, 20), d(2024, 1, 5)))
        .await
        .unwrap();

    for days in [367, 100_000_000, i64::MAX] {
        let err = svc.upcoming_payments("u1", today, days).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "days={days}");
    }
    assert_eq!(svc.upcoming_payments("u1", today, 366).unwrap().len(), 1);
}

#[tokio::test]
async fn upcoming_near_the_end_of_the_calendar_does_not_overflow() {
    let svc = service();
    let today = NaiveDate::MAX - chrono::Duration::days(3);
    svc.create_card("u1", new_card("Edge", today, NaiveDate::MAX))
        .await
        .unwrap();

    let upcoming = svc.upcoming_payments("u1", today, 30).unwrap();
    assert_eq!(upcoming.len(), 1);
}
