use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::cards_model::{Card, CardUpdate, NewCard};
use super::cards_traits::{CardRepositoryTrait, CardServiceTrait};
use crate::constants::MAX_UPCOMING_DAYS;
use crate::errors::{Error, FieldErrors, Result};
use crate::utils::ownership::ensure_owner;

pub struct CardService {
    repository: Arc<dyn CardRepositoryTrait>,
}

impl CardService {
    pub fn new(repository: Arc<dyn CardRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn load_owned(&self, user_id: &str, card_id: &str) -> Result<Card> {
        let card = self
            .repository
            .find_card(card_id)?
            .ok_or_else(|| Error::NotFound("Card".to_string()))?;
        ensure_owner(&card.user_id, user_id, "card")?;
        Ok(card)
    }
}

#[async_trait]
impl CardServiceTrait for CardService {
    async fn create_card(&self, user_id: &str, new_card: NewCard) -> Result<Card> {
        let now = Utc::now().naive_utc();
        let card = Card {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_card.name.trim().to_string(),
            brand: new_card.brand.trim().to_string(),
            kind: new_card.kind,
            cutoff_date: new_card.cutoff_date,
            due_date: new_card.due_date,
            minimum_payment: new_card.minimum_payment,
            no_interest_payment: new_card.no_interest_payment,
            paid: new_card.paid,
            created_at: now,
            updated_at: now,
        };
        card.validate()?;
        let card = self.repository.insert_card(card).await?;
        debug!("Created card {} for user {}", card.id, user_id);
        Ok(card)
    }

    fn list_cards(&self, user_id: &str) -> Result<Vec<Card>> {
        self.repository.load_cards(user_id)
    }

    fn get_card(&self, user_id: &str, card_id: &str) -> Result<Card> {
        self.load_owned(user_id, card_id)
    }

    async fn update_card(&self, user_id: &str, card_id: &str, update: CardUpdate) -> Result<Card> {
        let mut card = self.load_owned(user_id, card_id)?;
        update.apply_to(&mut card);
        card.validate()?;
        card.updated_at = Utc::now().naive_utc();
        self.repository.update_card(card).await
    }

    async fn delete_card(&self, user_id: &str, card_id: &str) -> Result<()> {
        let card = self.load_owned(user_id, card_id)?;
        self.repository.delete_card(&card.id).await?;
        Ok(())
    }

    async fn set_paid(&self, user_id: &str, card_id: &str, paid: bool) -> Result<Card> {
        let mut card = self.load_owned(user_id, card_id)?;
        if card.paid == paid {
            return Ok(card);
        }
        card.paid = paid;
        card.updated_at = Utc::now().naive_utc();
        self.repository.update_card(card).await
    }

    fn upcoming_payments(
        &self,
        user_id: &str,
        today: NaiveDate,
        within_days: i64,
    ) -> Result<Vec<Card>> {
        let mut errors = FieldErrors::new();
        errors.check(within_days < 0, "withinDays", "must be zero or a positive number");
        errors.check(
            within_days > MAX_UPCOMING_DAYS,
            "withinDays",
            "must be at most 366 days",
        );
        errors.into_result()?;

        let until = today
            .checked_add_signed(Duration::days(within_days))
            .unwrap_or(NaiveDate::MAX);
        let mut cards: Vec<Card> = self
            .repository
            .load_cards(user_id)?
            .into_iter()
            .filter(|c| !c.paid && c.due_date >= today && c.due_date <= until)
            .collect();
        cards.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        Ok(cards)
    }
}
