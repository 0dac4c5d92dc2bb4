use async_trait::async_trait;
use chrono::NaiveDate;

use super::cards_model::{Card, CardUpdate, NewCard};
use crate::errors::Result;

#[async_trait]
pub trait CardRepositoryTrait: Send + Sync {
    async fn insert_card(&self, card: Card) -> Result<Card>;
    async fn update_card(&self, card: Card) -> Result<Card>;
    async fn delete_card(&self, card_id: &str) -> Result<usize>;
    fn find_card(&self, card_id: &str) -> Result<Option<Card>>;
    /// Cards of `user_id`, soonest due date first.
    fn load_cards(&self, user_id: &str) -> Result<Vec<Card>>;
}

#[async_trait]
pub trait CardServiceTrait: Send + Sync {
    async fn create_card(&self, user_id: &str, new_card: NewCard) -> Result<Card>;
    fn list_cards(&self, user_id: &str) -> Result<Vec<Card>>;
    fn get_card(&self, user_id: &str, card_id: &str) -> Result<Card>;
    async fn update_card(&self, user_id: &str, card_id: &str, update: CardUpdate) -> Result<Card>;
    async fn delete_card(&self, user_id: &str, card_id: &str) -> Result<()>;
    async fn set_paid(&self, user_id: &str, card_id: &str, paid: bool) -> Result<Card>;
    /// Unpaid cards due between `today` and `today + within_days`, soonest first.
    fn upcoming_payments(
        &self,
        user_id: &str,
        today: NaiveDate,
        within_days: i64,
    ) -> Result<Vec<Card>>;
}
