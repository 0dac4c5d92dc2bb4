use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use kipo_core::cards::{Card, CardRepositoryTrait};
use kipo_core::errors::{DatabaseError, Error, Result};

use super::model::CardDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::cards;

pub struct CardRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CardRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CardRepositoryTrait for CardRepository {
    async fn insert_card(&self, card: Card) -> Result<Card> {
        let row = CardDB::from(card);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Card> {
                let inserted = diesel::insert_into(cards::table)
                    .values(&row)
                    .returning(CardDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    async fn update_card(&self, card: Card) -> Result<Card> {
        let row = CardDB::from(card);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Card> {
                diesel::update(cards::table.find(&row.id))
                    .set(&row)
                    .returning(CardDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .map(Card::from)
                    .ok_or_else(|| Error::Database(DatabaseError::NotFound(row.id.clone())))
            })
            .await
    }

    async fn delete_card(&self, card_id: &str) -> Result<usize> {
        let card_id = card_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(cards::table.find(card_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn find_card(&self, card_id: &str) -> Result<Option<Card>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(cards::table
            .find(card_id)
            .select(CardDB::as_select())
            .first::<CardDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Card::from))
    }

    fn load_cards(&self, user_id: &str) -> Result<Vec<Card>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = cards::table
            .filter(cards::user_id.eq(user_id))
            .select(CardDB::as_select())
            .order((cards::due_date.asc(), cards::name.asc()))
            .load::<CardDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Card::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_user, test_db};
    use chrono::{NaiveDate, Utc};
    use kipo_core::cards::CardKind;

    fn card(user_id: &str, name: &str, due: u32) -> Card {
        let now = Utc::now().naive_utc();
        Card {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            brand: "Visa".to_string(),
            kind: CardKind::Debit,
            cutoff_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, due).unwrap(),
            minimum_payment: 50.0,
            no_interest_payment: 400.0,
            paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn cards_are_listed_soonest_due_first() {
        let (pool, writer, _dir) = test_db();
        let user = insert_user(&pool, &writer, "ana@mail.com").await;
        let repo = CardRepository::new(pool, writer);

        repo.insert_card(card(&user.id, "Later", 25)).await.unwrap();
        repo.insert_card(card(&user.id, "Sooner", 10)).await.unwrap();

        let names: Vec<_> = repo
            .load_cards(&user.id)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn update_persists_paid_flag_and_kind() {
        let (pool, writer, _dir) = test_db();
        let user = insert_user(&pool, &writer, "ana@mail.com").await;
        let repo = CardRepository::new(pool, writer);

        let mut saved = repo.insert_card(card(&user.id, "Main", 20)).await.unwrap();
        saved.paid = true;
        repo.update_card(saved.clone()).await.unwrap();

        let found = repo.find_card(&saved.id).unwrap().unwrap();
        assert!(found.paid);
        assert_eq!(found.kind, CardKind::Debit);

        assert_eq!(repo.delete_card(&saved.id).await.unwrap(), 1);
        let err = repo.update_card(saved).await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }
}
