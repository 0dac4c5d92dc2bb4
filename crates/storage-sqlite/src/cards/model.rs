use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use kipo_core::cards::Card;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CardDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub brand: String,
    pub kind: String,
    pub cutoff_date: NaiveDate,
    pub due_date: NaiveDate,
    pub minimum_payment: f64,
    pub no_interest_payment: f64,
    pub paid: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<CardDB> for Card {
    fn from(db: CardDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            brand: db.brand,
            kind: db.kind.parse().unwrap_or_default(),
            cutoff_date: db.cutoff_date,
            due_date: db.due_date,
            minimum_payment: db.minimum_payment,
            no_interest_payment: db.no_interest_payment,
            paid: db.paid,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Card> for CardDB {
    fn from(domain: Card) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            brand: domain.brand,
            kind: domain.kind.as_str().to_string(),
            cutoff_date: domain.cutoff_date,
            due_date: domain.due_date,
            minimum_payment: domain.minimum_payment,
            no_interest_payment: domain.no_interest_payment,
            paid: domain.paid,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
