//! Database model for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use kipo_core::transactions::Transaction;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<String>,
    /// JSON array of strings.
    pub tags: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            transaction_type: db.transaction_type.parse().unwrap_or_default(),
            amount: db.amount,
            category: db.category,
            description: db.description,
            date: db.date,
            is_recurring: db.is_recurring,
            recurrence_frequency: db.recurrence_frequency.and_then(|f| f.parse().ok()),
            tags: serde_json::from_str(&db.tags).unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            amount: domain.amount,
            category: domain.category,
            description: domain.description,
            date: domain.date,
            is_recurring: domain.is_recurring,
            recurrence_frequency: domain.recurrence_frequency.map(|f| f.as_str().to_string()),
            tags: serde_json::to_string(&domain.tags).unwrap_or_else(|_| "[]".to_string()),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
