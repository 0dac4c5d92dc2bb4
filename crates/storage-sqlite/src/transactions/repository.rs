use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use kipo_core::errors::{DatabaseError, Error, Result};
use kipo_core::transactions::{Transaction, TransactionFilter, TransactionRepositoryTrait};

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction> {
        let row = TransactionDB::from(transaction);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let row = TransactionDB::from(transaction);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let updated = diesel::update(transactions::table.find(&row.id))
                    .set(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::Database(DatabaseError::NotFound(row.id.clone())))?;
                Ok(updated.into())
            })
            .await
    }

    async fn delete(&self, transaction_id: &str) -> Result<usize> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(transactions::table.find(transaction_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn find_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Transaction::from))
    }

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .into_boxed();

        if let Some(kind) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(kind.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(transactions::category.eq(category.clone()));
        }
        if let Some(from) = filter.from {
            query = query.filter(transactions::date.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(transactions::date.le(to));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }
}
