use async_trait::async_trait;
use chrono::NaiveDate;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionSummary, TransactionUpdate,
};
use crate::errors::Result;

/// Persistence contract for transactions.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn create(&self, transaction: Transaction) -> Result<Transaction>;

    async fn update(&self, transaction: Transaction) -> Result<Transaction>;

    async fn delete(&self, transaction_id: &str) -> Result<usize>;

    fn find_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>>;

    /// Transactions of `user_id` matching `filter`, newest date first.
    /// `filter.limit` of `None` means no limit.
    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    fn list_transactions(&self, user_id: &str, filter: TransactionFilter)
        -> Result<Vec<Transaction>>;

    /// Every expense of `user_id` in `category` dated within `from..=to`,
    /// without the page-size clamp applied by `list_transactions`.
    fn list_category_expenses(
        &self,
        user_id: &str,
        category: &str,
        from: Option<NaiveDate>,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>>;

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;

    fn get_summary(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<TransactionSummary>;
}
