use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::transactions_model::{
    CategoryTotal, NewTransaction, Transaction, TransactionFilter, TransactionSummary,
    TransactionType, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Error, Result};
use crate::users::normalize_labels;
use crate::utils::ownership::{clamp_limit, ensure_owner};
use crate::utils::time_utils::{round_cents, today};

const RESOURCE: &str = "Transaction";

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn load_owned(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let transaction = self
            .repository
            .find_by_id(transaction_id)?
            .ok_or_else(|| Error::NotFound(RESOURCE.to_string()))?;
        ensure_owner(&transaction.user_id, user_id, "transaction")?;
        Ok(transaction)
    }
}

/// Folds a set of transactions into income/expense totals.
pub fn summarize(
    transactions: &[Transaction],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> TransactionSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut by_category: HashMap<&str, (f64, usize)> = HashMap::new();

    for t in transactions {
        match t.transaction_type {
            TransactionType::Income => total_income += t.amount,
            TransactionType::Expense => {
                total_expenses += t.amount;
                let entry = by_category.entry(t.category.as_str()).or_insert((0.0, 0));
                entry.0 += t.amount;
                entry.1 += 1;
            }
        }
    }

    let mut expenses_by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total: round_cents(total),
            count,
        })
        .collect();
    expenses_by_category.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    TransactionSummary {
        from,
        to,
        total_income: round_cents(total_income),
        total_expenses: round_cents(total_expenses),
        balance: round_cents(total_income - total_expenses),
        transaction_count: transactions.len(),
        expenses_by_category,
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        let now = Utc::now().naive_utc();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            transaction_type: new_transaction.transaction_type,
            amount: new_transaction.amount,
            category: new_transaction.category.trim().to_string(),
            description: new_transaction
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            date: new_transaction.date.unwrap_or_else(today),
            is_recurring: new_transaction.is_recurring,
            recurrence_frequency: new_transaction.recurrence_frequency,
            tags: normalize_labels(new_transaction.tags),
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.create(transaction).await?;
        debug!(
            "Created {} transaction {} for user {}",
            created.transaction_type, created.id, user_id
        );
        Ok(created)
    }

    fn list_transactions(
        &self,
        user_id: &str,
        mut filter: TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        filter.validate()?;
        filter.limit = Some(clamp_limit(filter.limit));
        filter.category = filter
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self.repository.list(user_id, &filter)
    }

    fn list_category_expenses(
        &self,
        user_id: &str,
        category: &str,
        from: Option<NaiveDate>,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            category: Some(category.to_string()),
            from,
            to: Some(to),
            limit: None,
        };
        self.repository.list(user_id, &filter)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.load_owned(user_id, transaction_id)
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut transaction = self.load_owned(user_id, transaction_id)?;

        if let Some(kind) = update.transaction_type {
            transaction.transaction_type = kind;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(category) = update.category {
            transaction.category = category.trim().to_string();
        }
        if let Some(description) = update.description {
            let description = description.trim().to_string();
            transaction.description = (!description.is_empty()).then_some(description);
        }
        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(is_recurring) = update.is_recurring {
            transaction.is_recurring = is_recurring;
            if !is_recurring {
                transaction.recurrence_frequency = None;
            }
        }
        if let Some(frequency) = update.recurrence_frequency {
            transaction.recurrence_frequency = Some(frequency);
        }
        if let Some(tags) = update.tags {
            transaction.tags = normalize_labels(tags);
        }

        transaction.validate()?;
        transaction.updated_at = Utc::now().naive_utc();
        self.repository.update(transaction).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let transaction = self.load_owned(user_id, transaction_id)?;
        self.repository.delete(&transaction.id).await?;
        info!("Deleted transaction {} for user {}", transaction.id, user_id);
        Ok(())
    }

    fn get_summary(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<TransactionSummary> {
        let filter = TransactionFilter::between(from, to);
        filter.validate()?;
        let transactions = self.repository.list(user_id, &filter)?;
        Ok(summarize(&transactions, from, to))
    }
}
