//! Transactions module - income and expense records.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_service_tests;

pub use transactions_model::{
    CategoryTotal, NewTransaction, RecurrenceFrequency, Transaction, TransactionFilter,
    TransactionSummary, TransactionType, TransactionUpdate,
};
pub use transactions_service::{summarize, TransactionService};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
