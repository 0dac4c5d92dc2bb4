use crate::constants::{UNUSUAL_SPENDING_FACTOR, UNUSUAL_SPENDING_MIN_SAMPLES};
use crate::transactions::Transaction;

/// Returns the category average when `expense` is unusually large compared
/// to `history`.
///
/// `history` holds the user's earlier expenses in the same category; the
/// expense itself is skipped if present. With fewer than the minimum number
/// of samples nothing is flagged.
pub fn detect_unusual_spending(expense: &Transaction, history: &[Transaction]) -> Option<f64> {
    if !expense.is_expense() {
        return None;
    }
    let samples: Vec<f64> = history
        .iter()
        .filter(|t| t.id != expense.id && t.is_expense() && t.category == expense.category)
        .map(|t| t.amount)
        .collect();
    if samples.len() < UNUSUAL_SPENDING_MIN_SAMPLES {
        return None;
    }
    let average = samples.iter().sum::<f64>() / samples.len() as f64;
    (expense.amount >= average * UNUSUAL_SPENDING_FACTOR).then_some(average)
}
