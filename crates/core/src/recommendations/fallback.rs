//! Local substitutes used when the advisor cannot answer.

use super::recommendations_model::{AdviceContext, RecommendationDraft, RecommendationType};
use crate::constants::FALLBACK_MESSAGE_MAX_CHARS;

/// Wraps an unparseable advisor reply into a single spending tip.
pub fn fallback_draft_from_text(raw: &str) -> Option<RecommendationDraft> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    Some(RecommendationDraft {
        recommendation_type: RecommendationType::Spending.as_str().to_string(),
        title: "Spending insight".to_string(),
        message: truncate_chars(text, FALLBACK_MESSAGE_MAX_CHARS),
        category: None,
    })
}

/// Plain-text advice built from the user's own numbers.
pub fn fallback_advice(context: &AdviceContext) -> String {
    let summary = &context.recent_summary;
    let mut lines = vec![format!(
        "Over the last 30 days you recorded {:.2} in income and {:.2} in expenses (balance {:.2}).",
        summary.total_income, summary.total_expenses, summary.balance
    )];

    if let Some(top) = summary.expenses_by_category.first() {
        lines.push(format!(
            "Your largest expense category was {} at {:.2} across {} transaction(s); review it first for savings.",
            top.category, top.total, top.count
        ));
    }

    if context.monthly_income > 0.0 {
        let planned_savings = context.monthly_income - context.monthly_expenses;
        if planned_savings > 0.0 {
            lines.push(format!(
                "Based on your profile you can set aside about {:.2} per month; automate that transfer at the start of the month.",
                planned_savings
            ));
        } else {
            lines.push(
                "Your planned expenses meet or exceed your income; trim recurring costs before adding new goals."
                    .to_string(),
            );
        }
    }

    if summary.balance < 0.0 {
        lines.push("You spent more than you earned in this period.".to_string());
    }

    if !context.active_goals.is_empty() {
        let titles: Vec<&str> = context
            .active_goals
            .iter()
            .map(|g| g.title.as_str())
            .collect();
        lines.push(format!("Keep contributing to: {}.", titles.join(", ")));
    }

    lines.join(" ")
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{CategoryTotal, TransactionSummary};

    fn summary() -> TransactionSummary {
        TransactionSummary {
            from: None,
            to: None,
            total_income: 2000.0,
            total_expenses: 850.0,
            balance: 1150.0,
            transaction_count: 6,
            expenses_by_category: vec![CategoryTotal {
                category: "rent".into(),
                total: 700.0,
                count: 1,
            }],
        }
    }

    #[test]
    fn fallback_draft_is_a_trimmed_spending_tip() {
        let raw = format!("  {}  ", "x".repeat(800));
        let draft = fallback_draft_from_text(&raw).unwrap();
        assert_eq!(draft.recommendation_type, "spending");
        assert_eq!(draft.message.chars().count(), FALLBACK_MESSAGE_MAX_CHARS);
        assert!(fallback_draft_from_text("   ").is_none());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("ñandú", 3), "ñan");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn fallback_advice_mentions_numbers() {
        let advice = fallback_advice(&AdviceContext {
            question: None,
            recent_summary: summary(),
            monthly_income: 3000.0,
            monthly_expenses: 2000.0,
            active_goals: Vec::new(),
        });
        assert!(advice.contains("2000.00"));
        assert!(advice.contains("rent"));
        assert!(advice.contains("1000.00 per month"));
    }
}
