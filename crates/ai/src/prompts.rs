//! Prompt texts sent to the advisor model.

use kipo_core::recommendations::{AdviceContext, PlanRequest, RecommendationContext};
use kipo_core::transactions::TransactionSummary;

pub const ADVISOR_PREAMBLE: &str = "You are Kipo, a friendly personal-finance coach. \
Give short, concrete budgeting advice based only on the numbers you are given. \
Never invent transactions or amounts. Use the user's own currency-free figures.";

fn summary_lines(summary: &TransactionSummary) -> String {
    let mut out = format!(
        "Last 30 days: income {:.2}, expenses {:.2}, balance {:.2}, {} transactions.\n",
        summary.total_income, summary.total_expenses, summary.balance, summary.transaction_count
    );
    for category in summary.expenses_by_category.iter().take(5) {
        out.push_str(&format!(
            "- {}: {:.2} ({} transactions)\n",
            category.category, category.total, category.count
        ));
    }
    out
}

pub fn recommendation_prompt(context: &RecommendationContext) -> String {
    let tx = &context.transaction;
    format!(
        "A user just recorded this {kind}: {amount:.2} in category \"{category}\" on {date}{description}.\n\
Declared monthly income {income:.2}, monthly expenses {expenses:.2}.\n\
{summary}\n\
Reply with a JSON array of at most 3 objects, each with the keys \
\"type\" (one of \"saving\", \"spending\", \"budget\", \"goal\"), \"title\" (max 8 words), \
\"message\" (one or two sentences) and \"category\" (string or null). \
Return only the JSON array.",
        kind = tx.transaction_type,
        amount = tx.amount,
        category = tx.category,
        date = tx.date.format("%Y-%m-%d"),
        description = tx
            .description
            .as_deref()
            .map(|d| format!(" (\"{d}\")"))
            .unwrap_or_default(),
        income = context.monthly_income,
        expenses = context.monthly_expenses,
        summary = summary_lines(&context.recent_summary),
    )
}

pub fn advice_prompt(context: &AdviceContext) -> String {
    let mut prompt = format!(
        "Declared monthly income {:.2}, monthly expenses {:.2}.\n{}",
        context.monthly_income,
        context.monthly_expenses,
        summary_lines(&context.recent_summary)
    );
    if !context.active_goals.is_empty() {
        prompt.push_str("Active savings goals:\n");
        for goal in &context.active_goals {
            prompt.push_str(&format!(
                "- {}: {:.2} of {:.2} saved, due {}\n",
                goal.title,
                goal.current_amount,
                goal.target_amount,
                goal.target_date.format("%Y-%m-%d")
            ));
        }
    }
    match context.question.as_deref().map(str::trim) {
        Some(question) if !question.is_empty() => {
            prompt.push_str(&format!("\nThe user asks: {question}\n"));
        }
        _ => prompt.push_str("\nGive the user three practical tips for next month.\n"),
    }
    prompt.push_str("Answer in plain text, under 200 words.");
    prompt
}

pub fn plan_prompt(request: &PlanRequest) -> String {
    let goal = &request.goal;
    format!(
        "Today is {today}. The user saves for \"{title}\" ({category}): {current:.2} of {target:.2} \
saved, target date {target_date}.\n\
Declared monthly income {income:.2}, monthly expenses {expenses:.2}.\n\
Suggest how much to set aside to reach the goal on time. Reply with one JSON object \
with the keys \"monthlyAmount\" (number), \"weeklyAmount\" (number) and \"notes\" \
(one sentence). Return only the JSON object.",
        today = request.today.format("%Y-%m-%d"),
        title = goal.title,
        category = goal.category,
        current = goal.current_amount,
        target = goal.target_amount,
        target_date = goal.target_date.format("%Y-%m-%d"),
        income = request.monthly_income,
        expenses = request.monthly_expenses,
    )
}
