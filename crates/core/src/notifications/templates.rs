//! HTML email templates. Every interpolated text value goes through
//! [`encode_text`].

use html_escape::encode_text;

use super::notifications_model::EmailMessage;
use crate::goals::{Goal, GoalProgress};
use crate::transactions::{Transaction, TransactionSummary};
use crate::users::User;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #1f2937; max-width: 560px; margin: 0 auto;">
    <h2 style="color: #0f766e;">{title}</h2>
    {body}
    <p style="font-size: 12px; color: #6b7280;">You receive this email because notifications are enabled in Kipo.</p>
  </body>
</html>"#,
        title = encode_text(title),
        body = body
    )
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn goal_progress_email(user: &User, goal: &Goal, progress: &GoalProgress) -> EmailMessage {
    let deadline = if progress.days_left >= 0 {
        format!("{} day(s) left until {}", progress.days_left, goal.target_date)
    } else {
        format!(
            "The target date {} passed {} day(s) ago",
            goal.target_date, -progress.days_left
        )
    };
    let plan = goal
        .contribution_plan
        .as_ref()
        .map(|p| {
            format!(
                "<p>Suggested contribution: <strong>{}</strong> per month or <strong>{}</strong> per week.</p>",
                money(p.monthly_amount),
                money(p.weekly_amount)
            )
        })
        .unwrap_or_default();
    let body = format!(
        r#"<p>Hi {name},</p>
    <p>Your goal <strong>{title}</strong> is at <strong>{pct:.0}%</strong>: {current} of {target} saved, {remaining} to go.</p>
    <p>{deadline}.</p>
    {plan}"#,
        name = encode_text(&user.name),
        title = encode_text(&goal.title),
        pct = progress.percentage,
        current = money(goal.current_amount),
        target = money(goal.target_amount),
        remaining = money(progress.remaining_amount),
        deadline = encode_text(&deadline),
        plan = plan,
    );
    let text = format!(
        "Your goal {} is at {:.0}% ({} of {}). {}.",
        goal.title,
        progress.percentage,
        money(goal.current_amount),
        money(goal.target_amount),
        deadline
    );
    EmailMessage::new(
        &user.email,
        format!("Progress on your goal: {}", goal.title),
        layout("Goal progress", &body),
    )
    .with_text_body(text)
}

pub fn weekly_summary_email(user: &User, summary: &TransactionSummary) -> EmailMessage {
    let rows: String = summary
        .expenses_by_category
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td style=\"text-align: right;\">{}</td></tr>",
                encode_text(&c.category),
                money(c.total)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");
    let table = if rows.is_empty() {
        "<p>No expenses recorded this week.</p>".to_string()
    } else {
        format!("<table style=\"width: 100%;\">\n      {rows}\n    </table>")
    };
    let body = format!(
        r#"<p>Hi {name},</p>
    <p>This week you earned <strong>{income}</strong> and spent <strong>{expenses}</strong>. Balance: <strong>{balance}</strong> across {count} transaction(s).</p>
    {table}"#,
        name = encode_text(&user.name),
        income = money(summary.total_income),
        expenses = money(summary.total_expenses),
        balance = money(summary.balance),
        count = summary.transaction_count,
        table = table,
    );
    let text = format!(
        "This week: income {}, expenses {}, balance {}.",
        money(summary.total_income),
        money(summary.total_expenses),
        money(summary.balance)
    );
    EmailMessage::new(
        &user.email,
        "Your weekly Kipo summary",
        layout("Weekly summary", &body),
    )
    .with_text_body(text)
}

pub fn unusual_spending_email(user: &User, transaction: &Transaction, average: f64) -> EmailMessage {
    let description = transaction
        .description
        .as_deref()
        .map(|d| format!(" ({})", encode_text(d)))
        .unwrap_or_default();
    let body = format!(
        r#"<p>Hi {name},</p>
    <p>We noticed an unusual expense of <strong>{amount}</strong> in <strong>{category}</strong>{description} on {date}.</p>
    <p>Your recent average in this category is {average}.</p>
    <p>If this was expected you can ignore this message.</p>"#,
        name = encode_text(&user.name),
        amount = money(transaction.amount),
        category = encode_text(&transaction.category),
        description = description,
        date = transaction.date,
        average = money(average),
    );
    let text = format!(
        "Unusual expense of {} in {} on {} (recent average {}).",
        money(transaction.amount),
        transaction.category,
        transaction.date,
        money(average)
    );
    EmailMessage::new(
        &user.email,
        format!("Unusual spending in {}", transaction.category),
        layout("Unusual spending", &body),
    )
    .with_text_body(text)
}
