use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::{debug, info, warn};
use std::sync::Arc;

use super::notifications_model::{EmailDelivery, ReminderRunReport};
use super::notifications_traits::{EmailSenderTrait, NotificationServiceTrait};
use super::templates::{goal_progress_email, unusual_spending_email, weekly_summary_email};
use super::unusual_spending::detect_unusual_spending;
use crate::constants::UNUSUAL_SPENDING_LOOKBACK_DAYS;
use crate::errors::Result;
use crate::goals::{Goal, GoalServiceTrait, ReminderFrequency};
use crate::transactions::{TransactionServiceTrait, TransactionType};
use crate::users::{User, UserServiceTrait};
use crate::utils::time_utils::{is_first_of_month, is_monday, today};

/// Whether a goal with `frequency` gets a reminder on `date`.
pub fn reminder_due(frequency: ReminderFrequency, date: NaiveDate) -> bool {
    match frequency {
        ReminderFrequency::None => false,
        ReminderFrequency::Daily => true,
        ReminderFrequency::Weekly => is_monday(date),
        ReminderFrequency::Monthly => is_first_of_month(date),
    }
}

pub struct NotificationService {
    user_service: Arc<dyn UserServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    sender: Arc<dyn EmailSenderTrait>,
}

impl NotificationService {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        sender: Arc<dyn EmailSenderTrait>,
    ) -> Self {
        Self {
            user_service,
            goal_service,
            transaction_service,
            sender,
        }
    }

    async fn deliver_goal_progress(&self, user: &User, goal: &Goal, on: NaiveDate) -> EmailDelivery {
        let progress = goal.progress(on);
        self.sender
            .send(goal_progress_email(user, goal, &progress))
            .await
    }

    async fn deliver_weekly_summary(&self, user: &User, on: NaiveDate) -> Result<EmailDelivery> {
        let from = on - Duration::days(6);
        let summary = self
            .transaction_service
            .get_summary(&user.id, Some(from), Some(on))?;
        Ok(self.sender.send(weekly_summary_email(user, &summary)).await)
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn send_goal_progress(&self, user_id: &str, goal_id: &str) -> Result<EmailDelivery> {
        let goal = self.goal_service.get_goal(user_id, goal_id)?;
        let user = self.user_service.get_user(user_id)?;
        Ok(self.deliver_goal_progress(&user, &goal, today()).await)
    }

    async fn send_weekly_summary(&self, user_id: &str, today: NaiveDate) -> Result<EmailDelivery> {
        let user = self.user_service.get_user(user_id)?;
        self.deliver_weekly_summary(&user, today).await
    }

    async fn check_unusual_spending(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<EmailDelivery>> {
        let expense = self
            .transaction_service
            .get_transaction(user_id, transaction_id)?;
        if expense.transaction_type != TransactionType::Expense {
            return Ok(None);
        }

        // Dates at the start of the calendar look back without a lower bound.
        let from = expense
            .date
            .checked_sub_signed(Duration::days(UNUSUAL_SPENDING_LOOKBACK_DAYS));
        let history = self.transaction_service.list_category_expenses(
            user_id,
            &expense.category,
            from,
            expense.date,
        )?;

        let Some(average) = detect_unusual_spending(&expense, &history) else {
            debug!("Expense {} is within the usual range", expense.id);
            return Ok(None);
        };

        info!(
            "Expense {} of {:.2} is unusual for '{}' (average {:.2})",
            expense.id, expense.amount, expense.category, average
        );
        let user = self.user_service.get_user(user_id)?;
        let delivery = self
            .sender
            .send(unusual_spending_email(&user, &expense, average))
            .await;
        Ok(Some(delivery))
    }

    async fn run_daily_reminders(&self, today: NaiveDate) -> Result<ReminderRunReport> {
        let mut report = ReminderRunReport::default();

        for goal in self.goal_service.list_goals_with_reminders()? {
            if !goal.active || goal.completed || !reminder_due(goal.reminder_frequency, today) {
                continue;
            }
            let user = match self.user_service.get_user(&goal.user_id) {
                Ok(user) => user,
                Err(e) => {
                    warn!("Skipping reminder for goal {}: {}", goal.id, e);
                    report.failures += 1;
                    continue;
                }
            };
            if self.deliver_goal_progress(&user, &goal, today).await.success {
                report.goal_reminders_sent += 1;
            } else {
                report.failures += 1;
            }
        }

        if is_monday(today) {
            for user in self.user_service.list_users()? {
                match self.deliver_weekly_summary(&user, today).await {
                    Ok(delivery) if delivery.success => report.weekly_summaries_sent += 1,
                    Ok(_) => report.failures += 1,
                    Err(e) => {
                        warn!("Weekly summary for user {} failed: {}", user.id, e);
                        report.failures += 1;
                    }
                }
            }
        }

        info!(
            "Reminder run for {}: {} goal reminder(s), {} weekly summary(ies), {} failure(s)",
            today,
            report.goal_reminders_sent,
            report.weekly_summaries_sent,
            report.failures
        );
        Ok(report)
    }
}
