use async_trait::async_trait;
use chrono::NaiveDate;

use super::notifications_model::{EmailDelivery, EmailMessage, ReminderRunReport};
use crate::errors::Result;

/// Sends a single email. Never fails; problems are described by the
/// returned delivery.
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    async fn send(&self, message: EmailMessage) -> EmailDelivery;
}

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    async fn send_goal_progress(&self, user_id: &str, goal_id: &str) -> Result<EmailDelivery>;

    /// Summary of the seven days ending on `today`.
    async fn send_weekly_summary(&self, user_id: &str, today: NaiveDate) -> Result<EmailDelivery>;

    /// Emails the user when the expense is unusually large for its category.
    /// Returns `None` when nothing was sent.
    async fn check_unusual_spending(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<EmailDelivery>>;

    /// Goal reminders and weekly summaries due on `today`.
    async fn run_daily_reminders(&self, today: NaiveDate) -> Result<ReminderRunReport>;
}
