//! Notifications module - templated emails, delivery, and reminder runs.

mod email_sender;
mod notifications_model;
mod notifications_service;
mod notifications_traits;
mod templates;
mod unusual_spending;


pub use email_sender::ResendEmailSender;
pub use notifications_model::{EmailDelivery, EmailMessage, EmailSettings, ReminderRunReport};
pub use notifications_service::{reminder_due, NotificationService};
pub use notifications_traits::{EmailSenderTrait, NotificationServiceTrait};
pub use templates::{goal_progress_email, unusual_spending_email, weekly_summary_email};
pub use unusual_spending::detect_unusual_spending;
