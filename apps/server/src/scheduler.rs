//! Background scheduler for goal reminders and weekly summaries.
//!
//! Runs once a day at a fixed UTC hour for the lifetime of the server.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, NaiveDateTime, NaiveTime, Utc};
use kipo_core::utils::time_utils::today;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Hour of the day (UTC) at which reminders are sent.
const RUN_HOUR_UTC: u32 = 8;

const DAY_SECS: u64 = 24 * 60 * 60;

/// Time left until the next run hour after `now`.
pub fn delay_until_next_run(now: NaiveDateTime) -> Duration {
    let run_time = NaiveTime::from_hms_opt(RUN_HOUR_UTC, 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date().and_time(run_time);
    if next <= now {
        next += ChronoDuration::days(1);
    }
    (next - now).to_std().unwrap_or_default()
}

/// Starts the daily reminder loop.
pub fn start_reminder_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        let delay = delay_until_next_run(Utc::now().naive_utc());
        info!(
            "Reminder scheduler started (daily at {:02}:00 UTC, first run in {}s)",
            RUN_HOUR_UTC,
            delay.as_secs()
        );
        tokio::time::sleep(delay).await;

        let mut ticker = interval(Duration::from_secs(DAY_SECS));
        loop {
            ticker.tick().await;
            run_reminders(&state).await;
        }
    });
}

async fn run_reminders(state: &Arc<AppState>) {
    let day = today();
    match state.notification_service.run_daily_reminders(day).await {
        Ok(report) if report.failures > 0 => warn!(
            "Reminder run for {} finished with {} failed deliveries",
            day, report.failures
        ),
        Ok(_) => {}
        Err(e) => warn!("Reminder run for {} failed: {}", day, e),
    }
}
