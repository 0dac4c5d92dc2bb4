//! Contribution plan arithmetic.

use chrono::{NaiveDate, Utc};

use super::goals_model::{ContributionPlan, Goal};
use crate::recommendations::{PlanDraft, SuggestionSource};
use crate::utils::time_utils::{months_until, round_cents, weeks_until};

/// Evenly spreads what is left of a goal over the months and weeks until
/// its target date. Both periods count at least one.
pub fn fallback_plan(goal: &Goal, today: NaiveDate) -> ContributionPlan {
    let remaining = goal.remaining_amount();
    let months = months_until(today, goal.target_date).max(1);
    let weeks = weeks_until(today, goal.target_date).max(1);
    ContributionPlan {
        monthly_amount: round_cents(remaining / months as f64),
        weekly_amount: round_cents(remaining / weeks as f64),
        remaining_amount: remaining,
        months_remaining: months,
        weeks_remaining: weeks,
        notes: None,
        source: SuggestionSource::Fallback,
        generated_at: Utc::now().naive_utc(),
    }
}

/// Accepts an advisor plan when its amounts are usable.
pub fn plan_from_draft(goal: &Goal, today: NaiveDate, draft: PlanDraft) -> Option<ContributionPlan> {
    let usable = |v: f64| v.is_finite() && v >= 0.0;
    if !usable(draft.monthly_amount) || !usable(draft.weekly_amount) {
        return None;
    }
    Some(ContributionPlan {
        monthly_amount: round_cents(draft.monthly_amount),
        weekly_amount: round_cents(draft.weekly_amount),
        remaining_amount: goal.remaining_amount(),
        months_remaining: months_until(today, goal.target_date).max(1),
        weeks_remaining: weeks_until(today, goal.target_date).max(1),
        notes: draft
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        source: SuggestionSource::Ai,
        generated_at: Utc::now().naive_utc(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{GoalPriority, ReminderFrequency};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn goal(target: f64, current: f64, target_date: NaiveDate) -> Goal {
        let now = Utc::now().naive_utc();
        Goal {
            id: "g1".into(),
            user_id: "u1".into(),
            title: "Trip".into(),
            description: None,
            target_amount: target,
            current_amount: current,
            start_date: d(2024, 1, 1),
            target_date,
            category: "travel".into(),
            priority: GoalPriority::Medium,
            completed: current >= target,
            active: true,
            reminder_frequency: ReminderFrequency::None,
            contribution_plan: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn spreads_remaining_over_months_and_weeks() {
        let plan = fallback_plan(&goal(1000.0, 100.0, d(2024, 4, 1)), d(2024, 1, 1));
        assert_eq!(plan.remaining_amount, 900.0);
        assert_eq!(plan.months_remaining, 3);
        assert_eq!(plan.monthly_amount, 300.0);
        // 91 days -> 13 weeks
        assert_eq!(plan.weeks_remaining, 13);
        assert_eq!(plan.weekly_amount, 69.23);
        assert_eq!(plan.source, SuggestionSource::Fallback);
    }

    #[test]
    fn overdue_goal_asks_for_everything_now() {
        let plan = fallback_plan(&goal(500.0, 200.0, d(2023, 12, 1)), d(2024, 1, 1));
        assert_eq!(plan.months_remaining, 1);
        assert_eq!(plan.weeks_remaining, 1);
        assert_eq!(plan.monthly_amount, 300.0);
        assert_eq!(plan.weekly_amount, 300.0);
    }

    #[test]
    fn completed_goal_needs_nothing() {
        let plan = fallback_plan(&goal(500.0, 650.0, d(2024, 6, 1)), d(2024, 1, 1));
        assert_eq!(plan.remaining_amount, 0.0);
        assert_eq!(plan.monthly_amount, 0.0);
    }

    #[test]
    fn rejects_negative_or_nan_drafts() {
        let g = goal(1000.0, 0.0, d(2024, 6, 1));
        let bad = PlanDraft {
            monthly_amount: -5.0,
            weekly_amount: 1.0,
            notes: None,
        };
        assert!(plan_from_draft(&g, d(2024, 1, 1), bad).is_none());
        let nan = PlanDraft {
            monthly_amount: f64::NAN,
            weekly_amount: 1.0,
            notes: None,
        };
        assert!(plan_from_draft(&g, d(2024, 1, 1), nan).is_none());

        let ok = PlanDraft {
            monthly_amount: 200.456,
            weekly_amount: 46.0,
            notes: Some(" cut takeout ".into()),
        };
        let plan = plan_from_draft(&g, d(2024, 1, 1), ok).unwrap();
        assert_eq!(plan.monthly_amount, 200.46);
        assert_eq!(plan.notes.as_deref(), Some("cut takeout"));
        assert_eq!(plan.source, SuggestionSource::Ai);
    }
}
