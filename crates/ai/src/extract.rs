//! Turning free-form model replies into structured drafts.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use kipo_core::recommendations::{fallback_draft_from_text, PlanDraft, RecommendationDraft};

use crate::error::AiError;

static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid regex"));
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));
static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Drops `<think>` blocks some reasoning models emit before their answer.
pub fn strip_reasoning(raw: &str) -> String {
    THINK_BLOCK.replace_all(raw, "").trim().to_string()
}

/// Reads recommendation drafts from a reply expected to hold a JSON array.
///
/// When no array can be parsed the whole reply becomes a single spending
/// tip. Entries that are not objects are skipped.
pub fn parse_recommendations(raw: &str) -> Vec<RecommendationDraft> {
    let text = strip_reasoning(raw);
    let parsed = JSON_ARRAY
        .find(&text)
        .and_then(|m| serde_json::from_str::<Vec<serde_json::Value>>(m.as_str()).ok());

    match parsed {
        Some(values) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<RecommendationDraft>(v).ok())
            .collect(),
        None => {
            debug!("Advisor reply had no JSON array, using it as plain text");
            fallback_draft_from_text(&text).into_iter().collect()
        }
    }
}

/// Reads a contribution plan from a reply expected to hold a JSON object.
pub fn parse_plan(raw: &str) -> Result<PlanDraft, AiError> {
    let text = strip_reasoning(raw);
    let block = JSON_OBJECT
        .find(&text)
        .ok_or_else(|| AiError::Parse("no JSON object in reply".to_string()))?;
    serde_json::from_str::<PlanDraft>(block.as_str()).map_err(|e| AiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_is_found_inside_prose_and_fences() {
        let raw = "Sure! Here you go:\n```json\n[\n  {\"type\": \"saving\", \"title\": \"Cook at home\", \"message\": \"Lunch prep saves money.\", \"category\": \"food\"}\n]\n```";
        let drafts = parse_recommendations(raw);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recommendation_type, "saving");
        assert_eq!(drafts[0].category.as_deref(), Some("food"));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let raw = r#"[{"type":"budget","title":"Cap dining","message":"Set 200."}, 42, "text"]"#;
        let drafts = parse_recommendations(raw);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Cap dining");
    }

    #[test]
    fn plain_text_becomes_one_spending_tip() {
        let drafts = parse_recommendations("Spend less on taxis this week.");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recommendation_type, "spending");
        assert_eq!(drafts[0].message, "Spend less on taxis this week.");
    }

    #[test]
    fn broken_json_falls_back_to_text() {
        let drafts = parse_recommendations("[{\"type\": \"saving\", ");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].recommendation_type, "spending");
    }

    #[test]
    fn empty_reply_yields_nothing() {
        assert!(parse_recommendations("   ").is_empty());
    }

    #[test]
    fn reasoning_blocks_are_removed() {
        let raw = "<think>the user spends a lot</think>\n[{\"type\":\"goal\",\"title\":\"Fund trip\",\"message\":\"Add 50 weekly.\"}]";
        let drafts = parse_recommendations(raw);
        assert_eq!(drafts[0].recommendation_type, "goal");
        assert_eq!(strip_reasoning("<think>x</think> ok"), "ok");
    }

    #[test]
    fn plan_object_is_parsed() {
        let raw = "Plan: {\"monthlyAmount\": 250.5, \"weeklyAmount\": 57.8, \"notes\": \"Skip one dinner out.\"}";
        let plan = parse_plan(raw).unwrap();
        assert_eq!(plan.monthly_amount, 250.5);
        assert_eq!(plan.weekly_amount, 57.8);
        assert_eq!(plan.notes.as_deref(), Some("Skip one dinner out."));
    }

    #[test]
    fn plan_without_object_is_an_error() {
        assert!(matches!(parse_plan("about 200 a month"), Err(AiError::Parse(_))));
        assert!(matches!(
            parse_plan("{\"monthlyAmount\": \"lots\"}"),
            Err(AiError::Parse(_))
        ));
    }
}
