use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use kipo_core::{
    goals::{GoalContribution, GoalUpdate, GoalWithProgress, NewGoal},
    utils::time_utils::today,
};
use serde::Deserialize;

use super::shared::{ok, ApiJson, ApiPath, ApiQuery, ApiResponse, Deleted, Envelope};
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GoalsQuery {
    #[serde(default)]
    active_only: bool,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<GoalsQuery>,
) -> ApiResponse<Vec<GoalWithProgress>> {
    let day = today();
    let goals = state
        .goal_service
        .list_goals(&auth.user_id, query.active_only)?
        .into_iter()
        .map(|goal| GoalWithProgress::new(goal, day))
        .collect();
    Ok(ok(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiJson(new_goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<Envelope<GoalWithProgress>>)> {
    let goal = state.goal_service.create_goal(&auth.user_id, new_goal).await?;
    Ok((StatusCode::CREATED, ok(GoalWithProgress::new(goal, today()))))
}

async fn get_goal(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<GoalWithProgress> {
    let goal = state.goal_service.get_goal(&auth.user_id, &id)?;
    Ok(ok(GoalWithProgress::new(goal, today())))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResponse<GoalWithProgress> {
    let goal = state
        .goal_service
        .update_goal(&auth.user_id, &id, update)
        .await?;
    Ok(ok(GoalWithProgress::new(goal, today())))
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<Deleted> {
    state.goal_service.delete_goal(&auth.user_id, &id).await?;
    Ok(ok(Deleted { id }))
}

async fn contribute(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(contribution): ApiJson<GoalContribution>,
) -> ApiResponse<GoalWithProgress> {
    let goal = state
        .goal_service
        .contribute(&auth.user_id, &id, contribution.amount)
        .await?;
    Ok(ok(GoalWithProgress::new(goal, today())))
}

async fn suggest_plan(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ApiPath(id): ApiPath<String>,
) -> ApiResponse<GoalWithProgress> {
    let goal = state.goal_service.suggest_plan(&auth.user_id, &id).await?;
    Ok(ok(GoalWithProgress::new(goal, today())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contributions", post(contribute))
        .route("/goals/{id}/plan", post(suggest_plan))
}
