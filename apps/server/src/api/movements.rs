use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use outlays_core::constants::{DEFAULT_MOVEMENT_LIMIT, MAX_MOVEMENT_LIMIT};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::MovementResponse};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/movements", get(list_movements))
}

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct MovementsQuery {
    /// Page size, clamped to 1..=1000
    pub limit: Option<i64>,
}

#[utoipa::path(get, path = "/api/v1/user/movements", params(MovementsQuery),
    responses((status = 200, body = [MovementResponse])))]
pub async fn list_movements(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<MovementsQuery>,
) -> ApiResult<Json<Vec<MovementResponse>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MOVEMENT_LIMIT)
        .clamp(1, MAX_MOVEMENT_LIMIT);
    let movements = state.movement_repository.list_for_owner(&user.id, limit)?;
    Ok(Json(
        movements.into_iter().map(MovementResponse::from).collect(),
    ))
}
