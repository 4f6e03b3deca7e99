use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use crate::{
    auth::CurrentUser, error::ApiResult, main_lib::AppState, models::TrendAnalysisResponse,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/{table}", get(analyze_table))
}

#[utoipa::path(get, path = "/api/v1/analysis/{table}",
    params(("table" = String, Path, description = "fixed_incomes, variable_expenses, goals, ...")),
    responses(
        (status = 200, body = TrendAnalysisResponse),
        (status = 400, description = "Unknown table"),
        (status = 422, description = "Not enough records for a trend")
    ))]
pub async fn analyze_table(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(table): Path<String>,
) -> ApiResult<Json<TrendAnalysisResponse>> {
    let analysis = state.analysis_service.analyze(&user.id, &table)?;
    Ok(Json(TrendAnalysisResponse::from(analysis)))
}
