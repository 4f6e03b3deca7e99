use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use outlays_core::obligations::ObligationKind;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{ObligationRequest, ObligationResponse, ObligationUpdateRequest},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/fixed_incomes",
            get(list_fixed_incomes).post(create_fixed_income),
        )
        .route(
            "/fixed_incomes/{id}",
            put(update_fixed_income).delete(delete_fixed_income),
        )
        .route(
            "/fixed_expenses",
            get(list_fixed_expenses).post(create_fixed_expense),
        )
        .route(
            "/fixed_expenses/{id}",
            put(update_fixed_expense).delete(delete_fixed_expense),
        )
}

fn list(state: &AppState, owner_id: &str, kind: ObligationKind) -> ApiResult<Json<Vec<ObligationResponse>>> {
    let obligations = state.obligation_service.list_obligations(owner_id, kind)?;
    Ok(Json(
        obligations.into_iter().map(ObligationResponse::from).collect(),
    ))
}

async fn create(
    state: &AppState,
    owner_id: &str,
    kind: ObligationKind,
    payload: ObligationRequest,
) -> ApiResult<(StatusCode, Json<ObligationResponse>)> {
    let created = state
        .obligation_service
        .create_obligation(owner_id, kind, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ObligationResponse::from(created))))
}

async fn update(
    state: &AppState,
    owner_id: &str,
    kind: ObligationKind,
    id: &str,
    payload: ObligationUpdateRequest,
) -> ApiResult<Json<ObligationResponse>> {
    let updated = state
        .obligation_service
        .update_obligation(owner_id, kind, id, payload.into())
        .await?;
    Ok(Json(ObligationResponse::from(updated)))
}

async fn delete(
    state: &AppState,
    owner_id: &str,
    kind: ObligationKind,
    id: &str,
) -> ApiResult<StatusCode> {
    state
        .obligation_service
        .delete_obligation(owner_id, kind, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/user/fixed_incomes", responses((status = 200, body = [ObligationResponse])))]
pub async fn list_fixed_incomes(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ObligationResponse>>> {
    list(&state, &user.id, ObligationKind::Income)
}

#[utoipa::path(post, path = "/api/v1/user/fixed_incomes", request_body = ObligationRequest,
    responses((status = 201, body = ObligationResponse)))]
pub async fn create_fixed_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ObligationRequest>,
) -> ApiResult<(StatusCode, Json<ObligationResponse>)> {
    create(&state, &user.id, ObligationKind::Income, payload).await
}

#[utoipa::path(put, path = "/api/v1/user/fixed_incomes/{id}", params(("id" = String, Path, description = "Obligation ID")), request_body = ObligationUpdateRequest,
    responses((status = 200, body = ObligationResponse), (status = 404)))]
pub async fn update_fixed_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ObligationUpdateRequest>,
) -> ApiResult<Json<ObligationResponse>> {
    update(&state, &user.id, ObligationKind::Income, &id, payload).await
}

#[utoipa::path(delete, path = "/api/v1/user/fixed_incomes/{id}", params(("id" = String, Path, description = "Obligation ID")), responses((status = 204), (status = 404)))]
pub async fn delete_fixed_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete(&state, &user.id, ObligationKind::Income, &id).await
}

#[utoipa::path(get, path = "/api/v1/user/fixed_expenses", responses((status = 200, body = [ObligationResponse])))]
pub async fn list_fixed_expenses(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ObligationResponse>>> {
    list(&state, &user.id, ObligationKind::Expense)
}

#[utoipa::path(post, path = "/api/v1/user/fixed_expenses", request_body = ObligationRequest,
    responses((status = 201, body = ObligationResponse)))]
pub async fn create_fixed_expense(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ObligationRequest>,
) -> ApiResult<(StatusCode, Json<ObligationResponse>)> {
    create(&state, &user.id, ObligationKind::Expense, payload).await
}

#[utoipa::path(put, path = "/api/v1/user/fixed_expenses/{id}", params(("id" = String, Path, description = "Obligation ID")), request_body = ObligationUpdateRequest,
    responses((status = 200, body = ObligationResponse), (status = 404)))]
pub async fn update_fixed_expense(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ObligationUpdateRequest>,
) -> ApiResult<Json<ObligationResponse>> {
    update(&state, &user.id, ObligationKind::Expense, &id, payload).await
}

#[utoipa::path(delete, path = "/api/v1/user/fixed_expenses/{id}", params(("id" = String, Path, description = "Obligation ID")), responses((status = 204), (status = 404)))]
pub async fn delete_fixed_expense(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete(&state, &user.id, ObligationKind::Expense, &id).await
}
