use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{BalanceRequest, BalanceResponse, BalanceUpdateRequest},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/balance",
        get(get_balance)
            .post(create_balance)
            .put(update_balance)
            .delete(delete_balance),
    )
}

#[utoipa::path(get, path = "/api/v1/user/balance", responses((status = 200, body = BalanceResponse), (status = 404)))]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state.balance_service.get_balance(&user.id)?;
    Ok(Json(BalanceResponse::from(balance)))
}

#[utoipa::path(post, path = "/api/v1/user/balance", request_body = BalanceRequest,
    responses((status = 201, body = BalanceResponse), (status = 409, description = "An active balance already exists")))]
pub async fn create_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<BalanceRequest>,
) -> ApiResult<(StatusCode, Json<BalanceResponse>)> {
    let balance = state
        .balance_service
        .create_balance(&user.id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(BalanceResponse::from(balance))))
}

#[utoipa::path(put, path = "/api/v1/user/balance", request_body = BalanceUpdateRequest,
    responses((status = 200, body = BalanceResponse), (status = 404)))]
pub async fn update_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<BalanceUpdateRequest>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state
        .balance_service
        .update_balance(&user.id, payload.into())
        .await?;
    Ok(Json(BalanceResponse::from(balance)))
}

#[utoipa::path(delete, path = "/api/v1/user/balance", responses((status = 204), (status = 404)))]
pub async fn delete_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.balance_service.delete_balance(&user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
