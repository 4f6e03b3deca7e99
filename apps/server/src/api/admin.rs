use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use outlays_core::accrual::CycleReport;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/reactivate", put(reactivate_user))
        .route("/accrual/last-report", get(last_accrual_report))
}

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(get, path = "/api/v1/admin/users", params(UserListQuery),
    responses((status = 200, body = [UserResponse]), (status = 403)))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users(query.skip, query.limit)?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/v1/admin/users/{id}", params(("id" = String, Path, description = "User ID")), responses((status = 200, body = UserResponse), (status = 404)))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&id)?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(post, path = "/api/v1/admin/users", request_body = CreateUserRequest,
    responses((status = 201, body = UserResponse), (status = 409)))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(put, path = "/api/v1/admin/users/{id}", params(("id" = String, Path, description = "User ID")), request_body = UpdateUserRequest,
    responses((status = 200, body = UserResponse), (status = 404), (status = 409)))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.update_user(&id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Soft delete: the user and everything they own become inactive.
#[utoipa::path(delete, path = "/api/v1/admin/users/{id}", params(("id" = String, Path, description = "User ID")),
    responses((status = 200, body = MessageResponse), (status = 403, description = "Cannot deactivate yourself"), (status = 404)))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.user_service.deactivate_user(&admin.id, &id).await?;
    tracing::info!("User {} deactivated by {}", id, admin.id);
    Ok(Json(MessageResponse::ok()))
}

#[utoipa::path(put, path = "/api/v1/admin/users/{id}/reactivate", params(("id" = String, Path, description = "User ID")),
    responses((status = 200, body = UserResponse), (status = 404)))]
pub async fn reactivate_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.reactivate_user(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(get, path = "/api/v1/admin/accrual/last-report",
    responses((status = 200, description = "Summary of the most recent accrual cycle, or null")))]
pub async fn last_accrual_report(State(state): State<Arc<AppState>>) -> Json<Option<CycleReport>> {
    Json(state.accrual_engine.last_report())
}
