use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UserResponse},
};

#[utoipa::path(post, path = "/api/v1/auth/register", request_body = RegisterRequest,
    responses((status = 201, body = UserResponse), (status = 409, description = "Email already registered")))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(post, path = "/api/v1/auth/login", request_body = LoginRequest,
    responses((status = 200, body = TokenResponse), (status = 401), (status = 403)))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)?;
    let token = state.auth.issue_token(&user)?;
    tracing::debug!("Issued access token for user {}", user.id);
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
    }))
}

#[utoipa::path(put, path = "/api/v1/auth/change-password", request_body = ChangePasswordRequest,
    responses((status = 200, body = MessageResponse), (status = 401)))]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .user_service
        .change_password(&user.id, &payload.current_password, &payload.new_password)
        .await?;
    Ok(Json(MessageResponse::ok()))
}
