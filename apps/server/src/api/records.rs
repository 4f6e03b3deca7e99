use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use outlays_core::records::RecordKind;

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{RecordRequest, RecordResponse, RecordUpdateRequest},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{collection}", get(list_records).post(create_record))
        .route(
            "/{collection}/{id}",
            put(update_record).delete(delete_record),
        )
}

/// Unknown collections are reported the same way as unknown routes.
fn record_kind(collection: &str) -> ApiResult<RecordKind> {
    RecordKind::from_collection(collection).ok_or(ApiError::NotFound)
}

#[utoipa::path(get, path = "/api/v1/user/{collection}",
    params(("collection" = String, Path, description = "e.g. variable_incomes, savings, debts, goals")),
    responses((status = 200, body = [RecordResponse]), (status = 404)))]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(collection): Path<String>,
) -> ApiResult<Json<Vec<RecordResponse>>> {
    let kind = record_kind(&collection)?;
    let records = state.record_service.list_records(&user.id, kind)?;
    Ok(Json(records.into_iter().map(RecordResponse::from).collect()))
}

#[utoipa::path(post, path = "/api/v1/user/{collection}", request_body = RecordRequest,
    params(("collection" = String, Path, description = "Record collection, e.g. savings or debts")),
    responses((status = 201, body = RecordResponse), (status = 400), (status = 404)))]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(collection): Path<String>,
    Json(payload): Json<RecordRequest>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    let kind = record_kind(&collection)?;
    let record = state
        .record_service
        .create_record(&user.id, kind, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(RecordResponse::from(record))))
}

#[utoipa::path(put, path = "/api/v1/user/{collection}/{id}", request_body = RecordUpdateRequest,
    params(("collection" = String, Path, description = "Record collection, e.g. savings or debts"), ("id" = String, Path, description = "Record ID")),
    responses((status = 200, body = RecordResponse), (status = 404)))]
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((collection, id)): Path<(String, String)>,
    Json(payload): Json<RecordUpdateRequest>,
) -> ApiResult<Json<RecordResponse>> {
    let kind = record_kind(&collection)?;
    let record = state
        .record_service
        .update_record(&user.id, kind, &id, payload.into())
        .await?;
    Ok(Json(RecordResponse::from(record)))
}

#[utoipa::path(delete, path = "/api/v1/user/{collection}/{id}",
    params(("collection" = String, Path, description = "Record collection, e.g. savings or debts"), ("id" = String, Path, description = "Record ID")),
    responses((status = 204), (status = 404)))]
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let kind = record_kind(&collection)?;
    state
        .record_service
        .delete_record(&user.id, kind, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
