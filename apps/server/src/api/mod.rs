use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{require_admin, require_user},
    config::Config,
    main_lib::AppState,
    models::{
        BalanceRequest, BalanceResponse, BalanceUpdateRequest, ChangePasswordRequest,
        CreateUserRequest, HealthResponse, LoginRequest, MessageResponse, MovementResponse,
        ObligationRequest, ObligationResponse, ObligationUpdateRequest, RecordRequest,
        RecordResponse, RecordUpdateRequest, RegisterRequest, TokenResponse,
        TrendAnalysisResponse, UpdateUserRequest, UserResponse,
    },
};

pub mod admin;
pub mod analysis;
pub mod auth;
pub mod balance;
pub mod movements;
pub mod obligations;
pub mod records;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, body = HealthResponse)))]
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        auth::register,
        auth::login,
        auth::change_password,
        obligations::list_fixed_incomes,
        obligations::create_fixed_income,
        obligations::update_fixed_income,
        obligations::delete_fixed_income,
        obligations::list_fixed_expenses,
        obligations::create_fixed_expense,
        obligations::update_fixed_expense,
        obligations::delete_fixed_expense,
        balance::get_balance,
        balance::create_balance,
        balance::update_balance,
        balance::delete_balance,
        records::list_records,
        records::create_record,
        records::update_record,
        records::delete_record,
        movements::list_movements,
        admin::list_users,
        admin::get_user,
        admin::create_user,
        admin::update_user,
        admin::delete_user,
        admin::reactivate_user,
        admin::last_accrual_report,
        analysis::analyze_table,
    ),
    components(schemas(
        HealthResponse,
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        ChangePasswordRequest,
        UserResponse,
        CreateUserRequest,
        UpdateUserRequest,
        ObligationRequest,
        ObligationUpdateRequest,
        ObligationResponse,
        BalanceRequest,
        BalanceUpdateRequest,
        BalanceResponse,
        RecordRequest,
        RecordUpdateRequest,
        RecordResponse,
        MovementResponse,
        TrendAnalysisResponse,
    )),
    tags((name = "easyoutlays"))
)]
pub struct ApiDoc;

fn auth_routes(state: &Arc<AppState>, config: &Config) -> Router<Arc<AppState>> {
    let public = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let protected = Router::new()
        .route("/change-password", put(auth::change_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let per_second = config.auth_rate_limit_per_second;
    if per_second == 0 {
        return public.merge(protected);
    }

    // Keyed by peer IP: the server must be served with connect info.
    let period_ms = (1000 / per_second).max(1);
    let burst = u32::try_from(per_second).unwrap_or(u32::MAX);
    match GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(burst)
        .finish()
    {
        Some(governor_conf) => public
            .layer(GovernorLayer::new(Arc::new(governor_conf)))
            .merge(protected),
        None => {
            tracing::warn!(
                "Invalid auth rate limit {}/s; rate limiting disabled",
                per_second
            );
            public.merge(protected)
        }
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let openapi = ApiDoc::openapi();

    let user_routes = Router::new()
        .merge(obligations::routes())
        .merge(balance::routes())
        .merge(records::routes())
        .merge(movements::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let admin_routes = admin::routes()
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let analysis_routes = analysis::routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/openapi.json", get(move || async move { Json(openapi) }))
        .nest("/auth", auth_routes(&state, config))
        .nest("/user", user_routes)
        .nest("/admin", admin_routes)
        .nest("/analysis", analysis_routes);

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
