use std::sync::Arc;

use outlays_core::{
    accrual::{AccrualEngine, SystemClock},
    analysis::{AnalysisService, AnalysisServiceTrait},
    balances::{BalanceService, BalanceServiceTrait},
    movements::MovementRepositoryTrait,
    obligations::{ObligationService, ObligationServiceTrait},
    records::{RecordService, RecordServiceTrait},
    users::{UserService, UserServiceTrait},
};
use outlays_storage_sqlite::{
    db::{self, write_actor},
    AccrualRepository, BalanceRepository, MovementRepository, ObligationRepository,
    RecordRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::{decode_secret_key, generate_secret_key, Argon2PasswordHasher, AuthConfig, AuthManager};
use crate::config::{Config, LogFormat};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub obligation_service: Arc<dyn ObligationServiceTrait + Send + Sync>,
    pub balance_service: Arc<dyn BalanceServiceTrait + Send + Sync>,
    pub record_service: Arc<dyn RecordServiceTrait + Send + Sync>,
    pub analysis_service: Arc<dyn AnalysisServiceTrait + Send + Sync>,
    pub movement_repository: Arc<dyn MovementRepositoryTrait + Send + Sync>,
    pub accrual_engine: Arc<AccrualEngine>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let registry = tracing_subscriber::registry().with(filter);
    // try_init: integration tests build several apps in one process.
    let _ = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    };
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let obligation_repository = Arc::new(ObligationRepository::new(pool.clone(), writer.clone()));
    let balance_repository = Arc::new(BalanceRepository::new(pool.clone(), writer.clone()));
    let record_repository = Arc::new(RecordRepository::new(pool.clone(), writer.clone()));
    let movement_repository = Arc::new(MovementRepository::new(pool.clone(), writer.clone()));
    let accrual_ledger = Arc::new(AccrualRepository::new(writer.clone()));

    let user_service = Arc::new(UserService::new(
        user_repository,
        movement_repository.clone(),
        Arc::new(Argon2PasswordHasher),
    ));
    let obligation_service = Arc::new(ObligationService::new(
        obligation_repository.clone(),
        movement_repository.clone(),
    ));
    let balance_service = Arc::new(BalanceService::new(
        balance_repository,
        movement_repository.clone(),
    ));
    let record_service = Arc::new(RecordService::new(
        record_repository.clone(),
        movement_repository.clone(),
    ));
    let analysis_service = Arc::new(AnalysisService::new(
        obligation_repository.clone(),
        record_repository,
    ));

    let accrual_engine = Arc::new(
        AccrualEngine::new(
            obligation_repository,
            accrual_ledger,
            Arc::new(SystemClock),
        )
        .with_apply_timeout(config.accrual.apply_timeout),
    );

    let jwt_secret = match &config.jwt_secret {
        Some(raw) => decode_secret_key(raw)?,
        None => {
            tracing::warn!(
                "OUTLAYS_JWT_SECRET is not set; using a random key. Tokens will not survive a restart."
            );
            generate_secret_key()
        }
    };
    let auth = Arc::new(AuthManager::new(&AuthConfig {
        jwt_secret,
        access_token_ttl: config.access_token_ttl,
    }));

    if let Some(password) = &config.admin_password {
        if let Some(admin) = user_service
            .ensure_admin(&config.admin_email, password)
            .await?
        {
            tracing::info!("Created bootstrap administrator {}", admin.email);
        }
    }

    Ok(Arc::new(AppState {
        user_service,
        obligation_service,
        balance_service,
        record_service,
        analysis_service,
        movement_repository,
        accrual_engine,
        auth,
    }))
}
