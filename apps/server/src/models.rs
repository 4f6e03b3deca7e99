//! Wire types for the HTTP API, with OpenAPI schemas.

use chrono::NaiveDateTime;
use outlays_core::{
    analysis::TrendAnalysis,
    balances::{Balance, BalanceUpdate, NewBalance},
    movements::Movement,
    obligations::{NewObligation, Obligation, ObligationUpdate},
    records::{NewRecord, Record, RecordDetails, RecordUpdate},
    users::{NewUser, RegisterUser, Role, User, UserUpdate},
    LifecycleState,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            message: "OK".to_string(),
        }
    }
}

// ----- users and auth -----

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(r: RegisterRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            password: r.password,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[schema(value_type = String, example = "user")]
    pub role: Role,
    #[schema(value_type = String, example = "active")]
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            role: u.role,
            status: u.status,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "user")]
    pub role: Role,
}

impl From<CreateUserRequest> for NewUser {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            password: r.password,
            role: r.role,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
    #[schema(value_type = Option<String>)]
    pub status: Option<LifecycleState>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            role: r.role,
            status: r.status,
        }
    }
}

// ----- obligations -----

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ObligationRequest {
    pub name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub cadence_days: i32,
}

impl From<ObligationRequest> for NewObligation {
    fn from(r: ObligationRequest) -> Self {
        Self {
            name: r.name,
            amount: r.amount,
            cadence_days: r.cadence_days,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObligationUpdateRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub cadence_days: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub status: Option<LifecycleState>,
}

impl From<ObligationUpdateRequest> for ObligationUpdate {
    fn from(r: ObligationUpdateRequest) -> Self {
        Self {
            name: r.name,
            amount: r.amount,
            cadence_days: r.cadence_days,
            status: r.status,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ObligationResponse {
    pub id: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub cadence_days: i32,
    pub last_applied_at: NaiveDateTime,
    pub next_due_at: Option<NaiveDateTime>,
    #[schema(value_type = String)]
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Obligation> for ObligationResponse {
    fn from(o: Obligation) -> Self {
        Self {
            next_due_at: outlays_core::accrual::next_due_at(o.last_applied_at, o.cadence_days),
            id: o.id,
            name: o.name,
            amount: o.amount,
            cadence_days: o.cadence_days,
            last_applied_at: o.last_applied_at,
            status: o.status,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

// ----- balance -----

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct BalanceRequest {
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<BalanceRequest> for NewBalance {
    fn from(r: BalanceRequest) -> Self {
        Self { amount: r.amount }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct BalanceUpdateRequest {
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub status: Option<LifecycleState>,
}

impl From<BalanceUpdateRequest> for BalanceUpdate {
    fn from(r: BalanceUpdateRequest) -> Self {
        Self {
            amount: r.amount,
            status: r.status,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub id: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = String)]
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Balance> for BalanceResponse {
    fn from(b: Balance) -> Self {
        Self {
            id: b.id,
            amount: b.amount,
            status: b.status,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

// ----- records -----

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct RecordRequest {
    pub name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Kind-tagged attributes, e.g. `{"kind": "goal", "savedAmount": 120}`.
    #[schema(value_type = Object)]
    pub details: RecordDetails,
}

impl From<RecordRequest> for NewRecord {
    fn from(r: RecordRequest) -> Self {
        Self {
            name: r.name,
            amount: r.amount,
            details: r.details,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct RecordUpdateRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<Object>)]
    pub details: Option<RecordDetails>,
    #[schema(value_type = Option<String>)]
    pub status: Option<LifecycleState>,
}

impl From<RecordUpdateRequest> for RecordUpdate {
    fn from(r: RecordUpdateRequest) -> Self {
        Self {
            name: r.name,
            amount: r.amount,
            details: r.details,
            status: r.status,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = Object)]
    pub details: RecordDetails,
    #[schema(value_type = String)]
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Record> for RecordResponse {
    fn from(r: Record) -> Self {
        Self {
            id: r.id,
            name: r.name,
            amount: r.amount,
            details: r.details,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ----- movements and analysis -----

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MovementResponse {
    pub id: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl From<Movement> for MovementResponse {
    fn from(m: Movement) -> Self {
        Self {
            id: m.id,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysisResponse {
    pub table: String,
    pub slope: f64,
    pub intercept: f64,
    pub sample_size: usize,
    pub trend_equation: String,
}

impl From<TrendAnalysis> for TrendAnalysisResponse {
    fn from(t: TrendAnalysis) -> Self {
        Self {
            table: t.table,
            slope: t.slope,
            intercept: t.intercept,
            sample_size: t.sample_size,
            trend_equation: t.trend_equation,
        }
    }
}
