/// Decimal places kept for every stored currency amount
pub const AMOUNT_DECIMAL_PRECISION: u32 = 2;

/// Default number of movements returned when no limit is given
pub const DEFAULT_MOVEMENT_LIMIT: i64 = 100;

/// Upper bound for a single movements page
pub const MAX_MOVEMENT_LIMIT: i64 = 1000;

/// Default page size for the admin user listing
pub const DEFAULT_USER_PAGE_SIZE: i64 = 10;

/// Upper bound for the admin user listing
pub const MAX_USER_PAGE_SIZE: i64 = 100;

/// Minimum number of records needed before a trend is computed
pub const MIN_TREND_SAMPLE_SIZE: usize = 10;

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 4;
