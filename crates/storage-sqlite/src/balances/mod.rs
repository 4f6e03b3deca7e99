mod model;
mod repository;

pub use model::BalanceDB;
pub use repository::BalanceRepository;
pub(crate) use repository::find_active_balance;
