mod model;
mod repository;

pub use model::ObligationDB;
pub use repository::ObligationRepository;
