mod model;
mod repository;

pub use model::RecordDB;
pub use repository::RecordRepository;
