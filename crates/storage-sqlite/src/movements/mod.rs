mod model;
mod repository;

pub use model::MovementDB;
pub use repository::MovementRepository;
pub(crate) use repository::insert_movement;
