mod repository;

pub use repository::AccrualRepository;
