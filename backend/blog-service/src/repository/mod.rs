mod postgres_repository;
mod r#trait;

pub use postgres_repository::PostgresRepository;
pub use r#trait::BlogRepository;
