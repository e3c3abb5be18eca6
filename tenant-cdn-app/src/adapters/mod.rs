//! Storage adapters for `DistributionRecordRepository`.

mod memory_repo;

pub use memory_repo::InMemoryDistributionRepository;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
