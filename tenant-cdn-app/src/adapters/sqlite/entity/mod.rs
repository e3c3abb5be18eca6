//! `SeaORM` entities for `SqliteStore`.

pub mod tenant_distribution;
