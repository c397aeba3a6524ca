//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the Diesel implementation of the domain's `UserRepository` port,
//! with async support through `diesel-async` and `bb8` connection pooling.
//!
//! Diesel row structs (`models.rs`) and the table definition (`schema.rs`)
//! stay private to this module; only domain types cross its boundary and
//! every database failure is mapped to `UserPersistenceError`.
//!
//! # Example
//!
//! ```no_run
//! use usuarios::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/usuarios")).await?;
//! let repository = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_user_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
