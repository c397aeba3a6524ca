//! Outbound adapters implementing the `UserRepository` port.
//!
//! - **persistence**: PostgreSQL via Diesel, used when `DATABASE_URL` is set.
//! - **memory**: process-local store for running without a database.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
