//! User registry backend library modules.
//!
//! Layout follows a hexagonal split: [`domain`] holds the rules and ports,
//! [`inbound`] adapts HTTP onto the driving ports, and [`outbound`] provides
//! the PostgreSQL and in-memory repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{Cors, Trace};
