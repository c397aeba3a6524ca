//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the user record, the checks every write must pass, the
//! list filter, and the service that ties them to a persistence port. Nothing
//! here knows about HTTP or SQL.
//!
//! Public surface:
//! - `User`, `UserId`, `Email`, `UserName`, `Age`, `UserDraft`: the record.
//! - `UserInput`, `ValidationErrors`: raw payload validation.
//! - `UserQueryParams`, `UserFilter`, `AgeFilter`: list query mapping.
//! - `UserService`: implements the driving ports over a `UserRepository`.
//! - `UserServiceError`: use-case failures.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_filter;
pub mod user_input;
pub mod user_service;

pub use self::error::UserServiceError;
pub use self::user::{Age, Email, User, UserDraft, UserId, UserName, UserValidationError};
pub use self::user_filter::{AgeFilter, UserFilter, UserQueryParams};
pub use self::user_input::{UserInput, ValidationErrors};
pub use self::user_service::UserService;
