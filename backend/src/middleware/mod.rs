//! Request middleware.
//!
//! `Trace` correlates log lines per request and writes the access log;
//! `Cors` applies the single-origin cross-origin policy.

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::Trace;
