//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered user records.
    users (id) {
        /// Primary key: UUID v4 assigned on insert.
        id -> Uuid,
        /// Email address; unique (`users_email_key`).
        email -> Varchar,
        name -> Varchar,
        /// Age in years; `NULL` when unknown.
        age -> Nullable<Int4>,
        created_at -> Timestamptz,
        /// Maintained by the `users_touch_updated_at` trigger.
        updated_at -> Timestamptz,
    }
}
