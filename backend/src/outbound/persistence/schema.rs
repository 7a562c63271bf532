//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, case-sensitive login name (max 64 characters).
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shayari posts.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        author_id -> Uuid,
        /// Post body as submitted.
        content -> Text,
        /// Creation time; feed order key.
        created_at -> Timestamptz,
        /// Last edit time.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
