//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users. Passwords are stored as given.
    users (id) {
        id -> Uuid,
        username -> Text,
        password -> Text,
    }
}

diesel::table! {
    exercises (id) {
        id -> Uuid,
        problem_description -> Text,
        score -> Int4,
    }
}

diesel::table! {
    /// Issued login sessions.
    sessions (token) {
        token -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(exercises, sessions, users);
