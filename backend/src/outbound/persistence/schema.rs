//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! `diesel print-schema` against a migrated database regenerates them.

diesel::table! {
    /// Resident accounts.
    users (id) {
        id -> Uuid,
        name -> Text,
        /// Lowercased; unique via `users_email_key`.
        email -> Text,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Advisory block hint from sign-up.
        block -> Nullable<Text>,
        /// Advisory room number hint from sign-up.
        room_number -> Nullable<Text>,
        phone -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rooms, unique per `(block, room_number)`.
    rooms (id) {
        id -> Int4,
        block -> Text,
        room_number -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership edges. `(room_id, block)` references `rooms (id, block)`.
    room_members (room_id, block, user_id) {
        room_id -> Int4,
        block -> Text,
        user_id -> Uuid,
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Service requests. At most one active row per `(room_id, type)`.
    requests (id) {
        id -> Int4,
        user_id -> Nullable<Uuid>,
        room_id -> Int4,
        #[sql_name = "type"]
        request_type -> Text,
        status -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(requests -> rooms (room_id));
diesel::joinable!(requests -> users (user_id));
diesel::joinable!(room_members -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(requests, room_members, rooms, users);
