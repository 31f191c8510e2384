//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts.
    ///
    /// `email` is stored lower-cased and carries a unique index.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
        /// Maintained by trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged workouts.
    activities (id) {
        id -> Uuid,
        user_id -> Uuid,
        activity_type -> Varchar,
        duration_minutes -> Nullable<Float8>,
        distance -> Nullable<Float8>,
        calories -> Nullable<Float8>,
        notes -> Nullable<Text>,
        date -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged meals.
    nutrition_entries (id) {
        id -> Uuid,
        user_id -> Uuid,
        meal_type -> Nullable<Varchar>,
        calories -> Nullable<Float8>,
        protein -> Nullable<Float8>,
        carbs -> Nullable<Float8>,
        fats -> Nullable<Float8>,
        notes -> Nullable<Text>,
        date -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged nights of sleep. Clock times are `HH:MM` strings.
    sleep_logs (id) {
        id -> Uuid,
        user_id -> Uuid,
        duration_hours -> Nullable<Float8>,
        bedtime -> Nullable<Varchar>,
        waketime -> Nullable<Varchar>,
        quality -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        date -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Personal goals.
    goals (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        target -> Nullable<Float8>,
        progress -> Float8,
        unit -> Nullable<Varchar>,
        due_date -> Nullable<Timestamptz>,
        completed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(activities -> users (user_id));
diesel::joinable!(nutrition_entries -> users (user_id));
diesel::joinable!(sleep_logs -> users (user_id));
diesel::joinable!(goals -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(activities, goals, nutrition_entries, sleep_logs, users);
