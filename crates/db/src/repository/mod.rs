//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No HTTP concerns, no wire types — pure SQL.

pub mod workouts;
