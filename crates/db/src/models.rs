//! Row structs that map 1-to-1 onto database tables, the nested read models
//! assembled from them, and the input structs the repository accepts for
//! writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A persisted workout row.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: i64,
    pub date: DateTime<Utc>,
}

/// A persisted exercise row.
#[derive(Debug, Clone, FromRow)]
pub struct ExerciseRow {
    pub id: i64,
    pub name: String,
    pub workout_id: i64,
}

/// A persisted set row.
#[derive(Debug, Clone, FromRow)]
pub struct SetRow {
    pub id: i64,
    pub reps: i64,
    pub weight: f64,
    pub exercise_id: i64,
}

// ---------------------------------------------------------------------------
// Nested read models
// ---------------------------------------------------------------------------

/// One performance of an exercise with a given weight and rep count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Set {
    pub id: i64,
    pub reps: i64,
    pub weight: f64,
}

/// A named movement performed during a workout, container for its sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub sets: Vec<Set>,
}

/// One logged session with its exercises fully nested.
///
/// `date` serialises as an ISO-8601 string via chrono's serde support; the
/// column itself stays a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
}

// ---------------------------------------------------------------------------
// Write inputs
// ---------------------------------------------------------------------------

/// One flat entry of a new workout: exercise name plus the single set
/// performed.  Entries are never grouped or de-duplicated by name.
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntry {
    pub exercise: String,
    pub weight: f64,
    pub reps: i64,
}

/// One set inside an [`ExerciseChange`].  A present `id` updates the
/// matching row; an absent or unknown id inserts a new one.
#[derive(Debug, Clone, Deserialize)]
pub struct SetChange {
    pub id: Option<i64>,
    pub reps: i64,
    pub weight: f64,
}

/// One exercise inside a [`WorkoutPatch`], with the same update-or-create
/// semantics as [`SetChange`].
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseChange {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetChange>,
}

/// Changes applied to an existing workout.  Rows missing from `exercises`
/// are left untouched, never deleted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutPatch {
    pub date: Option<DateTime<Utc>>,
    pub exercises: Option<Vec<ExerciseChange>>,
}
