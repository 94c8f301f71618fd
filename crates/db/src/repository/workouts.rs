//! Workout CRUD operations over the three-level schema
//! (workouts → exercises → sets).
//!
//! Every multi-row write runs inside one transaction: either all child rows
//! land or the previous state is left intact.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    DbError, DbPool,
    models::{
        Exercise, ExerciseChange, ExerciseRow, Set, SetEntry, SetRow, Workout, WorkoutPatch,
        WorkoutRow,
    },
};

/// Return all workouts with their exercises and sets, newest first.
pub async fn list_workouts(pool: &DbPool) -> Result<Vec<Workout>, DbError> {
    let workout_rows = sqlx::query_as::<_, WorkoutRow>(
        "SELECT id, date FROM workouts ORDER BY date DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    let exercise_rows = sqlx::query_as::<_, ExerciseRow>(
        "SELECT id, name, workout_id FROM exercises ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let set_rows = sqlx::query_as::<_, SetRow>(
        "SELECT id, reps, weight, exercise_id FROM sets ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut sets_by_exercise: HashMap<i64, Vec<Set>> = HashMap::new();
    for row in set_rows {
        sets_by_exercise
            .entry(row.exercise_id)
            .or_default()
            .push(Set { id: row.id, reps: row.reps, weight: row.weight });
    }

    let mut exercises_by_workout: HashMap<i64, Vec<Exercise>> = HashMap::new();
    for row in exercise_rows {
        let sets = sets_by_exercise.remove(&row.id).unwrap_or_default();
        exercises_by_workout
            .entry(row.workout_id)
            .or_default()
            .push(Exercise { id: row.id, name: row.name, sets });
    }

    Ok(workout_rows
        .into_iter()
        .map(|row| Workout {
            id: row.id,
            date: row.date,
            exercises: exercises_by_workout.remove(&row.id).unwrap_or_default(),
        })
        .collect())
}

/// Fetch a single workout (with nested exercises and sets) by its primary key.
pub async fn get_workout(pool: &DbPool, id: i64) -> Result<Workout, DbError> {
    let row = sqlx::query_as::<_, WorkoutRow>("SELECT id, date FROM workouts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    let exercise_rows = sqlx::query_as::<_, ExerciseRow>(
        "SELECT id, name, workout_id FROM exercises WHERE workout_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let set_rows = sqlx::query_as::<_, SetRow>(
        r#"
        SELECT s.id, s.reps, s.weight, s.exercise_id
        FROM sets s
        JOIN exercises e ON e.id = s.exercise_id
        WHERE e.workout_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let mut sets_by_exercise: HashMap<i64, Vec<Set>> = HashMap::new();
    for s in set_rows {
        sets_by_exercise
            .entry(s.exercise_id)
            .or_default()
            .push(Set { id: s.id, reps: s.reps, weight: s.weight });
    }

    let exercises = exercise_rows
        .into_iter()
        .map(|e| Exercise {
            id: e.id,
            name: e.name,
            sets: sets_by_exercise.remove(&e.id).unwrap_or_default(),
        })
        .collect();

    Ok(Workout { id: row.id, date: row.date, exercises })
}

/// Insert a new workout from a flat entry list, dated `now`.
///
/// Each entry becomes its own exercise containing exactly one set — entries
/// sharing an exercise name are NOT merged.  Emptiness is the caller's
/// problem; an empty slice here simply produces a workout with no exercises.
pub async fn create_workout(pool: &DbPool, entries: &[SetEntry]) -> Result<Workout, DbError> {
    let mut tx = pool.begin().await?;

    let workout_id = sqlx::query("INSERT INTO workouts (date) VALUES (?)")
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for entry in entries {
        let exercise_id = sqlx::query("INSERT INTO exercises (name, workout_id) VALUES (?, ?)")
            .bind(&entry.exercise)
            .bind(workout_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        sqlx::query("INSERT INTO sets (reps, weight, exercise_id) VALUES (?, ?, ?)")
            .bind(entry.reps)
            .bind(entry.weight)
            .bind(exercise_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_workout(pool, workout_id).await
}

/// Apply a merge-style patch to an existing workout.
///
/// Supplied exercises/sets carrying an id that belongs to this workout are
/// updated in place; the rest are inserted fresh.  Rows absent from the
/// patch are left alone — this operation never deletes anything.
///
/// Returns `DbError::NotFound` if the workout itself does not exist.
pub async fn update_workout(
    pool: &DbPool,
    id: i64,
    patch: WorkoutPatch,
) -> Result<Workout, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query_scalar::<_, i64>("SELECT id FROM workouts WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

    if let Some(date) = patch.date {
        sqlx::query("UPDATE workouts SET date = ? WHERE id = ?")
            .bind(date)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    for change in patch.exercises.unwrap_or_default() {
        // Ownership check: an id pointing at another workout's exercise is
        // treated as unknown, never a cross-workout steal.
        let owned = match change.id {
            Some(exercise_id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT id FROM exercises WHERE id = ? AND workout_id = ?",
                )
                .bind(exercise_id)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        match owned {
            Some(exercise_id) => update_exercise(&mut tx, exercise_id, &change).await?,
            None => insert_exercise(&mut tx, id, &change).await?,
        }
    }

    tx.commit().await?;

    get_workout(pool, id).await
}

/// Permanently delete a workout by its primary key.
///
/// The `ON DELETE CASCADE` constraints remove its exercises and sets in the
/// same statement.  Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_workout(pool: &DbPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// helpers (transaction-scoped)
// ---------------------------------------------------------------------------

async fn update_exercise(
    tx: &mut SqliteConnection,
    exercise_id: i64,
    change: &ExerciseChange,
) -> Result<(), DbError> {
    sqlx::query("UPDATE exercises SET name = ? WHERE id = ?")
        .bind(&change.name)
        .bind(exercise_id)
        .execute(&mut *tx)
        .await?;

    for set in &change.sets {
        let owned = match set.id {
            Some(set_id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT id FROM sets WHERE id = ? AND exercise_id = ?",
                )
                .bind(set_id)
                .bind(exercise_id)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        match owned {
            Some(set_id) => {
                sqlx::query("UPDATE sets SET reps = ?, weight = ? WHERE id = ?")
                    .bind(set.reps)
                    .bind(set.weight)
                    .bind(set_id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query("INSERT INTO sets (reps, weight, exercise_id) VALUES (?, ?, ?)")
                    .bind(set.reps)
                    .bind(set.weight)
                    .bind(exercise_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }
    }

    Ok(())
}

async fn insert_exercise(
    tx: &mut SqliteConnection,
    workout_id: i64,
    change: &ExerciseChange,
) -> Result<(), DbError> {
    let exercise_id = sqlx::query("INSERT INTO exercises (name, workout_id) VALUES (?, ?)")
        .bind(&change.name)
        .bind(workout_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for set in &change.sets {
        sqlx::query("INSERT INTO sets (reps, weight, exercise_id) VALUES (?, ?, ?)")
            .bind(set.reps)
            .bind(set.weight)
            .bind(exercise_id)
            .execute(&mut *tx)
            .await?;
    }

    Ok(())
}
