use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{parse_workout_id, ApiError, AppState};
use db::models::{SetEntry, Workout, WorkoutPatch};
use db::repository::workouts as workout_repo;

#[derive(serde::Deserialize)]
pub struct CreateWorkoutDto {
    pub workout: Option<CreateWorkoutBody>,
}

#[derive(serde::Deserialize)]
pub struct CreateWorkoutBody {
    pub entries: Option<Vec<SetEntry>>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Workout>>, ApiError> {
    let workouts = workout_repo::list_workouts(&state.pool).await?;
    Ok(Json(workouts))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Workout>, ApiError> {
    let id = parse_workout_id(&id)?;
    let workout = workout_repo::get_workout(&state.pool, id).await?;
    Ok(Json(workout))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateWorkoutDto>,
) -> Result<Json<Workout>, ApiError> {
    let entries = payload
        .workout
        .and_then(|w| w.entries)
        .filter(|entries| !entries.is_empty())
        .ok_or(ApiError::InvalidWorkoutData)?;

    if entries.iter().any(|e| e.reps < 0 || e.weight < 0.0) {
        return Err(ApiError::InvalidWorkoutData);
    }

    let workout = workout_repo::create_workout(&state.pool, &entries).await?;
    Ok(Json(workout))
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(patch): Json<WorkoutPatch>,
) -> Result<Json<Workout>, ApiError> {
    let id = parse_workout_id(&id)?;
    let workout = workout_repo::update_workout(&state.pool, id, patch).await?;
    Ok(Json(workout))
}

pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_workout_id(&id)?;
    workout_repo::delete_workout(&state.pool, id).await?;
    Ok(Json(json!({ "message": "Workout deleted successfully." })))
}
