//! Workout routines and personal records.

use chrono::Utc;
use shared::{BodyPartExercises, CreateRoutineRequest, MaxLift, RecordMaxLiftRequest, Routine, RoutineExercise};
use std::collections::BTreeMap;
use tracing::info;

use crate::domain::{new_id, validation};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

/// Suggested exercises per body part, in display order
pub const BODY_PART_EXERCISES: [(&str, [&str; 5]); 6] = [
    ("chest", ["Bench Press", "Incline Bench Press", "Dumbbell Press", "Push-ups", "Chest Fly"]),
    ("back", ["Deadlift", "Pull-ups", "Bent-over Row", "Lat Pulldown", "T-Bar Row"]),
    ("shoulders", ["Overhead Press", "Lateral Raises", "Front Raises", "Rear Delt Fly", "Arnold Press"]),
    ("arms", ["Bicep Curls", "Tricep Dips", "Hammer Curls", "Close-grip Bench Press", "Preacher Curls"]),
    ("legs", ["Squat", "Leg Press", "Lunges", "Leg Curls", "Calf Raises"]),
    ("core", ["Plank", "Crunches", "Russian Twists", "Leg Raises", "Dead Bug"]),
];

type MaxLiftMap = BTreeMap<String, Vec<MaxLift>>;

/// Display line for one routine exercise, e.g. `3 sets × 10 reps @ 135lbs`
pub fn describe_exercise(exercise: &RoutineExercise) -> String {
    let mut line = format!("{} sets × {} reps", exercise.sets, exercise.reps);
    if let Some(weight) = exercise.weight {
        line.push_str(&format!(" @ {}lbs", weight));
    }
    line
}

#[derive(Clone)]
pub struct ExerciseService {
    store: JsonStore,
}

impl ExerciseService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn body_parts(&self) -> Vec<BodyPartExercises> {
        BODY_PART_EXERCISES
            .iter()
            .map(|(body_part, exercises)| BodyPartExercises {
                body_part: body_part.to_string(),
                exercises: exercises.iter().map(|e| e.to_string()).collect(),
            })
            .collect()
    }

    fn body_part_key(body_part: &str) -> AppResult<String> {
        let key = body_part.trim().to_lowercase();
        if BODY_PART_EXERCISES.iter().any(|(name, _)| *name == key) {
            Ok(key)
        } else {
            Err(AppError::validation(format!("Unknown body part: {}", body_part)))
        }
    }

    // Routines

    pub fn list_routines(&self, user_id: u64) -> AppResult<Vec<Routine>> {
        Ok(self.store.load(&StorageKey::routines(user_id))?)
    }

    pub fn create_routine(&self, user_id: u64, request: CreateRoutineRequest) -> AppResult<Routine> {
        let name = validation::required(&request.name, "Routine name is required")?;
        if request.exercises.is_empty() {
            return Err(AppError::validation("Add at least one exercise to the routine"));
        }

        let exercises = request
            .exercises
            .iter()
            .map(|input| -> AppResult<RoutineExercise> {
                Ok(RoutineExercise {
                    id: new_id("exercise"),
                    name: validation::required(&input.name, "Exercise name is required")?,
                    sets: validation::positive_count(&input.sets, "Sets")?,
                    reps: validation::positive_count(&input.reps, "Reps")?,
                    weight: validation::optional_amount(&input.weight, "Weight")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let routine = Routine {
            id: new_id("routine"),
            name,
            exercises,
            created_at: Utc::now(),
        };

        let mut routines = self.list_routines(user_id)?;
        routines.push(routine.clone());
        self.store.save(&StorageKey::routines(user_id), &routines)?;

        info!(
            "Created routine '{}' with {} exercises for user {}",
            routine.name,
            routine.exercises.len(),
            user_id
        );
        Ok(routine)
    }

    pub fn delete_routine(&self, user_id: u64, routine_id: &str) -> AppResult<()> {
        let mut routines = self.list_routines(user_id)?;
        let before = routines.len();
        routines.retain(|r| r.id != routine_id);

        if routines.len() == before {
            return Err(AppError::not_found(format!("Routine {} not found", routine_id)));
        }
        self.store.save(&StorageKey::routines(user_id), &routines)?;
        Ok(())
    }

    // Max lifts

    fn load_max_lifts(&self, user_id: u64) -> AppResult<MaxLiftMap> {
        Ok(self.store.load(&StorageKey::max_lifts(user_id))?)
    }

    pub fn lifts_for_body_part(&self, user_id: u64, body_part: &str) -> AppResult<Vec<MaxLift>> {
        let key = Self::body_part_key(body_part)?;
        Ok(self.load_max_lifts(user_id)?.remove(&key).unwrap_or_default())
    }

    /// Record a personal best. A second record for the same exercise replaces
    /// the first but keeps its id and creation time.
    pub fn record_max_lift(
        &self,
        user_id: u64,
        body_part: &str,
        request: RecordMaxLiftRequest,
    ) -> AppResult<MaxLift> {
        let key = Self::body_part_key(body_part)?;
        if request.exercise.trim().is_empty()
            || request.weight.trim().is_empty()
            || request.reps.trim().is_empty()
        {
            return Err(AppError::validation("Exercise, weight and reps are all required"));
        }
        let exercise = request.exercise.trim().to_string();
        let weight = validation::positive_amount(&request.weight, "Weight")?;
        let reps = validation::positive_count(&request.reps, "Reps")?;

        let mut all_lifts = self.load_max_lifts(user_id)?;
        let lifts = all_lifts.entry(key.clone()).or_default();

        let lift = match lifts.iter_mut().find(|lift| lift.exercise == exercise) {
            Some(existing) => {
                existing.weight = weight;
                existing.reps = reps;
                existing.updated_at = Some(Utc::now());
                existing.clone()
            }
            None => {
                let lift = MaxLift {
                    id: new_id("lift"),
                    exercise,
                    weight,
                    reps,
                    created_at: Utc::now(),
                    updated_at: None,
                };
                lifts.push(lift.clone());
                lift
            }
        };

        self.store.save(&StorageKey::max_lifts(user_id), &all_lifts)?;
        info!(
            "Recorded max lift {} {} lbs x {} ({}) for user {}",
            lift.exercise, lift.weight, lift.reps, key, user_id
        );
        Ok(lift)
    }

    pub fn delete_max_lift(&self, user_id: u64, body_part: &str, exercise: &str) -> AppResult<()> {
        let key = Self::body_part_key(body_part)?;
        let mut all_lifts = self.load_max_lifts(user_id)?;

        let lifts = all_lifts.entry(key).or_default();
        let before = lifts.len();
        lifts.retain(|lift| lift.exercise != exercise);
        if lifts.len() == before {
            return Err(AppError::not_found(format!("No max lift recorded for {}", exercise)));
        }

        self.store.save(&StorageKey::max_lifts(user_id), &all_lifts)?;
        Ok(())
    }
}
