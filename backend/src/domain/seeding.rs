//! Startup seed data.
//!
//! A seed document lists users and exercises with fixed identifiers. Rows
//! whose identifier is already stored are skipped, so the same document can
//! be applied on every start.

use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::ports::{PersistenceContext, RepositoryError};
use super::{Exercise, ExerciseFilter, ExerciseId, User, UserFilter, UserId, UserValidationError};

/// Seed file contents.
///
/// ```json
/// {
///   "users": [{"id": "…", "username": "ada", "password": "pw"}],
///   "exercises": [{"id": "…", "problemDescription": "…", "score": 5}]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDocument {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub exercises: Vec<SeedExercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedExercise {
    pub id: Uuid,
    pub problem_description: String,
    pub score: i32,
}

/// Rows written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub users_added: usize,
    pub exercises_added: usize,
}

/// Errors raised while applying a seed document.
#[derive(Debug, thiserror::Error)]
pub enum SeedingError {
    #[error("seed user {id} is invalid: {source}")]
    InvalidUser {
        id: Uuid,
        #[source]
        source: UserValidationError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Insert every row of `document` missing from `context`.
pub async fn apply_seed(
    context: &dyn PersistenceContext,
    document: &SeedDocument,
) -> Result<SeedOutcome, SeedingError> {
    let mut outcome = SeedOutcome::default();

    let users = context.users();
    for seed in &document.users {
        let id = UserId::from_uuid(seed.id);
        if users.get_first(&UserFilter::ById(id)).await?.is_some() {
            debug!(user_id = %id, "seed user already present");
            continue;
        }
        let user = User::try_new(id, seed.username.as_str(), seed.password.as_str()).map_err(
            |source| SeedingError::InvalidUser {
                id: seed.id,
                source,
            },
        )?;
        users.add(user).await?;
        outcome.users_added += 1;
    }

    let exercises = context.exercises();
    for seed in &document.exercises {
        let id = ExerciseId::from_uuid(seed.id);
        if exercises
            .get_first(&ExerciseFilter::ById(id))
            .await?
            .is_some()
        {
            continue;
        }
        exercises
            .add(Exercise::new(id, seed.problem_description.as_str(), seed.score))
            .await?;
        outcome.exercises_added += 1;
    }

    info!(
        users_added = outcome.users_added,
        exercises_added = outcome.exercises_added,
        "seed applied"
    );
    Ok(outcome)
}
