//! Exercise data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ports::Entity;

/// Stable exercise identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ExerciseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Homework exercise.
///
/// Serialised as
/// `{"id":"<uuid>","problemDescription":"...","score":5}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: ExerciseId,
    #[schema(example = "Implement a linked list")]
    problem_description: String,
    #[schema(example = 5)]
    score: i32,
}

impl Exercise {
    /// Build an exercise from its parts.
    pub fn new(id: ExerciseId, problem_description: impl Into<String>, score: i32) -> Self {
        Self {
            id,
            problem_description: problem_description.into(),
            score,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    /// Statement of the problem to solve.
    pub fn problem_description(&self) -> &str {
        self.problem_description.as_str()
    }

    /// Points awarded for the exercise.
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Lookup criteria for [`Exercise`] repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseFilter {
    ById(ExerciseId),
}

impl Entity for Exercise {
    type Filter = ExerciseFilter;
    type Key = ExerciseId;

    fn key(&self) -> Self::Key {
        self.id
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            ExerciseFilter::ById(id) => self.id == *id,
        }
    }
}
