//! Read-side exercise use-cases.

use super::ports::{PersistenceContext, Repository};
use super::repository_error_mapping::map_repository_error;
use super::{Dispose, Error, Exercise, ExerciseFilter, ExerciseId};

/// Exercise queries over a single repository.
pub struct ExerciseLogic {
    exercises: Box<dyn Repository<Exercise>>,
}

impl ExerciseLogic {
    /// Wrap an exercise repository.
    pub fn new(exercises: Box<dyn Repository<Exercise>>) -> Self {
        Self { exercises }
    }

    /// Build the logic over a fresh context's exercise repository.
    pub fn from_context(context: &dyn PersistenceContext) -> Self {
        Self::new(context.exercises())
    }

    /// All stored exercises, unfiltered.
    pub async fn get_exercises(&self) -> Result<Vec<Exercise>, Error> {
        self.exercises.get_all().await.map_err(map_repository_error)
    }

    /// The exercise with `id`, or `None` when absent.
    pub async fn get(&self, id: &ExerciseId) -> Result<Option<Exercise>, Error> {
        self.exercises
            .get_first(&ExerciseFilter::ById(*id))
            .await
            .map_err(map_repository_error)
    }
}

impl Dispose for ExerciseLogic {
    fn dispose(&self) {
        self.exercises.dispose();
    }
}
