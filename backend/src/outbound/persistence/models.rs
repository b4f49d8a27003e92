//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; conversions into domain types
//! live next to each row.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Exercise, ExerciseId, User, UserId, UserValidationError};

use super::schema::{exercises, sessions, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_new(UserId::from_uuid(row.id), row.username, row.password)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username(),
            password: user.password(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseRow {
    pub id: Uuid,
    pub problem_description: String,
    pub score: i32,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Exercise::new(ExerciseId::from_uuid(row.id), row.problem_description, row.score)
    }
}

impl From<&Exercise> for ExerciseRow {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: *exercise.id().as_uuid(),
            problem_description: exercise.problem_description().to_owned(),
            score: exercise.score(),
        }
    }
}

/// Session columns; the owning user is loaded through a join.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
