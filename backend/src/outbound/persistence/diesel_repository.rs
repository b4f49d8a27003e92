//! Diesel queries behind the generic repository port.
//!
//! Filters translate into `WHERE` clauses; sessions are loaded joined with
//! their owning user.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{Repository, RepositoryError};
use crate::domain::{
    Exercise, ExerciseFilter, Session, SessionFilter, SessionToken, User, UserFilter,
};

use super::diesel_basic_error_mapping::map_diesel_error;
use super::models::{ExerciseRow, NewUserRow, SessionRow, UserRow};
use super::schema::{exercises, sessions, users};
use super::sql_context::SqlRepository;

fn to_user(row: UserRow) -> Result<User, RepositoryError> {
    let id = row.id;
    User::try_from(row)
        .map_err(|err| RepositoryError::query(format!("stored user {id} is invalid: {err}")))
}

fn to_session((session, user): (SessionRow, UserRow)) -> Result<Session, RepositoryError> {
    Ok(Session::new(
        SessionToken::from_uuid(session.token),
        to_user(user)?,
        session.created_at,
    ))
}

#[async_trait]
impl Repository<Exercise> for SqlRepository<Exercise> {
    async fn get_all(&self) -> Result<Vec<Exercise>, RepositoryError> {
        let mut conn = self.checkout().await?;
        let rows = exercises::table
            .select(ExerciseRow::as_select())
            .load::<ExerciseRow>(&mut *conn)
            .await;
        self.park(conn);
        let rows = rows.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Exercise::from).collect())
    }

    async fn get_first(&self, filter: &ExerciseFilter) -> Result<Option<Exercise>, RepositoryError> {
        let ExerciseFilter::ById(id) = filter;
        let mut conn = self.checkout().await?;
        let row = exercises::table
            .filter(exercises::id.eq(*id.as_uuid()))
            .select(ExerciseRow::as_select())
            .first::<ExerciseRow>(&mut *conn)
            .await
            .optional();
        self.park(conn);
        let row = row.map_err(map_diesel_error)?;
        Ok(row.map(Exercise::from))
    }

    async fn add(&self, exercise: Exercise) -> Result<(), RepositoryError> {
        let mut conn = self.checkout().await?;
        let inserted = diesel::insert_into(exercises::table)
            .values(ExerciseRow::from(&exercise))
            .execute(&mut *conn)
            .await;
        self.park(conn);
        inserted.map_err(map_diesel_error)?;
        Ok(())
    }
}

#[async_trait]
impl Repository<User> for SqlRepository<User> {
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.checkout().await?;
        let rows = users::table
            .select(UserRow::as_select())
            .load::<UserRow>(&mut *conn)
            .await;
        self.park(conn);
        let rows = rows.map_err(map_diesel_error)?;
        rows.into_iter().map(to_user).collect()
    }

    async fn get_first(&self, filter: &UserFilter) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.checkout().await?;
        let row = match filter {
            UserFilter::ById(id) => {
                users::table
                    .filter(users::id.eq(*id.as_uuid()))
                    .select(UserRow::as_select())
                    .first::<UserRow>(&mut *conn)
                    .await
            }
            UserFilter::Credentials { username, password } => {
                users::table
                    .filter(users::username.eq(username.as_str()))
                    .filter(users::password.eq(password.as_str()))
                    .select(UserRow::as_select())
                    .first::<UserRow>(&mut *conn)
                    .await
            }
        }
        .optional();
        self.park(conn);
        let row = row.map_err(map_diesel_error)?;
        row.map(to_user).transpose()
    }

    async fn add(&self, user: User) -> Result<(), RepositoryError> {
        let mut conn = self.checkout().await?;
        let inserted = diesel::insert_into(users::table)
            .values(NewUserRow::from(&user))
            .execute(&mut *conn)
            .await;
        self.park(conn);
        inserted.map_err(map_diesel_error)?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Session> for SqlRepository<Session> {
    async fn get_all(&self) -> Result<Vec<Session>, RepositoryError> {
        let mut conn = self.checkout().await?;
        let rows = sessions::table
            .inner_join(users::table)
            .select((SessionRow::as_select(), UserRow::as_select()))
            .load::<(SessionRow, UserRow)>(&mut *conn)
            .await;
        self.park(conn);
        let rows = rows.map_err(map_diesel_error)?;
        rows.into_iter().map(to_session).collect()
    }

    async fn get_first(&self, filter: &SessionFilter) -> Result<Option<Session>, RepositoryError> {
        let SessionFilter::ByToken(token) = filter;
        let mut conn = self.checkout().await?;
        let row = sessions::table
            .inner_join(users::table)
            .filter(sessions::token.eq(*token.as_uuid()))
            .select((SessionRow::as_select(), UserRow::as_select()))
            .first::<(SessionRow, UserRow)>(&mut *conn)
            .await
            .optional();
        self.park(conn);
        let row = row.map_err(map_diesel_error)?;
        row.map(to_session).transpose()
    }

    async fn add(&self, session: Session) -> Result<(), RepositoryError> {
        let row = SessionRow {
            token: *session.token().as_uuid(),
            user_id: *session.user().id().as_uuid(),
            created_at: session.created_at(),
        };
        let mut conn = self.checkout().await?;
        let inserted = diesel::insert_into(sessions::table)
            .values(row)
            .execute(&mut *conn)
            .await;
        self.park(conn);
        inserted.map_err(map_diesel_error)?;
        Ok(())
    }
}
