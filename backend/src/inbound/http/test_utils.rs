//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{ContextProvider, Repository};
use crate::domain::{Exercise, User, UserId};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::ContextFactory;

/// Clock pinned to a single instant.
pub struct FixtureClock(pub DateTime<Utc>);

impl Default for FixtureClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
                .single()
                .expect("valid fixture timestamp"),
        )
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// State over a fresh, uniquely named in-memory database.
pub fn memory_state() -> (web::Data<HttpState>, ContextFactory) {
    let factory = ContextFactory::in_memory(&format!("http-test-{}", Uuid::new_v4()));
    let state = HttpState::new(Arc::new(factory.clone()), Arc::new(FixtureClock::default()));
    (web::Data::new(state), factory)
}

pub async fn insert_exercises(factory: &ContextFactory, exercises: &[Exercise]) {
    let context = factory.new_context();
    let repository = context.exercises();
    for exercise in exercises {
        repository.add(exercise.clone()).await.expect("insert exercise");
    }
}

pub async fn insert_user(factory: &ContextFactory, username: &str, password: &str) -> User {
    let user = User::try_new(UserId::random(), username, password).expect("valid user");
    factory
        .new_context()
        .users()
        .add(user.clone())
        .await
        .expect("insert user");
    user
}
