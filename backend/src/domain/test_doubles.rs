//! Hand-rolled repository doubles for domain logic tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::Dispose;
use super::ports::{Entity, Repository, RepositoryError};

/// Vector-backed repository with failure injection and disposal counting.
pub(crate) struct StubRepository<T> {
    rows: Mutex<Vec<T>>,
    failure: Mutex<Option<RepositoryError>>,
    disposals: AtomicUsize,
}

impl<T: Entity> StubRepository<T> {
    pub(crate) fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            failure: Mutex::new(None),
            disposals: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fail_with(&self, error: RepositoryError) {
        *self.failure.lock().expect("failure lock") = Some(error);
    }

    pub(crate) fn rows(&self) -> Vec<T> {
        self.rows.lock().expect("rows lock").clone()
    }

    pub(crate) fn disposals(&self) -> usize {
        self.disposals.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), RepositoryError> {
        match self.failure.lock().expect("failure lock").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<T> Dispose for StubRepository<T> {
    fn dispose(&self) {
        self.disposals.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for StubRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.check()?;
        Ok(self.rows())
    }

    async fn get_first(&self, filter: &T::Filter) -> Result<Option<T>, RepositoryError> {
        self.check()?;
        Ok(self.rows().into_iter().find(|row| row.matches(filter)))
    }

    async fn add(&self, entity: T) -> Result<(), RepositoryError> {
        self.check()?;
        self.rows.lock().expect("rows lock").push(entity);
        Ok(())
    }
}
