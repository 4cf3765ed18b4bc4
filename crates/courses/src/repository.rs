//! Course persistence port and an in-memory adapter.
//!
//! Repositories store [`CoursePrimitives`] and rebuild courses through
//! [`Course::from_primitives_with`], so loading never emits domain events.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use campus_core::{Entity, ValidationError};

use crate::course::{Course, CoursePrimitives};
use crate::rules::CourseRules;
use crate::value_objects::CourseId;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A stored record no longer passes validation.
    #[error("corrupted course record {id:?}: {source}")]
    Corrupted {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// The backing store could not be reached.
    #[error("course store unavailable: {0}")]
    Unavailable(String),
}

/// Storage port for courses.
pub trait CourseRepository: Send + Sync {
    /// Insert or replace the course stored under its id.
    fn save(&self, course: &Course) -> Result<(), RepositoryError>;

    /// Load a course by id. `Ok(None)` when nothing is stored under `id`.
    fn search(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError>;

    /// Load every stored course. Corrupted records are skipped.
    fn all(&self) -> Result<Vec<Course>, RepositoryError>;
}

impl<R> CourseRepository for std::sync::Arc<R>
where
    R: CourseRepository + ?Sized,
{
    fn save(&self, course: &Course) -> Result<(), RepositoryError> {
        (**self).save(course)
    }

    fn search(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        (**self).search(id)
    }

    fn all(&self) -> Result<Vec<Course>, RepositoryError> {
        (**self).all()
    }
}

/// In-memory course store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    records: RwLock<HashMap<String, CoursePrimitives>>,
    rules: CourseRules,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rehydrating with `rules` instead of the defaults.
    pub fn with_rules(rules: CourseRules) -> Self {
        Self {
            records: RwLock::default(),
            rules,
        }
    }

    /// Store a raw record as-is, bypassing validation (imports, fixtures).
    pub fn insert_raw(&self, record: CoursePrimitives) -> Result<(), RepositoryError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rehydrate(&self, record: &CoursePrimitives) -> Result<Course, RepositoryError> {
        Course::from_primitives_with(record.clone(), &self.rules).map_err(|source| {
            RepositoryError::Corrupted {
                id: record.id.clone(),
                source,
            }
        })
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

impl CourseRepository for InMemoryCourseRepository {
    fn save(&self, course: &Course) -> Result<(), RepositoryError> {
        let record = course.to_primitives();
        let mut records = self.records.write().map_err(|_| poisoned())?;
        tracing::debug!(course_id = %course.id(), "saving course");
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn search(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .get(id.as_str())
            .map(|record| self.rehydrate(record))
            .transpose()
    }

    fn all(&self) -> Result<Vec<Course>, RepositoryError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut courses = Vec::with_capacity(records.len());
        for record in records.values() {
            match self.rehydrate(record) {
                Ok(course) => courses.push(course),
                Err(err) => tracing::warn!(error = %err, "skipping corrupted course record"),
            }
        }
        courses.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(courses)
    }
}
