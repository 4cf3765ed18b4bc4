//! Application service registering new courses.
//!
//! Validates raw input, builds the aggregate through [`Course::create`], stores
//! it, and only then publishes the events the aggregate recorded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use campus_core::{AggregateRoot, Entity, ValidationError};
use campus_events::{EventBus, EventEnvelope};

use crate::course::Course;
use crate::events::CourseEvent;
use crate::repository::{CourseRepository, RepositoryError};
use crate::rules::CourseRules;
use crate::value_objects::{CourseDuration, CourseId, CourseName};

/// Aggregate type stamped on published envelopes.
pub const COURSE_AGGREGATE_TYPE: &str = "courses.course";

/// Raw input for registering a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub id: String,
    pub name: String,
    pub duration: String,
}

#[derive(Debug, Error)]
pub enum CourseCreationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The course was stored but an event could not be handed to the bus.
    #[error("course {course_id} stored but event publication failed")]
    Publish {
        course_id: CourseId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub struct CourseCreator<R, B> {
    repository: R,
    bus: B,
    rules: CourseRules,
}

impl<R, B> CourseCreator<R, B>
where
    R: CourseRepository,
    B: EventBus<EventEnvelope<CourseEvent>>,
{
    pub fn new(repository: R, bus: B) -> Self {
        Self::with_rules(repository, bus, CourseRules::default())
    }

    pub fn with_rules(repository: R, bus: B, rules: CourseRules) -> Self {
        Self {
            repository,
            bus,
            rules,
        }
    }

    pub fn rules(&self) -> &CourseRules {
        &self.rules
    }

    /// Register a new course and publish its `CourseCreated` event.
    ///
    /// Nothing is published when validation or saving fails. The returned
    /// course has no pending events left.
    pub fn create(&self, request: CreateCourseRequest) -> Result<Course, CourseCreationError> {
        let CreateCourseRequest { id, name, duration } = request;

        let course_id = CourseId::new(id)?;
        let name = CourseName::with_rules(name, &self.rules)?;
        let duration = CourseDuration::with_rules(duration, &self.rules)?;

        let mut course = Course::create(course_id, name, duration);
        self.repository.save(&course)?;

        let events = course.pull_events();
        tracing::info!(
            course_id = %course.id(),
            events = events.len(),
            "course created"
        );

        for event in events {
            let envelope = EventEnvelope::wrap(COURSE_AGGREGATE_TYPE, event);
            self.bus.publish(envelope).map_err(|e| {
                tracing::error!(course_id = %course.id(), error = %e, "failed to publish course event");
                CourseCreationError::Publish {
                    course_id: course.id().clone(),
                    source: Box::new(e),
                }
            })?;
        }

        Ok(course)
    }
}
