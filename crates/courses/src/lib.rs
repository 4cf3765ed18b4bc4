//! Courses domain module.
//!
//! Business rules for courses implemented as deterministic domain logic: value
//! objects, the `Course` aggregate and its events. Storage and publishing are
//! reached only through the [`CourseRepository`] and `EventBus` ports.

pub mod course;
pub mod creator;
pub mod events;
pub mod repository;
pub mod rules;
pub mod value_objects;

pub use course::{Course, CoursePrimitives};
pub use creator::{COURSE_AGGREGATE_TYPE, CourseCreationError, CourseCreator, CreateCourseRequest};
pub use events::{CourseCreated, CourseEvent, CourseRenamed};
pub use repository::{CourseRepository, InMemoryCourseRepository, RepositoryError};
pub use rules::{CourseRules, DurationRule};
pub use value_objects::{CourseDuration, CourseId, CourseName};
