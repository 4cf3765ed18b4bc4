use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_events::Event;

use crate::value_objects::{CourseDuration, CourseId, CourseName};

/// Event: CourseCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCreated {
    pub course_id: CourseId,
    pub name: CourseName,
    pub duration: CourseDuration,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CourseRenamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRenamed {
    pub course_id: CourseId,
    pub previous_name: CourseName,
    pub name: CourseName,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CourseEvent {
    CourseCreated(CourseCreated),
    CourseRenamed(CourseRenamed),
}

impl CourseEvent {
    pub fn course_id(&self) -> &CourseId {
        match self {
            CourseEvent::CourseCreated(e) => &e.course_id,
            CourseEvent::CourseRenamed(e) => &e.course_id,
        }
    }
}

impl Event for CourseEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CourseEvent::CourseCreated(_) => "courses.course.created",
            CourseEvent::CourseRenamed(_) => "courses.course.renamed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CourseEvent::CourseCreated(e) => e.occurred_at,
            CourseEvent::CourseRenamed(e) => e.occurred_at,
        }
    }

    fn aggregate_id(&self) -> &str {
        self.course_id().as_str()
    }
}
