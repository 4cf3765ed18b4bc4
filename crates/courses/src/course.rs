use chrono::Utc;
use serde::{Deserialize, Serialize};

use campus_core::{AggregateRoot, DomainEvents, Entity, ValidationError, ValidationResult};

use crate::events::{CourseCreated, CourseEvent, CourseRenamed};
use crate::rules::CourseRules;
use crate::value_objects::{CourseDuration, CourseId, CourseName};

/// Plain data shape of a course, used at the persistence/transport boundary.
///
/// Carries no invariants: treat it as untrusted until it has been turned into a
/// [`Course`] with [`Course::from_primitives`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoursePrimitives {
    pub id: String,
    pub name: String,
    pub duration: String,
}

/// Aggregate root: Course.
///
/// Immutable once built. There are two ways in:
/// - [`Course::create`] for a course that did not exist before; it records a
///   `CourseCreated` event.
/// - [`Course::from_primitives`] for a course loaded from storage; same field
///   validation, no event.
///
/// Equality (`==`) compares all fields and ignores pending events. Use
/// [`Entity::same_identity`] to ask whether two instances are the same course.
#[derive(Debug, Clone)]
pub struct Course {
    id: CourseId,
    name: CourseName,
    duration: CourseDuration,
    events: DomainEvents<CourseEvent>,
}

impl Course {
    /// Register a brand new course.
    ///
    /// The value objects already carry their validation, so this cannot fail.
    /// Exactly one `CourseCreated` event is left pending.
    pub fn create(id: CourseId, name: CourseName, duration: CourseDuration) -> Self {
        let mut course = Self::assemble(id, name, duration);
        let created = CourseEvent::CourseCreated(CourseCreated {
            course_id: course.id.clone(),
            name: course.name.clone(),
            duration: course.duration.clone(),
            occurred_at: Utc::now(),
        });
        course.record_event(created);
        course
    }

    /// Rehydrate a stored course with the default [`CourseRules`].
    pub fn from_primitives(record: CoursePrimitives) -> ValidationResult<Self> {
        Self::from_primitives_with(record, &CourseRules::default())
    }

    /// Rehydrate a stored course. Records no event.
    ///
    /// A field that fails validation here means the stored record is corrupt.
    pub fn from_primitives_with(
        record: CoursePrimitives,
        rules: &CourseRules,
    ) -> ValidationResult<Self> {
        let CoursePrimitives { id, name, duration } = record;

        Ok(Self::assemble(
            CourseId::new(id)?,
            CourseName::with_rules(name, rules)?,
            CourseDuration::with_rules(duration, rules)?,
        ))
    }

    pub fn to_primitives(&self) -> CoursePrimitives {
        CoursePrimitives {
            id: self.id.as_str().to_owned(),
            name: self.name.as_str().to_owned(),
            duration: self.duration.as_str().to_owned(),
        }
    }

    /// Return a new course with `name`, keeping id and duration.
    ///
    /// `self` is left untouched. The new instance carries one `CourseRenamed`
    /// event, or none when the name did not change.
    pub fn renamed(&self, name: CourseName) -> Self {
        let mut course = Self::assemble(self.id.clone(), name, self.duration.clone());
        if course.name != self.name {
            let renamed = CourseEvent::CourseRenamed(CourseRenamed {
                course_id: course.id.clone(),
                previous_name: self.name.clone(),
                name: course.name.clone(),
                occurred_at: Utc::now(),
            });
            course.record_event(renamed);
        }
        course
    }

    pub fn name(&self) -> &CourseName {
        &self.name
    }

    pub fn duration(&self) -> &CourseDuration {
        &self.duration
    }

    /// Events recorded but not yet pulled.
    pub fn pending_events(&self) -> &[CourseEvent] {
        self.domain_events().pending()
    }

    fn assemble(id: CourseId, name: CourseName, duration: CourseDuration) -> Self {
        Self {
            id,
            name,
            duration,
            events: DomainEvents::new(),
        }
    }
}

impl Entity for Course {
    type Id = CourseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Course {
    type Event = CourseEvent;

    fn domain_events(&self) -> &DomainEvents<Self::Event> {
        &self.events
    }

    fn domain_events_mut(&mut self) -> &mut DomainEvents<Self::Event> {
        &mut self.events
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.duration == other.duration
    }
}

impl Eq for Course {}

impl core::hash::Hash for Course {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.duration.hash(state);
    }
}

impl TryFrom<CoursePrimitives> for Course {
    type Error = ValidationError;

    fn try_from(record: CoursePrimitives) -> Result<Self, Self::Error> {
        Self::from_primitives(record)
    }
}

impl From<&Course> for CoursePrimitives {
    fn from(course: &Course) -> Self {
        course.to_primitives()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DurationRule;

    fn course(id: &str, name: &str, duration: &str) -> Course {
        Course::create(
            CourseId::new(id).unwrap(),
            CourseName::new(name).unwrap(),
            CourseDuration::new(duration).unwrap(),
        )
    }

    fn record(id: &str, name: &str, duration: &str) -> CoursePrimitives {
        CoursePrimitives {
            id: id.to_string(),
            name: name.to_string(),
            duration: duration.to_string(),
        }
    }

    #[test]
    fn create_records_one_created_event() {
        let mut course = course("abc-123", "Rust Basics", "4weeks");

        assert_eq!(
            course.to_primitives(),
            record("abc-123", "Rust Basics", "4weeks")
        );

        let events = course.pull_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CourseEvent::CourseCreated(e) => {
                assert_eq!(e.course_id.as_str(), "abc-123");
                assert_eq!(e.name.as_str(), "Rust Basics");
                assert_eq!(e.duration.as_str(), "4weeks");
            }
            _ => panic!("Expected CourseCreated event"),
        }

        // pulling drains the list
        assert!(course.pull_events().is_empty());
    }

    #[test]
    fn from_primitives_records_no_event() {
        let mut course =
            Course::from_primitives(record("abc-123", "Rust Basics", "4weeks")).unwrap();

        assert!(course.pending_events().is_empty());
        assert!(course.pull_events().is_empty());
        assert_eq!(
            course.to_primitives(),
            record("abc-123", "Rust Basics", "4weeks")
        );
    }

    #[test]
    fn from_primitives_rejects_each_malformed_field() {
        let cases = [
            (record("", "Rust Basics", "4weeks"), "id"),
            (record("abc-123", "  ", "4weeks"), "name"),
            (record("abc-123", "Rust Basics", "nonsense"), "duration"),
        ];
        for (bad, field) in cases {
            let err = Course::from_primitives(bad).unwrap_err();
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn from_primitives_with_applies_custom_rules() {
        let rules = CourseRules {
            name_max_chars: 4,
            duration: DurationRule::one_of(["short"]),
        };
        assert!(Course::from_primitives_with(record("a1", "Rust", "short"), &rules).is_ok());
        assert!(Course::from_primitives_with(record("a1", "Rust!", "short"), &rules).is_err());
        assert!(Course::from_primitives_with(record("a1", "Rust", "4weeks"), &rules).is_err());
    }

    #[test]
    fn same_identity_differs_from_structural_equality() {
        let a = course("abc-123", "Rust Basics", "4weeks");
        let b = course("abc-123", "Rust Advanced", "8weeks");
        let c = course("xyz-789", "Rust Basics", "4weeks");

        assert!(a.same_identity(&b));
        assert_ne!(a, b);

        assert!(!a.same_identity(&c));
        assert_ne!(a, c);
    }

    #[test]
    fn equality_ignores_pending_events() {
        let created = course("abc-123", "Rust Basics", "4weeks");
        let loaded = Course::from_primitives(created.to_primitives()).unwrap();

        assert_eq!(created.pending_events().len(), 1);
        assert!(loaded.pending_events().is_empty());
        assert_eq!(created, loaded);
    }

    #[test]
    fn renamed_returns_new_instance_with_event() {
        let mut original = course("abc-123", "Rust Basics", "4weeks");
        original.pull_events();

        let mut renamed = original.renamed(CourseName::new("Rust Fundamentals").unwrap());

        assert_eq!(original.name().as_str(), "Rust Basics");
        assert!(original.pending_events().is_empty());

        assert!(renamed.same_identity(&original));
        assert_eq!(renamed.name().as_str(), "Rust Fundamentals");
        assert_eq!(renamed.duration(), original.duration());

        let events = renamed.pull_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CourseEvent::CourseRenamed(e) => {
                assert_eq!(e.previous_name.as_str(), "Rust Basics");
                assert_eq!(e.name.as_str(), "Rust Fundamentals");
            }
            _ => panic!("Expected CourseRenamed event"),
        }
    }

    #[test]
    fn renaming_to_same_name_records_nothing() {
        let original = course("abc-123", "Rust Basics", "4weeks");
        let same = original.renamed(CourseName::new("Rust Basics").unwrap());
        assert!(same.pending_events().is_empty());
        assert_eq!(same, original);
    }

    #[test]
    fn primitives_json_shape_is_flat() {
        let json = serde_json::to_value(course("abc-123", "Rust Basics", "4weeks").to_primitives())
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc-123", "name": "Rust Basics", "duration": "4weeks"})
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const ID: &str = "[a-z0-9][a-z0-9_-]{0,40}";
        const NAME: &str = "[A-Za-z][A-Za-z0-9 ]{0,99}";
        const DURATION: &str = "[1-9][0-9]{0,3}(minutes?|hours?|days?|weeks?|months?)";

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: create then to_primitives returns the inputs unchanged.
            #[test]
            fn create_round_trips(id in ID, name in NAME, duration in DURATION) {
                let mut course = course(&id, &name, &duration);

                prop_assert_eq!(course.to_primitives(), record(&id, &name, &duration));
                prop_assert_eq!(course.pull_events().len(), 1);
            }

            /// Property: from_primitives then to_primitives is the identity.
            #[test]
            fn rehydration_round_trips(id in ID, name in NAME, duration in DURATION) {
                let stored = record(&id, &name, &duration);
                let mut course = Course::from_primitives(stored.clone()).unwrap();

                prop_assert_eq!(course.to_primitives(), stored);
                prop_assert!(course.pull_events().is_empty());
            }

            /// Property: rehydrating repeatedly never produces events.
            #[test]
            fn repeated_rehydration_is_side_effect_free(id in ID, name in NAME, duration in DURATION) {
                let stored = record(&id, &name, &duration);
                let first = Course::from_primitives(stored.clone()).unwrap();
                let second = Course::from_primitives(first.to_primitives()).unwrap();

                prop_assert_eq!(&first, &second);
                prop_assert!(second.pending_events().is_empty());
            }
        }
    }
}
