//! Course value objects: identifier, name and duration.
//!
//! Each type wraps one `String` and can only be built through a validating
//! constructor. `new` and `with_rules` apply the configured [`CourseRules`].
//! Decoding (`serde`, `TryFrom<String>`, `FromStr`) only checks the invariants
//! that hold under every rule set (id format, non-blank name and duration), so
//! a value encoded under custom rules always decodes again.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::{ValidationError, ValidationResult, ValueObject};

use crate::rules::CourseRules;

/// Maximum identifier length, in bytes (identifiers are ASCII).
pub const ID_MAX_LEN: usize = 64;

/// Course identifier.
///
/// Format: 1 to [`ID_MAX_LEN`] ASCII characters from `[A-Za-z0-9_-]`, starting
/// with an alphanumeric. Hyphenated UUIDs and slugs such as `abc-123` qualify.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    pub fn new(raw: impl Into<String>) -> ValidationResult<Self> {
        let raw = raw.into();

        let Some(first) = raw.chars().next() else {
            return Err(ValidationError::new("id", "must not be empty"));
        };
        if raw.len() > ID_MAX_LEN {
            return Err(ValidationError::new(
                "id",
                format!("must be at most {ID_MAX_LEN} characters"),
            ));
        }
        if !first.is_ascii_alphanumeric() {
            return Err(ValidationError::new(
                "id",
                "must start with an ASCII letter or digit",
            ));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ValidationError::new(
                "id",
                format!("contains disallowed character {bad:?}"),
            ));
        }

        Ok(Self(raw))
    }

    fn decode(raw: String) -> ValidationResult<Self> {
        Self::new(raw)
    }

    /// Generate a fresh identifier (time-ordered UUIDv7).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Course display name.
///
/// Must contain non-whitespace characters and stay within the configured
/// maximum length. The raw string is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    pub fn new(raw: impl Into<String>) -> ValidationResult<Self> {
        Self::with_rules(raw, &CourseRules::default())
    }

    pub fn with_rules(raw: impl Into<String>, rules: &CourseRules) -> ValidationResult<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        let chars = raw.chars().count();
        if chars > rules.name_max_chars {
            return Err(ValidationError::new(
                "name",
                format!(
                    "must be at most {} characters, got {chars}",
                    rules.name_max_chars
                ),
            ));
        }

        Ok(Self(raw))
    }

    fn decode(raw: String) -> ValidationResult<Self> {
        Self::with_rules(raw, &CourseRules::permissive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Course duration, a coded label such as `4weeks`.
///
/// Accepted tokens depend on [`CourseRules::duration`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseDuration(String);

impl CourseDuration {
    pub fn new(raw: impl Into<String>) -> ValidationResult<Self> {
        Self::with_rules(raw, &CourseRules::default())
    }

    pub fn with_rules(raw: impl Into<String>, rules: &CourseRules) -> ValidationResult<Self> {
        let raw = raw.into();
        rules.duration.check(&raw)?;
        Ok(Self(raw))
    }

    fn decode(raw: String) -> ValidationResult<Self> {
        Self::with_rules(raw, &CourseRules::permissive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_string_value_object {
    ($t:ty) => {
        impl ValueObject for $t {
            type Primitive = str;

            fn value(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::decode(value)
            }
        }

        impl core::str::FromStr for $t {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::decode(s.to_owned())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_value_object!(CourseId);
impl_string_value_object!(CourseName);
impl_string_value_object!(CourseDuration);
