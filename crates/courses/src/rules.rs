//! Validation rules shared by every course construction path.
//!
//! Rules are plain data. `CourseRules::default()` is what the `new`
//! constructors use; deployments that need other limits load them with
//! [`CourseRules::from_env`] and pass them to the `*_with` constructors.

use std::collections::BTreeSet;

use campus_core::{ValidationError, ValidationResult};

/// Default upper bound for course names, in characters.
pub const DEFAULT_NAME_MAX_CHARS: usize = 100;

/// Env var overriding [`CourseRules::name_max_chars`].
pub const NAME_MAX_CHARS_ENV: &str = "CAMPUS_COURSE_NAME_MAX_CHARS";

/// Env var selecting the [`DurationRule`]: `*` or a comma separated token list.
pub const DURATIONS_ENV: &str = "CAMPUS_COURSE_DURATIONS";

/// Units accepted by [`DurationRule::Coded`], plural forms.
pub const DURATION_UNITS: [&str; 5] = ["minutes", "hours", "days", "weeks", "months"];

/// How duration tokens are validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DurationRule {
    /// `<amount><unit>`: a positive integer followed by one of
    /// [`DURATION_UNITS`] (singular accepted), e.g. `4weeks`, `1month`.
    #[default]
    Coded,
    /// Membership in an explicit set of tokens.
    OneOf(BTreeSet<String>),
    /// Any non-blank token.
    NonEmpty,
}

impl DurationRule {
    /// Build a [`DurationRule::OneOf`] from any token list.
    pub fn one_of<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(tokens.into_iter().map(Into::into).collect())
    }

    pub(crate) fn check(&self, raw: &str) -> ValidationResult<()> {
        if raw.trim().is_empty() {
            return Err(ValidationError::new("duration", "must not be empty"));
        }

        match self {
            DurationRule::NonEmpty => Ok(()),
            DurationRule::OneOf(allowed) => {
                if allowed.contains(raw) {
                    Ok(())
                } else {
                    let listed: Vec<&str> = allowed.iter().map(String::as_str).collect();
                    Err(ValidationError::new(
                        "duration",
                        format!("must be one of [{}], got {raw:?}", listed.join(", ")),
                    ))
                }
            }
            DurationRule::Coded => check_coded(raw),
        }
    }
}

fn check_coded(raw: &str) -> ValidationResult<()> {
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (amount, unit) = raw.split_at(split);

    let amount: u32 = amount.parse().map_err(|_| {
        ValidationError::new(
            "duration",
            format!("must start with a whole number amount, got {raw:?}"),
        )
    })?;
    if amount == 0 {
        return Err(ValidationError::new("duration", "amount must be positive"));
    }

    let known = DURATION_UNITS
        .iter()
        .any(|plural| unit == *plural || Some(unit) == plural.strip_suffix('s'));
    if !known {
        return Err(ValidationError::new(
            "duration",
            format!(
                "unit must be one of [{}], got {unit:?}",
                DURATION_UNITS.join(", ")
            ),
        ));
    }

    Ok(())
}

/// Validation rules applied to course fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRules {
    /// Maximum course name length, in characters.
    pub name_max_chars: usize,
    pub duration: DurationRule,
}

impl Default for CourseRules {
    fn default() -> Self {
        Self {
            name_max_chars: DEFAULT_NAME_MAX_CHARS,
            duration: DurationRule::default(),
        }
    }
}

impl CourseRules {
    /// Rules that only enforce what holds under every configuration:
    /// non-blank name and duration, no length cap.
    pub fn permissive() -> Self {
        Self {
            name_max_chars: usize::MAX,
            duration: DurationRule::NonEmpty,
        }
    }

    /// Load rules from the process environment, falling back to defaults for
    /// unset variables.
    pub fn from_env() -> ValidationResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load rules through an arbitrary key lookup (env, config file, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ValidationResult<Self> {
        let mut rules = Self::default();

        if let Some(raw) = lookup(NAME_MAX_CHARS_ENV) {
            let max = raw.trim().parse::<usize>().map_err(|e| {
                ValidationError::new("config", format!("{NAME_MAX_CHARS_ENV}: {e}"))
            })?;
            if max == 0 {
                return Err(ValidationError::new(
                    "config",
                    format!("{NAME_MAX_CHARS_ENV} must be positive"),
                ));
            }
            rules.name_max_chars = max;
        }

        if let Some(raw) = lookup(DURATIONS_ENV) {
            let raw = raw.trim();
            rules.duration = if raw == "*" {
                DurationRule::NonEmpty
            } else {
                let tokens: BTreeSet<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned)
                    .collect();
                if tokens.is_empty() {
                    return Err(ValidationError::new(
                        "config",
                        format!("{DURATIONS_ENV} lists no duration tokens"),
                    ));
                }
                DurationRule::OneOf(tokens)
            };
        }

        Ok(rules)
    }
}
