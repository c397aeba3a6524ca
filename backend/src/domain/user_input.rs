//! Validation of untyped user write payloads.
//!
//! Create and update requests arrive as loosely typed JSON. [`UserInput`]
//! keeps every field as a raw [`Value`] so the checks can distinguish an
//! absent field from one explicitly set to `null` or to the wrong type, and
//! report all failures at once rather than stopping at the first.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::user::{Age, Email, UserDraft, UserName, UserValidationError};

/// Raw create/update payload.
///
/// Unknown fields are ignored.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use usuarios::domain::UserInput;
///
/// let input: UserInput =
///     serde_json::from_value(json!({ "email": "bad", "name": "" })).expect("object payload");
/// assert_eq!(input.validate().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UserInput {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String, example = "ada@example.com")]
    email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>, example = 36)]
    age: Option<Value>,
}

/// Keep explicit `null`s as `Some(Value::Null)` instead of collapsing them.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<Map<String, Value>> for UserInput {
    /// Take the three known fields from a JSON object, ignoring the rest.
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            email: object.remove("email"),
            name: object.remove("name"),
            age: object.remove("age"),
        }
    }
}

impl UserInput {
    /// Run every field check and collect the failures in field order.
    ///
    /// An empty result means the payload is valid.
    pub fn validate(&self) -> Vec<UserValidationError> {
        [
            self.checked_email().err(),
            self.checked_name().err(),
            self.checked_age().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Convert the payload into a [`UserDraft`], or report every failure.
    pub fn into_draft(self) -> Result<UserDraft, ValidationErrors> {
        match (self.checked_email(), self.checked_name(), self.checked_age()) {
            (Ok(email), Ok(name), Ok(age)) => Ok(UserDraft { email, name, age }),
            _ => Err(ValidationErrors(self.validate())),
        }
    }

    fn checked_email(&self) -> Result<Email, UserValidationError> {
        match &self.email {
            Some(Value::String(raw)) => Email::new(raw.as_str()),
            _ => Err(UserValidationError::InvalidEmail),
        }
    }

    fn checked_name(&self) -> Result<UserName, UserValidationError> {
        match &self.name {
            Some(Value::String(raw)) => UserName::new(raw.as_str()),
            _ => Err(UserValidationError::MissingName),
        }
    }

    fn checked_age(&self) -> Result<Option<Age>, UserValidationError> {
        match &self.age {
            None => Ok(None),
            Some(value) => whole_number(value)
                .ok_or(UserValidationError::InvalidAge)
                .and_then(Age::new)
                .map(Some),
        }
    }
}

/// Interpret a JSON value as an `i32`, accepting integral floats such as
/// `30.0`.
fn whole_number(value: &Value) -> Option<i32> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(int) = number.as_i64() {
        return i32::try_from(int).ok();
    }
    let float = number.as_f64()?;
    if float.fract() != 0.0 || float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
        return None;
    }
    Some(float as i32)
}

/// Ordered, non-empty list of validation failures for one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<UserValidationError>);

impl ValidationErrors {
    /// Failures in the order the checks ran.
    pub fn errors(&self) -> &[UserValidationError] {
        &self.0
    }

    /// User-facing messages, one per failure.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
