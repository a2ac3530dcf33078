//! Todo Entity
//!
//! The canonical item shape, its input rules, and decoding from the loosely
//! typed JSON a view call returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Maximum task length, in characters, after trimming
pub const MAX_TASK_LENGTH: usize = 280;
pub const MIN_TASK_LENGTH: usize = 1;

/// A todo record owned by the remote contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Assigned by the contract, increasing per account
    pub id: u64,
    pub task: String,
    pub completed: bool,
    /// Unix seconds, set once at creation
    pub created_at: u64,
}

/// A validated, positive todo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidTodoId { value: value.to_string() });
        }
        Ok(Self(value as u64))
    }

    /// Accept numeric input from loosely typed sources; fractions are rejected.
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > u64::MAX as f64 {
            return Err(ValidationError::InvalidTodoId { value: value.to_string() });
        }
        Ok(Self(value as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TodoId {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ValidationError::InvalidTodoId { value: "0".into() });
        }
        Ok(Self(value))
    }
}

impl TryFrom<i64> for TodoId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for TodoId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidTodoId { value: s.to_string() })
            .and_then(Self::try_from)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim `task` and check its length. Returns the text to submit.
pub fn validate_task(task: &str) -> Result<String, ValidationError> {
    let trimmed = task.trim();
    let length = trimmed.chars().count();
    if length < MIN_TASK_LENGTH {
        return Err(ValidationError::EmptyTask);
    }
    if length > MAX_TASK_LENGTH {
        return Err(ValidationError::TaskTooLong {
            max: MAX_TASK_LENGTH,
            actual: length,
        });
    }
    Ok(trimmed.to_string())
}

/// Item list returned by `get_todos`, carried in the first response slot.
///
/// A non-array payload is an empty list. Any element that cannot be coerced
/// rejects the whole batch.
pub fn decode_todo_list(payload: Option<&Value>) -> Result<Vec<TodoItem>, String> {
    let Some(Value::Array(elements)) = payload else {
        return Ok(Vec::new());
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            decode_item(element).ok_or_else(|| format!("malformed todo at index {}: {}", index, element))
        })
        .collect()
}

fn decode_item(value: &Value) -> Option<TodoItem> {
    let fields = value.as_object()?;
    Some(TodoItem {
        id: decode_id(fields.get("id")?)?.get(),
        task: coerce_string(fields.get("task")?)?,
        completed: fields.get("completed").map(coerce_bool).unwrap_or(false),
        created_at: fields.get("created_at").and_then(coerce_u64).unwrap_or(0),
    })
}

/// Ids must be numeric or decimal text and at least 1.
fn decode_id(value: &Value) -> Option<TodoId> {
    match value {
        Value::Number(_) | Value::String(_) => coerce_u64(value).and_then(|id| TodoId::try_from(id).ok()),
        _ => None,
    }
}

/// Numeric coercion. The node encodes u64 as decimal strings.
pub fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Bool(b) => Some(u64::from(*b)),
        Value::Null => Some(0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness, except that the strings "false" and "0" are false.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !matches!(s.trim(), "" | "false" | "0"),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
