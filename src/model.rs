// The task record and its persisted JSON shape.
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single to-do item.
///
/// The serialized form uses camelCase field names and keeps `dueDate` as a
/// plain ISO calendar date string. Older files written by previous versions
/// store an empty string instead of omitting the field; both mean "no due
/// date" and both parse back to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_due_date",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Long human-readable due date, e.g. "January 5, 2024".
    ///
    /// Fixed English month names; the date carries no time component, so
    /// there is no timezone conversion that could shift the day.
    pub fn format_due_long(&self) -> Option<String> {
        self.due_date.map(|d| d.format("%B %-d, %Y").to_string())
    }

    pub fn checkbox_symbol(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

fn serialize_due_date<S: Serializer>(
    date: &Option<NaiveDate>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => ser.serialize_str(&d.format("%Y-%m-%d").to_string()),
        None => ser.serialize_none(),
    }
}

fn deserialize_due_date<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(de)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Parses user input for the due date field: empty means no due date.
pub fn parse_due_input(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map(Some)
}
