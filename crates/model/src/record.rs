use crate::{ordered::OrderedMap, value::Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected a JSON object for a source record, got {0}")]
    NotAnObject(String),
}

/// A raw input payload read from the legacy source. Field order is the
/// order the source delivered the fields in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceRecord {
    fields: OrderedMap<Value>,
}

impl SourceRecord {
    pub fn new() -> Self {
        SourceRecord::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field, value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or(Value::Null)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, RecordError> {
        let object = json
            .as_object()
            .ok_or_else(|| RecordError::NotAnObject(json.to_string()))?;
        let mut record = SourceRecord::new();
        for (field, value) in object {
            record.set(field.clone(), Value::from(value.clone()));
        }
        Ok(record)
    }
}

impl fmt::Display for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (field, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Identity of a record created in the destination store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportedRecord {
    pub entity: String,
    pub id: u64,
}

/// A record attempt rejected by validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFailure {
    pub entity: String,
    pub violations: Vec<String>,
    pub failed_at: DateTime<Utc>,
}

impl RecordFailure {
    pub fn new(entity: impl Into<String>, violations: Vec<String>) -> Self {
        RecordFailure {
            entity: entity.into(),
            violations,
            failed_at: Utc::now(),
        }
    }
}

/// Outcome of one record attempt, as produced by a collection driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecordOutcome {
    Created(ImportedRecord),
    Failed {
        failure: RecordFailure,
        input: SourceRecord,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_renders_fields_in_insertion_order() {
        let record = SourceRecord::new()
            .with("name", "Harry")
            .with("house", "Gryffindor")
            .with("year", 3i64);

        assert_eq!(
            record.to_string(),
            "{name: \"Harry\", house: \"Gryffindor\", year: 3}"
        );
    }

    #[test]
    fn test_display_empty_record() {
        assert_eq!(SourceRecord::new().to_string(), "{}");
    }

    #[test]
    fn test_from_json_object() {
        let record = SourceRecord::from_json(&json!({"house": "Gryffindor"})).unwrap();
        assert_eq!(
            record.get_value("house"),
            Value::String("Gryffindor".to_string())
        );
        assert_eq!(record.get_value("name"), Value::Null);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = SourceRecord::from_json(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_record_failure_carries_violations() {
        let failure = RecordFailure::new("Student", vec!["name can't be blank".to_string()]);
        assert_eq!(failure.entity, "Student");
        assert_eq!(failure.violations, vec!["name can't be blank"]);
    }
}
