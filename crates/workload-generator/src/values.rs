//! Record and field value types produced by the generator.
//!
//! Records are opaque to the workload engine: it only looks at how many
//! children a [`WriteUnit`] carries. Stores map the field values onto their
//! own column types.

use chrono::{DateTime, Utc};

/// A single generated column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit signed integer
    Int64(i64),
    /// Boolean
    Bool(bool),
    /// Text of any length
    Text(String),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// JSON document
    Json(serde_json::Value),
    /// Null value
    Null,
}

/// One generated row: a primary key plus ordered named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Primary key
    pub id: i64,
    /// Column values in insertion order
    pub fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record with the given primary key.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    /// Append a field (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// One parent record plus its dependent children, written atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteUnit {
    pub parent: Record,
    pub children: Vec<Record>,
}

impl WriteUnit {
    /// Number of child records in the unit.
    pub fn child_count(&self) -> u64 {
        self.children.len() as u64
    }

    /// Total rows written when the unit commits (parent plus children).
    pub fn row_count(&self) -> u64 {
        1 + self.child_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fields_keep_order() {
        let record = Record::new(7)
            .with_field("b", FieldValue::Int64(2))
            .with_field("a", FieldValue::Bool(true));

        assert_eq!(record.field_names(), vec!["b", "a"]);
        assert_eq!(record.get_field("a"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get_field("missing"), None);
    }

    #[test]
    fn test_write_unit_counts() {
        let unit = WriteUnit {
            parent: Record::new(1),
            children: vec![Record::new(2), Record::new(3)],
        };
        assert_eq!(unit.child_count(), 2);
        assert_eq!(unit.row_count(), 3);
    }
}
