//! Conversion of generated field values into MySQL parameters.

use chrono::{Datelike, Timelike};
use mysql_async::Value;
use workload_generator::FieldValue;

/// MySQL value wrapper for generated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MySqlValue(pub Value);

impl MySqlValue {
    /// Get the inner mysql_async::Value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<FieldValue> for MySqlValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Int64(i) => MySqlValue(Value::Int(i)),
            // TINYINT(1)
            FieldValue::Bool(b) => MySqlValue(Value::Int(if b { 1 } else { 0 })),
            FieldValue::Text(s) => MySqlValue(Value::Bytes(s.into_bytes())),
            FieldValue::Timestamp(dt) => MySqlValue(Value::Date(
                dt.year() as u16,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                dt.timestamp_subsec_micros(),
            )),
            FieldValue::Json(doc) => MySqlValue(Value::Bytes(doc.to_string().into_bytes())),
            FieldValue::Null => MySqlValue(Value::NULL),
        }
    }
}

impl From<&FieldValue> for MySqlValue {
    fn from(value: &FieldValue) -> Self {
        value.clone().into()
    }
}
