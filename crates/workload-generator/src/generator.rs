//! Record generation contract and the default random payload generator.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::generators::{document, text, timestamp, uuid};
use crate::stream::SeededStream;
use crate::values::{FieldValue, Record, WriteUnit};

/// Length of the short text columns (`varchar_field`).
pub const VARCHAR_LENGTH: usize = 1000;

/// Length of the long text columns (`text_field`, `metadata`).
pub const TEXT_LENGTH: usize = 5000;

/// Exclusive upper bound for `child_records.bigint_field`.
pub const BIGINT_FIELD_BOUND: i64 = 1_000_000_000;

/// Produces the records written by workers.
///
/// Implementations must be pure functions of the stream state: the same
/// stream position always yields the same record.
pub trait RecordGenerator: Send + Sync {
    /// Generate the next parent record.
    fn next_parent(&self, stream: &mut SeededStream) -> Record;

    /// Generate the next child record. The store links it to its parent.
    fn next_child(&self, stream: &mut SeededStream) -> Record;

    /// Generate the column assignments for an update of an existing parent.
    fn next_parent_update(&self, stream: &mut SeededStream) -> Vec<(String, FieldValue)>;

    /// Generate one parent with `children` children.
    fn next_unit(&self, stream: &mut SeededStream, children: usize) -> WriteUnit {
        let parent = self.next_parent(stream);
        let children = (0..children).map(|_| self.next_child(stream)).collect();
        WriteUnit { parent, children }
    }
}

/// Source of "now" for generated timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Wall-clock time
    #[default]
    System,
    /// A fixed instant, making every field reproducible
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Default generator for the `parent_records` / `child_records` tables.
#[derive(Debug, Clone, Default)]
pub struct RandomRecordGenerator {
    clock: Clock,
}

impl RandomRecordGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given clock for timestamp columns.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

/// A positive primary key.
fn generate_id(stream: &mut SeededStream) -> i64 {
    stream.gen_range(1..=i64::MAX)
}

impl RecordGenerator for RandomRecordGenerator {
    fn next_parent(&self, stream: &mut SeededStream) -> Record {
        let now = self.clock.now();
        let id = generate_id(stream);
        let doc = document::generate_user_batch(stream, now);

        Record::new(id)
            .with_field(
                "var_char_id",
                FieldValue::Text(uuid::generate_uuid_v4(stream).to_string()),
            )
            .with_field(
                "varchar_field",
                FieldValue::Text(text::generate_string(stream, VARCHAR_LENGTH)),
            )
            .with_field(
                "text_field",
                FieldValue::Text(text::generate_string(stream, TEXT_LENGTH)),
            )
            .with_field("tinyint_field", FieldValue::Bool(stream.gen_bool(0.5)))
            .with_field("timestamp_field", FieldValue::Timestamp(now))
            .with_field("json_field", FieldValue::Json(doc))
            .with_field("created_at", FieldValue::Timestamp(now))
            .with_field("updated_at", FieldValue::Timestamp(now))
    }

    fn next_child(&self, stream: &mut SeededStream) -> Record {
        let id = generate_id(stream);
        let created_at = timestamp::within_day_after(stream, self.clock.now());
        let expires_at = timestamp::expiry_after(stream, created_at);

        Record::new(id)
            .with_field(
                "varchar_field",
                FieldValue::Text(text::generate_string(stream, VARCHAR_LENGTH)),
            )
            .with_field(
                "bigint_field",
                FieldValue::Int64(stream.gen_range(0..BIGINT_FIELD_BOUND)),
            )
            .with_field("active_field", FieldValue::Bool(stream.gen_bool(0.5)))
            .with_field("created_at", FieldValue::Timestamp(created_at))
            .with_field("expires_at", FieldValue::Timestamp(expires_at))
            .with_field(
                "metadata",
                FieldValue::Text(text::generate_string(stream, TEXT_LENGTH)),
            )
    }

    fn next_parent_update(&self, stream: &mut SeededStream) -> Vec<(String, FieldValue)> {
        vec![
            (
                "varchar_field".to_string(),
                FieldValue::Text(text::generate_string(stream, VARCHAR_LENGTH)),
            ),
            (
                "updated_at".to_string(),
                FieldValue::Timestamp(self.clock.now()),
            ),
        ]
    }
}
