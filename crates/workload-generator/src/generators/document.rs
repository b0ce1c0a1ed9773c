//! Nested JSON document stored in `parent_records.json_field`.
//!
//! The document mimics a batch of user profiles: a metadata header, a small
//! array of users with nested preferences, and a settings block.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde_json::{json, Value};

use super::text::{generate_string, generate_string_array};
use super::timestamp::hours_before;

/// Users embedded in each document.
pub const USERS_PER_DOCUMENT: usize = 2;

/// Generate one user-batch document.
pub fn generate_user_batch<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Value {
    let users: Vec<Value> = (0..USERS_PER_DOCUMENT)
        .map(|_| generate_user(rng, now))
        .collect();
    let flags = generate_string_array(rng, 3, 20);

    json!({
        "metadata": {
            "version": "1.0",
            "generated": now.to_rfc3339_opts(SecondsFormat::Secs, true),
            "recordType": "user_batch",
        },
        "users": users,
        "settings": {
            "batchSize": 100,
            "timestamp": now.timestamp(),
            "flags": flags,
        },
    })
}

fn generate_user<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Value {
    let id = generate_string(rng, 36);
    let name = generate_string(rng, 50);
    let email = format!(
        "{}@{}.com",
        generate_string(rng, 10),
        generate_string(rng, 5)
    );
    let age = rng.gen_range(0..100);
    let active = rng.gen_bool(0.5);
    let last_login = hours_before(rng, now, 10_000);
    let login_count = rng.gen_range(0..1000);
    let theme = generate_string(rng, 10);
    let language = generate_string(rng, 5);
    let timezone = generate_string(rng, 30);
    let newsletter = rng.gen_bool(0.5);
    let tags = generate_string_array(rng, 2, 10);

    json!({
        "id": id,
        "name": name,
        "email": email,
        "age": age,
        "active": active,
        "metadata": {
            "lastLogin": last_login.to_rfc3339_opts(SecondsFormat::Secs, true),
            "loginCount": login_count,
            "preferences": {
                "theme": theme,
                "language": language,
                "timezone": timezone,
                "newsletter": newsletter,
            },
        },
        "tags": tags,
    })
}
