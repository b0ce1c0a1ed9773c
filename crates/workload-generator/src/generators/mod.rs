//! Individual value generators used to build parent and child payloads.
//!
//! Every generator draws only from the RNG it is given, so the values are a
//! pure function of the stream state (timestamps excepted, which take an
//! explicit `now`).

pub mod document;
pub mod text;
pub mod timestamp;
pub mod uuid;
