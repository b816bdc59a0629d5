//! Built-in value generators for the primitive kinds.
//!
//! Every generated value survives a JSON or YAML round trip unchanged:
//! floats are finite with a fixed precision, timestamps are whole seconds,
//! and strings never look like another scalar.

pub mod choice;
pub mod collection;
pub mod numeric;
pub mod raw;
pub mod temporal;
pub mod text;
pub mod uuid;

use faker_core::{FakeValue, PrimitiveKind};
use rand::Rng;

/// Generate a value of the given primitive kind.
pub fn generate_primitive<R: Rng>(kind: PrimitiveKind, rng: &mut R) -> FakeValue {
    match kind {
        PrimitiveKind::Bool => FakeValue::Bool(rng.random_bool(0.5)),
        PrimitiveKind::Int => numeric::generate_int(rng),
        PrimitiveKind::Float => numeric::generate_float(rng),
        PrimitiveKind::String => text::generate_text(rng),
        PrimitiveKind::Date => temporal::generate_date(rng),
        PrimitiveKind::DateTime => temporal::generate_datetime(rng),
        PrimitiveKind::Time => temporal::generate_time(rng),
        PrimitiveKind::Uuid => uuid::generate_uuid_v4(rng),
        PrimitiveKind::Raw => raw::generate_raw(rng),
    }
}
