//! UUID value generator.

use super::ValueGenerator;
use rand::{Rng, RngCore};
use seed_core::{Column, Value};
use uuid::Uuid;

/// Random version 4 UUIDs drawn from the engine's random source, so seeded
/// runs stay reproducible.
///
/// Not registered by default; callers opt in for `uuid` columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl ValueGenerator for UuidGenerator {
    fn random_value(&self, rng: &mut dyn RngCore, _column: &Column) -> Value {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);

        // Version 4, RFC 4122 variant
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        Value::Uuid(Uuid::from_bytes(bytes))
    }
}
