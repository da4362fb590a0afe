//! Identifier generation for newly created risks.

use uuid::Uuid;

/// Generate a fresh risk identifier.
///
/// Identifiers are random (v4) UUIDs rendered in the canonical dashed,
/// lowercase hex form, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
