//! Key and value types held by every store

/// Opaque string identifier. No ordering semantics are relied upon.
pub type Key = String;

/// Opaque byte payload of arbitrary length.
pub type Value = Vec<u8>;
