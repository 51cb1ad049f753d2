//! Cross-cutting value objects.

pub mod caps;
