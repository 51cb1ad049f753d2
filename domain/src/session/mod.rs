//! Model session types.

pub mod stream;
