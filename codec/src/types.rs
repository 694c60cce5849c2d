//! Implementations of Codec for common types

pub mod primitives;
