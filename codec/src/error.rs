//! Error types for codec operations

use thiserror::Error;

/// Coarse classification of an [Error].
///
/// Callers that only care about *why* a value was rejected (rather than the exact location) can
/// match on this instead of on individual variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A constructor argument was outside the bounds of its kind.
    Range,
    /// A varint carried more bits than its target width.
    Overflow,
    /// A type tag was not recognized.
    UnknownType,
    /// The byte stream was truncated, had trailing bytes, or was otherwise malformed.
    Format,
    /// A value's shape did not satisfy the type it was declared with.
    TypeMismatch,
}

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{value} is out of range for {kind}")]
    OutOfRange { kind: &'static str, value: String },
    #[error("too many items: {0} > {max}", max = u16::MAX)]
    TooManyItems(usize),
    #[error("varint exceeds {0} bits")]
    Overflow(usize),
    #[error("unknown type code: {0:#04x}")]
    UnknownType(u8),
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid data in {0}: {1}")]
    Invalid(&'static str, &'static str), // context, message
    #[error("invalid hex")]
    InvalidHex,
    #[error("nesting depth exceeded")]
    DepthExceeded,
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl Error {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } | Self::TooManyItems(_) => ErrorKind::Range,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::UnknownType(_) => ErrorKind::UnknownType,
            Self::EndOfBuffer
            | Self::ExtraData(_)
            | Self::Invalid(..)
            | Self::InvalidHex
            | Self::DepthExceeded
            | Self::LengthExceeded(..) => ErrorKind::Format,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }
}
