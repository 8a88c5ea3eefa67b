// SPDX-License-Identifier: MIT OR Apache-2.0

use alloc::string::String;

/// Every way a compact-protocol read, write, or bind operation can fail.
///
/// Variants carry enough context to diagnose a malformed stream without
/// re-running the decode: the byte offset is deliberately not tracked here
/// (callers wrapping a counting `ByteSource` can attach it themselves).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The underlying transport returned an error (short write, closed pipe).
    #[error("transport error: {0}")]
    Transport(String),

    /// The source was exhausted before a value could be fully decoded.
    #[error("end of stream")]
    EndOfStream,

    /// A varint ran past its maximum encoded byte count, or the decoded
    /// value does not fit in the requested integer width.
    #[error("varint overflow")]
    Overflow,

    /// A wire nibble did not match any known `CType`.
    #[error("invalid ctype: {0}")]
    InvalidCType(u8),

    /// A call was made that the state machine does not allow from the
    /// current state (e.g. `read_bool_value` outside `Bool`).
    #[error("invalid protocol state: {0}")]
    InvalidState(&'static str),

    /// A requested allocation exceeds a configured `Limits` bound.
    #[error("allocation would exceed configured limit")]
    OutOfMemory,

    /// Struct/container nesting exceeded the configured maximum depth.
    #[error("nesting exceeded maximum depth {0}")]
    StackDepth(usize),

    /// The operation is recognized but intentionally unimplemented (MAP).
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// A union read more than one field, or zero fields with no default.
    #[error("could not resolve union: {0}")]
    CantParseUnion(&'static str),

    /// A struct's `required` field was absent when reading finished.
    #[error("required field missing: {0}")]
    RequiredFieldMissing(&'static str),

    /// A closed (`thrift_enum!`) enumeration read a wire code with no
    /// matching variant. Open enumerations (`thrift_enum_open!`) never
    /// raise this; they fall back to an `Other` variant instead.
    #[error("no enum variant for wire value {0}")]
    InvalidEnumValue(i32),
}

pub type Result<T> = core::result::Result<T, Error>;
