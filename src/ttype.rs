// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logical (`TType`) and wire (`CType`) type taxonomies, and the
//! mappings between them.

use strum_macros::EnumIter;

use crate::error::Error;

/// Logical Thrift field type, independent of wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TType {
    Stop = 0,
    Void = 1,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

/// The 4-bit type nibble packed into compact-protocol field headers and
/// list/set headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum CType {
    BooleanTrue = 0x01,
    BooleanFalse = 0x02,
    Byte = 0x03,
    I16 = 0x04,
    I32 = 0x05,
    I64 = 0x06,
    Double = 0x07,
    Binary = 0x08,
    List = 0x09,
    Set = 0x0a,
    Map = 0x0b,
    Struct = 0x0c,
}

impl TryFrom<u8> for CType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use strum::IntoEnumIterator;
        CType::iter()
            .find(|c| *c as u8 == value)
            .ok_or(Error::InvalidCType(value))
    }
}

/// Maps a logical type (and, for booleans, the value to be encoded) onto
/// its wire `CType`. `STOP` and `VOID` have no wire representation and are
/// never passed here by well-formed callers.
pub fn ctype_of(ttype: TType, bool_value: Option<bool>) -> Option<CType> {
    match ttype {
        TType::Stop | TType::Void => None,
        TType::Bool => Some(match bool_value {
            Some(true) | None => CType::BooleanTrue,
            Some(false) => CType::BooleanFalse,
        }),
        TType::Byte => Some(CType::Byte),
        TType::I16 => Some(CType::I16),
        TType::I32 => Some(CType::I32),
        TType::I64 => Some(CType::I64),
        TType::Double => Some(CType::Double),
        TType::String => Some(CType::Binary),
        TType::Struct => Some(CType::Struct),
        TType::Map => Some(CType::Map),
        TType::Set => Some(CType::Set),
        TType::List => Some(CType::List),
    }
}

/// Maps a wire `CType` back to its logical type. Boolean wire types both
/// map to `TType::Bool`; the truth value is recovered separately by the
/// caller from which `CType` was seen.
pub fn ttype_of(ctype: CType) -> TType {
    match ctype {
        CType::BooleanTrue | CType::BooleanFalse => TType::Bool,
        CType::Byte => TType::Byte,
        CType::I16 => TType::I16,
        CType::I32 => TType::I32,
        CType::I64 => TType::I64,
        CType::Double => TType::Double,
        CType::Binary => TType::String,
        CType::List => TType::List,
        CType::Set => TType::Set,
        CType::Map => TType::Map,
        CType::Struct => TType::Struct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctype_round_trips_through_u8() {
        for ctype in [
            CType::Byte,
            CType::I16,
            CType::I32,
            CType::I64,
            CType::Double,
            CType::Binary,
            CType::List,
            CType::Set,
            CType::Map,
            CType::Struct,
        ] {
            let byte = ctype as u8;
            assert_eq!(CType::try_from(byte), Ok(ctype));
        }
    }

    #[test]
    fn unknown_nibble_is_rejected() {
        assert_eq!(CType::try_from(0x0f), Err(Error::InvalidCType(0x0f)));
    }
}
