// SPDX-License-Identifier: MIT OR Apache-2.0

//! The uniform vocabulary every scalar, string, binary blob, list/set, and
//! macro-generated struct/union/enum implements so the `thrift_struct!`
//! family can dispatch on it generically.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::io::{ByteSink, ByteSource};
use crate::ttype::TType;
use crate::writer::Writer;
use crate::reader::Reader;

/// Implemented by every type a generated struct/union can hold as a
/// field: primitives, `String`, `Binary`, `Vec<T>`/`Set<T>`, and the
/// structs/unions/enums the `thrift_struct!`/`thrift_union!`/`thrift_enum!`
/// macros expand.
///
/// `write_field`/`read_field` handle a named struct field (including its
/// header); `write_element`/`read_element` handle a bare value with no
/// header, as found inside an already-open list or set.
pub trait ThriftField: Sized {
    const TTYPE: TType;

    fn write_field<S: ByteSink>(&self, writer: &mut Writer<'_, S>, field_id: i16) -> Result<()>;

    /// Reads a field's value; the caller has already consumed the field
    /// header via [`Reader::field_begin`] and knows `Self::TTYPE` matches.
    fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self>;

    fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()>;

    fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self>;
}

/// Returns `true` if a field declared as `expected` may be populated from
/// a value that arrived on the wire as `actual`. Equality is required
/// everywhere; there is no further relaxation, since this crate's
/// `TType::Byte` already represents both Thrift's historical `byte` and
/// `i8` field declarations under a single wire code, leaving no distinct
/// `I08` type to reconcile against it.
pub fn ttype_compatible(expected: TType, actual: TType) -> bool {
    expected == actual
}

macro_rules! impl_scalar_field {
    ($ty:ty, $ttype:expr, $write:ident, $read:ident) => {
        impl ThriftField for $ty {
            const TTYPE: TType = $ttype;

            fn write_field<S: ByteSink>(
                &self,
                writer: &mut Writer<'_, S>,
                field_id: i16,
            ) -> Result<()> {
                writer.field_begin(field_id, Self::TTYPE)?;
                writer.$write(*self)
            }

            fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
                reader.$read()
            }

            fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()> {
                writer.$write(*self)
            }

            fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
                reader.$read()
            }
        }
    };
}

impl_scalar_field!(i8, TType::Byte, write_byte, read_byte);
impl_scalar_field!(i16, TType::I16, write_i16, read_i16);
impl_scalar_field!(i32, TType::I32, write_i32, read_i32);
impl_scalar_field!(i64, TType::I64, write_i64, read_i64);
impl_scalar_field!(f64, TType::Double, write_double, read_double);

impl ThriftField for bool {
    const TTYPE: TType = TType::Bool;

    fn write_field<S: ByteSink>(&self, writer: &mut Writer<'_, S>, field_id: i16) -> Result<()> {
        writer.field_begin_bool(field_id, *self)
    }

    fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        reader.read_bool_value()
    }

    /// Compact protocol has no packed header inside a list, so each
    /// boolean element is its own `CType` byte (1 = true, 2 = false).
    fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()> {
        writer.write_bool_element(*self)
    }

    fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        reader.read_bool_element()
    }
}

impl ThriftField for String {
    const TTYPE: TType = TType::String;

    fn write_field<S: ByteSink>(&self, writer: &mut Writer<'_, S>, field_id: i16) -> Result<()> {
        writer.field_begin(field_id, Self::TTYPE)?;
        writer.write_string(self)
    }

    fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        reader.read_string()
    }

    fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()> {
        writer.write_string(self)
    }

    fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        reader.read_string()
    }
}

/// A wire-`STRING`-encoded binary blob, distinguished from `Vec<u8>`
/// (which instead means `LIST<BYTE>`) so both have unambiguous field
/// encodings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl Deref for Binary {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Binary {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary(bytes)
    }
}

impl ThriftField for Binary {
    const TTYPE: TType = TType::String;

    fn write_field<S: ByteSink>(&self, writer: &mut Writer<'_, S>, field_id: i16) -> Result<()> {
        writer.field_begin(field_id, Self::TTYPE)?;
        writer.write_binary(&self.0)
    }

    fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        Ok(Binary(reader.read_binary()?))
    }

    fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()> {
        writer.write_binary(&self.0)
    }

    fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        Ok(Binary(reader.read_binary()?))
    }
}

impl<T: ThriftField> ThriftField for Vec<T> {
    const TTYPE: TType = TType::List;

    fn write_field<S: ByteSink>(&self, writer: &mut Writer<'_, S>, field_id: i16) -> Result<()> {
        writer.field_begin(field_id, Self::TTYPE)?;
        self.write_element(writer)
    }

    fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        Self::read_element(reader)
    }

    fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()> {
        writer.list_begin(T::TTYPE, self.len())?;
        for item in self {
            item.write_element(writer)?;
        }
        writer.list_end()
    }

    fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        let (element, size) = reader.list_begin()?;
        let mut items = Vec::with_capacity(size.min(4096));
        for _ in 0..size {
            if ttype_compatible(T::TTYPE, element) {
                items.push(T::read_element(reader)?);
            } else {
                reader.skip_element(element)?;
            }
        }
        reader.list_end()?;
        Ok(items)
    }
}

/// A thin `LIST`-shaped wrapper distinct from `Vec<T>` so a schema can
/// still say "this field is logically a `SET`" even though the wire
/// encoding is identical to `LIST`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set<T>(pub Vec<T>);

impl<T> Deref for Set<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Set<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for Set<T> {
    fn from(items: Vec<T>) -> Self {
        Set(items)
    }
}

impl<T: ThriftField> ThriftField for Set<T> {
    const TTYPE: TType = TType::Set;

    fn write_field<S: ByteSink>(&self, writer: &mut Writer<'_, S>, field_id: i16) -> Result<()> {
        writer.field_begin(field_id, Self::TTYPE)?;
        self.write_element(writer)
    }

    fn read_field<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        Self::read_element(reader)
    }

    fn write_element<S: ByteSink>(&self, writer: &mut Writer<'_, S>) -> Result<()> {
        writer.set_begin(T::TTYPE, self.0.len())?;
        for item in &self.0 {
            item.write_element(writer)?;
        }
        writer.set_end()
    }

    fn read_element<S: ByteSource>(reader: &mut Reader<'_, S>) -> Result<Self> {
        let (element, size) = reader.set_begin()?;
        let mut items = Vec::with_capacity(size.min(4096));
        for _ in 0..size {
            if ttype_compatible(T::TTYPE, element) {
                items.push(T::read_element(reader)?);
            } else {
                reader.skip_element(element)?;
            }
        }
        reader.set_end()?;
        Ok(Set(items))
    }
}
