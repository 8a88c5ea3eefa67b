// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative macros that play the role of IDL-generated code. Each
//! invocation *is* the schema descriptor of spec §4.F — field ids,
//! requiredness, and element types spelled out literally at the call
//! site — and expands to the per-field dispatch loop of §4.G: the same
//! "`struct_begin` → loop on field id → `skip` unknown → `struct_end`"
//! shape a real Thrift code generator emits.

/// Picks the field's storage type: bare `T` for `required`, `Option<T>`
/// for `optional`.
#[doc(hidden)]
#[macro_export]
macro_rules! __thrift_field_storage {
    (required, $ty:ty) => {
        $ty
    };
    (optional, $ty:ty) => {
        ::core::option::Option<$ty>
    };
}

/// Turns the per-field `Option<T>` accumulated while reading into the
/// struct literal's field value, raising `RequiredFieldMissing` for an
/// absent `required` field.
#[doc(hidden)]
#[macro_export]
macro_rules! __thrift_field_finish {
    (required, $field:expr, $name:expr) => {
        $field.ok_or($crate::error::Error::RequiredFieldMissing($name))?
    };
    (optional, $field:expr, $name:expr) => {
        $field
    };
}

/// Writes one field: unconditionally for `required`, only if `Some` for
/// `optional` (an absent optional field is simply not emitted).
#[doc(hidden)]
#[macro_export]
macro_rules! __thrift_field_write {
    (required, $value:expr, $fid:expr, $writer:expr) => {
        $crate::binding::ThriftField::write_field(&$value, $writer, $fid)?;
    };
    (optional, $value:expr, $fid:expr, $writer:expr) => {
        if let ::core::option::Option::Some(ref __inner) = $value {
            $crate::binding::ThriftField::write_field(__inner, $writer, $fid)?;
        }
    };
}

/// Defines a Thrift struct.
///
/// ```ignore
/// thrift_struct! {
///     pub struct SchemaElement {
///         1, optional, type_: Type,
///         3, required, name: String,
///     }
/// }
/// ```
///
/// Expands to a plain struct plus `read`/`write` methods implementing
/// spec §4.G's struct algorithm: fields are written in declaration order
/// followed by a field-stop; on read, unknown field ids and field ids
/// whose wire type doesn't match the declared one are skipped, and a
/// missing `required` field fails the whole read.
#[macro_export]
macro_rules! thrift_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $fid:literal, $req:ident, $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( pub $field: $crate::__thrift_field_storage!($req, $ty), )*
        }

        impl $name {
            /// Reads `Self` from an already-positioned reader, per §4.G.
            pub fn read<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                reader.struct_begin()?;
                $( let mut $field: ::core::option::Option<$ty> = ::core::option::Option::None; )*
                loop {
                    match reader.field_begin()? {
                        $crate::reader::FieldHeader::Stop => break,
                        $crate::reader::FieldHeader::Field { id, ttype, .. } => {
                            match id {
                                $(
                                    $fid if $crate::binding::ttype_compatible(
                                        <$ty as $crate::binding::ThriftField>::TTYPE,
                                        ttype,
                                    ) => {
                                        $field = ::core::option::Option::Some(
                                            <$ty as $crate::binding::ThriftField>::read_field(reader)?,
                                        );
                                    }
                                )*
                                _ => reader.skip(ttype)?,
                            }
                        }
                    }
                }
                reader.struct_end()?;
                ::core::result::Result::Ok($name {
                    $( $field: $crate::__thrift_field_finish!($req, $field, stringify!($field)), )*
                })
            }

            /// Writes `Self`, per §4.G: one header + value per present
            /// field, in declaration order, then a field-stop.
            pub fn write<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
            ) -> $crate::error::Result<()> {
                writer.struct_begin()?;
                $( $crate::__thrift_field_write!($req, self.$field, $fid, writer); )*
                writer.field_stop()?;
                writer.struct_end()
            }
        }

        impl $crate::binding::ThriftField for $name {
            const TTYPE: $crate::ttype::TType = $crate::ttype::TType::Struct;

            fn write_field<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
                field_id: i16,
            ) -> $crate::error::Result<()> {
                writer.field_begin(field_id, Self::TTYPE)?;
                self.write(writer)
            }

            fn read_field<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                Self::read(reader)
            }

            fn write_element<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
            ) -> $crate::error::Result<()> {
                self.write(writer)
            }

            fn read_element<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                Self::read(reader)
            }
        }
    };
}

/// Defines a Thrift union: a tagged sum type where at most one field is
/// ever set on the wire, decoded with latest-wins semantics (spec §4.G,
/// §8 "Union latest-wins").
///
/// ```ignore
/// thrift_union! {
///     pub enum ColumnChunkLocation {
///         1 => FileOffset(i64),
///         2 => Metadata(ColumnMetaData),
///     }
/// }
/// ```
#[macro_export]
macro_rules! thrift_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $fid:literal => $variant:ident ( $ty:ty ) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $variant($ty), )*
        }

        impl $name {
            /// Reads a union: every successfully matched field overwrites
            /// any previously parsed variant, so the last one on the wire
            /// wins. A union with no recognized field is `CantParseUnion`.
            pub fn read<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                reader.struct_begin()?;
                let mut result: ::core::option::Option<Self> = ::core::option::Option::None;
                loop {
                    match reader.field_begin()? {
                        $crate::reader::FieldHeader::Stop => break,
                        $crate::reader::FieldHeader::Field { id, ttype, .. } => {
                            match id {
                                $(
                                    $fid if $crate::binding::ttype_compatible(
                                        <$ty as $crate::binding::ThriftField>::TTYPE,
                                        ttype,
                                    ) => {
                                        result = ::core::option::Option::Some($name::$variant(
                                            <$ty as $crate::binding::ThriftField>::read_field(reader)?,
                                        ));
                                    }
                                )*
                                _ => reader.skip(ttype)?,
                            }
                        }
                    }
                }
                reader.struct_end()?;
                result.ok_or($crate::error::Error::CantParseUnion(stringify!($name)))
            }

            pub fn write<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
            ) -> $crate::error::Result<()> {
                writer.struct_begin()?;
                match self {
                    $( $name::$variant(value) => {
                        $crate::binding::ThriftField::write_field(value, writer, $fid)?;
                    } )*
                }
                writer.field_stop()?;
                writer.struct_end()
            }
        }

        impl $crate::binding::ThriftField for $name {
            const TTYPE: $crate::ttype::TType = $crate::ttype::TType::Struct;

            fn write_field<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
                field_id: i16,
            ) -> $crate::error::Result<()> {
                writer.field_begin(field_id, Self::TTYPE)?;
                self.write(writer)
            }

            fn read_field<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                Self::read(reader)
            }

            fn write_element<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
            ) -> $crate::error::Result<()> {
                self.write(writer)
            }

            fn read_element<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                Self::read(reader)
            }
        }
    };
}

/// Defines a closed Thrift enumeration, stored on the wire as `I32`
/// (spec §4.G "Enumerations"). A wire value with no matching variant is
/// `InvalidEnumValue`; use [`thrift_enum_open!`] where unknown codes
/// should be preserved instead.
#[macro_export]
macro_rules! thrift_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident = $val:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(i32)]
        $vis enum $name {
            $( $variant = $val, )*
        }

        impl $name {
            #[must_use]
            pub const fn to_wire(self) -> i32 {
                self as i32
            }

            pub fn from_wire(value: i32) -> $crate::error::Result<Self> {
                match value {
                    $( $val => ::core::result::Result::Ok($name::$variant), )*
                    other => ::core::result::Result::Err($crate::error::Error::InvalidEnumValue(other)),
                }
            }
        }

        impl $crate::binding::ThriftField for $name {
            const TTYPE: $crate::ttype::TType = $crate::ttype::TType::I32;

            fn write_field<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
                field_id: i16,
            ) -> $crate::error::Result<()> {
                writer.field_begin(field_id, Self::TTYPE)?;
                writer.write_i32(self.to_wire())
            }

            fn read_field<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                Self::from_wire(reader.read_i32()?)
            }

            fn write_element<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
            ) -> $crate::error::Result<()> {
                writer.write_i32(self.to_wire())
            }

            fn read_element<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                Self::from_wire(reader.read_i32()?)
            }
        }
    };
}

/// Defines an open Thrift enumeration: like [`thrift_enum!`], but a wire
/// value with no matching variant is preserved in an `Other(i32)`
/// variant instead of failing the read (spec §4.F "open/'other'
/// variant").
#[macro_export]
macro_rules! thrift_enum_open {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident = $val:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $( $variant, )*
            /// A wire value not among the declared variants.
            Other(i32),
        }

        impl $name {
            #[must_use]
            pub fn to_wire(self) -> i32 {
                match self {
                    $( $name::$variant => $val, )*
                    $name::Other(value) => value,
                }
            }

            #[must_use]
            pub fn from_wire(value: i32) -> Self {
                match value {
                    $( $val => $name::$variant, )*
                    other => $name::Other(other),
                }
            }
        }

        impl $crate::binding::ThriftField for $name {
            const TTYPE: $crate::ttype::TType = $crate::ttype::TType::I32;

            fn write_field<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
                field_id: i16,
            ) -> $crate::error::Result<()> {
                writer.field_begin(field_id, Self::TTYPE)?;
                writer.write_i32(self.to_wire())
            }

            fn read_field<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                ::core::result::Result::Ok(Self::from_wire(reader.read_i32()?))
            }

            fn write_element<S: $crate::io::ByteSink>(
                &self,
                writer: &mut $crate::writer::Writer<'_, S>,
            ) -> $crate::error::Result<()> {
                writer.write_i32(self.to_wire())
            }

            fn read_element<S: $crate::io::ByteSource>(
                reader: &mut $crate::reader::Reader<'_, S>,
            ) -> $crate::error::Result<Self> {
                ::core::result::Result::Ok(Self::from_wire(reader.read_i32()?))
            }
        }
    };
}
