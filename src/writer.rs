// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encodes values onto a [`ByteSink`] in Thrift compact binary protocol
//! wire format.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::io::ByteSink;
use crate::limits::Limits;
use crate::state::StateMachine;
use crate::ttype::{ctype_of, CType, TType};
use crate::varint::{write_uvarint, zigzag_encode16, zigzag_encode32, zigzag_encode64};

/// STOP is wire value 0x00, shared by both CType and the struct terminator.
const STOP_BYTE: u8 = 0x00;

/// A compact-protocol encoder over an abstract byte sink.
pub struct Writer<'a, S: ByteSink> {
    sink: &'a mut S,
    sm: StateMachine,
    limits: Limits,
}

impl<'a, S: ByteSink> Writer<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self::with_limits(sink, Limits::default())
    }

    pub fn with_limits(sink: &'a mut S, limits: Limits) -> Self {
        Writer {
            sink,
            sm: StateMachine::new(limits.clamped_depth()),
            limits,
        }
    }

    pub fn depth(&self) -> usize {
        self.sm.depth()
    }

    pub fn struct_begin(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::trace!(depth = self.sm.depth() as u64, "struct_begin");
        self.sm.enter_struct()
    }

    pub fn struct_end(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::trace!(depth = self.sm.depth() as u64, "struct_end");
        self.sink.write_byte(STOP_BYTE)?;
        self.sm.exit_struct()
    }

    /// Writes a non-boolean field header, using delta encoding against the
    /// enclosing struct's last written field id when possible, and
    /// advances to `Value` so the caller must follow with exactly one
    /// `write_*` call for the field's payload.
    pub fn field_begin(&mut self, field_id: i16, ttype: TType) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::trace!(id = field_id as i64, ?ttype, "field_begin");
        self.sm.begin_field()?;
        let ctype = ctype_of(ttype, None).ok_or(Error::InvalidState(
            "field_begin called with STOP or VOID type",
        ))?;
        self.write_field_header(field_id, ctype)?;
        self.sm.begin_field_value(false, None)
    }

    /// Writes a boolean field header, packing the truth value into the
    /// wire `CType` nibble itself; no separate value byte follows.
    pub fn field_begin_bool(&mut self, field_id: i16, value: bool) -> Result<()> {
        self.sm.begin_field()?;
        let ctype = if value {
            CType::BooleanTrue
        } else {
            CType::BooleanFalse
        };
        self.write_field_header(field_id, ctype)?;
        self.sm.begin_field_value(true, Some(ctype))?;
        self.sm.take_bool_pending().map(|_| ())
    }

    fn write_field_header(&mut self, field_id: i16, ctype: CType) -> Result<()> {
        let last = self.sm.last_fid();
        let delta = i32::from(field_id) - i32::from(last);
        if delta > 0 && delta <= 15 {
            self.sink.write_byte(((delta as u8) << 4) | (ctype as u8))?;
        } else {
            self.sink.write_byte(ctype as u8)?;
            write_uvarint(self.sink, u64::from(zigzag_encode16(field_id)))?;
        }
        self.sm.set_last_fid(field_id)
    }

    pub fn field_stop(&mut self) -> Result<()> {
        self.sink.write_byte(STOP_BYTE)
    }

    fn end_value(&mut self) -> Result<()> {
        self.sm.end_field_value()
    }

    pub fn write_byte(&mut self, value: i8) -> Result<()> {
        self.sink.write_byte(value as u8)?;
        self.end_value()
    }

    /// Writes a boolean list/set element as its own `CType` byte (1 =
    /// true, 2 = false) — unlike a boolean field, list elements have no
    /// header to pack the truth value into.
    pub fn write_bool_element(&mut self, value: bool) -> Result<()> {
        self.sink.write_byte(if value {
            CType::BooleanTrue as u8
        } else {
            CType::BooleanFalse as u8
        })
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        write_uvarint(self.sink, u64::from(zigzag_encode16(value)))?;
        self.end_value()
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        write_uvarint(self.sink, u64::from(zigzag_encode32(value)))?;
        self.end_value()
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        write_uvarint(self.sink, zigzag_encode64(value))?;
        self.end_value()
    }

    pub fn write_double(&mut self, value: f64) -> Result<()> {
        self.sink.write_all(&value.to_le_bytes())?;
        self.end_value()
    }

    pub fn write_binary(&mut self, value: &[u8]) -> Result<()> {
        if value.len() as u64 > u64::from(self.limits.max_binary_size) {
            return Err(Error::OutOfMemory);
        }
        write_uvarint(self.sink, value.len() as u64)?;
        self.sink.write_all(value)?;
        self.end_value()
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_binary(value.as_bytes())
    }

    /// Writes a list or set header. Sizes under 15 are packed inline with
    /// the element `CType` nibble; larger sizes spill the nibble to
    /// `0xF` followed by a varint length.
    pub fn list_begin(&mut self, element: TType, size: usize) -> Result<()> {
        if size as u64 > u64::from(self.limits.max_list_size) {
            return Err(Error::OutOfMemory);
        }
        let ctype = ctype_of(element, Some(true)).ok_or(Error::InvalidState(
            "list_begin called with STOP or VOID element type",
        ))?;
        if size < 15 {
            self.sink.write_byte(((size as u8) << 4) | (ctype as u8))?;
        } else {
            self.sink.write_byte(0xf0 | (ctype as u8))?;
            write_uvarint(self.sink, size as u64)?;
        }
        self.sm.enter_container()
    }

    pub fn list_end(&mut self) -> Result<()> {
        self.sm.exit_container()
    }

    pub fn set_begin(&mut self, element: TType, size: usize) -> Result<()> {
        self.list_begin(element, size)
    }

    pub fn set_end(&mut self) -> Result<()> {
        self.list_end()
    }
}

/// Convenience: serializes a top-level `ThriftField::Owned`-implementing
/// struct into a freshly allocated buffer. Defined here rather than on
/// the trait itself so `writer.rs` stays free of the binding layer.
pub fn write_to_vec<F>(write: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut Writer<'_, crate::io::VecSink>) -> Result<()>,
{
    let mut sink = crate::io::VecSink::new();
    {
        let mut writer = Writer::new(&mut sink);
        write(&mut writer)?;
    }
    Ok(sink.into_inner())
}
