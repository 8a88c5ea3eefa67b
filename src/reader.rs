// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decodes values from a [`ByteSource`] encoded in Thrift compact binary
//! protocol wire format.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::io::ByteSource;
use crate::limits::Limits;
use crate::state::StateMachine;
use crate::ttype::{ttype_of, CType, TType};
use crate::varint::{read_uvarint, zigzag_decode16, zigzag_decode32, zigzag_decode64};

const STOP_BYTE: u8 = 0x00;

/// Outcome of reading a field header: either the struct's terminating
/// STOP, or a field to dispatch on `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHeader {
    Stop,
    Field { id: i16, ttype: TType, ctype: CType },
}

/// A compact-protocol decoder over an abstract byte source.
pub struct Reader<'a, S: ByteSource> {
    source: &'a mut S,
    sm: StateMachine,
    limits: Limits,
}

impl<'a, S: ByteSource> Reader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self::with_limits(source, Limits::default())
    }

    pub fn with_limits(source: &'a mut S, limits: Limits) -> Self {
        Reader {
            source,
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
        self.sm.exit_struct()
    }

    /// Reads one field header, returning `FieldHeader::Stop` at the
    /// struct's terminator without consuming a matching `struct_end` call
    /// — the caller still calls `struct_end` afterward.
    pub fn field_begin(&mut self) -> Result<FieldHeader> {
        self.sm.begin_field()?;
        let byte = self.source.read_byte()?;
        if byte == STOP_BYTE {
            return Ok(FieldHeader::Stop);
        }
        let delta = byte >> 4;
        let ctype = CType::try_from(byte & 0x0f)?;
        let field_id = if delta == 0 {
            let raw = read_uvarint(self.source, 16)? as u16;
            zigzag_decode16(raw)
        } else {
            // Widen to i32 first, matching the writer's delta computation
            // (`src/writer.rs`'s `write_field_header`), so a `last_fid`
            // near `i16::MAX` can't panic the add in a debug build.
            (i32::from(self.sm.last_fid()) + i32::from(delta)) as i16
        };
        self.sm.set_last_fid(field_id)?;
        let is_bool = matches!(ctype, CType::BooleanTrue | CType::BooleanFalse);
        self.sm.begin_field_value(is_bool, Some(ctype))?;
        let ttype = ttype_of(ctype);
        #[cfg(feature = "tracing")]
        tracing::trace!(id = field_id as i64, ?ttype, "field_begin");
        Ok(FieldHeader::Field {
            id: field_id,
            ttype,
            ctype,
        })
    }

    pub fn read_bool_value(&mut self) -> Result<bool> {
        let ctype = self.sm.take_bool_pending()?;
        Ok(ctype == CType::BooleanTrue)
    }

    /// Reads a boolean list/set element, stored as its own `CType` byte
    /// rather than packed into a field header.
    pub fn read_bool_element(&mut self) -> Result<bool> {
        let byte = self.source.read_byte()?;
        CType::try_from(byte).map(|ctype| ctype == CType::BooleanTrue)
    }

    fn end_value(&mut self) -> Result<()> {
        self.sm.end_field_value()
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        let value = self.source.read_byte()? as i8;
        self.end_value()?;
        Ok(value)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let raw = read_uvarint(self.source, 16)? as u16;
        self.end_value()?;
        Ok(zigzag_decode16(raw))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let raw = read_uvarint(self.source, 32)? as u32;
        self.end_value()?;
        Ok(zigzag_decode32(raw))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let raw = read_uvarint(self.source, 64)?;
        self.end_value()?;
        Ok(zigzag_decode64(raw))
    }

    pub fn read_double(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.source.read_exact(&mut buf)?;
        self.end_value()?;
        Ok(f64::from_le_bytes(buf))
    }

    pub fn read_binary(&mut self) -> Result<Vec<u8>> {
        let len = read_uvarint(self.source, 32)?;
        if len > u64::from(self.limits.max_binary_size) {
            return Err(Error::OutOfMemory);
        }
        let mut buf = alloc::vec![0u8; len as usize];
        self.source.read_exact(&mut buf)?;
        self.end_value()?;
        Ok(buf)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_binary()?;
        String::from_utf8(bytes).map_err(|_| Error::Transport("invalid utf-8 in string".into()))
    }

    /// Reads a list/set header. Inline sizes under 15 are recovered from
    /// the header byte's upper nibble; larger sizes follow as a varint.
    pub fn list_begin(&mut self) -> Result<(TType, usize)> {
        let byte = self.source.read_byte()?;
        let size_nibble = byte >> 4;
        let ctype = CType::try_from(byte & 0x0f)?;
        let size = if size_nibble == 0x0f {
            read_uvarint(self.source, 32)? as usize
        } else {
            size_nibble as usize
        };
        if size as u64 > u64::from(self.limits.max_list_size) {
            return Err(Error::OutOfMemory);
        }
        self.sm.enter_container()?;
        Ok((ttype_of(ctype), size))
    }

    pub fn list_end(&mut self) -> Result<()> {
        self.sm.exit_container()
    }

    pub fn set_begin(&mut self) -> Result<(TType, usize)> {
        self.list_begin()
    }

    pub fn set_end(&mut self) -> Result<()> {
        self.list_end()
    }

    /// Consumes and discards one value of the given logical type,
    /// recursing into structs and containers. Used to skip fields a
    /// schema does not recognize, and relies on the same bounded stack as
    /// every other nested read for its recursion-depth safety.
    pub fn skip(&mut self, ttype: TType) -> Result<()> {
        self.skip_inner(ttype, false)
    }

    /// As [`Reader::skip`], but for a value found inside a list/set
    /// rather than a struct field — needed so a mismatched boolean
    /// element is skipped as its own byte, not as a packed field header.
    pub fn skip_element(&mut self, ttype: TType) -> Result<()> {
        self.skip_inner(ttype, true)
    }

    /// `in_container` distinguishes a boolean field (truth value packed
    /// into the field header, no body byte) from a boolean list/set
    /// element (its own `CType` byte) — every other type reads the same
    /// way in both positions.
    fn skip_inner(&mut self, ttype: TType, in_container: bool) -> Result<()> {
        match ttype {
            TType::Bool => {
                if in_container {
                    self.read_bool_element()?;
                } else {
                    self.read_bool_value()?;
                }
            }
            TType::Byte => {
                self.read_byte()?;
            }
            TType::I16 => {
                self.read_i16()?;
            }
            TType::I32 => {
                self.read_i32()?;
            }
            TType::I64 => {
                self.read_i64()?;
            }
            TType::Double => {
                self.read_double()?;
            }
            TType::String => {
                self.read_binary()?;
            }
            TType::Struct => {
                self.struct_begin()?;
                loop {
                    match self.field_begin()? {
                        FieldHeader::Stop => break,
                        FieldHeader::Field { ttype, .. } => self.skip_inner(ttype, false)?,
                    }
                }
                self.struct_end()?;
            }
            TType::List | TType::Set => {
                let (element, size) = self.list_begin()?;
                for _ in 0..size {
                    self.skip_inner(element, true)?;
                }
                self.list_end()?;
            }
            TType::Map => return Err(Error::NotImplemented("map skip")),
            TType::Stop | TType::Void => {
                return Err(Error::InvalidState("cannot skip STOP or VOID"))
            }
        }
        Ok(())
    }
}
