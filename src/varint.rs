// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unsigned LEB128 varints and the zigzag transform used to pack signed
//! integers onto the same wire encoding.

use crate::error::{Error, Result};
use crate::io::{ByteSink, ByteSource};

/// Continuation bit set on every encoded byte except the last.
const CONT: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

const fn max_bytes(width: u32) -> usize {
    // ceil(width / 7), one continuation group per 7 payload bits.
    ((width as usize) + 6) / 7
}

/// Writes `value` as an unsigned LEB128 varint.
pub fn write_uvarint<S: ByteSink>(sink: &mut S, mut value: u64) -> Result<()> {
    loop {
        let byte = (value & u64::from(PAYLOAD_MASK)) as u8;
        value >>= 7;
        if value == 0 {
            sink.write_byte(byte)?;
            return Ok(());
        }
        sink.write_byte(byte | CONT)?;
    }
}

/// Reads an unsigned LEB128 varint, rejecting values that don't fit in
/// `width` bits or that run past the maximum number of continuation bytes
/// for that width.
pub fn read_uvarint<S: ByteSource>(source: &mut S, width: u32) -> Result<u64> {
    debug_assert!(width == 16 || width == 32 || width == 64);
    let limit = max_bytes(width);
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    for i in 0..limit {
        let byte = source.read_byte()?;
        let payload = u64::from(byte & PAYLOAD_MASK);
        if shift < 64 {
            result |= payload << shift;
        } else if payload != 0 {
            return Err(Error::Overflow);
        }
        // The 10th varint byte only has room to contribute bit 0 to a
        // 64-bit result; any higher payload bit here would otherwise be
        // silently shifted out of the u64 instead of raising Overflow.
        if shift == 63 && payload > 1 {
            return Err(Error::Overflow);
        }
        if byte & CONT == 0 {
            if width < 64 && shift + 7 < 64 && (result >> width) != 0 {
                return Err(Error::Overflow);
            }
            return Ok(result);
        }
        shift += 7;
        if i + 1 == limit {
            return Err(Error::Overflow);
        }
    }
    Err(Error::Overflow)
}

/// Maps a signed integer onto an unsigned one so small magnitudes (either
/// sign) encode in few varint bytes: `0, -1, 1, -2, 2 -> 0, 1, 2, 3, 4`.
pub fn zigzag_encode16(value: i16) -> u16 {
    ((value << 1) ^ (value >> 15)) as u16
}

pub fn zigzag_decode16(value: u16) -> i16 {
    ((value >> 1) as i16) ^ -((value & 1) as i16)
}

pub fn zigzag_encode32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

pub fn zigzag_decode32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

pub fn zigzag_encode64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::VecSink;

    #[rstest::rstest]
    #[case(0u64, &[0x00])]
    #[case(1u64, &[0x01])]
    #[case(127u64, &[0x7f])]
    #[case(128u64, &[0x80, 0x01])]
    #[case(300u64, &[0xac, 0x02])]
    fn write_matches_known_bytes(#[case] value: u64, #[case] expected: &[u8]) {
        let mut sink = VecSink::new();
        write_uvarint(&mut sink, value).unwrap();
        assert_eq!(sink.into_inner(), expected);
    }

    #[rstest::rstest]
    #[case(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80], 32)]
    fn overflow_on_runaway_continuation(#[case] bytes: &[u8], #[case] width: u32) {
        let mut src = crate::io::SliceSource::new(bytes);
        assert_eq!(read_uvarint(&mut src, width), Err(Error::Overflow));
    }

    /// A well-terminated (no continuation bit) 10-byte width-64 varint
    /// whose final byte carries a payload bit above bit 0 exceeds 64 bits
    /// once fully accumulated and must overflow rather than silently
    /// dropping the excess bits off the top of the `u64`.
    #[test]
    fn overflow_on_oversized_final_byte_at_width_64() {
        let mut bytes = [0x80u8; 10];
        bytes[9] = 0x02;
        let mut src = crate::io::SliceSource::new(&bytes);
        assert_eq!(read_uvarint(&mut src, 64), Err(Error::Overflow));
    }

    #[test]
    fn width_64_accepts_final_byte_with_only_bit_zero_set() {
        let mut bytes = [0x80u8; 10];
        bytes[9] = 0x01;
        let mut src = crate::io::SliceSource::new(&bytes);
        assert_eq!(read_uvarint(&mut src, 64), Ok(1u64 << 63));
    }

    #[test]
    fn zigzag_round_trips_extremes() {
        assert_eq!(zigzag_decode32(zigzag_encode32(i32::MIN)), i32::MIN);
        assert_eq!(zigzag_decode32(zigzag_encode32(i32::MAX)), i32::MAX);
        assert_eq!(zigzag_decode64(zigzag_encode64(i64::MIN)), i64::MIN);
        assert_eq!(zigzag_decode16(zigzag_encode16(-1)), -1);
    }
}
