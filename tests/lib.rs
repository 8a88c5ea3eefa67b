// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol-level integration tests: the concrete byte scenarios, state
//! machine edge cases, and round-trip properties from the wire format
//! specification, exercised end-to-end through [`Reader`]/[`Writer`]
//! rather than through any one module's unit tests.

use compact_thrift::{thrift_struct, Error, Limits, Reader, SliceSource, TType, VecSink, Writer};
use proptest::prelude::*;

thrift_struct! {
    struct OneRequiredI64 {
        1, required, value: i64,
    }
}

thrift_struct! {
    struct UserProfile {
        1, required, user_name: String,
        2, optional, favorite_number: i64,
        3, optional, interests: Vec<String>,
    }
}

thrift_struct! {
    struct Flags {
        1, required, x: i32,
        2, required, y: bool,
        3, required, z: i8,
        4, required, s: String,
    }
}

fn read_bytes<T>(bytes: &[u8], read: impl FnOnce(&mut Reader<'_, SliceSource<'_>>) -> compact_thrift::Result<T>) -> compact_thrift::Result<T> {
    let mut source = SliceSource::new(bytes);
    let mut reader = Reader::new(&mut source);
    read(&mut reader)
}

/// Scenario 1 (spec §8): `16 A4 8B B0 99 09 00` against `{1: required
/// I64}` decodes to `1234567890`.
#[test]
fn scenario_one_required_i64() {
    let bytes = [0x16, 0xA4, 0x8B, 0xB0, 0x99, 0x09, 0x00];
    let value = read_bytes(&bytes, |r| OneRequiredI64::read(r)).unwrap();
    assert_eq!(value.value, 1_234_567_890);
}

/// Scenario 2 (spec §8): a struct with a required string, an optional
/// i64, and an optional list of strings.
#[test]
fn scenario_user_profile() {
    let mut bytes = vec![0x18, 0x05];
    bytes.extend_from_slice(b"Alice");
    bytes.extend_from_slice(&[0x16, 0xA4, 0x8B, 0xB0, 0x99, 0x09]);
    bytes.extend_from_slice(&[0x19, 0x38]);
    bytes.push(0x0b);
    bytes.extend_from_slice(b"programming");
    bytes.push(0x05);
    bytes.extend_from_slice(b"music");
    bytes.push(0x06);
    bytes.extend_from_slice(b"travel");
    bytes.push(0x00);

    let profile = read_bytes(&bytes, |r| UserProfile::read(r)).unwrap();
    assert_eq!(profile.user_name, "Alice");
    assert_eq!(profile.favorite_number, Some(1_234_567_890));
    assert_eq!(
        profile.interests,
        Some(vec![
            "programming".to_string(),
            "music".to_string(),
            "travel".to_string(),
        ])
    );
}

/// Scenario 3 (spec §8): encoding then decoding a small mixed-type
/// struct is the identity.
#[test]
fn scenario_mixed_struct_round_trips() {
    let original = Flags {
        x: 10,
        y: true,
        z: 0,
        s: String::new(),
    };
    let mut sink = VecSink::new();
    {
        let mut writer = Writer::new(&mut sink);
        original.write(&mut writer).unwrap();
    }
    let decoded = read_bytes(&sink.into_inner(), |r| Flags::read(r)).unwrap();
    assert_eq!(original, decoded);
}

/// Scenario 4 (spec §8): an invalid 4-bit ctype nibble is rejected.
#[test]
fn scenario_invalid_ctype() {
    // 0x0f is not a defined CType.
    let err = read_bytes(&[0xff], |r| r.field_begin()).unwrap_err();
    assert_eq!(err, Error::InvalidCType(0x0f));
}

/// Scenario 5 (spec §8): a runaway varint (every byte's continuation bit
/// set) overflows rather than looping forever. The header byte `0x15`
/// (delta=1, ctype=I32) takes the inline-delta path and consumes no
/// varint itself, so the runaway bytes must be read from the field's
/// *value* position to actually exercise this.
#[test]
fn scenario_varint_overflow() {
    let bytes = [0x15, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80];
    let err = read_bytes(&bytes, |r| {
        r.field_begin()?;
        r.read_i32()
    })
    .unwrap_err();
    assert_eq!(err, Error::Overflow);
}

/// Scenario 6 (spec §8): `skip(STRUCT)` over 30 levels of nesting is
/// rejected with `StackDepth` once a configured bound of 20 is exceeded.
#[test]
fn scenario_stack_depth_exceeded() {
    let mut sink = VecSink::new();
    {
        let mut writer = Writer::with_limits(&mut sink, Limits::new(64, 1 << 20, 1 << 20));
        for depth in 0..30 {
            writer.struct_begin().unwrap();
            writer.field_begin(1, TType::Struct).unwrap();
            let _ = depth;
        }
        for _ in 0..30 {
            writer.field_stop().unwrap();
            writer.struct_end().unwrap();
        }
    }
    let bytes = sink.into_inner();
    let mut source = SliceSource::new(&bytes);
    let mut reader = Reader::with_limits(&mut source, Limits::new(20, 1 << 20, 1 << 20));
    let err = reader.skip(TType::Struct).unwrap_err();
    assert_eq!(err, Error::StackDepth(20));
}

/// Field-id deltas (spec §8): a one-byte header is emitted iff the delta
/// from the previous field id is in `1..=15`; larger (or non-positive)
/// deltas spill to the two-byte absolute-id form.
#[test]
fn field_id_delta_encoding_boundary() {
    let mut sink = VecSink::new();
    {
        let mut writer = Writer::new(&mut sink);
        writer.struct_begin().unwrap();
        writer.field_begin(15, TType::I32).unwrap(); // delta 15: one byte
        writer.write_i32(1).unwrap();
        writer.field_begin(31, TType::I32).unwrap(); // delta 16: two bytes
        writer.write_i32(2).unwrap();
        writer.field_stop().unwrap();
        writer.struct_end().unwrap();
    }
    let bytes = sink.into_inner();
    // [size<<4|ctype] for the first field: delta=15, ctype=I32(0x05).
    assert_eq!(bytes[0], 0xf5);
    // Second field spills: ctype byte, then a zigzag varint of 31.
    assert_eq!(bytes[3], 0x05);
}

/// Boolean fields (spec §8): a boolean field's truth value is packed
/// into the header, consuming no body byte; a boolean list element is
/// its own byte.
#[test]
fn boolean_field_consumes_no_body_byte() {
    let mut sink = VecSink::new();
    {
        let mut writer = Writer::new(&mut sink);
        writer.struct_begin().unwrap();
        writer.field_begin_bool(1, true).unwrap();
        writer.field_stop().unwrap();
        writer.struct_end().unwrap();
    }
    // field header byte, STOP byte: exactly two bytes, no body.
    assert_eq!(sink.into_inner(), vec![0x11, 0x00]);
}

/// Unknown fields (spec §8): a struct with extra, undeclared fields
/// decodes identically (for the known fields) to the same struct
/// without them.
#[test]
fn unknown_fields_skip_transparently() {
    let mut with_extra = VecSink::new();
    {
        let mut writer = Writer::new(&mut with_extra);
        writer.struct_begin().unwrap();
        writer.field_begin(1, TType::I64).unwrap();
        writer.write_i64(7).unwrap();
        writer.field_begin(2, TType::String).unwrap();
        writer.write_string("unexpected").unwrap();
        writer.field_stop().unwrap();
        writer.struct_end().unwrap();
    }
    let decoded = read_bytes(&with_extra.into_inner(), |r| OneRequiredI64::read(r)).unwrap();
    assert_eq!(decoded.value, 7);
}

/// Required-missing (spec §8): a struct lacking a required field raises
/// `RequiredFieldMissing`.
#[test]
fn required_field_missing_is_rejected() {
    let mut sink = VecSink::new();
    {
        let mut writer = Writer::new(&mut sink);
        writer.struct_begin().unwrap();
        writer.field_stop().unwrap();
        writer.struct_end().unwrap();
    }
    let err = read_bytes(&sink.into_inner(), |r| OneRequiredI64::read(r)).unwrap_err();
    assert_eq!(err, Error::RequiredFieldMissing("value"));
}

proptest! {
    /// Round-trip property (spec §8): every `i64` value encoded then
    /// decoded through a single required field is unchanged.
    #[test]
    fn i64_field_round_trips(value: i64) {
        let mut sink = VecSink::new();
        {
            let mut writer = Writer::new(&mut sink);
            OneRequiredI64 { value }.write(&mut writer).unwrap();
        }
        let decoded = read_bytes(&sink.into_inner(), |r| OneRequiredI64::read(r)).unwrap();
        prop_assert_eq!(decoded.value, value);
    }

    /// Idempotence of skip (spec §8): skipping a well-formed struct
    /// leaves the reader at exactly the byte past it, with no observable
    /// side effect on anything read afterward.
    #[test]
    fn skip_then_read_next_sibling(value in any::<i64>(), tail in any::<i32>()) {
        let mut sink = VecSink::new();
        {
            let mut writer = Writer::new(&mut sink);
            writer.struct_begin().unwrap();
            writer.field_begin(1, TType::Struct).unwrap();
            OneRequiredI64 { value }.write(&mut writer).unwrap();
            writer.field_begin(2, TType::I32).unwrap();
            writer.write_i32(tail).unwrap();
            writer.field_stop().unwrap();
            writer.struct_end().unwrap();
        }
        let bytes = sink.into_inner();
        let mut source = SliceSource::new(&bytes);
        let mut reader = Reader::new(&mut source);
        reader.struct_begin().unwrap();
        let header = reader.field_begin().unwrap();
        prop_assert!(matches!(header, compact_thrift::FieldHeader::Field { id: 1, ttype: TType::Struct, .. }));
        reader.skip(TType::Struct).unwrap();
        let header = reader.field_begin().unwrap();
        match header {
            compact_thrift::FieldHeader::Field { id: 2, ttype: TType::I32, .. } => {
                prop_assert_eq!(reader.read_i32().unwrap(), tail);
            }
            other => prop_assert!(false, "expected field 2, got {:?}", other),
        }
    }
}
