// SPDX-License-Identifier: MIT OR Apache-2.0
//! A codec for the Thrift Compact Binary Protocol wire format, and a
//! schema-driven binding layer on top of it for statically-typed
//! in-memory structs, unions, and enumerations.
//!
//! The motivating use case is reading and writing Apache Parquet file
//! footers (`FileMetaData`), which Parquet serializes as a Thrift struct
//! in the compact encoding. This crate knows nothing about Parquet
//! itself, only about the wire format and the struct/union/enum shapes a
//! schema describes; decoding column data, pages, or statistics is out
//! of scope.
//!
//! ```text
//! bytes --[Reader]--> field/list events --[binding driver]--> struct
//! struct --[binding driver]--> field/list events --[Writer]--> bytes
//! ```
//!
//! - [`reader`] / [`writer`]: the low-level protocol codec — struct/
//!   field/list begin-end, scalar read/write, and a total `skip` over
//!   unrecognized wire data.
//! - [`binding`]: the [`binding::ThriftField`] vocabulary every scalar,
//!   `String`, [`binding::Binary`], `Vec<T>`, and [`binding::Set`]
//!   implements, plus what a macro-generated struct/union/enum implements
//!   to compose with them.
//! - [`thrift_struct!`], [`thrift_union!`], [`thrift_enum!`],
//!   [`thrift_enum_open!`]: the schema descriptor, realized as code
//!   generation (the macro invocation states field ids, requiredness,
//!   and element types) rather than a runtime-reflected table — either
//!   is a valid implementation of the binding driver's contract.
//! - [`limits`]: resource ceilings (nesting depth, list size, binary
//!   size) enforced while decoding untrusted input, since a Parquet
//!   footer may originate from an untrusted file.
//!
//! `no_std` + `alloc` by default; the `std` feature (on by default) adds
//! [`io::IoSource`]/[`io::IoSink`] bridges onto `std::io::Read`/`Write`.
//! Map encoding is intentionally unimplemented (`Error::NotImplemented`);
//! see [`reader::Reader::skip`] and the `CType::Map` arms in [`ttype`].

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

pub mod binding;
pub mod error;
pub mod io;
pub mod limits;
mod macros;
pub mod reader;
mod state;
pub mod ttype;
mod varint;
pub mod writer;

pub use binding::{Binary, Set, ThriftField};
pub use error::{Error, Result};
pub use io::{ByteSink, ByteSource, SliceSource, VecSink};
#[cfg(feature = "std")]
pub use io::{IoSink, IoSource};
pub use limits::Limits;
pub use reader::{FieldHeader, Reader};
pub use ttype::{CType, TType};
pub use writer::{write_to_vec, Writer};
