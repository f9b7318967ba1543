// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # nbinscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/nbinscope.svg)](https://crates.io/crates/nbinscope)
//! [![Documentation](https://docs.rs/nbinscope/badge.svg)](https://docs.rs/nbinscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/nbinscope/blob/main/LICENSE-APACHE)
//!
//! A fast, cross-platform decoder for NBIN native object snapshot dumps. Built in pure Rust,
//! `nbinscope` decodes the type table and instance layout of a dump into a fully linked,
//! cycle-safe type graph without requiring the runtime that produced the snapshot.
//!
//! ## Features
//!
//! - **📦 Efficient memory access** - Memory-mapped file access; the instance data region is
//!   located but never copied or interpreted
//! - **🔍 Complete table decoding** - Type table and layout table, validated against each other
//! - **🔗 Cycle-safe type graph** - Self-referential and mutually recursive types resolve into
//!   shared nodes with stable reference identity
//! - **🔧 Cross-platform** - Works on Windows, Linux, macOS, and any Rust-supported platform
//! - **🛡️ Memory safe** - Built in Rust with comprehensive error handling
//! - **📊 Rich type system** - Primitives, enums, structs and classes, with multi-dimensional
//!   array fields
//! - **🧩 Extensible architecture** - Designed as the foundation for instance value decoding
//!   and snapshot tooling
//!
//! ## Quick Start
//!
//! Add `nbinscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nbinscope = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust,no_run
//! use nbinscope::prelude::*;
//!
//! // Load and decode a dump
//! let dump = NbinFile::from_file("snapshot.nbin".as_ref())?;
//! println!("Found {} instances", dump.layout().count());
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! ### Basic Usage
//!
//! ```rust,no_run
//! use nbinscope::metadata::nbinfile::NbinFile;
//! use std::path::Path;
//!
//! // Load and decode a dump
//! let dump = NbinFile::from_file(Path::new("snapshot.nbin"))?;
//!
//! // Walk the resolved type graph
//! for entry in dump.types().iter() {
//!     println!("{}", entry.value());
//! }
//!
//! // Walk the instance index
//! for entry in dump.layout() {
//!     println!("{}", entry);
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Memory-based Decoding
//!
//! ```rust,no_run
//! use nbinscope::metadata::nbinfile::NbinFile;
//!
//! // Decode from a memory buffer
//! let binary_data: Vec<u8> = std::fs::read("snapshot.nbin")?;
//! let dump = NbinFile::from_mem(binary_data)?;
//!
//! // Same API as file-based decoding
//! println!("Dump loaded from memory");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! `nbinscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - Dump decoding: type table, type resolution and layout validation
//! - [`file`] - Input layer with memory-mapped and in-memory backends
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Dump Decoding
//!
//! The [`metadata::nbinfile::NbinFile`] is the main entry point for working with dumps.
//! It provides access to:
//!
//! - **Types**: Every type described by the dump, indexed by id and by name
//! - **Layout**: The instance index in writer order, with sizes and offsets validated
//! - **Instances**: The raw instance data region, located but left undecoded
//!
//! ### Type System
//!
//! The [`metadata::typesystem`] module provides:
//!
//! - **Raw Records**: Type table records exactly as the writer emitted them
//! - **Resolution**: Two-phase linking that registers a type before descending into its
//!   fields, so recursive and mutually recursive types terminate naturally
//! - **Registry**: Lock-free, concurrently readable storage with stable node identity
//! - **Primitives**: The seven built-ins, pre-seeded under their reserved negative ids
//!
//! ## Dump Format
//!
//! An NBIN dump is a little-endian binary file with four sections:
//!
//! 1. **Header** - the 4-byte magic `NBIN`
//! 2. **Type table** - counted records describing structs, classes and enums; field
//!    references are numeric ids that may point forward, backward, or at the record itself
//! 3. **Layout table** - counted 20-byte records locating every written instance inside the
//!    instance data region; negative sizes mark arrays
//! 4. **Instance data** - the writer's 64-bit total size followed by the raw instance bytes
//!
//! Primitive types (`byte`, `short`, `int`, `long`, `float`, `double`, `boolean`) are never
//! described in the type table; they live under reserved negative ids that every dump shares.
//!
//! ## Performance
//!
//! `nbinscope` is designed for high-performance decoding:
//!
//! - **Efficient memory access** - Memory-mapped files with reference-based parsing
//! - **Tables-proportional decoding** - Cost depends on the tables, not the instance data
//! - **Lock-free sharing** - A decoded dump can be read from many threads at once
//! - **Minimal allocations** through careful memory management
//!
//! Benchmarks show decode times in the microseconds for typical dumps.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with comprehensive error information:
//!
//! ```rust,no_run
//! use nbinscope::{Error, metadata::nbinfile::NbinFile};
//!
//! match NbinFile::from_file(std::path::Path::new("snapshot.nbin")) {
//!     Ok(dump) => println!("Successfully decoded dump"),
//!     Err(Error::InvalidHeader(found)) => println!("Not an NBIN file: {:#010x}", found),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed file: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! The test suite covers crafted dumps and edge cases, recursive type graphs included:
//!
//! ```bash
//! cargo test
//! cargo bench  # Decoding benchmarks
//! ```
#[macro_use]
pub(crate) mod error;

/// Input layer for dump data: file abstraction, backends and parsing.
///
/// Provides the [`File`] abstraction over memory-mapped and in-memory dump
/// data, the cursor-based [`Parser`], and the [`file::io`] helpers for
/// little-endian reads. These are the primitives the [`metadata`] layer
/// decodes with, and they remain available to tooling that wants to walk
/// the instance data region itself.
pub mod file;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the nbinscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust,no_run
/// use nbinscope::prelude::*;
///
/// // Now you have access to the most common types
/// let dump = NbinFile::from_file("snapshot.nbin".as_ref())?;
/// let types = dump.types();
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub mod prelude;

/// Definitions, parsing and resolution of NBIN dump metadata.
///
/// This module implements the complete decoding pipeline for NBIN dumps:
/// reading the type table, linking it into a cycle-safe type graph, and
/// validating the instance layout table against it.
///
/// # Key Components
///
/// ## Dump Decoding
/// - [`metadata::nbinfile::NbinFile`] - Main entry point for dump decoding
/// - [`metadata::nbinfile::NBIN_HEADER_MAGIC`] - The magic every dump starts with
///
/// ## Type System
/// - [`metadata::typesystem`] - Complete dump type system representation
/// - [`metadata::typesystem::TypeRegistry`] - Id- and name-indexed type storage
/// - [`metadata::typesystem::TypeResolver`] - Cycle-safe id-to-type linking
/// - [`metadata::typeid`] - Numeric type references used throughout a dump
///
/// ## Instance Layout
/// - [`metadata::layout`] - Layout table records and their validation
///
/// # Examples
///
/// ```rust,no_run
/// use nbinscope::NbinFile;
/// use std::path::Path;
///
/// // Load a dump and examine its metadata
/// let dump = NbinFile::from_file(Path::new("snapshot.nbin"))?;
///
/// // Look up types by name
/// for entry in dump.types().get_by_name("Node") {
///     println!("{} has id {}", entry.name(), entry.id());
/// }
///
/// // Examine the instance index
/// println!("Instances found: {}", dump.layout().count());
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub mod metadata;

/// `nbinscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust,no_run
/// use nbinscope::{Result, NbinFile};
///
/// fn load_dump(path: &str) -> Result<NbinFile> {
///     NbinFile::from_file(std::path::Path::new(path))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `nbinscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error information
/// for file access, table decoding, type resolution and layout validation.
///
/// # Examples
///
/// ```rust,no_run
/// use nbinscope::{Error, NbinFile};
///
/// match NbinFile::from_file(std::path::Path::new("snapshot.nbin")) {
///     Ok(dump) => println!("Decoded successfully"),
///     Err(Error::InvalidHeader(found)) => println!("Not an NBIN file: {:#010x}", found),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry point for working with NBIN dumps.
///
/// See [`metadata::nbinfile::NbinFile`] for decoding and metadata access.
///
/// # Example
///
/// ```rust,no_run
/// use nbinscope::NbinFile;
/// let dump = NbinFile::from_file(std::path::Path::new("snapshot.nbin"))?;
/// println!("Found {} types", dump.types().len());
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub use metadata::nbinfile::NbinFile;

/// Type system and layout types for direct access to decoded dump structures.
///
/// These types make up the decoded view of a dump:
/// - [`NativeType`] - A resolved type: primitive, enum, struct or class
/// - [`NativeField`] - A resolved field, plain value or array
/// - [`PrimitiveKind`] - The seven built-in primitives with reserved negative ids
/// - [`TypeRegistry`] - Id- and name-indexed storage for resolved types
/// - [`LayoutEntry`] - A validated instance layout record
/// - [`TypeId`] - Numeric type reference used throughout a dump
///
/// # Example
///
/// ```rust,no_run
/// use nbinscope::{NbinFile, TypeId};
/// let dump = NbinFile::from_file(std::path::Path::new("snapshot.nbin"))?;
///
/// // Resolve a type by id
/// if let Some(entry) = dump.types().get(&TypeId(0)) {
///     println!("Type 0 is {}", entry);
/// }
///
/// // Inspect the layout
/// for entry in dump.layout() {
///     println!("{} bytes at offset {}", entry.size(), entry.offset());
/// }
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub use metadata::{
    layout::LayoutEntry,
    typeid::TypeId,
    typesystem::{NativeField, NativeType, PrimitiveKind, TypeRegistry},
};

/// Provides access to low-level file and memory parsing utilities.
///
/// The [`Parser`] type is used for decoding the dump's tables and can be pointed
/// at the instance data region by tooling built on top of this crate.
///
/// # Example
///
/// ```rust
/// use nbinscope::Parser;
/// let data = [0x2A, 0x00, 0x00, 0x00];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_le::<u32>()?, 42);
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub use file::{parser::Parser, File};
