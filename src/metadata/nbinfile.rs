//! Decoded view of a complete NBIN dump file.
//!
//! This module provides [`crate::metadata::nbinfile::NbinFile`], the main
//! entry point of the crate. An `NbinFile` decodes the three leading sections
//! of a dump - header magic, type table, layout table - and hands out the
//! resolved type graph together with the validated layout entries. The
//! instance data region that follows the tables is located but deliberately
//! left unconsumed; interpreting instance bytes against the type graph is a
//! concern for tooling built on top of this view.
//!
//! # Architecture
//!
//! The module is built around a self-referencing pattern that lets the
//! decoded structures borrow directly from the backing
//! [`crate::file::File`], whether that is an in-memory buffer or a
//! memory-mapped file. Decoding runs in a fixed order:
//!
//! 1. **Header** - the 4-byte [`NBIN_HEADER_MAGIC`] is verified before
//!    anything else is read
//! 2. **Type table** - records are read raw, then linked into the shared
//!    type graph by [`crate::metadata::typesystem::TypeResolver`]
//! 3. **Layout table** - entries are read and validated against the
//!    resolved [`crate::metadata::typesystem::TypeRegistry`]
//! 4. **Instance region** - the remaining bytes, starting with the writer's
//!    64-bit total size, are captured as a raw slice
//!
//! # Key Components
//!
//! - [`crate::metadata::nbinfile::NbinFile`] - Decoded dump with file-backed data
//! - [`crate::metadata::nbinfile::NbinFileData`] - Internal data structure holding the decoded sections
//! - [`NBIN_HEADER_MAGIC`] - The magic every dump starts with
//!
//! # Usage Examples
//!
//! ```rust
//! use nbinscope::NbinFile;
//!
//! // The smallest valid dump: magic, empty type table, empty layout table
//! let mut buffer = Vec::new();
//! buffer.extend_from_slice(b"NBIN");
//! buffer.extend_from_slice(&0_i32.to_le_bytes());
//! buffer.extend_from_slice(&0_i32.to_le_bytes());
//!
//! let dump = NbinFile::from_mem(buffer)?;
//!
//! // The seven built-in primitives are always present
//! assert_eq!(dump.types().len(), 7);
//! assert_eq!(dump.layout().count(), 0);
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! Loading from disk works the same way, backed by a memory map:
//!
//! ```rust,no_run
//! use nbinscope::NbinFile;
//! use std::path::Path;
//!
//! let dump = NbinFile::from_file(Path::new("snapshot.nbin"))?;
//! for entry in dump.layout() {
//!     println!("{}", entry);
//! }
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! [`crate::metadata::nbinfile::NbinFile`] is [`std::marker::Send`] and
//! [`std::marker::Sync`]: the backing file data is immutable and the type
//! registry uses lock-free storage, so a decoded dump can be shared across
//! threads without additional synchronization.

use ouroboros::self_referencing;
use std::{path::Path, sync::Arc};

use crate::{
    file::{parser::Parser, File},
    metadata::{
        layout::LayoutEntry,
        typesystem::{NativeTypeRaw, TypeRegistry, TypeResolver},
    },
    Error::InvalidHeader,
    Result,
};

/// The 4-byte magic every NBIN dump starts with, `b"NBIN"` read as a
/// little-endian `u32`.
pub const NBIN_HEADER_MAGIC: u32 = 0x4E49_424E;

/// Decoded dump sections holding references into the file data.
///
/// `NbinFileData` owns the decoded output of one dump - the resolved type
/// registry and the validated layout entries - while borrowing the raw bytes
/// of the instance data region straight from the backing file. The region is
/// never copied; a dump holding gigabytes of instance data decodes in time
/// proportional to its tables.
pub struct NbinFileData<'a> {
    /// Reference to the owning File structure
    pub file: Arc<File>,

    /// Raw file data slice
    pub data: &'a [u8],

    /// All resolved types of the dump, primitives included
    pub types: Arc<TypeRegistry>,

    /// Validated layout entries, in table order
    pub layout: Vec<LayoutEntry>,

    /// The instance data region, starting with the writer's 64-bit total
    /// size; may be empty
    pub instances: &'a [u8],

    /// Absolute byte offset of the instance data region inside `data`
    pub instances_offset: usize,
}

impl<'a> NbinFileData<'a> {
    /// Decodes the dump sections from file data.
    ///
    /// The header magic is verified before any further bytes are consumed.
    /// Type table records are read raw and then resolved into the shared
    /// type graph; layout records are validated against it. The parser stops
    /// at the instance boundary, leaving the instance region untouched.
    ///
    /// # Arguments
    ///
    /// * `file` - The File containing the dump data
    /// * `data` - Raw file data slice
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidHeader`] if the buffer does not start
    /// with the NBIN magic, or a decoding error if a table is truncated,
    /// references an unknown type id, or fails layout validation.
    pub fn from_file(file: Arc<File>, data: &'a [u8]) -> Result<Self> {
        let mut parser = Parser::new(data);

        let signature = parser.read_le::<u32>()?;
        if signature != NBIN_HEADER_MAGIC {
            return Err(InvalidHeader(signature));
        }

        let raw_types = NativeTypeRaw::read_table(&mut parser)?;

        let types = Arc::new(TypeRegistry::new());
        TypeResolver::new(types.clone(), raw_types).resolve_all()?;

        let layout = LayoutEntry::read_table(&mut parser, &types)?;

        let instances_offset = parser.pos();
        Ok(NbinFileData {
            file,
            data,
            types,
            layout,
            instances: &data[instances_offset..],
            instances_offset,
        })
    }
}

#[self_referencing]
/// A decoded NBIN dump, the main entry point of the crate.
///
/// `NbinFile` ties the backing [`crate::file::File`] together with the
/// decoded sections borrowed from it. Construction decodes the type table
/// and layout table eagerly and fails on the first structural problem, so a
/// successfully created `NbinFile` always carries a fully linked type graph
/// and a layout whose entries all passed validation.
///
/// # Decoded Sections
///
/// - **Types**: every type of the dump, reachable by id or name through
///   [`NbinFile::types`]; the seven built-in primitives are always present
/// - **Layout**: the instance index, in writer order, through
///   [`NbinFile::layout`] and [`NbinFile::layout_entries`]
/// - **Instances**: the raw, undecoded instance region through
///   [`NbinFile::instance_data`]
///
/// # Thread Safety
///
/// `NbinFile` is designed for concurrent read access and implements `Send`
/// and `Sync`. All operations are read-only and do not modify the underlying
/// file data.
pub struct NbinFile {
    /// Holds the input data, either as memory buffer or memory-mapped file
    file: Arc<File>,

    #[borrows(file)]
    #[not_covariant]
    /// Holds the decoded sections borrowing from the file
    data: NbinFileData<'this>,
}

impl NbinFile {
    /// Creates a new `NbinFile` by loading and decoding a dump from disk.
    ///
    /// The file is memory-mapped, so large dumps decode without the instance
    /// region ever being read into memory.
    ///
    /// # Arguments
    ///
    /// * `file` - Path to the NBIN dump file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or mapped, or if
    /// decoding its tables fails.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::NbinFile;
    /// use std::path::Path;
    ///
    /// let dump = NbinFile::from_file(Path::new("snapshot.nbin"))?;
    /// println!("{} types, {} instances", dump.types().len(), dump.layout().count());
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn from_file(file: &Path) -> Result<Self> {
        let input = Arc::new(File::from_file(file)?);
        Self::load(input)
    }

    /// Creates a new `NbinFile` by decoding a dump from a memory buffer.
    ///
    /// Useful for dumps that are already loaded in memory or obtained from
    /// external sources. The buffer is managed internally to ensure proper
    /// lifetime handling.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw bytes of the NBIN dump
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for an empty buffer, or a decoding
    /// error if the tables cannot be decoded.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::NbinFile;
    ///
    /// let buffer = std::fs::read("snapshot.nbin")?;
    /// let dump = NbinFile::from_mem(buffer)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        let input = Arc::new(File::from_mem(data)?);
        Self::load(input)
    }

    fn load(file: Arc<File>) -> Result<Self> {
        NbinFile::try_new(file, |file| {
            NbinFileData::from_file(file.clone(), file.data())
        })
    }

    /// Returns the registry holding all resolved types of this dump.
    ///
    /// The registry is shared; cloning the `Arc` hands the type graph to
    /// other threads independently of this view.
    pub fn types(&self) -> &Arc<TypeRegistry> {
        self.with_data(|data| &data.types)
    }

    /// Iterates the layout entries of this dump, in table order.
    ///
    /// Table order is the order the writer laid instances out in the data
    /// region, so offsets are non-decreasing in practice.
    pub fn layout(&self) -> std::slice::Iter<'_, LayoutEntry> {
        self.with_data(|data| data.layout.iter())
    }

    /// Returns the layout entries of this dump as a slice, in table order
    pub fn layout_entries(&self) -> &[LayoutEntry] {
        self.with_data(|data| data.layout.as_slice())
    }

    /// Returns the raw bytes of the instance data region.
    ///
    /// The slice begins with the writer's 64-bit total instance size and is
    /// not interpreted any further; layout entry offsets are relative to the
    /// data that follows that prefix. The slice may be empty for dumps
    /// written without instances.
    pub fn instance_data(&self) -> &[u8] {
        self.with_data(|data| data.instances)
    }

    /// Returns the absolute byte offset of the instance data region,
    /// directly behind the last layout record
    pub fn instances_offset(&self) -> usize {
        self.with_data(|data| data.instances_offset)
    }

    /// Returns the underlying file representation of this dump.
    ///
    /// # Returns
    ///
    /// Reference to the `Arc<File>` containing the dump data.
    pub fn file(&self) -> &Arc<File> {
        self.borrow_file()
    }

    /// Returns the raw file data as a byte slice.
    ///
    /// # Returns
    ///
    /// Reference to the complete file data.
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data)
    }
}
