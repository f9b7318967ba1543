//! Dump file abstraction and raw data access.
//!
//! This module provides the input layer for NBIN native object dumps. It abstracts over
//! different data sources (files on disk, memory buffers) and provides bounds-checked
//! access to the raw dump bytes that the metadata layer decodes.
//!
//! # Architecture
//!
//! The module is built around a small set of components that work together:
//!
//! - **File abstraction layer** - Unified interface for dump data access
//! - **Backend system** - Pluggable data sources (disk files, memory buffers)
//! - **Parsing infrastructure** - Cursor-based readers for the dump structures
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Main dump file abstraction
//! - [`crate::file::Backend`] - Trait for different data sources (disk files, memory buffers)
//!
//! ## Parsing Infrastructure
//! - [`crate::file::parser::Parser`] - Cursor-based parsing interface for dump structures
//! - [`crate::file::io`] - Low-level I/O utilities for reading little-endian values
//!
//! ## Backend Implementations
//! - [`crate::file::physical::Physical`] - Memory-mapped file backend for disk access
//! - [`crate::file::memory::Memory`] - In-memory buffer backend
//!
//! # Data Sources
//!
//! The module supports multiple data sources through the [`crate::file::Backend`] trait:
//! - **Physical files** - Memory-mapped files for efficient disk access
//! - **Memory buffers** - In-memory dump data, e.g. received over the network
//!
//! # Examples
//!
//! ## Loading from File
//!
//! ```rust,no_run
//! use nbinscope::File;
//! use std::path::Path;
//!
//! // Load a dump from disk
//! let file = File::from_file(Path::new("snapshot.nbin"))?;
//! println!("Loaded dump with {} bytes", file.len());
//!
//! // Check the signature
//! let signature = file.data_slice(0, 4)?;
//! assert_eq!(signature, b"NBIN");
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! ## Loading from Memory
//!
//! ```rust
//! use nbinscope::File;
//!
//! // Dump data already loaded into memory
//! let data = vec![b'N', b'B', b'I', b'N', 0x00, 0x00, 0x00, 0x00];
//! let file = File::from_mem(data)?;
//!
//! // Same API as file-based loading
//! assert_eq!(file.len(), 8);
//! assert_eq!(file.data_slice(0, 4)?, b"NBIN");
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::metadata::nbinfile`] - Uses the file layer as data source for dump decoding
//! - [`crate::file::parser`] - Cursor-based parsing utilities for the dump structures
//!
//! The file module provides low-level data access only. For decoding the dump's type
//! table, layout table and instance data, use the [`NbinFile`](crate::NbinFile)
//! interface which builds upon these primitives.
//!
//! # Thread Safety
//!
//! All components are designed to be thread-safe and can be shared across threads
//! for concurrent analysis of the same dump.

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{Error::Empty, Result};
use memory::Memory;
use physical::Physical;

/// Backend trait for dump data sources.
///
/// This trait abstracts over the source of dump data, allowing for both in-memory and
/// on-disk representations. All implementations must be thread-safe.
///
/// The trait provides a common interface for accessing dump data regardless of whether
/// it's loaded from a file on disk or from a memory buffer. This enables flexible handling
/// of different data sources while maintaining performance.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// This method provides bounds-checked access to the underlying data.
    /// It's used internally by the `File` struct to safely read portions
    /// of the dump data.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    ///
    /// This provides access to the complete dump data as a single slice.
    /// For file-based backends, this typically maps the entire file into memory.
    /// For memory-based backends, this returns the underlying buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    ///
    /// This is equivalent to `self.data().len()` but may be more efficient
    /// for some backend implementations.
    fn len(&self) -> usize;
}

/// Represents a loaded NBIN dump file.
///
/// This struct wraps a data source and provides bounds-checked access to the raw dump
/// bytes. It supports loading from both files and memory buffers; file-based loading
/// uses memory-mapped I/O so that large dumps are paged in on demand.
///
/// The `File` struct only validates that the input is non-empty. Decoding the dump
/// structures - signature, type table, layout table - happens in
/// [`NbinFile`](crate::NbinFile), which borrows the data held here.
///
/// # Examples
///
/// ## Loading from a file
///
/// ```rust,no_run
/// use nbinscope::File;
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("snapshot.nbin"))?;
/// println!("Loaded dump with {} bytes", file.len());
/// # Ok::<(), nbinscope::Error>(())
/// ```
///
/// ## Loading from memory
///
/// ```rust
/// use nbinscope::File;
///
/// let data = vec![b'N', b'B', b'I', b'N'];
/// let file = File::from_mem(data)?;
/// assert_eq!(file.len(), 4);
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub struct File {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
}

impl File {
    /// Loads a dump file from the given path.
    ///
    /// This method opens a file from disk and memory-maps it for efficient access.
    ///
    /// # Arguments
    ///
    /// * `file` - Path to the dump file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or opened
    /// - The file is empty
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::File;
    /// use std::path::Path;
    ///
    /// let file = File::from_file(Path::new("snapshot.nbin"))?;
    /// println!("Loaded {} bytes", file.len());
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Loads a dump file from a memory buffer.
    ///
    /// This method wraps dump data that's already loaded into memory.
    /// Useful when working with embedded resources or downloaded dumps.
    ///
    /// # Arguments
    ///
    /// * `data` - The bytes of the dump file.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbinscope::File;
    ///
    /// let data = vec![b'N', b'B', b'I', b'N', 0x00, 0x00];
    /// let file = File::from_mem(data)?;
    /// assert_eq!(file.len(), 6);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    /// Internal loader for any backend.
    ///
    /// # Arguments
    ///
    /// * `data` - The backend providing the dump data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty.
    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(data),
        })
    }

    /// Returns the total size of the loaded dump in bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbinscope::File;
    ///
    /// let file = File::from_mem(vec![0x00; 16])?;
    /// assert_eq!(file.len(), 16);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the file has a length of zero.
    ///
    /// Loaded files are never empty, the check happens during loading.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the raw data of the loaded dump.
    ///
    /// This provides access to the entire dump contents as a byte slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbinscope::File;
    ///
    /// let file = File::from_mem(vec![b'N', b'B', b'I', b'N'])?;
    /// assert_eq!(&file.data()[0..4], b"NBIN");
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Returns a slice of the dump data at the given offset and length.
    ///
    /// This is a safe way to access specific portions of the dump data
    /// with bounds checking to prevent buffer overflows.
    ///
    /// # Arguments
    ///
    /// * `offset` - The offset to start the slice from.
    /// * `len` - The length of the slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested range is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbinscope::File;
    ///
    /// let file = File::from_mem(vec![b'N', b'B', b'I', b'N', 0x2A])?;
    /// assert_eq!(file.data_slice(0, 4)?, b"NBIN");
    /// assert_eq!(file.data_slice(4, 1)?, &[0x2A]);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.data.data_slice(offset, len)
    }
}
