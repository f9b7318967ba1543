//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for accessing dump files from disk using memory-mapped I/O.
//! This approach provides efficient access to large dumps without loading the entire content
//! into memory upfront, while still allowing fast random access to any part of the file.
//!
//! # Architecture
//!
//! The physical backend uses memory-mapped I/O to map files directly into the process's
//! virtual address space. This architecture provides several key benefits:
//!
//! - **Efficient memory usage** - Only requested portions are loaded into physical memory
//! - **Operating system optimization** - Leverages OS-level caching and paging
//! - **Shared memory** - Multiple processes can efficiently access the same file
//! - **Lazy loading** - Pages are loaded on-demand as they are accessed
//!
//! # Key Components
//!
//! ## Core Type
//! - [`crate::file::physical::Physical`] - Main backend struct implementing [`crate::file::Backend`]
//!
//! ## Backend Methods
//! - [`crate::file::physical::Physical::new`] - Creates backend from file path with memory mapping
//! - [`crate::file::Backend::data_slice`] - Retrieves byte slices with bounds checking
//! - [`crate::file::Backend::data`] - Returns the complete memory-mapped file data
//! - [`crate::file::Backend::len`] - Returns total file size
//!
//! # Usage Examples
//!
//! ## Basic File Access
//!
//! ```rust,ignore
//! use nbinscope::file::{Physical, Backend};
//! use std::path::Path;
//!
//! let physical = Physical::new(Path::new("snapshot.nbin"))?;
//! println!("Dump size: {} bytes", physical.len());
//!
//! // Read the first 4 bytes (the dump signature)
//! let header = physical.data_slice(0, 4)?;
//! assert_eq!(header, b"NBIN");
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use nbinscope::file::Physical;
//! use std::path::Path;
//!
//! // Handle file that doesn't exist
//! match Physical::new(Path::new("nonexistent.nbin")) {
//!     Ok(physical) => println!("File opened successfully"),
//!     Err(e) => println!("Failed to open file: {}", e),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::file`] - Provides the [`crate::file::Backend`] trait implementation
//! - [`crate::file::File`] - Uses physical backend for file-based parsing operations
//! - [`crate::metadata::nbinfile`] - Decodes NBIN dumps from memory-mapped files
//!
//! The physical backend is ideal for production scenarios where dumps are accessed
//! from disk and memory efficiency is important, complementing the memory backend
//! for scenarios where data is already loaded into memory.

use super::Backend;
use crate::{Error::FileError, Error::OutOfBounds, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for efficient access to files on disk.
///
/// [`crate::file::physical::Physical`] provides a way to access large dump files by mapping
/// them directly into the process's virtual address space. This eliminates the need to read
/// the entire file into memory upfront and allows the operating system to manage
/// memory efficiently through demand paging.
///
/// The backend is particularly well-suited for native object dumps, which can be
/// large and whose instance data is typically accessed in a non-sequential pattern
/// driven by the layout table. All access operations include bounds checking to
/// ensure memory safety.
///
/// # Examples
///
/// ```rust,ignore
/// use nbinscope::file::{Physical, Backend};
/// use std::path::Path;
///
/// // Open a dump file
/// let physical = Physical::new(Path::new("snapshot.nbin"))?;
///
/// // Check the signature
/// let signature = physical.data_slice(0, 4)?;
/// assert_eq!(signature, b"NBIN");
///
/// // Get the full file size
/// println!("Dump size: {} bytes", physical.len());
/// # Ok::<(), nbinscope::Error>(())
/// ```
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// This method opens the file at the given path and creates a memory mapping
    /// for it. The file is mapped as read-only and shared, allowing multiple
    /// processes to efficiently access the same file.
    ///
    /// # Arguments
    /// * `path` - Path to the dump file on disk. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// memory mapping fails.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use nbinscope::file::Physical;
    /// use std::path::Path;
    ///
    /// // Open a dump
    /// let physical = Physical::new(Path::new("snapshot.nbin"))?;
    /// assert!(physical.len() > 0);
    ///
    /// // Open a file that doesn't exist (will return an error)
    /// let result = Physical::new(Path::new("nonexistent.nbin"));
    /// assert!(result.is_err());
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(FileError(error)),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
