//! Low-level byte order and safe reading utilities for NBIN parsing.
//!
//! This module provides endian-aware binary data reading functionality for decoding
//! NBIN dump structures. It implements safe, bounds-checked operations for reading
//! primitive types from byte buffers, ensuring data integrity and preventing buffer
//! overruns during decoding. The NBIN format is little-endian throughout, so only
//! little-endian accessors are provided.
//!
//! # Architecture
//!
//! The module is built around the [`crate::file::io::NbinIO`] trait which provides a
//! unified interface for reading binary data in a type-safe manner:
//!
//! - Generic trait-based reading for all primitive widths the format uses
//! - Automatic bounds checking to prevent buffer overruns
//! - Consistent error handling through the [`crate::Result`] type
//!
//! # Key Components
//!
//! - [`crate::file::io::NbinIO`] - Trait defining the byte-array conversion for each primitive type
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at a specific offset with auto-advance
//!
//! ## Supported Types
//! The [`crate::file::io::NbinIO`] trait is implemented for:
//! - **Unsigned integers**: `u8`, `u16`, `u32`, `u64`
//! - **Signed integers**: `i8`, `i16`, `i32`, `i64`
//! - **Floating point**: `f32`, `f64`
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use nbinscope::file::io::{read_le, read_le_at};
//!
//! let data = [0x01, 0x00, 0x00, 0x00]; // Little-endian i32: 1
//! let value: i32 = read_le(&data)?;
//! assert_eq!(value, 1);
//!
//! // Sequential reading with offset tracking
//! let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//! let first: i16 = read_le_at(&data, &mut offset)?;  // offset: 0 -> 2
//! let second: i16 = read_le_at(&data, &mut offset)?; // offset: 2 -> 4
//! let third: i32 = read_le_at(&data, &mut offset)?;  // offset: 4 -> 8
//! assert_eq!((first, second, third), (1, 2, 3));
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All reading functions return [`crate::Result<T>`] and will return
//! [`crate::Error::OutOfBounds`] if there are insufficient bytes in the buffer to
//! complete the operation.
//!
//! # Integration
//!
//! This module integrates with:
//! - [`crate::file::parser`] - Uses these functions for cursor-based decoding
//! - [`crate::metadata`] - Reads type-table and layout-table records from binary data
//!
//! The module is the foundational layer for all binary data access throughout the
//! nbinscope library.

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe binary data reading operations.
///
/// This trait provides a unified interface for reading primitive types from byte slices
/// in a safe and endian-aware manner. It abstracts over the conversion from byte arrays
/// to typed values for the little-endian encoding the NBIN format uses everywhere.
///
/// The trait is implemented for all primitive integer and floating-point widths that
/// appear in NBIN dumps, ensuring type safety and consistent behavior across all
/// binary reading operations.
///
/// # Implementation Details
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size
/// byte array required for that particular type (e.g., `[u8; 4]` for `i32`). The trait
/// method then converts these byte arrays to the target type.
pub trait NbinIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    ///
    /// This type must be convertible from a byte slice and is used for reading
    /// binary data in little-endian format.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

// Implement NbinIO support for u64
impl NbinIO for u64 {
    type Bytes = [u8; 8];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u64::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for i64
impl NbinIO for i64 {
    type Bytes = [u8; 8];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i64::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for u32
impl NbinIO for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for i32
impl NbinIO for i32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i32::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for u16
impl NbinIO for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for i16
impl NbinIO for i16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i16::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for u8
impl NbinIO for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for i8
impl NbinIO for i8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i8::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for f32
impl NbinIO for f32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        f32::from_le_bytes(bytes)
    }
}

// Implement NbinIO support for f64
impl NbinIO for f64 {
    type Bytes = [u8; 8];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        f64::from_le_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in little-endian byte order from a data buffer.
///
/// This function reads from the beginning of the buffer and supports all types that
/// implement the [`crate::file::io::NbinIO`] trait (u8, i8, u16, i16, u32, i32, u64,
/// i64, f32, f64).
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust,ignore
/// use nbinscope::file::io::read_le;
///
/// let data = [0x01, 0x00, 0x00, 0x00]; // Little-endian u32: 1
/// let value: u32 = read_le(&data)?;
/// assert_eq!(value, 1);
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub fn read_le<T: NbinIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order from a data buffer at a
/// specific offset.
///
/// This function reads from the specified offset and automatically advances the offset
/// by the number of bytes read. Supports all types that implement the
/// [`crate::file::io::NbinIO`] trait.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (will be advanced after reading)
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust,ignore
/// use nbinscope::file::io::read_le_at;
///
/// let data = [0x01, 0x00, 0x02, 0x00]; // Two i16 values: 1, 2
/// let mut offset = 0;
///
/// let first: i16 = read_le_at(&data, &mut offset)?;
/// assert_eq!(first, 1);
/// assert_eq!(offset, 2);
///
/// let second: i16 = read_le_at(&data, &mut offset)?;
/// assert_eq!(second, 2);
/// assert_eq!(offset, 4);
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub fn read_le_at<T: NbinIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_le_bytes(read))
}
