//! Low-level byte stream parser for NBIN dump decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data parser
//! designed for reading the structures of an NBIN native object dump. It offers bounds-checked
//! access to binary data with support for the little-endian primitive encodings, length-prefixed
//! strings and bounded sub-regions that make up the dump format.
//!
//! # Architecture
//!
//! The parser is built around a simple cursor-based model that maintains a position within
//! a byte slice. The architecture provides:
//!
//! - **Position tracking** - Maintains current offset for sequential parsing operations
//! - **Bounds checking** - All operations validate data availability before reading
//! - **Type-safe reading** - Strongly typed methods for common data types
//! - **Bounded sub-parsers** - Carve out fixed-size regions without copying
//!
//! # Key Components
//!
//! ## Core Type
//! - [`crate::file::parser::Parser`] - Main parser struct for binary data reading
//!
//! ## Navigation Methods
//! - [`crate::file::parser::Parser::seek`] - Move to specific position
//! - [`crate::file::parser::Parser::advance`] - Move forward by one byte
//! - [`crate::file::parser::Parser::advance_by`] - Move forward by specified bytes
//! - [`crate::file::parser::Parser::pos`] - Get current position
//!
//! # Data Access Methods
//! - [`crate::file::parser::Parser::read_le`] - Read primitive types (little-endian)
//! - [`crate::file::parser::Parser::read_bool`] - Read two-byte encoded booleans
//! - [`crate::file::parser::Parser::peek_byte`] - Peek at current byte without advancing
//! - [`crate::file::parser::Parser::read_bytes`] - Read a raw byte slice
//! - [`crate::file::parser::Parser::read_slice`] - Split off a bounded sub-parser
//! - [`crate::file::parser::Parser::read_string_utf8`] - Read UTF-8 strings of a known length
//! - [`crate::file::parser::Parser::read_prefixed_string_utf8`] - Read length-prefixed UTF-8 strings
//!
//! # Usage Examples
//!
//! ## Basic Value Reading
//!
//! ```rust
//! use nbinscope::Parser;
//!
//! let data = [0x01, 0x02, 0x03, 0x04];
//! let mut parser = Parser::new(&data);
//!
//! // Read little-endian values
//! let value = parser.read_le::<u16>()?;
//! assert_eq!(value, 0x0201);
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! ## Sequential Parsing with Navigation
//!
//! ```rust
//! use nbinscope::Parser;
//!
//! let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
//! let mut parser = Parser::new(&data);
//!
//! // Read sequentially
//! let first = parser.read_le::<u32>()?;
//! assert_eq!(first, 0x04030201);
//!
//! // Seek to a specific position
//! parser.seek(6)?;
//! let last_bytes = parser.read_le::<u16>()?;
//! assert_eq!(last_bytes, 0x0807);
//! # Ok::<(), nbinscope::Error>(())
//! ```
//!
//! ## Bounded Sub-Regions
//!
//! ```rust
//! use nbinscope::Parser;
//!
//! let data = [0x2A, 0x00, 0x00, 0x00, 0xFF, 0xEE];
//! let mut parser = Parser::new(&data);
//!
//! // Carve out the first four bytes as an independent parser
//! let mut object = parser.read_slice(4)?;
//! assert_eq!(object.read_le::<i32>()?, 42);
//!
//! // The outer cursor has already moved past the region
//! assert_eq!(parser.pos(), 4);
//! # Ok::<(), nbinscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, NbinIO},
    Error::OutOfBounds,
    Result,
};

/// A generic binary data parser for reading NBIN dump structures.
///
/// `Parser` provides a cursor-based interface for reading the little-endian binary
/// data of a native object dump. It is used for the dump header, the type table,
/// the layout table and the instance data region, and doubles as the value reader
/// handed out for individual object and array regions.
///
/// The parser maintains an internal position cursor and provides bounds checking
/// to prevent buffer overruns when reading malformed or truncated data.
///
/// # Features
///
/// - **Bounds checking**: All read operations validate data availability
/// - **Position tracking**: Maintains current offset for sequential parsing
/// - **Flexible seeking**: Random access to any position within the data
/// - **Type safety**: Strongly typed reading methods for common data types
/// - **Sub-parsers**: Fixed-size regions become independent parsers without copying
///
/// # Examples
///
/// ```rust,no_run
/// use nbinscope::Parser;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut parser = Parser::new(&data);
///
/// // Read little-endian values
/// let first = parser.read_le::<u32>()?;
/// assert_eq!(first, 0x04030201);
///
/// // Seek to a specific position
/// parser.seek(6)?;
/// let last_bytes = parser.read_le::<u16>()?;
/// assert_eq!(last_bytes, 0x0807);
/// # Ok::<(), nbinscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let parser = Parser::new(&data);
    /// assert_eq!(parser.len(), 4);
    /// ```
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03];
    /// let parser = Parser::new(&data);
    /// assert_eq!(parser.len(), 3);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let empty_data = [];
    /// let parser = Parser::new(&empty_data);
    /// assert!(parser.is_empty());
    ///
    /// let data = [0x01];
    /// let parser = Parser::new(&data);
    /// assert!(!parser.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    ///
    /// This checks if the current position is before the end of the data buffer.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02];
    /// let mut parser = Parser::new(&data);
    /// assert!(parser.has_more_data());
    ///
    /// let _byte = parser.read_le::<u8>()?;
    /// assert!(parser.has_more_data());
    ///
    /// let _byte = parser.read_le::<u8>()?;
    /// assert!(!parser.has_more_data());
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// parser.seek(2)?;
    /// assert_eq!(parser.pos(), 2);
    /// let value = parser.read_le::<u8>()?;
    /// assert_eq!(value, 0x03);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(OutOfBounds);
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert_eq!(parser.pos(), 0);
    /// parser.advance()?;
    /// assert_eq!(parser.pos(), 1);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn advance(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert_eq!(parser.pos(), 0);
    /// parser.advance_by(3)?;
    /// assert_eq!(parser.pos(), 3);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if self.position + step > self.data.len() {
            return Err(OutOfBounds);
        }

        self.position += step;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert_eq!(parser.pos(), 0);
    /// let _byte = parser.read_le::<u8>()?;
    /// assert_eq!(parser.pos(), 1);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03];
    /// let parser = Parser::new(&data);
    /// assert_eq!(parser.data(), &[0x01, 0x02, 0x03]);
    /// ```
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert_eq!(parser.peek_byte()?, 0x01);
    /// assert_eq!(parser.pos(), 0); // Position unchanged
    /// let value = parser.read_le::<u8>()?;
    /// assert_eq!(value, 0x01);
    /// assert_eq!(parser.pos(), 1); // Now position advanced
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(OutOfBounds);
        }
        Ok(self.data[self.position])
    }

    /// Read a value of type `T` in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// let value: u32 = parser.read_le()?;
    /// assert_eq!(value, 0x04030201);
    /// assert_eq!(parser.pos(), 4);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn read_le<T: NbinIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a boolean and advance the position by two bytes.
    ///
    /// Dump writers store booleans as a two-byte value of which only the first
    /// byte is meaningful. Any non-zero first byte reads as `true`, the second
    /// byte is padding and skipped. Both bytes must be present.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than two bytes remain.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x00, 0x00, 0x00];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert!(parser.read_bool()?);
    /// assert_eq!(parser.pos(), 2);
    /// assert!(!parser.read_bool()?);
    /// assert_eq!(parser.pos(), 4);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn read_bool(&mut self) -> Result<bool> {
        self.ensure_remaining(2)?;

        let value = self.data[self.position] != 0;
        self.position += 2;
        Ok(value)
    }

    /// Read a UTF-8 string of a known byte length and advance the position.
    ///
    /// Reads exactly `length` bytes and validates them as UTF-8. A length of
    /// zero yields an empty string without touching the cursor.
    ///
    /// # Arguments
    /// * `length` - The exact number of bytes the string occupies
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain, or
    /// [`crate::Error::Malformed`] if the bytes are not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [b'P', b'o', b'i', b'n', b't'];
    /// let mut parser = Parser::new(&data);
    ///
    /// let name = parser.read_string_utf8(5)?;
    /// assert_eq!(name, "Point");
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn read_string_utf8(&mut self, length: usize) -> Result<String> {
        let start = self.position;
        let string_data = self.read_bytes(length)?;

        String::from_utf8(string_data.to_vec()).map_err(|e| {
            malformed_error!(
                "Invalid UTF-8 string at offset {}-{}: {}",
                start,
                start + length,
                e.utf8_error()
            )
        })
    }

    /// Read a length-prefixed UTF-8 string and advance the position.
    ///
    /// The string is stored as a little-endian `i32` byte count followed by
    /// that many bytes of UTF-8 data. This is the encoding used for type,
    /// field and enum constant names in the dump tables.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the length prefix is negative or the
    /// bytes are not valid UTF-8, and [`crate::Error::OutOfBounds`] if the prefix or
    /// string data would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x05, 0x00, 0x00, 0x00, b'P', b'o', b'i', b'n', b't'];
    /// let mut parser = Parser::new(&data);
    ///
    /// let name = parser.read_prefixed_string_utf8()?;
    /// assert_eq!(name, "Point");
    /// assert_eq!(parser.pos(), 9);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn read_prefixed_string_utf8(&mut self) -> Result<String> {
        let length = self.read_le::<i32>()?;
        let Ok(length) = usize::try_from(length) else {
            return Err(malformed_error!("Invalid string length - {}", length));
        };

        self.read_string_utf8(length)
    }

    /// Returns the number of bytes remaining from the current position.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert_eq!(parser.remaining(), 4);
    /// let _value = parser.read_le::<u16>()?;
    /// assert_eq!(parser.remaining(), 2);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Ensure at least `needed` bytes remain from the current position.
    ///
    /// # Arguments
    /// * `needed` - The number of bytes that must be available
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `needed` bytes remain.
    pub fn ensure_remaining(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(OutOfBounds);
        }
        Ok(())
    }

    /// Calculate the end position for reading `length` bytes from the current position.
    ///
    /// # Arguments
    /// * `length` - The number of bytes intended to be read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the resulting position would overflow
    /// or exceed the data length.
    pub fn calc_end_position(&self, length: usize) -> Result<usize> {
        let end_pos = self.position.checked_add(length).ok_or(OutOfBounds)?;
        if end_pos > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(end_pos)
    }

    /// Read a raw byte slice of the specified length and advance the position.
    ///
    /// # Arguments
    /// * `length` - The number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
    /// let mut parser = Parser::new(&data);
    ///
    /// let bytes = parser.read_bytes(3)?;
    /// assert_eq!(bytes, &[0x01, 0x02, 0x03]);
    /// assert_eq!(parser.pos(), 3);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end_pos = self.calc_end_position(length)?;

        let bytes = &self.data[self.position..end_pos];
        self.position = end_pos;
        Ok(bytes)
    }

    /// Split off the next `size` bytes as an independent bounded parser.
    ///
    /// The returned parser starts at position zero and can only access the
    /// carved-out region, so reads within one object or array region can never
    /// spill into a neighbouring one. The outer cursor advances past the region
    /// immediately; the two positions do not affect each other afterwards.
    ///
    /// # Arguments
    /// * `size` - The number of bytes the sub-parser covers
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `size` bytes remain.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use nbinscope::Parser;
    /// let data = [0x2A, 0x00, 0x00, 0x00, 0x07, 0x00];
    /// let mut parser = Parser::new(&data);
    ///
    /// let mut object = parser.read_slice(4)?;
    /// assert_eq!(object.read_le::<i32>()?, 42);
    /// assert_eq!(object.pos(), 4);
    ///
    /// // The outer parser continues after the region
    /// assert_eq!(parser.pos(), 4);
    /// assert_eq!(parser.read_le::<u16>()?, 7);
    /// # Ok::<(), nbinscope::Error>(())
    /// ```
    pub fn read_slice(&mut self, size: usize) -> Result<Parser<'a>> {
        let end_pos = self.calc_end_position(size)?;

        let slice = Parser::new(&self.data[self.position..end_pos]);
        self.position = end_pos;
        Ok(slice)
    }
}
