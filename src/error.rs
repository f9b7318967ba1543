use thiserror::Error;

use crate::metadata::typeid::TypeId;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while decoding NBIN dump
/// files: cursor reads, type-table resolution, and layout-table validation. Each variant
/// provides specific context about the failure mode to enable appropriate error handling.
///
/// # Error Categories
///
/// ## File Parsing Errors
/// - [`Error::InvalidHeader`] - The buffer does not start with the NBIN magic
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond buffer boundaries
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// ## Type System Errors
/// - [`Error::UnresolvedType`] - A referenced type id has no definition
/// - [`Error::InvalidLayoutEntry`] - An object layout entry references a non-class type
/// - [`Error::RecursionLimit`] - Maximum resolution depth exceeded
///
/// # Examples
///
/// ```rust,no_run
/// use nbinscope::{Error, NbinFile};
/// use std::path::Path;
///
/// match NbinFile::from_file(Path::new("snapshot.nbin")) {
///     Ok(dump) => {
///         println!("Decoded {} layout entries", dump.layout().count());
///     }
///     Err(Error::InvalidHeader(found)) => {
///         eprintln!("Not an NBIN file (magic {:#010x})", found);
///     }
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(Error::FileError(io_err)) => {
///         eprintln!("I/O error: {}", io_err);
///     }
///     Err(e) => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // File parsing Errors
    /// The buffer does not begin with the 4-byte `NBIN` magic.
    ///
    /// Decoding aborts before any further bytes are consumed. The associated
    /// value is the little-endian `u32` that was found instead.
    #[error("Invalid NBIN header - {0:#010x}")]
    InvalidHeader(u32),

    /// The file is damaged and could not be parsed.
    ///
    /// This error indicates that the file structure is corrupted or doesn't
    /// conform to the NBIN dump format. The error includes the source
    /// location where the malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    ///
    /// This error occurs when trying to read data beyond the end of the
    /// buffer. It's a safety check to prevent buffer overruns during parsing.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Provided input was empty.
    ///
    /// This error occurs when an empty file or buffer is provided where
    /// actual NBIN dump data was expected.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations
    /// such as reading from disk, permission issues, or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// A referenced type id has no matching definition.
    ///
    /// This error occurs when a field or layout entry references a type id
    /// that is neither present in the type table nor one of the reserved
    /// primitive ids.
    ///
    /// The associated [`TypeId`] identifies which type was not found.
    #[error("Failed to resolve type id - {0}")]
    UnresolvedType(TypeId),

    /// A layout entry is not consistent with the resolved type graph.
    ///
    /// Object entries must reference a class type; an entry whose
    /// non-negative size points at a struct, enum, or primitive fails
    /// with this error.
    #[error("Invalid layout entry : {0}")]
    InvalidLayoutEntry(String),

    /// Recursion limit reached.
    ///
    /// To prevent stack overflow while resolving deeply nested field type
    /// chains, a maximum recursion depth is enforced. This error indicates
    /// that limit was exceeded.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
