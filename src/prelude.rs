//! # nbinscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the nbinscope library. Import this module to get quick access to the essential
//! types for NBIN dump decoding.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all nbinscope operations
pub use crate::Error;

/// The result type used throughout nbinscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for NBIN dump decoding
pub use crate::NbinFile;

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Dump Metadata - Core Types
// ================================================================================================

/// Numeric type reference used throughout a dump
pub use crate::metadata::typeid::TypeId;

/// Dump header constants
pub use crate::metadata::nbinfile::NBIN_HEADER_MAGIC;

// ================================================================================================
// Type System
// ================================================================================================

/// Core type system components
pub use crate::metadata::typesystem::{
    EnumConstant, EnumConstantList, FieldList, NativeField, NativeFieldRc, NativeType,
    NativeTypeRc, PrimitiveKind, TypeRegistry, TypeResolver,
};

// ================================================================================================
// Raw Table Types
// ================================================================================================

/// Type table raw record types
pub use crate::metadata::typesystem::{NativeFieldRaw, NativeTypeRaw, TypeKind};

/// Layout table raw record type
pub use crate::metadata::layout::LayoutRaw;

// ================================================================================================
// Instance Layout
// ================================================================================================

/// Validated instance layout entries
pub use crate::metadata::layout::LayoutEntry;

// ================================================================================================
// File I/O
// ================================================================================================

/// Backend trait for dump data sources
pub use crate::file::Backend;

/// Little-endian read support for primitive values
pub use crate::file::io::NbinIO;
