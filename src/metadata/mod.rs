//! Metadata parsing and representation for NBIN object dumps.
//!
//! This module contains the core decoding infrastructure for NBIN dump files.
//! It provides support for decoding the type table into a linked type graph
//! and the layout table into a validated index of the instance data region.
//!
//! # Key Components
//!
//! - [`NbinFile`](nbinfile) - Main dump representation with types, layout and instance data
//! - [`typeid`] - Numeric type references used throughout a dump
//! - [`typesystem`] - Complete type system representation with cycle-safe resolution
//! - [`layout`] - Instance layout table decoding and validation
//!
//! # Examples
//!
//! ```rust,no_run
//! use nbinscope::NbinFile;
//!
//! // Load and decode a dump
//! let dump = NbinFile::from_file("snapshot.nbin".as_ref())?;
//!
//! // Access the decoded sections
//! println!("Types: {}", dump.types().len());
//! println!("Instances: {}", dump.layout().count());
//! # Ok::<(), nbinscope::Error>(())
//! ```

/// Implementation of the instance layout table
pub mod layout;
/// Implementation of a loaded + decoded NBIN dump
pub mod nbinfile;
/// Commonly used type id reference
pub mod typeid;
/// Implementation of the dump type system
pub mod typesystem;
