//! Instance layout table of an NBIN dump.
//!
//! The layout table is the dump's index into the instance data region: one
//! fixed-width record per written instance, holding the type id, the byte
//! offset of the instance inside the region and its encoded size. The sign
//! of the size field decides what a record describes - a non-negative size
//! is a single object, a negative size is an array whose true byte size is
//! the magnitude.
//!
//! Like the type table, records are read raw first ([`LayoutRaw`]) and then
//! validated against the [`TypeRegistry`] into [`LayoutEntry`] values with
//! the type reference resolved. Object entries must point at a class; array
//! entries may carry any element type.
//!
//! # Examples
//!
//! ```rust
//! use nbinscope::metadata::layout::{LayoutEntry, LayoutRaw};
//! use nbinscope::metadata::typeid::TypeId;
//! use nbinscope::metadata::typesystem::TypeRegistry;
//! use nbinscope::Parser;
//!
//! let mut record = Vec::new();
//! record.extend_from_slice(&(-3_i32).to_le_bytes()); // int
//! record.extend_from_slice(&0_i64.to_le_bytes());
//! record.extend_from_slice(&(-40_i32).to_le_bytes());
//! record.extend_from_slice(&10_i32.to_le_bytes());
//!
//! let registry = TypeRegistry::new();
//! let mut parser = Parser::new(&record);
//!
//! let raw = LayoutRaw::read(&mut parser)?;
//! assert_eq!(raw.type_id, TypeId(-3));
//!
//! let entry = raw.to_owned(&registry)?;
//! assert!(entry.is_array());
//! assert_eq!(entry.size(), 40);
//! # Ok::<(), nbinscope::Error>(())
//! ```

use crate::{
    file::parser::Parser,
    metadata::{
        typeid::TypeId,
        typesystem::{NativeTypeRc, TypeRegistry},
    },
    Error::{InvalidLayoutEntry, UnresolvedType},
    Result,
};
use std::fmt;

/// One layout table record, read exactly as the writer emitted it.
///
/// Records are 20 bytes wide on disk. The `length` field is only meaningful
/// for arrays; writers emit `1` for plain objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRaw {
    /// Id of the described type, not resolved yet
    pub type_id: TypeId,
    /// Byte offset of the instance inside the instance data region
    pub offset: i64,
    /// Encoded byte size, negative for arrays
    pub size: i32,
    /// Element count for arrays, `1` for plain objects
    pub length: i32,
}

impl LayoutRaw {
    /// Reads a single layout record at the parser's current position.
    ///
    /// # Errors
    /// Returns an error if fewer than 20 bytes remain.
    pub fn read(parser: &mut Parser) -> Result<LayoutRaw> {
        Ok(LayoutRaw {
            type_id: TypeId(parser.read_le::<i32>()?),
            offset: parser.read_le::<i64>()?,
            size: parser.read_le::<i32>()?,
            length: parser.read_le::<i32>()?,
        })
    }

    /// Convert a `LayoutRaw` into a [`LayoutEntry`] with the type reference
    /// resolved against the given registry.
    ///
    /// A negative size marks the record as an array and folds onto its
    /// magnitude; any element type is acceptable. A non-negative size marks
    /// a single object, which must reference a class.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedType`] if the type id is not
    /// registered, or [`crate::Error::InvalidLayoutEntry`] if an object
    /// record references anything but a class.
    pub fn to_owned(&self, types: &TypeRegistry) -> Result<LayoutEntry> {
        let Some(entry_type) = types.get(&self.type_id) else {
            return Err(UnresolvedType(self.type_id));
        };

        if self.size < 0 {
            return Ok(LayoutEntry::Array {
                offset: self.offset,
                size: self.size.unsigned_abs(),
                element_type: entry_type,
                // Like array dimensions, a negative count folds onto its
                // magnitude
                length: self.length.unsigned_abs(),
            });
        }

        if !entry_type.is_class() {
            return Err(InvalidLayoutEntry("not an object".to_string()));
        }

        Ok(LayoutEntry::Object {
            offset: self.offset,
            size: self.size.unsigned_abs(),
            object_type: entry_type,
        })
    }
}

/// A validated layout table entry, describing one instance in the data region.
///
/// Entries reference their [`crate::metadata::typesystem::NativeType`] through
/// the same shared nodes the registry hands out, so the type behind a layout
/// entry is pointer-identical to the one reachable through
/// [`TypeRegistry::get`].
#[derive(Debug, Clone)]
pub enum LayoutEntry {
    /// A single object instance
    Object {
        /// Byte offset inside the instance data region
        offset: i64,
        /// Instance size in bytes
        size: u32,
        /// The resolved type of the instance, always a class
        object_type: NativeTypeRc,
    },
    /// An array instance
    Array {
        /// Byte offset inside the instance data region
        offset: i64,
        /// Total byte size of the array data
        size: u32,
        /// The resolved element type
        element_type: NativeTypeRc,
        /// Number of elements
        length: u32,
    },
}

impl LayoutEntry {
    /// Reads the complete layout table, leading record count included.
    ///
    /// Entries come back in table order, which is the order the writer laid
    /// instances out in the data region. The parser ends up positioned
    /// directly behind the last record. A negative record count yields an
    /// empty table.
    ///
    /// # Errors
    /// Returns an error if a record is truncated or fails validation against
    /// the registry.
    pub fn read_table(parser: &mut Parser, types: &TypeRegistry) -> Result<Vec<LayoutEntry>> {
        let count = parser.read_le::<i32>()?;

        let mut entries = Vec::new();
        for _ in 0..count {
            entries.push(LayoutRaw::read(parser)?.to_owned(types)?);
        }
        Ok(entries)
    }

    /// Returns the byte offset of this instance inside the instance data region
    #[must_use]
    pub fn offset(&self) -> i64 {
        match self {
            LayoutEntry::Object { offset, .. } | LayoutEntry::Array { offset, .. } => *offset,
        }
    }

    /// Returns the instance size in bytes, already folded onto its magnitude
    #[must_use]
    pub fn size(&self) -> u32 {
        match self {
            LayoutEntry::Object { size, .. } | LayoutEntry::Array { size, .. } => *size,
        }
    }

    /// Returns the resolved type, for arrays the element type
    #[must_use]
    pub fn entry_type(&self) -> &NativeTypeRc {
        match self {
            LayoutEntry::Object { object_type, .. } => object_type,
            LayoutEntry::Array { element_type, .. } => element_type,
        }
    }

    /// Returns the element count of an array, `None` for objects
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        match self {
            LayoutEntry::Object { .. } => None,
            LayoutEntry::Array { length, .. } => Some(*length),
        }
    }

    /// Returns `true` if this entry describes an array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, LayoutEntry::Array { .. })
    }

    /// Returns `true` if this entry describes a single object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, LayoutEntry::Object { .. })
    }
}

impl fmt::Display for LayoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutEntry::Object {
                offset,
                size,
                object_type,
            } => {
                write!(
                    f,
                    "object {}: {} bytes at offset {}",
                    object_type.name(),
                    size,
                    offset
                )
            }
            LayoutEntry::Array {
                offset,
                size,
                element_type,
                length,
            } => {
                write!(
                    f,
                    "array {}[{}]: {} bytes at offset {}",
                    element_type.name(),
                    length,
                    size,
                    offset
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::typesystem::NativeType, Error};
    use std::sync::Arc;

    fn push_entry(buffer: &mut Vec<u8>, type_id: i32, offset: i64, size: i32, length: i32) {
        buffer.extend_from_slice(&type_id.to_le_bytes());
        buffer.extend_from_slice(&offset.to_le_bytes());
        buffer.extend_from_slice(&size.to_le_bytes());
        buffer.extend_from_slice(&length.to_le_bytes());
    }

    fn registry() -> TypeRegistry {
        let registry = TypeRegistry::new();
        registry.insert(&Arc::new(NativeType::Class {
            id: TypeId(1),
            name: "Node".to_string(),
            fields: Arc::new(boxcar::Vec::new()),
        }));
        registry.insert(&Arc::new(NativeType::Struct {
            id: TypeId(2),
            name: "Point".to_string(),
            fields: Arc::new(boxcar::Vec::new()),
        }));
        registry.insert(&Arc::new(NativeType::Enum {
            id: TypeId(3),
            name: "Color".to_string(),
            constants: Arc::new(boxcar::Vec::new()),
        }));
        registry
    }

    #[test]
    fn test_read_raw_record() {
        let mut buffer = Vec::new();
        push_entry(&mut buffer, 1, 0x100, -40, 10);

        let mut parser = Parser::new(&buffer);
        let raw = LayoutRaw::read(&mut parser).unwrap();

        assert_eq!(raw.type_id, TypeId(1));
        assert_eq!(raw.offset, 0x100);
        assert_eq!(raw.size, -40);
        assert_eq!(raw.length, 10);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn test_read_truncated_record() {
        let buffer = vec![0x01, 0x00, 0x00, 0x00, 0xFF];
        let mut parser = Parser::new(&buffer);
        assert!(matches!(
            LayoutRaw::read(&mut parser),
            Err(Error::OutOfBounds)
        ));
    }

    #[test]
    fn test_object_entry() {
        let registry = registry();
        let raw = LayoutRaw {
            type_id: TypeId(1),
            offset: 64,
            size: 40,
            length: 1,
        };

        let entry = raw.to_owned(&registry).unwrap();
        assert!(entry.is_object());
        assert!(!entry.is_array());
        assert_eq!(entry.offset(), 64);
        assert_eq!(entry.size(), 40);
        assert_eq!(entry.length(), None);
        assert_eq!(entry.entry_type().name(), "Node");

        // The entry references the registry's node, not a copy
        let node = registry.get(&TypeId(1)).unwrap();
        assert!(Arc::ptr_eq(entry.entry_type(), &node));
    }

    #[test]
    fn test_array_entry_negative_size() {
        let registry = registry();
        let raw = LayoutRaw {
            type_id: TypeId(-3),
            offset: 0,
            size: -40,
            length: 10,
        };

        let entry = raw.to_owned(&registry).unwrap();
        assert!(entry.is_array());
        assert_eq!(entry.size(), 40);
        assert_eq!(entry.length(), Some(10));
        assert_eq!(entry.entry_type().name(), "int");
    }

    #[test]
    fn test_array_of_structs() {
        // Arrays accept any element type, including value types
        let registry = registry();
        let raw = LayoutRaw {
            type_id: TypeId(2),
            offset: 16,
            size: -160,
            length: 20,
        };

        let entry = raw.to_owned(&registry).unwrap();
        assert!(entry.is_array());
        assert_eq!(entry.entry_type().name(), "Point");
    }

    #[test]
    fn test_object_requires_class() {
        let registry = registry();

        for id in [2, 3, -3] {
            let raw = LayoutRaw {
                type_id: TypeId(id),
                offset: 0,
                size: 40,
                length: 1,
            };
            assert!(matches!(
                raw.to_owned(&registry),
                Err(Error::InvalidLayoutEntry(ref message)) if message == "not an object"
            ));
        }
    }

    #[test]
    fn test_unknown_type_id() {
        let registry = registry();
        let raw = LayoutRaw {
            type_id: TypeId(42),
            offset: 0,
            size: 40,
            length: 1,
        };

        assert!(matches!(
            raw.to_owned(&registry),
            Err(Error::UnresolvedType(TypeId(42)))
        ));
    }

    #[test]
    fn test_negative_array_length_folds() {
        let registry = registry();
        let raw = LayoutRaw {
            type_id: TypeId(-1),
            offset: 0,
            size: -8,
            length: -8,
        };

        let entry = raw.to_owned(&registry).unwrap();
        assert_eq!(entry.length(), Some(8));
    }

    #[test]
    fn test_read_table_preserves_order() {
        let registry = registry();

        let mut buffer = Vec::new();
        buffer.extend_from_slice(&3_i32.to_le_bytes());
        push_entry(&mut buffer, 1, 0, 40, 1);
        push_entry(&mut buffer, -3, 40, -80, 20);
        push_entry(&mut buffer, 1, 120, 40, 1);

        let mut parser = Parser::new(&buffer);
        let entries = LayoutEntry::read_table(&mut parser, &registry).unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_object());
        assert!(entries[1].is_array());
        assert!(entries[2].is_object());
        assert_eq!(entries[0].offset(), 0);
        assert_eq!(entries[1].offset(), 40);
        assert_eq!(entries[2].offset(), 120);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn test_read_table_empty_and_negative() {
        let registry = registry();

        let buffer = 0_i32.to_le_bytes().to_vec();
        let mut parser = Parser::new(&buffer);
        assert_eq!(
            LayoutEntry::read_table(&mut parser, &registry)
                .unwrap()
                .len(),
            0
        );

        let buffer = (-2_i32).to_le_bytes().to_vec();
        let mut parser = Parser::new(&buffer);
        assert_eq!(
            LayoutEntry::read_table(&mut parser, &registry)
                .unwrap()
                .len(),
            0
        );
        assert!(!parser.has_more_data());
    }

    #[test]
    fn test_read_table_rejects_bad_entry() {
        let registry = registry();

        let mut buffer = Vec::new();
        buffer.extend_from_slice(&2_i32.to_le_bytes());
        push_entry(&mut buffer, 1, 0, 40, 1);
        push_entry(&mut buffer, 2, 40, 16, 1); // struct as object

        let mut parser = Parser::new(&buffer);
        assert!(matches!(
            LayoutEntry::read_table(&mut parser, &registry),
            Err(Error::InvalidLayoutEntry(_))
        ));
    }

    #[test]
    fn test_display() {
        let registry = registry();

        let object = LayoutRaw {
            type_id: TypeId(1),
            offset: 64,
            size: 40,
            length: 1,
        }
        .to_owned(&registry)
        .unwrap();
        assert_eq!(format!("{}", object), "object Node: 40 bytes at offset 64");

        let array = LayoutRaw {
            type_id: TypeId(-3),
            offset: 0,
            size: -40,
            length: 10,
        }
        .to_owned(&registry)
        .unwrap();
        assert_eq!(format!("{}", array), "array int[10]: 40 bytes at offset 0");
    }
}
