//! Raw type table records, read exactly as the writer emitted them.
//!
//! The type table is a flat sequence of records whose field and element
//! references are numeric [`TypeId`]s that may point at records appearing
//! later in the table, or back at the record itself. Nothing is linked at
//! this stage; [`crate::metadata::typesystem::TypeResolver`] performs the
//! id-to-type linking in a second phase.

use crate::{
    file::parser::Parser,
    metadata::{typeid::TypeId, typesystem::EnumConstant},
    Result,
};

/// The structural kind a type table record declares.
///
/// Writers encode `1` for value types and `2` for enumerations. Everything
/// else (writers emit `0`) is a reference type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A reference type
    Class,
    /// A value type
    Struct,
    /// An enumeration
    Enum,
}

impl TypeKind {
    /// Maps a type table kind code onto the structural kind
    #[must_use]
    pub fn from_code(code: u8) -> TypeKind {
        match code {
            1 => TypeKind::Struct,
            2 => TypeKind::Enum,
            _ => TypeKind::Class,
        }
    }
}

/// An unresolved field reference from a type table record
#[derive(Debug, Clone, PartialEq)]
pub struct NativeFieldRaw {
    /// Field name recorded in the table
    pub name: String,
    /// Number of array dimensions, `0` for plain value fields
    pub dims: u32,
    /// The referenced type id, not resolved yet
    pub type_id: TypeId,
}

/// One type table record with its references still unresolved
#[derive(Debug, Clone, PartialEq)]
pub struct NativeTypeRaw {
    /// Id the writer assigned to this type
    pub id: TypeId,
    /// Name recorded in the table
    pub name: String,
    /// Structural kind declared by the record
    pub kind: TypeKind,
    /// Field records, empty for enums
    pub fields: Vec<NativeFieldRaw>,
    /// Constant records, empty for everything but enums
    pub constants: Vec<EnumConstant>,
}

impl NativeTypeRaw {
    /// Reads a single type table record at the parser's current position.
    ///
    /// A negative member count yields a record with no members; the writer
    /// never emits one, but a reader has nothing to gain from rejecting it.
    ///
    /// # Errors
    /// Returns an error if the record is truncated or a name is not valid
    /// UTF-8.
    pub fn read(parser: &mut Parser) -> Result<NativeTypeRaw> {
        // Each record carries its encoded size up front, walking the
        // members makes it redundant
        parser.read_le::<i32>()?;

        let id = TypeId(parser.read_le::<i32>()?);
        let name = parser.read_prefixed_string_utf8()?;
        let kind = TypeKind::from_code(parser.read_le::<u8>()?);
        let count = parser.read_le::<i32>()?;

        let mut fields = Vec::new();
        let mut constants = Vec::new();
        match kind {
            TypeKind::Enum => {
                for _ in 0..count {
                    let name = parser.read_prefixed_string_utf8()?;
                    let value = parser.read_le::<i32>()?;
                    constants.push(EnumConstant { name, value });
                }
            }
            TypeKind::Struct | TypeKind::Class => {
                for _ in 0..count {
                    let name = parser.read_prefixed_string_utf8()?;
                    let dims = parser.read_le::<i32>()?.unsigned_abs();
                    let type_id = TypeId(parser.read_le::<i32>()?);
                    fields.push(NativeFieldRaw {
                        name,
                        dims,
                        type_id,
                    });
                }
            }
        }

        Ok(NativeTypeRaw {
            id,
            name,
            kind,
            fields,
            constants,
        })
    }

    /// Reads the complete type table, leading record count included.
    ///
    /// The parser ends up positioned directly behind the last record. A
    /// negative record count yields an empty table.
    ///
    /// # Errors
    /// Returns an error if any record is truncated or carries an invalid
    /// name.
    pub fn read_table(parser: &mut Parser) -> Result<Vec<NativeTypeRaw>> {
        let count = parser.read_le::<i32>()?;

        let mut records = Vec::new();
        for _ in 0..count {
            records.push(NativeTypeRaw::read(parser)?);
        }
        Ok(records)
    }
}
