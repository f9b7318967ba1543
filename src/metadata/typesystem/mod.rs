//! Type system for NBIN object dumps.
//!
//! This module turns the flat type table of a dump into a connected graph of
//! [`NativeType`] nodes that field and layout references can be followed
//! through. Types in a dump reference each other by numeric id, in any order,
//! and may form cycles (a class holding a field of its own type is common),
//! so construction happens in two phases:
//!
//! 1. **Raw parsing** - [`NativeTypeRaw`] reads the type table records
//!    exactly as written, with fields still pointing at unresolved
//!    [`crate::metadata::typeid::TypeId`]s.
//! 2. **Resolution** - [`TypeResolver`] walks the raw records and links them
//!    into shared [`NativeTypeRc`] nodes inside a [`TypeRegistry`],
//!    registering each type before descending into its fields so cycles
//!    terminate naturally.
//!
//! # Key Components
//!
//! - [`NativeType`]: A fully resolved type - primitive, enum, struct or class
//! - [`NativeField`]: A resolved field, either a plain value or an array
//! - [`PrimitiveKind`]: The seven built-in primitives with reserved negative ids
//! - [`TypeRegistry`]: Concurrent id- and name-indexed storage for resolved types
//! - [`TypeResolver`]: Two-phase linker from raw records to the resolved graph
//!
//! # Examples
//!
//! ```rust
//! use nbinscope::metadata::typeid::TypeId;
//! use nbinscope::metadata::typesystem::{
//!     NativeFieldRaw, NativeTypeRaw, TypeKind, TypeRegistry, TypeResolver,
//! };
//! use std::sync::Arc;
//!
//! let raw = NativeTypeRaw {
//!     id: TypeId(0),
//!     name: "Point".to_string(),
//!     kind: TypeKind::Struct,
//!     fields: vec![
//!         NativeFieldRaw { name: "x".to_string(), dims: 0, type_id: TypeId(-3) },
//!         NativeFieldRaw { name: "y".to_string(), dims: 0, type_id: TypeId(-3) },
//!     ],
//!     constants: Vec::new(),
//! };
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let resolver = TypeResolver::new(registry.clone(), vec![raw]);
//!
//! let point = resolver.resolve(TypeId(0))?;
//! assert_eq!(point.name(), "Point");
//! assert_eq!(point.fields().map(|fields| fields.count()), Some(2));
//! # Ok::<(), nbinscope::Error>(())
//! ```

mod primitives;
mod raw;
mod registry;
mod resolver;

pub use primitives::PrimitiveKind;
pub use raw::{NativeFieldRaw, NativeTypeRaw, TypeKind};
pub use registry::TypeRegistry;
pub use resolver::TypeResolver;

use crate::metadata::typeid::TypeId;
use std::{fmt, sync::Arc};

/// Reference to a `NativeType`
pub type NativeTypeRc = Arc<NativeType>;
/// Reference to a `NativeField`
pub type NativeFieldRc = Arc<NativeField>;
/// A shared, append-only list of resolved fields
pub type FieldList = Arc<boxcar::Vec<NativeFieldRc>>;
/// A shared, append-only list of enum constants
pub type EnumConstantList = Arc<boxcar::Vec<EnumConstant>>;

/// A fully resolved type from an NBIN dump.
///
/// Every variant carries the [`TypeId`] the dump assigned to it. Struct and
/// class nodes hand out their fields behind a shared [`FieldList`], which
/// lets the resolver register a type before its fields are linked in - the
/// mechanism that makes recursive and mutually recursive types safe to
/// resolve.
///
/// Nodes are always handed out as [`NativeTypeRc`], so a type that appears
/// in many field lists is stored once; reference identity (via
/// [`Arc::ptr_eq`]) identifies it across the whole graph.
pub enum NativeType {
    /// One of the seven built-in primitives, seeded with a reserved negative id
    Primitive {
        /// Reserved id of the primitive, always negative
        id: TypeId,
        /// Which primitive this is
        kind: PrimitiveKind,
    },
    /// An enumeration with named integer constants
    Enum {
        /// Id assigned by the dump's type table
        id: TypeId,
        /// Name recorded in the type table
        name: String,
        /// The named constants, in table order
        constants: EnumConstantList,
    },
    /// A value type with fields
    Struct {
        /// Id assigned by the dump's type table
        id: TypeId,
        /// Name recorded in the type table
        name: String,
        /// Resolved fields, in table order
        fields: FieldList,
    },
    /// A reference type with fields
    Class {
        /// Id assigned by the dump's type table
        id: TypeId,
        /// Name recorded in the type table
        name: String,
        /// Resolved fields, in table order
        fields: FieldList,
    },
}

impl NativeType {
    /// Returns the type id the dump assigned to this type
    #[must_use]
    pub fn id(&self) -> TypeId {
        match self {
            NativeType::Primitive { id, .. }
            | NativeType::Enum { id, .. }
            | NativeType::Struct { id, .. }
            | NativeType::Class { id, .. } => *id,
        }
    }

    /// Returns the name of this type, as a writer would spell it
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            NativeType::Primitive { kind, .. } => kind.name(),
            NativeType::Enum { name, .. }
            | NativeType::Struct { name, .. }
            | NativeType::Class { name, .. } => name,
        }
    }

    /// Returns `true` if this is a built-in primitive
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, NativeType::Primitive { .. })
    }

    /// Returns `true` if this is an enumeration
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self, NativeType::Enum { .. })
    }

    /// Returns `true` if this is a value type
    #[must_use]
    pub fn is_struct(&self) -> bool {
        matches!(self, NativeType::Struct { .. })
    }

    /// Returns `true` if this is a reference type
    #[must_use]
    pub fn is_class(&self) -> bool {
        matches!(self, NativeType::Class { .. })
    }

    /// Returns the field list of a struct or class, `None` for primitives and enums
    #[must_use]
    pub fn fields(&self) -> Option<&FieldList> {
        match self {
            NativeType::Struct { fields, .. } | NativeType::Class { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Returns the constants of an enum, `None` for everything else
    #[must_use]
    pub fn constants(&self) -> Option<&EnumConstantList> {
        match self {
            NativeType::Enum { constants, .. } => Some(constants),
            _ => None,
        }
    }

    /// Returns the primitive kind, `None` for table-described types
    #[must_use]
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            NativeType::Primitive { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Primitive { kind, .. } => write!(f, "{}", kind),
            NativeType::Enum { name, .. } => write!(f, "enum {}", name),
            NativeType::Struct { name, .. } => write!(f, "struct {}", name),
            NativeType::Class { name, .. } => write!(f, "class {}", name),
        }
    }
}

// Shallow on purpose, the type graph may contain cycles.
impl fmt::Debug for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Primitive { id, kind } => f
                .debug_struct("Primitive")
                .field("id", id)
                .field("kind", kind)
                .finish(),
            NativeType::Enum {
                id,
                name,
                constants,
            } => f
                .debug_struct("Enum")
                .field("id", id)
                .field("name", name)
                .field("constants", &constants.count())
                .finish(),
            NativeType::Struct { id, name, fields } => f
                .debug_struct("Struct")
                .field("id", id)
                .field("name", name)
                .field("fields", &fields.count())
                .finish(),
            NativeType::Class { id, name, fields } => f
                .debug_struct("Class")
                .field("id", id)
                .field("name", name)
                .field("fields", &fields.count())
                .finish(),
        }
    }
}

/// A resolved field of a struct or class.
///
/// Array fields keep their dimension count and reference their component
/// type directly; the dump's type table never describes array types as
/// separate entries.
pub enum NativeField {
    /// A plain value field
    Value {
        /// Field name recorded in the type table
        name: String,
        /// The resolved type of the field
        field_type: NativeTypeRc,
    },
    /// An array field of one or more dimensions
    Array {
        /// Field name recorded in the type table
        name: String,
        /// Number of array dimensions
        dims: u32,
        /// The resolved component type
        component: NativeTypeRc,
    },
}

impl NativeField {
    /// Returns the name of this field
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            NativeField::Value { name, .. } | NativeField::Array { name, .. } => name,
        }
    }

    /// Returns the resolved type, for arrays the component type
    #[must_use]
    pub fn field_type(&self) -> &NativeTypeRc {
        match self {
            NativeField::Value { field_type, .. } => field_type,
            NativeField::Array { component, .. } => component,
        }
    }

    /// Returns the number of array dimensions, `0` for plain value fields
    #[must_use]
    pub fn dims(&self) -> u32 {
        match self {
            NativeField::Value { .. } => 0,
            NativeField::Array { dims, .. } => *dims,
        }
    }

    /// Returns `true` if this field is an array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, NativeField::Array { .. })
    }
}

impl fmt::Display for NativeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeField::Value { name, field_type } => {
                write!(f, "{}: {}", name, field_type.name())
            }
            NativeField::Array {
                name,
                dims,
                component,
            } => {
                write!(f, "{}: {}", name, component.name())?;
                for _ in 0..*dims {
                    write!(f, "[]")?;
                }
                Ok(())
            }
        }
    }
}

// Shallow on purpose, the component may sit inside a cycle.
impl fmt::Debug for NativeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeField::Value { name, field_type } => f
                .debug_struct("Value")
                .field("name", name)
                .field("type", &field_type.name())
                .finish(),
            NativeField::Array {
                name,
                dims,
                component,
            } => f
                .debug_struct("Array")
                .field("name", name)
                .field("dims", dims)
                .field("component", &component.name())
                .finish(),
        }
    }
}

/// A named integer constant of an enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    /// Constant name recorded in the type table
    pub name: String,
    /// Constant value recorded in the type table
    pub value: i32,
}
