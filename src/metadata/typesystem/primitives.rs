use strum::{EnumCount, EnumIter};

use crate::metadata::typeid::TypeId;
use std::fmt;

/// The built-in primitive types every NBIN dump can reference.
///
/// Primitive types are never described in a dump's type table. Writers assign
/// them fixed negative type ids, and readers are expected to know them up
/// front. Field and array element references resolve against these ids the
/// same way they resolve against table-described types.
///
/// ## Instance Encoding
///
/// All primitives are stored little-endian in the instance data region.
/// [`PrimitiveKind::Boolean`] is the one irregular case: it occupies two
/// bytes of which only the first is interpreted (any non-zero value is
/// `true`), the second byte is padding.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
#[repr(i32)]
pub enum PrimitiveKind {
    /// `byte` (id -1) - Signed 8-bit integer, 1 byte in the instance stream.
    Byte = -1,

    /// `short` (id -2) - Signed 16-bit integer, 2 bytes in the instance stream.
    Short = -2,

    /// `int` (id -3) - Signed 32-bit integer, 4 bytes in the instance stream.
    Int = -3,

    /// `long` (id -4) - Signed 64-bit integer, 8 bytes in the instance stream.
    Long = -4,

    /// `float` (id -5) - IEEE 754 single precision, 4 bytes in the instance stream.
    Float = -5,

    /// `double` (id -6) - IEEE 754 double precision, 8 bytes in the instance stream.
    Double = -6,

    /// `boolean` (id -7) - Two bytes in the instance stream, only the first is interpreted.
    Boolean = -7,
}

impl PrimitiveKind {
    /// Returns the reserved type id of this primitive
    #[must_use]
    pub fn id(&self) -> TypeId {
        TypeId(*self as i32)
    }

    /// Returns the name writers use for this primitive
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Boolean => "boolean",
        }
    }

    /// Returns the number of bytes this primitive occupies in the instance stream
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            PrimitiveKind::Byte => 1,
            PrimitiveKind::Short | PrimitiveKind::Boolean => 2,
            PrimitiveKind::Int | PrimitiveKind::Float => 4,
            PrimitiveKind::Long | PrimitiveKind::Double => 8,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
