use std::fmt;
use std::hash::{Hash, Hasher};

/// A type identifier referencing an entry of the dump's type table.
///
/// Type ids in NBIN dumps are signed 32-bit values assigned by the writer:
/// - Non-negative ids identify types described in the dump's type table
/// - Negative ids are reserved for the built-in primitive types
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeId(pub i32);

impl TypeId {
    /// Creates a new type id from a raw 32-bit value
    #[must_use]
    pub fn new(value: i32) -> Self {
        TypeId(value)
    }

    /// Returns the raw type id value
    #[must_use]
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns true if this id falls in the range reserved for primitive types
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for TypeId {
    fn from(value: i32) -> Self {
        TypeId(value)
    }
}

impl From<TypeId> for i32 {
    fn from(id: TypeId) -> Self {
        id.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_primitive() {
            write!(f, "TypeId({}, primitive)", self.0)
        } else {
            write!(f, "TypeId({})", self.0)
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for TypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_typeid_new() {
        let id = TypeId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_typeid_value() {
        let id = TypeId(7);
        assert_eq!(id.value(), 7);

        let negative = TypeId(-3);
        assert_eq!(negative.value(), -3);
    }

    #[test]
    fn test_typeid_is_primitive() {
        assert!(TypeId(-1).is_primitive());
        assert!(TypeId(-7).is_primitive());
        assert!(TypeId(-100).is_primitive());

        assert!(!TypeId(0).is_primitive());
        assert!(!TypeId(1).is_primitive());
        assert!(!TypeId(i32::MAX).is_primitive());
    }

    #[test]
    fn test_typeid_from_conversion() {
        let value = 42_i32;
        let id: TypeId = value.into();
        assert_eq!(id.value(), value);

        let back_to_i32: i32 = id.into();
        assert_eq!(back_to_i32, value);
    }

    #[test]
    fn test_typeid_display() {
        let id = TypeId(42);
        assert_eq!(format!("{}", id), "42");

        let negative = TypeId(-3);
        assert_eq!(format!("{}", negative), "-3");
    }

    #[test]
    fn test_typeid_debug() {
        let id = TypeId(42);
        assert_eq!(format!("{:?}", id), "TypeId(42)");

        let primitive = TypeId(-3);
        assert_eq!(format!("{:?}", primitive), "TypeId(-3, primitive)");
    }

    #[test]
    fn test_typeid_equality() {
        let id1 = TypeId(1);
        let id2 = TypeId(1);
        let id3 = TypeId(2);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_typeid_ordering() {
        let primitive = TypeId(-7);
        let id1 = TypeId(0);
        let id2 = TypeId(5);

        assert!(primitive < id1);
        assert!(id1 < id2);
        assert!(primitive < id2);
    }

    #[test]
    fn test_typeid_copy() {
        let id1 = TypeId(3);
        let id2 = id1; // Copy semantics
        assert_eq!(id1, id2);
        // Both should still be usable
        assert_eq!(id1.value(), 3);
        assert_eq!(id2.value(), 3);
    }

    #[test]
    fn test_typeid_hash() {
        let mut map = HashMap::new();
        let id1 = TypeId(1);
        let id2 = TypeId(-3);

        map.insert(id1, "Point");
        map.insert(id2, "int");

        assert_eq!(map.get(&id1), Some(&"Point"));
        assert_eq!(map.get(&id2), Some(&"int"));
    }

    #[test]
    fn test_typeid_boundary_values() {
        let max_id = TypeId(i32::MAX);
        assert!(!max_id.is_primitive());
        assert_eq!(max_id.value(), i32::MAX);

        let min_id = TypeId(i32::MIN);
        assert!(min_id.is_primitive());
        assert_eq!(min_id.value(), i32::MIN);

        let zero = TypeId(0);
        assert!(!zero.is_primitive());
    }
}
