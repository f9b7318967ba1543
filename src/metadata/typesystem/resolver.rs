use std::{collections::HashMap, sync::Arc};

use crate::{
    metadata::{
        typeid::TypeId,
        typesystem::{
            EnumConstantList, FieldList, NativeField, NativeType, NativeTypeRaw, NativeTypeRc,
            TypeKind, TypeRegistry,
        },
    },
    Error::{RecursionLimit, UnresolvedType},
    Result,
};

/// Maximum recursion depth for type graph resolution
const MAX_RECURSION_DEPTH: usize = 100;

/// Links raw type table records into the resolved type graph.
///
/// Resolution is cycle-safe: before a struct or class descends into its
/// fields, an empty shell is registered under its id, so any reference back
/// to the type (directly or through other types) resolves to that shell and
/// terminates. Enums carry no type references and are built in one step.
pub struct TypeResolver {
    /// The registry resolved types are linked into
    registry: Arc<TypeRegistry>,
    /// Unresolved records, indexed by id
    raw_types: HashMap<TypeId, NativeTypeRaw>,
}

impl TypeResolver {
    /// Create a new resolver over the given raw type table
    ///
    /// ## Arguments
    /// * 'registry' - The registry resolved types are inserted into
    /// * 'raw_types' - The raw records of the dump's type table
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>, raw_types: Vec<NativeTypeRaw>) -> Self {
        let mut indexed = HashMap::with_capacity(raw_types.len());
        for raw in raw_types {
            // A writer emitting the same id twice is broken, keep the
            // later record consistent with sequential table reading
            indexed.insert(raw.id, raw);
        }

        TypeResolver {
            registry,
            raw_types: indexed,
        }
    }

    /// Resolve a type id to its linked type
    ///
    /// ## Arguments
    /// * 'id' - The id to resolve
    ///
    /// # Errors
    /// Returns an error if:
    /// - The id has neither a table record nor a primitive seed
    /// - A field references an id that cannot be resolved
    /// - Recursion depth exceeds the maximum limit
    pub fn resolve(&self, id: TypeId) -> Result<NativeTypeRc> {
        self.resolve_with_depth(id, 0)
    }

    /// Resolve every record of the type table
    ///
    /// # Errors
    /// Returns the first resolution failure encountered
    pub fn resolve_all(&self) -> Result<()> {
        for id in self.raw_types.keys() {
            self.resolve_with_depth(*id, 0)?;
        }
        Ok(())
    }

    /// Internal recursive resolver with depth tracking
    ///
    /// ## Arguments
    /// * 'id'      - The id to resolve
    /// * 'depth'   - Indicator of recursion level
    fn resolve_with_depth(&self, id: TypeId, depth: usize) -> Result<NativeTypeRc> {
        // Primitives, fully resolved types and shells of types currently
        // being resolved all come out of the registry, which is what makes
        // cyclic references terminate
        if let Some(existing) = self.registry.get(&id) {
            return Ok(existing);
        }

        if depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let Some(raw) = self.raw_types.get(&id) else {
            return Err(UnresolvedType(id));
        };

        match raw.kind {
            TypeKind::Enum => {
                let constants = boxcar::Vec::new();
                for constant in &raw.constants {
                    constants.push(constant.clone());
                }

                let enum_type: NativeTypeRc = Arc::new(NativeType::Enum {
                    id: raw.id,
                    name: raw.name.clone(),
                    constants: Arc::new(constants),
                });
                self.registry.insert(&enum_type);
                Ok(enum_type)
            }
            TypeKind::Struct | TypeKind::Class => {
                let fields: FieldList = Arc::new(boxcar::Vec::new());
                let shell: NativeTypeRc = if raw.kind == TypeKind::Struct {
                    Arc::new(NativeType::Struct {
                        id: raw.id,
                        name: raw.name.clone(),
                        fields: fields.clone(),
                    })
                } else {
                    Arc::new(NativeType::Class {
                        id: raw.id,
                        name: raw.name.clone(),
                        fields: fields.clone(),
                    })
                };

                // Register the shell before descending, field types may
                // reference this very type
                self.registry.insert(&shell);

                for raw_field in &raw.fields {
                    let resolved = self.resolve_with_depth(raw_field.type_id, depth + 1)?;
                    let field = if raw_field.dims == 0 {
                        NativeField::Value {
                            name: raw_field.name.clone(),
                            field_type: resolved,
                        }
                    } else {
                        NativeField::Array {
                            name: raw_field.name.clone(),
                            dims: raw_field.dims,
                            component: resolved,
                        }
                    };
                    fields.push(Arc::new(field));
                }

                Ok(shell)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::typesystem::{EnumConstant, NativeFieldRaw, PrimitiveKind},
        Error,
    };

    fn field(name: &str, type_id: i32) -> NativeFieldRaw {
        NativeFieldRaw {
            name: name.to_string(),
            dims: 0,
            type_id: TypeId(type_id),
        }
    }

    fn raw_struct(id: i32, name: &str, fields: Vec<NativeFieldRaw>) -> NativeTypeRaw {
        NativeTypeRaw {
            id: TypeId(id),
            name: name.to_string(),
            kind: TypeKind::Struct,
            fields,
            constants: Vec::new(),
        }
    }

    fn raw_class(id: i32, name: &str, fields: Vec<NativeFieldRaw>) -> NativeTypeRaw {
        NativeTypeRaw {
            kind: TypeKind::Class,
            ..raw_struct(id, name, fields)
        }
    }

    #[test]
    fn test_resolve_primitive() {
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), Vec::new());
        let int = resolver.resolve(TypeId(-3)).unwrap();
        assert_eq!(int.primitive_kind(), Some(PrimitiveKind::Int));
    }

    #[test]
    fn test_resolve_struct_with_primitive_fields() {
        let raws = vec![raw_struct(
            0,
            "Point",
            vec![field("x", -3), field("y", -3)],
        )];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let point = resolver.resolve(TypeId(0)).unwrap();
        assert!(point.is_struct());
        assert_eq!(point.name(), "Point");

        let fields = point.fields().unwrap();
        assert_eq!(fields.count(), 2);
        assert_eq!(fields.get(0).unwrap().name(), "x");
        assert_eq!(fields.get(1).unwrap().field_type().name(), "int");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let raws = vec![raw_struct(0, "Point", vec![field("x", -3)])];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let first = resolver.resolve(TypeId(0)).unwrap();
        let second = resolver.resolve(TypeId(0)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.fields().unwrap().count(), 1);
    }

    #[test]
    fn test_resolve_self_referential_class() {
        let raws = vec![raw_class(
            1,
            "Node",
            vec![field("value", -3), field("next", 1)],
        )];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let node = resolver.resolve(TypeId(1)).unwrap();
        let fields = node.fields().unwrap();
        assert_eq!(fields.count(), 2);

        let next = fields.get(1).unwrap();
        assert!(Arc::ptr_eq(next.field_type(), &node));
    }

    #[test]
    fn test_resolve_mutual_recursion() {
        let raws = vec![
            raw_class(1, "Parent", vec![field("child", 2)]),
            raw_class(2, "Child", vec![field("parent", 1)]),
        ];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let parent = resolver.resolve(TypeId(1)).unwrap();
        let child = resolver.resolve(TypeId(2)).unwrap();

        let down = parent.fields().unwrap().get(0).unwrap();
        let up = child.fields().unwrap().get(0).unwrap();
        assert!(Arc::ptr_eq(down.field_type(), &child));
        assert!(Arc::ptr_eq(up.field_type(), &parent));
    }

    #[test]
    fn test_resolve_enum() {
        let raws = vec![NativeTypeRaw {
            id: TypeId(4),
            name: "Color".to_string(),
            kind: TypeKind::Enum,
            fields: Vec::new(),
            constants: vec![
                EnumConstant {
                    name: "Red".to_string(),
                    value: 0,
                },
                EnumConstant {
                    name: "Green".to_string(),
                    value: 1,
                },
            ],
        }];
        let registry = Arc::new(TypeRegistry::new());
        let resolver = TypeResolver::new(registry.clone(), raws);

        let color = resolver.resolve(TypeId(4)).unwrap();
        assert!(color.is_enum());
        assert_eq!(color.constants().unwrap().count(), 2);

        // The registered instance is the complete one
        let registered = registry.get(&TypeId(4)).unwrap();
        assert!(Arc::ptr_eq(&registered, &color));
        assert_eq!(registered.constants().unwrap().count(), 2);
    }

    #[test]
    fn test_resolve_array_field() {
        let raws = vec![raw_class(
            3,
            "Matrix",
            vec![NativeFieldRaw {
                name: "cells".to_string(),
                dims: 2,
                type_id: TypeId(-6),
            }],
        )];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let matrix = resolver.resolve(TypeId(3)).unwrap();
        let cells = matrix.fields().unwrap().get(0).unwrap();
        assert!(cells.is_array());
        assert_eq!(cells.dims(), 2);
        assert_eq!(cells.field_type().name(), "double");
    }

    #[test]
    fn test_resolve_unknown_id() {
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), Vec::new());
        let result = resolver.resolve(TypeId(99));
        assert!(matches!(result, Err(Error::UnresolvedType(id)) if id == TypeId(99)));
    }

    #[test]
    fn test_resolve_unknown_field_reference() {
        let raws = vec![raw_struct(0, "Broken", vec![field("missing", 42)])];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let result = resolver.resolve(TypeId(0));
        assert!(matches!(result, Err(Error::UnresolvedType(id)) if id == TypeId(42)));
    }

    #[test]
    fn test_resolve_recursion_limit() {
        // A chain of 150 distinct struct types, each holding the next by
        // value, there is no cycle the shell mechanism could terminate
        let mut raws = Vec::new();
        for i in 0..150 {
            raws.push(raw_struct(i, &format!("Deep{}", i), vec![field("inner", i + 1)]));
        }
        raws.push(raw_struct(150, "Leaf", vec![field("value", -3)]));

        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);
        let result = resolver.resolve(TypeId(0));
        assert!(matches!(result, Err(Error::RecursionLimit(limit)) if limit == 100));
    }

    #[test]
    fn test_resolve_all() {
        let raws = vec![
            raw_struct(0, "Point", vec![field("x", -3), field("y", -3)]),
            raw_class(1, "Node", vec![field("next", 1)]),
        ];
        let registry = Arc::new(TypeRegistry::new());
        let resolver = TypeResolver::new(registry.clone(), raws);

        resolver.resolve_all().unwrap();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.get_by_name("Point").len(), 1);
        assert_eq!(registry.get_by_name("Node").len(), 1);
    }

    #[test]
    fn test_duplicate_record_ids_keep_last() {
        let raws = vec![
            raw_struct(0, "First", Vec::new()),
            raw_struct(0, "Second", Vec::new()),
        ];
        let resolver = TypeResolver::new(Arc::new(TypeRegistry::new()), raws);

        let resolved = resolver.resolve(TypeId(0)).unwrap();
        assert_eq!(resolved.name(), "Second");
    }
}
