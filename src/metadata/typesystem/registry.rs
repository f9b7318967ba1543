//! Central type registry for decoded NBIN dumps.
//!
//! This module provides the [`TypeRegistry`], the id- and name-indexed store
//! every resolved [`crate::metadata::typesystem::NativeType`] lands in. The
//! registry is the single source of truth for type identity: resolving a
//! type id twice hands out the same [`NativeTypeRc`], which is what keeps
//! recursive type graphs consistent.
//!
//! # Registry Architecture
//!
//! Lookups run against two indices:
//!
//! - **Id-based lookup**: Primary index keyed by [`TypeId`], ordered, so
//!   iteration walks primitives (negative ids) before table-described types
//! - **Name-based lookup**: Secondary index from type name to ids; names in
//!   a dump are not required to be unique
//!
//! # Thread Safety
//!
//! Storage uses lock-free structures throughout (`SkipMap` for the primary
//! index, `DashMap` for the name index), so readers never block while a
//! resolver thread is still inserting.
//!
//! # Examples
//!
//! ```rust
//! use nbinscope::metadata::typesystem::{PrimitiveKind, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//!
//! // Freshly created registries carry the seven built-in primitives
//! assert_eq!(registry.len(), 7);
//!
//! let int = registry.get_primitive(PrimitiveKind::Int)?;
//! assert_eq!(int.name(), "int");
//! # Ok::<(), nbinscope::Error>(())
//! ```

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        typeid::TypeId,
        typesystem::{NativeType, NativeTypeRc, PrimitiveKind},
    },
    Error::UnresolvedType,
    Result,
};

/// Thread-safe registry of all resolved types of a dump.
///
/// A new registry starts out seeded with the seven built-in primitives under
/// their reserved negative ids, so primitive references resolve without the
/// dump having to describe them. Insertion is first-write-wins: once an id
/// is registered, later inserts for the same id are ignored. The resolver
/// relies on this to register a shell type before linking its fields.
pub struct TypeRegistry {
    /// Primary index, ordered by type id
    types: SkipMap<TypeId, NativeTypeRc>,
    /// Name index, type names need not be unique in a dump
    types_by_name: DashMap<String, Vec<TypeId>>,
}

impl TypeRegistry {
    /// Creates a registry seeded with the built-in primitive types
    #[must_use]
    pub fn new() -> Self {
        let registry = TypeRegistry {
            types: SkipMap::new(),
            types_by_name: DashMap::new(),
        };
        registry.initialize_primitives();
        registry
    }

    /// Seeds the reserved negative ids with their primitive types
    fn initialize_primitives(&self) {
        for kind in PrimitiveKind::iter() {
            self.insert(&Arc::new(NativeType::Primitive { id: kind.id(), kind }));
        }
    }

    /// Registers a type under its id, first write wins.
    ///
    /// Re-registering an already present id is a no-op, the registry keeps
    /// handing out the first instance so reference identity stays stable.
    pub fn insert(&self, entry: &NativeTypeRc) {
        let id = entry.id();
        if self.types.contains_key(&id) {
            return;
        }

        self.types.insert(id, entry.clone());
        self.types_by_name
            .entry(entry.name().to_string())
            .or_default()
            .push(id);
    }

    /// Looks up a type by its id
    #[must_use]
    pub fn get(&self, id: &TypeId) -> Option<NativeTypeRc> {
        self.types.get(id).map(|entry| entry.value().clone())
    }

    /// Looks up one of the built-in primitives.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedType`] if the primitive was never
    /// seeded, which cannot happen for registries created through
    /// [`TypeRegistry::new`].
    pub fn get_primitive(&self, kind: PrimitiveKind) -> Result<NativeTypeRc> {
        self.get(&kind.id()).ok_or(UnresolvedType(kind.id()))
    }

    /// Returns all types registered under the given name, in insertion order
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Vec<NativeTypeRc> {
        match self.types_by_name.get(name) {
            Some(ids) => ids.iter().filter_map(|id| self.get(id)).collect(),
            None => Vec::new(),
        }
    }

    /// Returns the number of registered types, primitives included
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the registry holds no types
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates all types in ascending id order
    pub fn iter(&self) -> crossbeam_skiplist::map::Iter<'_, TypeId, NativeTypeRc> {
        self.types.iter()
    }

    /// Collects all registered types into a vector, in ascending id order
    #[must_use]
    pub fn all_types(&self) -> Vec<NativeTypeRc> {
        self.types
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
