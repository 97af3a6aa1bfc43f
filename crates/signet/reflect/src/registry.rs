//! Type registry and assignability

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::types::{TypeDescriptor, TypeRef};

/// Registered types, by fully qualified name.
///
/// Immutable once handed to a resolver; share it through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous description under the same name
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        self.types
            .insert(descriptor.name().to_string(), Arc::new(descriptor))
    }

    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether a slot declared as `target` accepts a value whose runtime type is `source`.
    ///
    /// Boxing is not considered here; the resolver applies the boxed-to-primitive
    /// rule on top of this check.
    pub fn is_assignable(&self, target: &TypeRef, source: &TypeRef) -> bool {
        if target == source {
            return true;
        }
        match (target, source) {
            (TypeRef::Any, source) => !source.is_primitive(),
            (TypeRef::Named(target), TypeRef::Named(source)) => self.is_subtype(source, target),
            // reference arrays are covariant; primitive arrays only match exactly
            (TypeRef::Array(target), TypeRef::Array(source)) => {
                !target.is_primitive()
                    && !source.is_primitive()
                    && self.is_assignable(target, source)
            }
            _ => false,
        }
    }

    /// Walk superclasses and interfaces of `sub` looking for `sup`
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        let mut pending = vec![sub];
        let mut seen = BTreeSet::new();
        while let Some(name) = pending.pop() {
            if name == sup {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            if let Some(desc) = self.types.get(name) {
                pending.extend(desc.superclass());
                pending.extend(desc.interfaces().iter().map(String::as_str));
            }
        }
        false
    }
}
