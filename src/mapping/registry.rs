//! Process-wide, append-only per-type caches.
//!
//! Entries are computed once per type on first use and never rebuilt. The
//! `DashMap` entry API holds the shard lock while the value is built, so
//! concurrent first-use callers converge on one instance.
use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use crate::mapping::accessor::{Mappable, PropertyDescriptor, PropertyRegistrar};
use crate::mapping::value::ValueKind;

type Erased = Arc<dyn Any + Send + Sync>;

/// A map from a value type to its single, lazily built instance.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: DashMap<TypeId, Erased>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached `V`, building it with `build` if this is the first request.
    ///
    /// `build` must not call back into the same registry.
    pub fn get_or_build<V, F>(&self, build: F) -> Arc<V>
    where
        V: Any + Send + Sync,
        F: FnOnce() -> V,
    {
        let key = TypeId::of::<V>();

        let cached = self.entries.get(&key).map(|e| Arc::clone(e.value()));
        let erased = match cached {
            Some(existing) => existing,
            None => {
                let entry = self
                    .entries
                    .entry(key)
                    .or_insert_with(|| Arc::new(build()) as Erased);
                Arc::clone(entry.value())
            }
        };

        match erased.downcast::<V>() {
            Ok(value) => value,
            Err(_) => unreachable!("registry entries are keyed by the TypeId of their own value"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The properties a type declares itself, in declaration order.
pub struct PropertyList<T> {
    pub(crate) properties: Vec<PropertyDescriptor<T>>,
}

impl<T> std::fmt::Debug for PropertyList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.properties.iter().map(|p| p.name()))
            .finish()
    }
}

/// Name and declared kind of one property; the introspection view of a
/// [`PropertyList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub kind: ValueKind,
}

static PROPERTIES: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

/// Returns the cached declared-property list of `T`, scanning it on first use.
pub(crate) fn property_list<T: Mappable>() -> Arc<PropertyList<T>> {
    PROPERTIES.get_or_build(|| {
        let mut registrar = PropertyRegistrar::new();
        T::declare(&mut registrar);
        PropertyList {
            properties: registrar.into_properties(),
        }
    })
}

/// Lists the properties `T` declares directly, in declaration order.
pub fn declared_properties<T: Mappable>() -> Vec<PropertyInfo> {
    property_list::<T>()
        .properties
        .iter()
        .map(|p| PropertyInfo {
            name: p.name(),
            kind: p.kind(),
        })
        .collect()
}
