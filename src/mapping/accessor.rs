//! Accessor compiler: per-type getter/setter tables built once and reused.
//!
//! A type describes the properties it declares itself through [`Mappable`].
//! The first request for a type's [`AccessorSet`] turns that description into
//! boxed accessors; every later request returns the same `Arc`.
use std::sync::{Arc, LazyLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::mapping::error::{MappingError, MappingResult};
use crate::mapping::registry::{TypeRegistry, property_list};
use crate::mapping::value::{DeclaredType, ValueKind};

/// Reads one property, boxed as an untyped value.
pub type Getter<T> = Arc<dyn Fn(&T) -> MappingResult<Value> + Send + Sync>;

/// Assigns one property from an untyped value that already matches the
/// declared kind.
pub type Setter<T> = Arc<dyn Fn(&mut T, Value) -> MappingResult<()> + Send + Sync>;

/// A type whose own (directly declared) properties can travel in a data bag.
///
/// Base entities declare nothing: their fields are mapped explicitly. A
/// subtype declares only the fields it adds on top of the base it embeds.
pub trait Mappable: Send + Sync + 'static {
    fn declare(properties: &mut PropertyRegistrar<Self>)
    where
        Self: Sized;
}

/// One declared property of `T`.
pub struct PropertyDescriptor<T> {
    name: &'static str,
    kind: ValueKind,
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T> PropertyDescriptor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

/// Collects the property declarations of one type.
pub struct PropertyRegistrar<T> {
    properties: Vec<PropertyDescriptor<T>>,
}

impl<T: 'static> PropertyRegistrar<T> {
    pub(crate) fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Declares a field reachable through the two projections.
    ///
    /// Declaring the same name twice keeps the last declaration.
    pub fn field<F>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> &mut Self
    where
        F: Serialize + DeserializeOwned + DeclaredType + 'static,
    {
        let getter: Getter<T> = Arc::new(move |entity: &T| {
            serde_json::to_value(get(entity)).map_err(|source| MappingError::Serialize {
                property: name.to_string(),
                source,
            })
        });

        let setter: Setter<T> = Arc::new(move |entity: &mut T, value: Value| {
            let typed: F =
                serde_json::from_value(value).map_err(|source| MappingError::Deserialize {
                    property: name.to_string(),
                    source,
                })?;
            *get_mut(entity) = typed;
            Ok(())
        });

        self.properties.retain(|p| p.name != name);
        self.properties.push(PropertyDescriptor {
            name,
            kind: F::KIND,
            getter,
            setter,
        });
        self
    }

    pub(crate) fn into_properties(self) -> Vec<PropertyDescriptor<T>> {
        self.properties
    }
}

/// A setter together with the kind its property was declared with.
pub struct TypedSetter<T> {
    pub setter: Setter<T>,
    pub kind: ValueKind,
}

impl<T> Clone for TypedSetter<T> {
    fn clone(&self) -> Self {
        Self {
            setter: Arc::clone(&self.setter),
            kind: self.kind,
        }
    }
}

/// The compiled accessor table of one type.
pub struct AccessorSet<T> {
    getters: Vec<(&'static str, Getter<T>)>,
    setters: Vec<(&'static str, TypedSetter<T>)>,
}

impl<T> std::fmt::Debug for AccessorSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorSet")
            .field("properties", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> AccessorSet<T> {
    pub fn getters(&self) -> impl Iterator<Item = (&'static str, &Getter<T>)> {
        self.getters.iter().map(|(name, g)| (*name, g))
    }

    pub fn setters(&self) -> impl Iterator<Item = (&'static str, &TypedSetter<T>)> {
        self.setters.iter().map(|(name, s)| (*name, s))
    }

    pub fn getter(&self, name: &str) -> Option<&Getter<T>> {
        self.getters.iter().find(|(n, _)| *n == name).map(|(_, g)| g)
    }

    pub fn setter(&self, name: &str) -> Option<&TypedSetter<T>> {
        self.setters.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.getters.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.getters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty()
    }
}

static ACCESSORS: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

/// Returns the accessor set of `T`, compiling it on first use.
///
/// Idempotent: every call for the same type returns the same `Arc`.
pub fn accessors<T: Mappable>() -> Arc<AccessorSet<T>> {
    ACCESSORS.get_or_build(|| {
        let declared = property_list::<T>();
        AccessorSet {
            getters: declared
                .properties
                .iter()
                .map(|p| (p.name, Arc::clone(&p.getter)))
                .collect(),
            setters: declared
                .properties
                .iter()
                .map(|p| {
                    (
                        p.name,
                        TypedSetter {
                            setter: Arc::clone(&p.setter),
                            kind: p.kind,
                        },
                    )
                })
                .collect(),
        }
    })
}

/// Implements [`Mappable`] for a struct by listing the fields it declares.
///
/// ```ignore
/// struct TenantClient {
///     base: Client,
///     tenant: String,
///     max_sessions: i32,
/// }
///
/// mappable!(TenantClient { tenant, max_sessions });
/// ```
#[macro_export]
macro_rules! mappable {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::mapping::Mappable for $ty {
            #[allow(unused_variables)]
            fn declare(properties: &mut $crate::mapping::PropertyRegistrar<Self>) {
                $(
                    properties.field(
                        stringify!($field),
                        |e: &Self| &e.$field,
                        |e: &mut Self| &mut e.$field,
                    );
                )*
            }
        }
    };
}
