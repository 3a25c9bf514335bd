//! Bag-based mapping between a complex entity and its simple counterpart.
use std::marker::PhantomData;
use std::sync::Arc;

use crate::mapping::accessor::{AccessorSet, Mappable, accessors};
use crate::mapping::error::MappingResult;
use crate::mapping::value::{DataBag, coerce};

/// The wire-side half of a mapping: fixed short-named fields plus a bag for
/// whatever a subtype declares on top.
pub trait SimpleEntity: Default {
    fn data_bag(&self) -> &DataBag;
    fn data_bag_mut(&mut self) -> &mut DataBag;
}

/// A complex entity built on top of base `B`.
///
/// Every base derives from itself; a subtype embeds its base and hands it
/// out here, declaring only its extra fields through [`Mappable`].
pub trait Derived<B>: Mappable + Default {
    fn base(&self) -> &B;
    fn base_mut(&mut self) -> &mut B;
}

impl<B: Mappable + Default> Derived<B> for B {
    fn base(&self) -> &B {
        self
    }

    fn base_mut(&mut self) -> &mut B {
        self
    }
}

/// Maps the declared properties of `C` through the data bag of `S`.
pub struct GenericMapper<C, S> {
    accessors: Arc<AccessorSet<C>>,
    _simple: PhantomData<fn() -> S>,
}

impl<C, S> Clone for GenericMapper<C, S> {
    fn clone(&self) -> Self {
        Self {
            accessors: Arc::clone(&self.accessors),
            _simple: PhantomData,
        }
    }
}

impl<C, S> std::fmt::Debug for GenericMapper<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericMapper")
            .field("accessors", &self.accessors)
            .finish()
    }
}

impl<C, S> Default for GenericMapper<C, S>
where
    C: Mappable + Default,
    S: SimpleEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> GenericMapper<C, S>
where
    C: Mappable + Default,
    S: SimpleEntity,
{
    pub fn new() -> Self {
        Self {
            accessors: accessors::<C>(),
            _simple: PhantomData,
        }
    }

    /// Builds a default `C` and fills every declared property found in the bag.
    ///
    /// Properties missing from the bag keep their default value.
    pub fn to_complex(&self, simple: &S) -> MappingResult<C> {
        let mut complex = C::default();
        let bag = simple.data_bag();

        for (name, typed) in self.accessors.setters() {
            let Some(raw) = bag.get(name) else {
                continue;
            };
            let value = coerce(name, raw.clone(), typed.kind)?;
            (typed.setter)(&mut complex, value)?;
        }

        Ok(complex)
    }

    /// Builds a default `S` whose bag holds every declared property of `complex`.
    pub fn to_simple(&self, complex: &C) -> MappingResult<S> {
        let mut simple = S::default();
        let bag = simple.data_bag_mut();

        for (name, getter) in self.accessors.getters() {
            bag.insert(name, getter(complex)?);
        }

        Ok(simple)
    }

    /// Maps a sequence; an absent sequence maps to an empty one.
    pub fn to_complex_all(&self, simple: Option<&[S]>) -> MappingResult<Vec<C>> {
        simple
            .unwrap_or_default()
            .iter()
            .map(|s| self.to_complex(s))
            .collect()
    }

    /// Maps a sequence; an absent sequence maps to an empty one.
    pub fn to_simple_all(&self, complex: Option<&[C]>) -> MappingResult<Vec<S>> {
        complex
            .unwrap_or_default()
            .iter()
            .map(|c| self.to_simple(c))
            .collect()
    }
}
