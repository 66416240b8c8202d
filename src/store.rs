//! The capability through which entity-bound attribute sets reach the
//! component that really owns attribute storage.
//!
//! Views in this module hold nothing but a store reference, an entity handle
//! and an index. Every read goes back to the store, so changes made behind
//! the view's back (for example by an optimization pass) are always visible.
//!
//! Stores are single threaded: concurrent mutation of one entity from several
//! threads must be synchronized by the caller.

use std::fmt;

use log::trace;

use crate::collection::AttributeCollection;
use crate::error::Result;
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::set::AttributeSet;
use crate::validate;
use crate::value::AttributeValue;

/// External attribute storage addressed by `(entity, index, kind or name)`.
///
/// Reads against a handle that no longer refers to a live entity see no
/// attributes; only [`AttributeStore::add_attribute`] and
/// [`AttributeStore::parameter_count`] report such a handle as an error.
pub trait AttributeStore {
    /// Opaque reference to a function or call site
    type Handle: Copy + fmt::Debug;

    /// Number of parameters of the entity (of the callee, for call sites)
    fn parameter_count(&self, entity: Self::Handle) -> Result<u32>;

    /// Store `value`, replacing any attribute with the same kind or name
    fn add_attribute(
        &self,
        entity: Self::Handle,
        index: AttributeIndex,
        value: &AttributeValue,
    ) -> Result<()>;

    fn remove_enum_attribute(&self, entity: Self::Handle, index: AttributeIndex, kind: AttributeKind);

    fn remove_string_attribute(&self, entity: Self::Handle, index: AttributeIndex, name: &str);

    fn attribute_count(&self, entity: Self::Handle, index: AttributeIndex) -> u32;

    fn attributes(&self, entity: Self::Handle, index: AttributeIndex) -> Vec<AttributeValue>;

    fn enum_attribute(
        &self,
        entity: Self::Handle,
        index: AttributeIndex,
        kind: AttributeKind,
    ) -> Option<AttributeValue>;

    fn string_attribute(
        &self,
        entity: Self::Handle,
        index: AttributeIndex,
        name: &str,
    ) -> Option<AttributeValue>;

    fn create_attribute(&self, kind: AttributeKind) -> Result<AttributeValue> {
        AttributeValue::new(kind)
    }

    fn create_int_attribute(&self, kind: AttributeKind, value: u64) -> Result<AttributeValue> {
        AttributeValue::with_int(kind, value)
    }

    fn create_string_attribute(&self, name: &str, value: &str) -> Result<AttributeValue> {
        AttributeValue::string(name, value)
    }
}

/// All attributes of one store-backed entity.
pub struct StoreAttributeSet<'s, S: AttributeStore + ?Sized> {
    store: &'s S,
    entity: S::Handle,
}

impl<'s, S: AttributeStore + ?Sized> StoreAttributeSet<'s, S> {
    pub fn new(store: &'s S, entity: S::Handle) -> Self {
        Self { store, entity }
    }

    pub fn entity(&self) -> S::Handle {
        self.entity
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    /// View of a single index, without the parameter range check of
    /// [`AttributeSet::at`]
    pub(crate) fn view(&self, index: AttributeIndex) -> StoreAttributeCollection<'s, S> {
        StoreAttributeCollection {
            store: self.store,
            entity: self.entity,
            index,
        }
    }
}

impl<S: AttributeStore + ?Sized> Clone for StoreAttributeSet<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: AttributeStore + ?Sized> Copy for StoreAttributeSet<'_, S> {}

impl<S: AttributeStore + ?Sized> fmt::Debug for StoreAttributeSet<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreAttributeSet")
            .field("entity", &self.entity)
            .finish()
    }
}

impl<'s, S: AttributeStore + ?Sized> AttributeSet for StoreAttributeSet<'s, S> {
    type Collection<'a>
        = StoreAttributeCollection<'s, S>
    where
        Self: 'a;

    fn at(&mut self, index: AttributeIndex) -> Result<Self::Collection<'_>> {
        let count = self.store.parameter_count(self.entity)?;
        validate::verify_parameter_index(index, Some(count))?;
        Ok(self.view(index))
    }

    fn parameter_count(&self) -> Option<u32> {
        self.store.parameter_count(self.entity).ok()
    }
}

/// The attributes of one index of a store-backed entity.
///
/// Holds no attribute values of its own.
pub struct StoreAttributeCollection<'s, S: AttributeStore + ?Sized> {
    store: &'s S,
    entity: S::Handle,
    index: AttributeIndex,
}

impl<S: AttributeStore + ?Sized> StoreAttributeCollection<'_, S> {
    pub fn entity(&self) -> S::Handle {
        self.entity
    }
}

impl<S: AttributeStore + ?Sized> Clone for StoreAttributeCollection<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: AttributeStore + ?Sized> Copy for StoreAttributeCollection<'_, S> {}

impl<S: AttributeStore + ?Sized> fmt::Debug for StoreAttributeCollection<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreAttributeCollection")
            .field("entity", &self.entity)
            .field("index", &self.index)
            .finish()
    }
}

impl<S: AttributeStore + ?Sized> AttributeCollection for StoreAttributeCollection<'_, S> {
    fn index(&self) -> AttributeIndex {
        self.index
    }

    fn get(&self, kind: AttributeKind) -> Option<AttributeValue> {
        self.store.enum_attribute(self.entity, self.index, kind)
    }

    fn get_named(&self, name: &str) -> Option<AttributeValue> {
        if name.is_empty() {
            return None;
        }
        self.store.string_attribute(self.entity, self.index, name)
    }

    fn attributes(&self) -> Vec<AttributeValue> {
        self.store.attributes(self.entity, self.index)
    }

    fn len(&self) -> usize {
        self.store.attribute_count(self.entity, self.index) as usize
    }

    fn add(&mut self, value: AttributeValue) -> Result<()> {
        let count = self.store.parameter_count(self.entity)?;
        validate::verify_valid_on(&value, self.index, Some(count))?;
        trace!("add `{value}` to {:?} at the {} index", self.entity, self.index);
        self.store.add_attribute(self.entity, self.index, &value)
    }

    fn remove_kind(&mut self, kind: AttributeKind) {
        trace!("remove `{kind}` from {:?} at the {} index", self.entity, self.index);
        self.store.remove_enum_attribute(self.entity, self.index, kind);
    }

    fn remove_named(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        trace!("remove \"{name}\" from {:?} at the {} index", self.entity, self.index);
        self.store.remove_string_attribute(self.entity, self.index, name);
    }
}
