use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, trace};
use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::store::AttributeStore;
use crate::value::{AttributeKey, AttributeValue};
use crate::values::{Call, Function, Invoke};

new_key_type! {
    /// Opaque handle of a function or call site owned by a [`Context`]
    pub struct EntityHandle;
}

/// Attribute in the form the store keeps it: raw kind id with a zero value
/// for flags.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NativeAttribute {
    Enum { id: u32, value: u64 },
    String { name: String, value: String },
}

impl NativeAttribute {
    fn from_value(value: &AttributeValue) -> Self {
        match (value.kind(), value.name()) {
            (Some(kind), _) => Self::Enum {
                id: kind.id(),
                value: value.int_value().unwrap_or(0),
            },
            (None, name) => Self::String {
                name: name.unwrap_or_default().to_owned(),
                value: value.string_value().unwrap_or_default().to_owned(),
            },
        }
    }

    fn to_value(&self) -> Result<AttributeValue> {
        match self {
            Self::Enum { id, value } => {
                let kind = AttributeKind::try_from(*id)?;
                Ok(AttributeValue::from_native(kind, *value))
            }
            Self::String { name, value } => AttributeValue::string(name.as_str(), value.as_str()),
        }
    }

    fn matches(&self, key: AttributeKey<'_>) -> bool {
        match (self, key) {
            (Self::Enum { id, .. }, AttributeKey::Kind(kind)) => *id == kind.id(),
            (Self::String { name, .. }, AttributeKey::Name(key)) => name == key,
            _ => false,
        }
    }
}

#[derive(Debug)]
enum EntityKind {
    Function { name: String, parameter_count: u32 },
    Call { callee: EntityHandle },
    Invoke { callee: EntityHandle },
}

#[derive(Debug)]
struct Entity {
    kind: EntityKind,
    /// Attributes keyed by native index
    slots: HashMap<u32, Vec<NativeAttribute>>,
}

impl Entity {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            slots: HashMap::new(),
        }
    }

    fn slot(&self, index: AttributeIndex) -> &[NativeAttribute] {
        index
            .to_raw()
            .and_then(|raw| self.slots.get(&raw))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn slot_mut(&mut self, index: AttributeIndex) -> Option<&mut Vec<NativeAttribute>> {
        index.to_raw().and_then(|raw| self.slots.get_mut(&raw))
    }
}

/// Owner of functions and call sites together with their attributes.
///
/// This is the in-process attribute store: it keeps attributes the way a
/// native compiler library does and hands out [`Function`], [`Call`] and
/// [`Invoke`] handles whose attribute sets forward to it. A `Context` is not
/// `Sync`; share it across threads only behind external synchronization.
#[derive(Debug, Default)]
pub struct Context {
    entities: RefCell<SlotMap<EntityHandle, Entity>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a function taking `parameter_count` parameters
    pub fn add_function(&self, name: &str, parameter_count: u32) -> Function<'_> {
        let handle = self.entities.borrow_mut().insert(Entity::new(EntityKind::Function {
            name: name.to_owned(),
            parameter_count,
        }));
        debug!("added function `{name}` ({parameter_count} parameters) as {handle:?}");
        Function::new(self, handle)
    }

    /// Create a call to `callee`
    pub fn build_call<'ctx>(&'ctx self, callee: Function<'ctx>) -> Result<Call<'ctx>> {
        let handle = self.insert_call_site(callee.handle(), |callee| EntityKind::Call { callee })?;
        Ok(Call::new(self, handle))
    }

    /// Create an invoke of `callee`
    pub fn build_invoke<'ctx>(&'ctx self, callee: Function<'ctx>) -> Result<Invoke<'ctx>> {
        let handle =
            self.insert_call_site(callee.handle(), |callee| EntityKind::Invoke { callee })?;
        Ok(Invoke::new(self, handle))
    }

    fn insert_call_site(
        &self,
        callee: EntityHandle,
        kind: impl FnOnce(EntityHandle) -> EntityKind,
    ) -> Result<EntityHandle> {
        let mut entities = self.entities.borrow_mut();
        match entities.get(callee).map(|entity| &entity.kind) {
            Some(EntityKind::Function { .. }) => {}
            _ => return Err(Error::InvalidHandle),
        }
        let handle = entities.insert(Entity::new(kind(callee)));
        debug!("added call site {handle:?} of {callee:?}");
        Ok(handle)
    }

    /// Delete an entity together with all of its attributes
    pub fn remove_entity(&self, handle: EntityHandle) -> bool {
        let removed = self.entities.borrow_mut().remove(handle).is_some();
        if removed {
            debug!("removed {handle:?}");
        }
        removed
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.borrow().contains_key(handle)
    }

    /// Name of a function, or of the callee of a call site
    pub fn function_name(&self, handle: EntityHandle) -> Option<String> {
        let entities = self.entities.borrow();
        match &entities.get(handle)?.kind {
            EntityKind::Function { name, .. } => Some(name.clone()),
            EntityKind::Call { callee } | EntityKind::Invoke { callee } => {
                match &entities.get(*callee)?.kind {
                    EntityKind::Function { name, .. } => Some(name.clone()),
                    _ => None,
                }
            }
        }
    }

    pub(crate) fn callee(&self, handle: EntityHandle) -> Option<EntityHandle> {
        match self.entities.borrow().get(handle)?.kind {
            EntityKind::Call { callee } | EntityKind::Invoke { callee } => Some(callee),
            EntityKind::Function { .. } => None,
        }
    }

    fn remove_matching(&self, entity: EntityHandle, index: AttributeIndex, key: AttributeKey<'_>) {
        let mut entities = self.entities.borrow_mut();
        if let Some(slot) = entities
            .get_mut(entity)
            .and_then(|entity| entity.slot_mut(index))
        {
            slot.retain(|attr| !attr.matches(key));
        }
    }

    fn find(
        &self,
        entity: EntityHandle,
        index: AttributeIndex,
        key: AttributeKey<'_>,
    ) -> Option<AttributeValue> {
        let entities = self.entities.borrow();
        entities
            .get(entity)?
            .slot(index)
            .iter()
            .find(|attr| attr.matches(key))
            .and_then(|attr| attr.to_value().ok())
    }
}

impl AttributeStore for Context {
    type Handle = EntityHandle;

    fn parameter_count(&self, entity: EntityHandle) -> Result<u32> {
        let entities = self.entities.borrow();
        let mut entity = entities.get(entity).ok_or(Error::InvalidHandle)?;
        loop {
            match entity.kind {
                EntityKind::Function {
                    parameter_count, ..
                } => return Ok(parameter_count),
                EntityKind::Call { callee } | EntityKind::Invoke { callee } => {
                    entity = entities.get(callee).ok_or(Error::InvalidHandle)?;
                }
            }
        }
    }

    fn add_attribute(
        &self,
        entity: EntityHandle,
        index: AttributeIndex,
        value: &AttributeValue,
    ) -> Result<()> {
        trace!("store: add `{value}` to {entity:?} at the {index} index");
        let raw = match index.to_raw() {
            Some(raw) => raw,
            None => {
                return Err(Error::ParameterIndexOutOfRange {
                    index: index.parameter().unwrap_or(u32::MAX),
                    count: self.parameter_count(entity)?,
                });
            }
        };
        let mut entities = self.entities.borrow_mut();
        let entity = entities.get_mut(entity).ok_or(Error::InvalidHandle)?;
        let slot = entity.slots.entry(raw).or_default();
        let native = NativeAttribute::from_value(value);
        match slot.iter_mut().find(|attr| attr.matches(value.key())) {
            Some(existing) => *existing = native,
            None => slot.push(native),
        }
        Ok(())
    }

    fn remove_enum_attribute(&self, entity: EntityHandle, index: AttributeIndex, kind: AttributeKind) {
        trace!("store: remove `{kind}` from {entity:?} at the {index} index");
        self.remove_matching(entity, index, AttributeKey::Kind(kind));
    }

    fn remove_string_attribute(&self, entity: EntityHandle, index: AttributeIndex, name: &str) {
        trace!("store: remove \"{name}\" from {entity:?} at the {index} index");
        self.remove_matching(entity, index, AttributeKey::Name(name));
    }

    fn attribute_count(&self, entity: EntityHandle, index: AttributeIndex) -> u32 {
        let entities = self.entities.borrow();
        entities
            .get(entity)
            .map_or(0, |entity| entity.slot(index).len() as u32)
    }

    fn attributes(&self, entity: EntityHandle, index: AttributeIndex) -> Vec<AttributeValue> {
        trace!("store: get attributes of {entity:?} at the {index} index");
        let entities = self.entities.borrow();
        entities.get(entity).map_or_else(Vec::new, |entity| {
            entity
                .slot(index)
                .iter()
                .filter_map(|attr| attr.to_value().ok())
                .collect()
        })
    }

    fn enum_attribute(
        &self,
        entity: EntityHandle,
        index: AttributeIndex,
        kind: AttributeKind,
    ) -> Option<AttributeValue> {
        trace!("store: get `{kind}` of {entity:?} at the {index} index");
        self.find(entity, index, AttributeKey::Kind(kind))
    }

    fn string_attribute(
        &self,
        entity: EntityHandle,
        index: AttributeIndex,
        name: &str,
    ) -> Option<AttributeValue> {
        trace!("store: get \"{name}\" of {entity:?} at the {index} index");
        self.find(entity, index, AttributeKey::Name(name))
    }
}
