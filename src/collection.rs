use log::debug;

use crate::error::Result;
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::validate;
use crate::value::{AttributeKey, AttributeValue};

/// The attributes attached to a single index of an entity.
///
/// No two attributes in a collection share a kind (or a name, for string
/// attributes): adding an attribute whose kind or name is already present
/// replaces the existing one. Enumeration order is not part of the contract.
pub trait AttributeCollection {
    /// Index this collection covers
    fn index(&self) -> AttributeIndex;

    /// Look up a well-known attribute
    fn get(&self, kind: AttributeKind) -> Option<AttributeValue>;

    /// Look up a string attribute, `None` for an empty name
    fn get_named(&self, name: &str) -> Option<AttributeValue>;

    /// Snapshot of every attribute in the collection
    fn attributes(&self) -> Vec<AttributeValue>;

    fn len(&self) -> usize;

    /// Validate `value` for this index, then insert it.
    fn add(&mut self, value: AttributeValue) -> Result<()>;

    /// Remove the attribute of `kind`, doing nothing if it is absent
    fn remove_kind(&mut self, kind: AttributeKind);

    /// Remove the string attribute `name`, doing nothing if it is absent or
    /// `name` is empty
    fn remove_named(&mut self, name: &str);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has(&self, kind: AttributeKind) -> bool {
        self.get(kind).is_some()
    }

    fn has_named(&self, name: &str) -> bool {
        self.get_named(name).is_some()
    }

    /// Add a boolean attribute
    fn add_kind(&mut self, kind: AttributeKind) -> Result<()> {
        validate::verify_flag_usage(kind, self.index())?;
        self.add(AttributeValue::new(kind)?)
    }

    /// Add an integer valued attribute
    fn add_int(&mut self, kind: AttributeKind, value: u64) -> Result<()> {
        validate::verify_int_usage(kind, self.index())?;
        self.add(AttributeValue::with_int(kind, value)?)
    }

    /// Add a target dependent string attribute
    fn add_string(&mut self, name: &str, value: &str) -> Result<()> {
        self.add(AttributeValue::string(name, value)?)
    }

    /// Remove whichever attribute has the same kind or name as `value`
    fn remove(&mut self, value: &AttributeValue) {
        match value.key() {
            AttributeKey::Kind(kind) => self.remove_kind(kind),
            AttributeKey::Name(name) => self.remove_named(name),
        }
    }

    /// Attributes joined by single spaces, in IR spelling
    fn as_string(&self) -> String {
        self.attributes()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<C: AttributeCollection + ?Sized> AttributeCollection for &mut C {
    fn index(&self) -> AttributeIndex {
        (**self).index()
    }

    fn get(&self, kind: AttributeKind) -> Option<AttributeValue> {
        (**self).get(kind)
    }

    fn get_named(&self, name: &str) -> Option<AttributeValue> {
        (**self).get_named(name)
    }

    fn attributes(&self) -> Vec<AttributeValue> {
        (**self).attributes()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn add(&mut self, value: AttributeValue) -> Result<()> {
        (**self).add(value)
    }

    fn remove_kind(&mut self, kind: AttributeKind) {
        (**self).remove_kind(kind)
    }

    fn remove_named(&mut self, name: &str) {
        (**self).remove_named(name)
    }
}

/// A detached collection that stores its attributes itself.
///
/// Attributes are kept in insertion order; a replacement keeps the position of
/// the attribute it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedAttributeCollection {
    index: AttributeIndex,
    attributes: Vec<AttributeValue>,
}

impl OwnedAttributeCollection {
    pub fn new(index: AttributeIndex) -> Self {
        Self {
            index,
            attributes: Vec::new(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeValue> {
        self.attributes.iter()
    }

    fn find(&self, key: AttributeKey<'_>) -> Option<&AttributeValue> {
        self.attributes.iter().find(|attr| attr.key() == key)
    }
}

impl AttributeCollection for OwnedAttributeCollection {
    fn index(&self) -> AttributeIndex {
        self.index
    }

    fn get(&self, kind: AttributeKind) -> Option<AttributeValue> {
        self.find(AttributeKey::Kind(kind)).cloned()
    }

    fn get_named(&self, name: &str) -> Option<AttributeValue> {
        if name.is_empty() {
            return None;
        }
        self.find(AttributeKey::Name(name)).cloned()
    }

    fn attributes(&self) -> Vec<AttributeValue> {
        self.attributes.clone()
    }

    fn len(&self) -> usize {
        self.attributes.len()
    }

    fn add(&mut self, value: AttributeValue) -> Result<()> {
        validate::verify_valid_on(&value, self.index, None)?;
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.key() == value.key())
        {
            Some(existing) => {
                debug!("replacing `{existing}` with `{value}` on the {} index", self.index);
                *existing = value;
            }
            None => self.attributes.push(value),
        }
        Ok(())
    }

    fn remove_kind(&mut self, kind: AttributeKind) {
        self.attributes.retain(|attr| !attr.matches(kind));
    }

    fn remove_named(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.attributes.retain(|attr| !attr.matches(name));
    }
}

impl<'a> IntoIterator for &'a OwnedAttributeCollection {
    type Item = &'a AttributeValue;
    type IntoIter = std::slice::Iter<'a, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
