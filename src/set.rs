use std::collections::BTreeMap;

use crate::collection::{AttributeCollection, OwnedAttributeCollection};
use crate::error::{Error, Result};
use crate::holder::{self, AttributeHolder};
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::validate;
use crate::value::AttributeValue;

/// Attributes of one entity across all of its indices.
///
/// Batch operations apply each item in turn and stop at the first failure;
/// items applied before the failure stay applied.
pub trait AttributeSet {
    type Collection<'a>: AttributeCollection
    where
        Self: 'a;

    /// The collection for `index`, created empty if it was never populated
    fn at(&mut self, index: AttributeIndex) -> Result<Self::Collection<'_>>;

    /// Number of parameters of the owning entity, `None` when unbounded
    fn parameter_count(&self) -> Option<u32>;

    /// Shorthand for `at(AttributeIndex::PARAMETER0 + position)`
    fn parameter_attributes(&mut self, position: u32) -> Result<Self::Collection<'_>> {
        let index = AttributeIndex::Parameter(position);
        validate::verify_parameter_index(index, self.parameter_count())?;
        self.at(index)
    }

    fn add_kind(&mut self, index: AttributeIndex, kind: AttributeKind) -> Result<&mut Self> {
        self.at(index)?.add_kind(kind)?;
        Ok(self)
    }

    fn add_kinds<I>(&mut self, index: AttributeIndex, kinds: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = AttributeKind>,
    {
        {
            let mut attrs = self.at(index)?;
            for kind in kinds {
                attrs.add_kind(kind)?;
            }
        }
        Ok(self)
    }

    fn add_int(&mut self, index: AttributeIndex, kind: AttributeKind, value: u64) -> Result<&mut Self> {
        self.at(index)?.add_int(kind, value)?;
        Ok(self)
    }

    fn add_value(&mut self, index: AttributeIndex, value: AttributeValue) -> Result<&mut Self> {
        self.at(index)?.add(value)?;
        Ok(self)
    }

    fn add_values<I>(&mut self, index: AttributeIndex, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = AttributeValue>,
    {
        {
            let mut attrs = self.at(index)?;
            for value in values {
                attrs.add(value)?;
            }
        }
        Ok(self)
    }

    fn remove_kind(&mut self, index: AttributeIndex, kind: AttributeKind) -> Result<&mut Self> {
        self.at(index)?.remove_kind(kind);
        Ok(self)
    }

    fn remove_named(&mut self, index: AttributeIndex, name: &str) -> Result<&mut Self> {
        self.at(index)?.remove_named(name);
        Ok(self)
    }

    fn has(&mut self, index: AttributeIndex, kind: AttributeKind) -> Result<bool> {
        Ok(self.at(index)?.has(kind))
    }

    fn has_named(&mut self, index: AttributeIndex, name: &str) -> Result<bool> {
        Ok(self.at(index)?.has_named(name))
    }

    /// Whether any attribute is present on `index`
    fn has_any(&mut self, index: AttributeIndex) -> Result<bool> {
        Ok(!self.at(index)?.is_empty())
    }

    fn as_string(&mut self, index: AttributeIndex) -> Result<String> {
        Ok(self.at(index)?.as_string())
    }

    /// Integer payload of the `kind` attribute on `index`
    fn get_attribute_value(&mut self, index: AttributeIndex, kind: AttributeKind) -> Result<u64> {
        let attr = self
            .at(index)?
            .get(kind)
            .ok_or(Error::AttributeNotFound { kind, index })?;
        attr.int_value()
            .ok_or(Error::MissingIntegerValue { kind, index })
    }
}

impl<S: AttributeSet + ?Sized> AttributeSet for &mut S {
    type Collection<'a>
        = S::Collection<'a>
    where
        Self: 'a;

    fn at(&mut self, index: AttributeIndex) -> Result<Self::Collection<'_>> {
        (**self).at(index)
    }

    fn parameter_count(&self) -> Option<u32> {
        (**self).parameter_count()
    }
}

/// A detached attribute set that owns its collections.
///
/// Used to put attributes together before they are associated with a
/// function or call site; see [`OwnedAttributeSet::apply_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedAttributeSet {
    collections: BTreeMap<AttributeIndex, OwnedAttributeCollection>,
}

impl OwnedAttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection for `index`, created and cached on first access
    pub fn collection(&mut self, index: AttributeIndex) -> &mut OwnedAttributeCollection {
        self.collections
            .entry(index)
            .or_insert_with(|| OwnedAttributeCollection::new(index))
    }

    /// The collection for `index` if it was ever accessed
    pub fn get(&self, index: AttributeIndex) -> Option<&OwnedAttributeCollection> {
        self.collections.get(&index)
    }

    /// Populated indices with their collections, in index order
    pub fn iter(&self) -> impl Iterator<Item = (AttributeIndex, &OwnedAttributeCollection)> {
        self.collections.iter().map(|(index, attrs)| (*index, attrs))
    }

    /// Copy every attribute of `other` into this set
    pub fn merge_from(&mut self, other: &OwnedAttributeSet) -> Result<()> {
        for (index, attrs) in other.iter() {
            self.add_values(index, attrs.iter().cloned())?;
        }
        Ok(())
    }

    /// Copy every attribute of this set onto `target`
    pub fn apply_to<H: AttributeHolder + ?Sized>(&self, target: &mut H) -> Result<()> {
        for (index, attrs) in self.iter() {
            holder::add_attribute_values(target, index, attrs.iter().cloned())?;
        }
        Ok(())
    }
}

impl AttributeSet for OwnedAttributeSet {
    type Collection<'a> = &'a mut OwnedAttributeCollection;

    fn at(&mut self, index: AttributeIndex) -> Result<Self::Collection<'_>> {
        Ok(self.collection(index))
    }

    fn parameter_count(&self) -> Option<u32> {
        None
    }
}
