use std::fmt;

use crate::error::{Error, Result};
use crate::kind::AttributeKind;

/// Identity of an attribute within a collection: its kind, or its name for
/// string attributes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKey<'a> {
    Kind(AttributeKind),
    Name(&'a str),
}

impl From<AttributeKind> for AttributeKey<'_> {
    fn from(kind: AttributeKind) -> Self {
        Self::Kind(kind)
    }
}

impl<'a> From<&'a str> for AttributeKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Repr {
    Enum {
        kind: AttributeKind,
        value: Option<u64>,
    },
    String {
        name: Box<str>,
        value: Box<str>,
    },
}

/// A single attribute: a well-known kind with an optional integer value, or a
/// target dependent string attribute.
///
/// Values are immutable once built and can be shared between any number of
/// collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeValue(Repr);

impl AttributeValue {
    /// Create a boolean (flag) attribute of a well-known kind
    pub fn new(kind: AttributeKind) -> Result<Self> {
        if kind.requires_int_value() {
            return Err(Error::MissingRequiredPayload(kind));
        }
        Ok(Self(Repr::Enum { kind, value: None }))
    }

    /// Create an integer valued attribute such as `align` or `dereferenceable`
    pub fn with_int(kind: AttributeKind, value: u64) -> Result<Self> {
        if !kind.requires_int_value() {
            return Err(Error::UnexpectedPayload(kind));
        }
        Ok(Self(Repr::Enum {
            kind,
            value: Some(value),
        }))
    }

    /// Create a target dependent string attribute
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyAttributeName);
        }
        Ok(Self(Repr::String {
            name: name.into_boxed_str(),
            value: value.into().into_boxed_str(),
        }))
    }

    /// Create a string attribute with an empty value
    pub fn flag(name: impl Into<String>) -> Result<Self> {
        Self::string(name, String::new())
    }

    /// Rebuild an enum attribute from its native form, where flag kinds carry
    /// a zero value.
    pub(crate) fn from_native(kind: AttributeKind, raw_value: u64) -> Self {
        let value = kind.requires_int_value().then_some(raw_value);
        Self(Repr::Enum { kind, value })
    }

    pub fn key(&self) -> AttributeKey<'_> {
        match &self.0 {
            Repr::Enum { kind, .. } => AttributeKey::Kind(*kind),
            Repr::String { name, .. } => AttributeKey::Name(name),
        }
    }

    /// Whether this is a well-known kind
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.0, Repr::Enum { .. })
    }

    /// Whether this is a target dependent string attribute
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.0, Repr::String { .. })
    }

    #[must_use]
    pub fn kind(&self) -> Option<AttributeKind> {
        match self.0 {
            Repr::Enum { kind, .. } => Some(kind),
            Repr::String { .. } => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.0 {
            Repr::Enum { .. } => None,
            Repr::String { name, .. } => Some(name),
        }
    }

    /// Integer payload of `align`, `dereferenceable` and friends
    #[must_use]
    pub fn int_value(&self) -> Option<u64> {
        match self.0 {
            Repr::Enum { value, .. } => value,
            Repr::String { .. } => None,
        }
    }

    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        match &self.0 {
            Repr::Enum { .. } => None,
            Repr::String { value, .. } => Some(value),
        }
    }

    /// Whether this attribute has the identity `key`
    #[must_use]
    pub fn matches<'k>(&self, key: impl Into<AttributeKey<'k>>) -> bool {
        self.key() == key.into()
    }
}

/// Formats the attribute the way it is spelled in textual LLVM IR.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Enum {
                kind: AttributeKind::Alignment,
                value: Some(value),
            } => write!(f, "align {value}"),
            Repr::Enum {
                kind,
                value: Some(value),
            } => write!(f, "{kind}({value})"),
            Repr::Enum { kind, value: None } => write!(f, "{kind}"),
            Repr::String { name, value } if value.is_empty() => write!(f, "\"{name}\""),
            Repr::String { name, value } => write!(f, "\"{name}\"=\"{value}\""),
        }
    }
}
