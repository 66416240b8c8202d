//! Uniform attribute manipulation for anything that carries an attribute set.
//!
//! The helpers here are generic over [`AttributeHolder`], so the same code
//! can decorate functions, calls, invokes, arguments and detached sets. The
//! mutating helpers hand the holder back for `?`-chained composition:
//!
//! ```
//! use llvm_attributes::{holder, AttributeIndex, AttributeKind, Context};
//!
//! # fn main() -> llvm_attributes::Result<()> {
//! let ctx = Context::new();
//! let mut memcpy = ctx.add_function("memcpy", 3);
//! let memcpy = holder::add_attributes(
//!     &mut memcpy,
//!     AttributeIndex::Function,
//!     [AttributeKind::NoUnwind, AttributeKind::WillReturn],
//! )?;
//! holder::add_attribute(memcpy, AttributeIndex::PARAMETER0, AttributeKind::NoAlias)?;
//! holder::add_attribute(memcpy, AttributeIndex::PARAMETER0 + 1, AttributeKind::NoAlias)?;
//! assert_eq!(holder::as_string(memcpy, AttributeIndex::Function)?, "nounwind willreturn");
//! # Ok(())
//! # }
//! ```

use crate::collection::AttributeCollection;
use crate::error::Result;
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::set::{AttributeSet, OwnedAttributeSet};
use crate::value::AttributeValue;

/// An entity exposing its attributes as a live [`AttributeSet`].
pub trait AttributeHolder {
    type Attributes<'a>: AttributeSet
    where
        Self: 'a;

    fn attributes(&mut self) -> Self::Attributes<'_>;
}

impl AttributeHolder for OwnedAttributeSet {
    type Attributes<'a> = &'a mut OwnedAttributeSet;

    fn attributes(&mut self) -> Self::Attributes<'_> {
        self
    }
}

/// Add boolean attributes of the given kinds to `index`
pub fn add_attributes<H, I>(holder: &mut H, index: AttributeIndex, kinds: I) -> Result<&mut H>
where
    H: AttributeHolder + ?Sized,
    I: IntoIterator<Item = AttributeKind>,
{
    holder.attributes().add_kinds(index, kinds)?;
    Ok(holder)
}

pub fn add_attribute<H>(holder: &mut H, index: AttributeIndex, kind: AttributeKind) -> Result<&mut H>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().add_kind(index, kind)?;
    Ok(holder)
}

pub fn add_attribute_value<H>(
    holder: &mut H,
    index: AttributeIndex,
    value: AttributeValue,
) -> Result<&mut H>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().add_value(index, value)?;
    Ok(holder)
}

pub fn add_attribute_values<H, I>(holder: &mut H, index: AttributeIndex, values: I) -> Result<&mut H>
where
    H: AttributeHolder + ?Sized,
    I: IntoIterator<Item = AttributeValue>,
{
    holder.attributes().add_values(index, values)?;
    Ok(holder)
}

/// Copy every attribute of `attributes` onto `index` of `holder`
pub fn add_collection<'h, H, C>(
    holder: &'h mut H,
    index: AttributeIndex,
    attributes: &C,
) -> Result<&'h mut H>
where
    H: AttributeHolder + ?Sized,
    C: AttributeCollection + ?Sized,
{
    add_attribute_values(holder, index, attributes.attributes())
}

/// Copy the attributes `source` has on `index` onto the same index of `holder`
pub fn add_from_set<'h, H, S>(
    holder: &'h mut H,
    index: AttributeIndex,
    source: &mut S,
) -> Result<&'h mut H>
where
    H: AttributeHolder + ?Sized,
    S: AttributeSet + ?Sized,
{
    let values = source.at(index)?.attributes();
    add_attribute_values(holder, index, values)
}

pub fn remove_attribute<H>(holder: &mut H, index: AttributeIndex, kind: AttributeKind) -> Result<&mut H>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().remove_kind(index, kind)?;
    Ok(holder)
}

/// Remove a string attribute; an empty or absent name is a no-op
pub fn remove_named_attribute<'h, H>(
    holder: &'h mut H,
    index: AttributeIndex,
    name: &str,
) -> Result<&'h mut H>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().remove_named(index, name)?;
    Ok(holder)
}

pub fn has_attribute<H>(holder: &mut H, index: AttributeIndex, kind: AttributeKind) -> Result<bool>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().has(index, kind)
}

pub fn as_string<H>(holder: &mut H, index: AttributeIndex) -> Result<String>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().as_string(index)
}

/// Integer payload of the `kind` attribute on `index`.
///
/// Fails with [`Error::MissingIntegerValue`](crate::Error::MissingIntegerValue)
/// when the attribute is present but carries no integer.
pub fn get_attribute_value<H>(holder: &mut H, index: AttributeIndex, kind: AttributeKind) -> Result<u64>
where
    H: AttributeHolder + ?Sized,
{
    holder.attributes().get_attribute_value(index, kind)
}
