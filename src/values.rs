//! Handles to the entities of a [`Context`] that carry attributes.

use std::fmt;

use crate::context::{Context, EntityHandle};
use crate::error::{Error, Result};
use crate::holder::{self, AttributeHolder};
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::set::AttributeSet;
use crate::store::{AttributeStore, StoreAttributeCollection, StoreAttributeSet};
use crate::value::AttributeValue;

/// A function declared in a [`Context`]
#[derive(Clone, Copy)]
pub struct Function<'ctx> {
    context: &'ctx Context,
    handle: EntityHandle,
}

impl<'ctx> Function<'ctx> {
    pub(crate) fn new(context: &'ctx Context, handle: EntityHandle) -> Self {
        Self { context, handle }
    }

    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub fn context(&self) -> &'ctx Context {
        self.context
    }

    pub fn name(&self) -> Option<String> {
        self.context.function_name(self.handle)
    }

    /// Number of declared parameters
    pub fn param_count(&self) -> Result<u32> {
        self.context.parameter_count(self.handle)
    }

    /// The parameter at `position`, if the function has that many
    pub fn param(&self, position: u32) -> Option<Argument<'ctx>> {
        let count = self.param_count().ok()?;
        (position < count).then_some(Argument {
            function: *self,
            position,
        })
    }

    /// All parameters in order
    pub fn params(&self) -> impl Iterator<Item = Argument<'ctx>> + use<'ctx> {
        let function = *self;
        (0..self.param_count().unwrap_or(0)).map(move |position| Argument { function, position })
    }

    /// Delete this function and its attributes from the context
    pub fn delete(self) -> bool {
        self.context.remove_entity(self.handle)
    }
}

impl PartialEq for Function<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.context, other.context) && self.handle == other.handle
    }
}

impl Eq for Function<'_> {}

impl fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("handle", &self.handle)
            .field("name", &self.name())
            .finish()
    }
}

impl<'ctx> AttributeHolder for Function<'ctx> {
    type Attributes<'a>
        = StoreAttributeSet<'ctx, Context>
    where
        Self: 'a;

    fn attributes(&mut self) -> Self::Attributes<'_> {
        StoreAttributeSet::new(self.context, self.handle)
    }
}

/// A call instruction
#[derive(Debug, Clone, Copy)]
pub struct Call<'ctx> {
    context: &'ctx Context,
    handle: EntityHandle,
}

impl<'ctx> Call<'ctx> {
    pub(crate) fn new(context: &'ctx Context, handle: EntityHandle) -> Self {
        Self { context, handle }
    }

    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// The called function
    pub fn callee(&self) -> Option<Function<'ctx>> {
        let callee = self.context.callee(self.handle)?;
        self.context
            .contains(callee)
            .then(|| Function::new(self.context, callee))
    }
}

impl<'ctx> AttributeHolder for Call<'ctx> {
    type Attributes<'a>
        = StoreAttributeSet<'ctx, Context>
    where
        Self: 'a;

    fn attributes(&mut self) -> Self::Attributes<'_> {
        StoreAttributeSet::new(self.context, self.handle)
    }
}

/// An invoke terminator
#[derive(Debug, Clone, Copy)]
pub struct Invoke<'ctx> {
    context: &'ctx Context,
    handle: EntityHandle,
}

impl<'ctx> Invoke<'ctx> {
    pub(crate) fn new(context: &'ctx Context, handle: EntityHandle) -> Self {
        Self { context, handle }
    }

    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// The invoked function
    pub fn callee(&self) -> Option<Function<'ctx>> {
        let callee = self.context.callee(self.handle)?;
        self.context
            .contains(callee)
            .then(|| Function::new(self.context, callee))
    }
}

impl<'ctx> AttributeHolder for Invoke<'ctx> {
    type Attributes<'a>
        = StoreAttributeSet<'ctx, Context>
    where
        Self: 'a;

    fn attributes(&mut self) -> Self::Attributes<'_> {
        StoreAttributeSet::new(self.context, self.handle)
    }
}

/// A parameter of a [`Function`].
///
/// Its attributes live on the containing function at
/// `AttributeIndex::PARAMETER0 + position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument<'ctx> {
    function: Function<'ctx>,
    position: u32,
}

impl<'ctx> Argument<'ctx> {
    pub fn function(&self) -> Function<'ctx> {
        self.function
    }

    /// Zero based position in the parameter list
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Index of this argument's attributes on the containing function
    pub fn index(&self) -> AttributeIndex {
        AttributeIndex::PARAMETER0 + self.position
    }

    /// Set the `align` attribute of this argument
    pub fn set_alignment(mut self, value: u64) -> Result<Self> {
        let align = AttributeValue::with_int(AttributeKind::Alignment, value)?;
        let index = self.index();
        holder::add_attribute_value(&mut self.function, index, align)?;
        Ok(self)
    }
}

impl<'ctx> AttributeHolder for Argument<'ctx> {
    type Attributes<'a>
        = ArgumentAttributes<'ctx>
    where
        Self: 'a;

    fn attributes(&mut self) -> Self::Attributes<'_> {
        ArgumentAttributes {
            set: StoreAttributeSet::new(self.function.context, self.function.handle),
            index: self.index(),
        }
    }
}

/// Attribute set of an [`Argument`], addressable only at the argument's own
/// index.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentAttributes<'ctx> {
    set: StoreAttributeSet<'ctx, Context>,
    index: AttributeIndex,
}

impl<'ctx> AttributeSet for ArgumentAttributes<'ctx> {
    type Collection<'a>
        = StoreAttributeCollection<'ctx, Context>
    where
        Self: 'a;

    fn at(&mut self, index: AttributeIndex) -> Result<Self::Collection<'_>> {
        if index != self.index {
            return Err(Error::IndexMismatch {
                expected: self.index,
                found: index,
            });
        }
        self.set.at(index)
    }

    fn parameter_count(&self) -> Option<u32> {
        self.set.parameter_count()
    }
}
