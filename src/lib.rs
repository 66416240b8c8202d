//! Attribute sets for LLVM functions, call sites and parameters.
//!
//! Attributes are addressed by [`AttributeIndex`] (the function itself, its
//! return value, or a parameter) and grouped into [`AttributeCollection`]s,
//! one per index, which make up an [`AttributeSet`]. Sets come in two
//! flavours that honour the same contracts:
//!
//! * [`OwnedAttributeSet`] stores attributes itself and is used to build
//!   attributes before they are attached to anything.
//! * [`StoreAttributeSet`] is a live view over an [`AttributeStore`], such as
//!   [`Context`], keyed by an entity handle. Nothing is cached.
//!
//! Entities ([`Function`], [`Call`], [`Invoke`], [`Argument`]) implement
//! [`AttributeHolder`], and the [`holder`] module provides helpers that work
//! on any of them.
//!
//! Nothing in this crate is thread safe; callers must synchronize access to a
//! store themselves.

pub mod collection;
pub mod context;
pub mod error;
pub mod holder;
pub mod index;
pub mod kind;
pub mod set;
pub mod store;
pub mod validate;
pub mod value;
pub mod values;

pub use self::collection::{AttributeCollection, OwnedAttributeCollection};
pub use self::context::{Context, EntityHandle};
pub use self::error::{Error, Result};
pub use self::holder::AttributeHolder;
pub use self::index::AttributeIndex;
pub use self::kind::{AttributeKind, IndexKinds};
pub use self::set::{AttributeSet, OwnedAttributeSet};
pub use self::store::{AttributeStore, StoreAttributeCollection, StoreAttributeSet};
pub use self::value::{AttributeKey, AttributeValue};
pub use self::values::{Argument, ArgumentAttributes, Call, Function, Invoke};
