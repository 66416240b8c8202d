use num_enum::TryFromPrimitiveError;
use thiserror::Error;

use crate::index::AttributeIndex;
use crate::kind::AttributeKind;

/// Attribute errors
///
/// Every variant describes a misuse by the caller; none of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The kind may not be placed on this index
    #[error("attribute `{kind}` is not valid on the {index} index")]
    InvalidAttributeUsage {
        kind: AttributeKind,
        index: AttributeIndex,
    },

    /// An integer valued kind was added without a value
    #[error("attribute `{0}` requires a value")]
    MissingRequiredPayload(AttributeKind),

    /// A value was supplied for a kind that does not take one
    #[error("attribute `{0}` does not take a value")]
    UnexpectedPayload(AttributeKind),

    /// The parameter index is past the end of the parameter list
    #[error("parameter index {index} exceeds the number of parameters ({count})")]
    ParameterIndexOutOfRange { index: u32, count: u32 },

    /// The attribute exists but carries no integer value
    #[error("attribute `{kind}` on the {index} index does not have an integral value")]
    MissingIntegerValue {
        kind: AttributeKind,
        index: AttributeIndex,
    },

    /// The attribute does not exist on the index
    #[error("attribute `{kind}` is not present on the {index} index")]
    AttributeNotFound {
        kind: AttributeKind,
        index: AttributeIndex,
    },

    /// String attributes must be named
    #[error("attribute name must not be empty")]
    EmptyAttributeName,

    /// The attribute set only covers a single index
    #[error("attribute set is only addressable at the {expected} index, not {found}")]
    IndexMismatch {
        expected: AttributeIndex,
        found: AttributeIndex,
    },

    /// A native attribute id that has no [`AttributeKind`]
    #[error("unknown attribute kind id `{0}`")]
    UnknownAttributeKind(u32),

    /// The entity handle no longer refers to a live entity
    #[error("invalid entity handle")]
    InvalidHandle,
}

impl From<TryFromPrimitiveError<AttributeKind>> for Error {
    fn from(err: TryFromPrimitiveError<AttributeKind>) -> Self {
        Self::UnknownAttributeKind(err.number)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
