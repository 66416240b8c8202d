use std::{fmt, ops::Add};

use crate::kind::IndexKinds;

/// Selects which slot of a function or call site an attribute applies to.
///
/// Parameters are addressed as `AttributeIndex::PARAMETER0 + n`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeIndex {
    /// The return value
    Return,
    /// Zero based parameter position
    Parameter(u32),
    /// The function or call site as a whole
    Function,
}

impl AttributeIndex {
    /// First parameter
    pub const PARAMETER0: Self = Self::Parameter(0);

    /// Native encoding of the function index
    pub const RAW_FUNCTION: u32 = u32::MAX;
    /// Native encoding of the return index
    pub const RAW_RETURN: u32 = 0;
    /// Native encoding of the first parameter index
    pub const RAW_PARAMETER0: u32 = 1;

    /// Decode an index from its native numbering
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            Self::RAW_FUNCTION => Self::Function,
            Self::RAW_RETURN => Self::Return,
            n => Self::Parameter(n - Self::RAW_PARAMETER0),
        }
    }

    /// Encode this index using the native numbering
    ///
    /// Returns `None` for a parameter position that collides with
    /// [`AttributeIndex::RAW_FUNCTION`].
    #[must_use]
    pub fn to_raw(self) -> Option<u32> {
        match self {
            Self::Function => Some(Self::RAW_FUNCTION),
            Self::Return => Some(Self::RAW_RETURN),
            Self::Parameter(n) => n
                .checked_add(Self::RAW_PARAMETER0)
                .filter(|raw| *raw != Self::RAW_FUNCTION),
        }
    }

    /// The class this index belongs to
    #[must_use]
    pub fn kind(self) -> IndexKinds {
        match self {
            Self::Function => IndexKinds::FUNCTION,
            Self::Return => IndexKinds::RETURN,
            Self::Parameter(_) => IndexKinds::PARAMETER,
        }
    }

    /// Parameter position, if this is a parameter index
    #[must_use]
    pub fn parameter(self) -> Option<u32> {
        match self {
            Self::Parameter(n) => Some(n),
            _ => None,
        }
    }
}

/// Offset a parameter index, `PARAMETER0 + n`.
///
/// # Panics
///
/// Panics when applied to [`AttributeIndex::Function`] or
/// [`AttributeIndex::Return`], or when the position overflows.
impl Add<u32> for AttributeIndex {
    type Output = Self;

    fn add(self, rhs: u32) -> Self {
        match self {
            Self::Parameter(n) => match n.checked_add(rhs) {
                Some(position) => Self::Parameter(position),
                None => panic!("parameter position {n} + {rhs} overflows"),
            },
            other => panic!("cannot offset the {other} attribute index"),
        }
    }
}

impl fmt::Display for AttributeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Return => write!(f, "return"),
            Self::Parameter(n) => write!(f, "param {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_offsets() {
        assert_eq!(AttributeIndex::PARAMETER0 + 0, AttributeIndex::Parameter(0));
        assert_eq!(AttributeIndex::PARAMETER0 + 2, AttributeIndex::Parameter(2));
        assert_eq!((AttributeIndex::PARAMETER0 + 5).parameter(), Some(5));
        assert_eq!(AttributeIndex::Return.parameter(), None);
    }

    #[test]
    #[should_panic]
    fn test_offset_function_index() {
        let _ = AttributeIndex::Function + 1;
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn test_offset_overflow() {
        let _ = AttributeIndex::Parameter(1) + u32::MAX;
    }

    #[test]
    fn test_raw_numbering() {
        assert_eq!(AttributeIndex::from_raw(u32::MAX), AttributeIndex::Function);
        assert_eq!(AttributeIndex::from_raw(0), AttributeIndex::Return);
        assert_eq!(AttributeIndex::from_raw(1), AttributeIndex::PARAMETER0);
        assert_eq!(AttributeIndex::from_raw(4), AttributeIndex::Parameter(3));
        assert_eq!(AttributeIndex::Parameter(3).to_raw(), Some(4));
        assert_eq!(AttributeIndex::Parameter(u32::MAX - 1).to_raw(), None);
        assert_eq!(AttributeIndex::Parameter(u32::MAX).to_raw(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeIndex::Function.to_string(), "function");
        assert_eq!(AttributeIndex::Return.to_string(), "return");
        assert_eq!((AttributeIndex::PARAMETER0 + 1).to_string(), "param 1");
    }
}
