//! Rules deciding where an attribute may be placed.
//!
//! These checks run before any attribute reaches a collection or an external
//! store, so a rejected call never leaves a partial mutation behind.

use crate::error::{Error, Result};
use crate::index::AttributeIndex;
use crate::kind::AttributeKind;
use crate::value::AttributeValue;

/// Check that `kind` is legal on `index`.
pub fn verify_usage(kind: AttributeKind, index: AttributeIndex) -> Result<()> {
    if kind.allowed_indices().permits(index) {
        Ok(())
    } else {
        Err(Error::InvalidAttributeUsage { kind, index })
    }
}

/// Check that `kind` may be added without a value on `index`.
pub fn verify_flag_usage(kind: AttributeKind, index: AttributeIndex) -> Result<()> {
    if kind.requires_int_value() {
        return Err(Error::MissingRequiredPayload(kind));
    }
    verify_usage(kind, index)
}

/// Check that `kind` may be added with an integer value on `index`.
pub fn verify_int_usage(kind: AttributeKind, index: AttributeIndex) -> Result<()> {
    if !kind.requires_int_value() {
        return Err(Error::UnexpectedPayload(kind));
    }
    verify_usage(kind, index)
}

/// Check that `index` addresses a parameter that exists.
///
/// `parameter_count` is `None` for detached sets, which accept any position.
pub fn verify_parameter_index(index: AttributeIndex, parameter_count: Option<u32>) -> Result<()> {
    match (index.parameter(), parameter_count) {
        (Some(position), Some(count)) if position >= count => {
            Err(Error::ParameterIndexOutOfRange {
                index: position,
                count,
            })
        }
        _ => Ok(()),
    }
}

/// Full check for placing `value` on `index` of an entity with
/// `parameter_count` parameters.
///
/// String attributes are only subject to the parameter range check.
pub fn verify_valid_on(
    value: &AttributeValue,
    index: AttributeIndex,
    parameter_count: Option<u32>,
) -> Result<()> {
    verify_parameter_index(index, parameter_count)?;
    match value.kind() {
        Some(kind) => verify_usage(kind, index),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAM0: AttributeIndex = AttributeIndex::PARAMETER0;

    fn int(kind: AttributeKind) -> AttributeValue {
        AttributeValue::with_int(kind, 64).unwrap()
    }

    #[test]
    fn test_disallowed_combinations() {
        let rejected = [
            (AttributeKind::Alignment, AttributeIndex::Function),
            (AttributeKind::StackAlignment, AttributeIndex::Return),
            (AttributeKind::StackAlignment, PARAM0),
            (AttributeKind::StackAlignment, PARAM0 + 7),
            (AttributeKind::Dereferenceable, AttributeIndex::Function),
            (AttributeKind::DereferenceableOrNull, AttributeIndex::Function),
        ];
        for (kind, index) in rejected {
            assert_eq!(
                verify_int_usage(kind, index),
                Err(Error::InvalidAttributeUsage { kind, index })
            );
            assert_eq!(
                verify_valid_on(&int(kind), index, None),
                Err(Error::InvalidAttributeUsage { kind, index })
            );
        }
    }

    #[test]
    fn test_allowed_combinations() {
        verify_int_usage(AttributeKind::Alignment, PARAM0).unwrap();
        verify_int_usage(AttributeKind::Alignment, AttributeIndex::Return).unwrap();
        verify_int_usage(AttributeKind::StackAlignment, AttributeIndex::Function).unwrap();
        verify_int_usage(AttributeKind::Dereferenceable, PARAM0).unwrap();
        verify_int_usage(AttributeKind::DereferenceableOrNull, AttributeIndex::Return).unwrap();
        verify_flag_usage(AttributeKind::AlwaysInline, AttributeIndex::Function).unwrap();
        verify_flag_usage(AttributeKind::InReg, PARAM0).unwrap();
    }

    #[test]
    fn test_payload_rules() {
        for kind in AttributeKind::all().filter(|kind| kind.requires_int_value()) {
            assert_eq!(
                verify_flag_usage(kind, PARAM0),
                Err(Error::MissingRequiredPayload(kind))
            );
        }
        assert_eq!(
            verify_int_usage(AttributeKind::NoUnwind, AttributeIndex::Function),
            Err(Error::UnexpectedPayload(AttributeKind::NoUnwind))
        );
    }

    #[test]
    fn test_parameter_range() {
        let align = int(AttributeKind::Alignment);
        verify_valid_on(&align, PARAM0, Some(1)).unwrap();
        assert_eq!(
            verify_valid_on(&align, PARAM0 + 1, Some(1)),
            Err(Error::ParameterIndexOutOfRange { index: 1, count: 1 })
        );
        verify_valid_on(&align, PARAM0 + 1000, None).unwrap();
        verify_parameter_index(AttributeIndex::Function, Some(0)).unwrap();
    }

    #[test]
    fn test_string_attributes_have_no_kind_restriction() {
        let custom = AttributeValue::flag("custom").unwrap();
        verify_valid_on(&custom, AttributeIndex::Function, Some(0)).unwrap();
        verify_valid_on(&custom, AttributeIndex::Return, Some(0)).unwrap();
        assert!(verify_valid_on(&custom, PARAM0, Some(0)).is_err());
    }
}
