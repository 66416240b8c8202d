use llvm_attributes::{
    AttributeCollection, AttributeHolder, AttributeIndex, AttributeKind, AttributeSet,
    AttributeStore, AttributeValue, Context, Error,
};

const PARAM0: AttributeIndex = AttributeIndex::PARAMETER0;

#[test]
fn test_parameter_attributes() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    attributes
        .add_kinds(
            AttributeIndex::Function,
            [AttributeKind::AlwaysInline, AttributeKind::OptimizeNone],
        )
        .unwrap()
        .add_kind(AttributeIndex::Return, AttributeKind::NonNull)
        .unwrap()
        .add_kind(PARAM0, AttributeKind::InReg)
        .unwrap();

    let params = attributes.parameter_attributes(0).unwrap();
    assert_eq!(params.index(), PARAM0);
    assert_eq!(params.as_string(), "inreg");
}

#[test]
fn test_parameter_without_attributes() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 2);
    let mut attributes = function.attributes();
    attributes
        .add_kinds(
            AttributeIndex::Function,
            [AttributeKind::AlwaysInline, AttributeKind::OptimizeNone],
        )
        .unwrap()
        .add_kind(AttributeIndex::Return, AttributeKind::NonNull)
        .unwrap()
        .add_kind(PARAM0, AttributeKind::InReg)
        .unwrap();

    assert_eq!(attributes.parameter_attributes(0).unwrap().as_string(), "inreg");
    let second = attributes.parameter_attributes(1).unwrap();
    assert_eq!(second.index(), PARAM0 + 1);
    assert!(second.is_empty());
    assert!(second.attributes().is_empty());
}

#[test]
fn test_parameter_index_out_of_range() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();

    assert_eq!(
        attributes.parameter_attributes(1).err(),
        Some(Error::ParameterIndexOutOfRange { index: 1, count: 1 })
    );
    let align = ctx
        .create_int_attribute(AttributeKind::Alignment, 64)
        .unwrap();
    assert_eq!(
        attributes.add_value(PARAM0 + 1, align).err(),
        Some(Error::ParameterIndexOutOfRange { index: 1, count: 1 })
    );
}

#[test]
fn test_as_string() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    for index in [AttributeIndex::Function, AttributeIndex::Return, PARAM0] {
        assert_eq!(attributes.as_string(index).unwrap(), "");
    }

    attributes
        .add_kind(AttributeIndex::Function, AttributeKind::AlwaysInline)
        .unwrap();
    assert_eq!(attributes.as_string(AttributeIndex::Function).unwrap(), "alwaysinline");
    assert_eq!(attributes.as_string(AttributeIndex::Return).unwrap(), "");

    attributes
        .add_kind(AttributeIndex::Function, AttributeKind::OptimizeNone)
        .unwrap()
        .add_kind(AttributeIndex::Return, AttributeKind::NonNull)
        .unwrap()
        .add_kind(PARAM0, AttributeKind::InReg)
        .unwrap();
    assert_eq!(
        attributes.as_string(AttributeIndex::Function).unwrap(),
        "alwaysinline optnone"
    );
    assert_eq!(attributes.as_string(AttributeIndex::Return).unwrap(), "nonnull");
    assert_eq!(attributes.as_string(PARAM0).unwrap(), "inreg");
}

#[test]
fn test_mutation_is_visible_through_every_view() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut original = function.attributes();
    assert!(!original.has_any(AttributeIndex::Function).unwrap());

    let mut other = function.attributes();
    other
        .add_kind(AttributeIndex::Function, AttributeKind::AlwaysInline)
        .unwrap();
    assert!(original.has(AttributeIndex::Function, AttributeKind::AlwaysInline).unwrap());

    original
        .add_kind(AttributeIndex::Function, AttributeKind::NoUnwind)
        .unwrap();
    assert!(other.has(AttributeIndex::Function, AttributeKind::NoUnwind).unwrap());
    assert!(other.has(AttributeIndex::Function, AttributeKind::AlwaysInline).unwrap());
}

#[test]
fn test_disallowed_usage() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    let cases = [
        (AttributeKind::Alignment, AttributeIndex::Function),
        (AttributeKind::StackAlignment, AttributeIndex::Return),
        (AttributeKind::StackAlignment, PARAM0),
        (AttributeKind::Dereferenceable, AttributeIndex::Function),
        (AttributeKind::DereferenceableOrNull, AttributeIndex::Function),
    ];
    for (kind, index) in cases {
        let value = ctx.create_int_attribute(kind, 64).unwrap();
        assert_eq!(
            attributes.add_value(index, value).err(),
            Some(Error::InvalidAttributeUsage { kind, index })
        );
        assert_eq!(
            attributes.add_int(index, kind, 64).err(),
            Some(Error::InvalidAttributeUsage { kind, index })
        );
        assert!(!attributes.has_any(index).unwrap());
    }
}

#[test]
fn test_integer_kinds_require_a_value() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    for kind in AttributeKind::all().filter(|kind| kind.requires_int_value()) {
        let index = if kind.allowed_indices().permits(PARAM0) {
            PARAM0
        } else {
            AttributeIndex::Function
        };
        assert_eq!(
            attributes.add_kind(index, kind).err(),
            Some(Error::MissingRequiredPayload(kind))
        );
    }
    assert_eq!(
        ctx.create_attribute(AttributeKind::Dereferenceable).err(),
        Some(Error::MissingRequiredPayload(AttributeKind::Dereferenceable))
    );
}

#[test]
fn test_integer_attribute_round_trip() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    let cases = [
        (AttributeKind::Alignment, PARAM0),
        (AttributeKind::Dereferenceable, PARAM0),
        (AttributeKind::DereferenceableOrNull, PARAM0),
        (AttributeKind::StackAlignment, AttributeIndex::Function),
    ];
    for (kind, index) in cases {
        attributes.add_int(index, kind, 64).unwrap();
        assert_eq!(attributes.get_attribute_value(index, kind).unwrap(), 64);
        assert_eq!(attributes.at(index).unwrap().get(kind).unwrap().int_value(), Some(64));
    }
    assert_eq!(
        attributes.as_string(PARAM0).unwrap(),
        "align 64 dereferenceable(64) dereferenceable_or_null(64)"
    );
}

#[test]
fn test_get_attribute_value_errors() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    attributes
        .add_kind(AttributeIndex::Function, AttributeKind::NoUnwind)
        .unwrap();

    assert_eq!(
        attributes
            .get_attribute_value(AttributeIndex::Function, AttributeKind::NoUnwind)
            .err(),
        Some(Error::MissingIntegerValue {
            kind: AttributeKind::NoUnwind,
            index: AttributeIndex::Function,
        })
    );
    assert_eq!(
        attributes
            .get_attribute_value(PARAM0, AttributeKind::Alignment)
            .err(),
        Some(Error::AttributeNotFound {
            kind: AttributeKind::Alignment,
            index: PARAM0,
        })
    );
}

#[test]
fn test_remove() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    attributes
        .add_kinds(
            AttributeIndex::Function,
            [AttributeKind::AlwaysInline, AttributeKind::OptimizeNone],
        )
        .unwrap()
        .add_kind(AttributeIndex::Return, AttributeKind::NonNull)
        .unwrap()
        .add_kind(PARAM0, AttributeKind::InReg)
        .unwrap();

    attributes
        .remove_kind(AttributeIndex::Function, AttributeKind::OptimizeNone)
        .unwrap();
    assert!(attributes.has(AttributeIndex::Return, AttributeKind::NonNull).unwrap());
    assert!(attributes.has(PARAM0, AttributeKind::InReg).unwrap());
    assert!(attributes.has(AttributeIndex::Function, AttributeKind::AlwaysInline).unwrap());
    assert!(!attributes.has(AttributeIndex::Function, AttributeKind::OptimizeNone).unwrap());
}

#[test]
fn test_remove_named_attribute() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    attributes
        .add_kind(AttributeIndex::Function, AttributeKind::AlwaysInline)
        .unwrap()
        .add_value(AttributeIndex::Function, AttributeValue::flag("testattr").unwrap())
        .unwrap()
        .add_kind(AttributeIndex::Return, AttributeKind::NonNull)
        .unwrap();
    assert!(attributes.has_named(AttributeIndex::Function, "testattr").unwrap());

    attributes.remove_named(AttributeIndex::Function, "testattr").unwrap();
    assert!(!attributes.has_named(AttributeIndex::Function, "testattr").unwrap());
    assert!(attributes.has(AttributeIndex::Function, AttributeKind::AlwaysInline).unwrap());
    assert!(attributes.has(AttributeIndex::Return, AttributeKind::NonNull).unwrap());

    // removing again, or with an empty name, is a no-op
    attributes.remove_named(AttributeIndex::Function, "testattr").unwrap();
    attributes.remove_named(AttributeIndex::Function, "").unwrap();
    assert_eq!(attributes.as_string(AttributeIndex::Function).unwrap(), "alwaysinline");
}

#[test]
fn test_has_any() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 2);
    let mut attributes = function.attributes();
    let indices = [AttributeIndex::Function, AttributeIndex::Return, PARAM0, PARAM0 + 1];
    for index in indices {
        assert!(!attributes.has_any(index).unwrap());
    }

    attributes
        .add_kinds(AttributeIndex::Function, [AttributeKind::AlwaysInline, AttributeKind::Builtin])
        .unwrap()
        .add_int(AttributeIndex::Return, AttributeKind::DereferenceableOrNull, 1)
        .unwrap()
        .add_kind(PARAM0, AttributeKind::ByVal)
        .unwrap()
        .add_value(PARAM0 + 1, AttributeValue::flag("TestCustom").unwrap())
        .unwrap();

    for index in indices {
        assert!(attributes.has_any(index).unwrap());
    }
    assert!(attributes.has(AttributeIndex::Function, AttributeKind::Builtin).unwrap());
    assert!(attributes.has(AttributeIndex::Return, AttributeKind::DereferenceableOrNull).unwrap());
    assert!(attributes.has(PARAM0, AttributeKind::ByVal).unwrap());
    assert!(attributes.has_named(PARAM0 + 1, "TestCustom").unwrap());
}

#[test]
fn test_duplicate_kind_replaces() {
    let ctx = Context::new();
    let mut function = ctx.add_function("test", 1);
    let mut attributes = function.attributes();
    attributes
        .add_int(PARAM0, AttributeKind::Alignment, 4)
        .unwrap()
        .add_int(PARAM0, AttributeKind::Alignment, 16)
        .unwrap()
        .add_value(PARAM0, AttributeValue::string("kind", "a").unwrap())
        .unwrap()
        .add_value(PARAM0, AttributeValue::string("kind", "b").unwrap())
        .unwrap();

    let params = attributes.at(PARAM0).unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get(AttributeKind::Alignment).unwrap().int_value(), Some(16));
    assert_eq!(params.get_named("kind").unwrap().string_value(), Some("b"));
}
