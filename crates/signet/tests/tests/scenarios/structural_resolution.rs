//! Constructor selection by runtime argument types.

use signet_reflect::{
    Handle, Instance, PrimitiveKind, ReflectError, Resolver, TypeDescriptor, TypeRef,
    TypeRegistry, Value,
};

const INT: TypeRef = TypeRef::Primitive(PrimitiveKind::Int);
const INTEGER: TypeRef = TypeRef::Boxed(PrimitiveKind::Int);

fn marked(ty: &'static str, mark: &'static str) -> impl Fn(&[Value]) -> Result<Instance, String> {
    move |_: &[Value]| Ok(Instance::new(ty).with_field("mark", Value::from(mark)))
}

fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with_type(
            TypeDescriptor::class("demo.Signature")
                .field("mark", TypeRef::Str)
                .constructor(vec![INT], marked("demo.Signature", "int"))
                .constructor(vec![TypeRef::Str], marked("demo.Signature", "string"))
                .build(),
        )
        .with_type(
            TypeDescriptor::class("demo.IntFirst")
                .field("mark", TypeRef::Str)
                .constructor(vec![INT], marked("demo.IntFirst", "int"))
                .constructor(vec![INTEGER], marked("demo.IntFirst", "integer"))
                .build(),
        )
        .with_type(
            TypeDescriptor::class("demo.IntegerFirst")
                .field("mark", TypeRef::Str)
                .constructor(vec![INTEGER], marked("demo.IntegerFirst", "integer"))
                .constructor(vec![INT], marked("demo.IntegerFirst", "int"))
                .build(),
        )
}

fn mark(instance: &Instance) -> &str {
    instance.field("mark").and_then(Value::as_str).unwrap_or_default()
}

#[test]
fn string_argument_selects_string_constructor() {
    let registry = registry();
    let resolver = Resolver::new(&registry);
    let instance = resolver
        .construct("demo.Signature", &[Value::from("ABCDEF")])
        .unwrap();
    assert_eq!(mark(&instance), "string");
}

#[test]
fn ambiguous_overloads_resolve_by_declaration_order() {
    let registry = registry();
    let resolver = Resolver::new(&registry);

    let int_first = resolver.construct("demo.IntFirst", &[Value::Int(7)]).unwrap();
    assert_eq!(mark(&int_first), "int");

    let integer_first = resolver
        .construct("demo.IntegerFirst", &[Value::Int(7)])
        .unwrap();
    assert_eq!(mark(&integer_first), "integer");
}

#[test]
fn null_argument_skips_primitive_parameters() {
    let registry = registry();
    let resolver = Resolver::new(&registry);
    let instance = resolver.construct("demo.IntFirst", &[Value::Null]).unwrap();
    assert_eq!(mark(&instance), "integer");
}

#[test]
fn unmatched_shape_names_the_arguments() {
    let registry = registry();
    let resolver = Resolver::new(&registry);
    let err = resolver
        .construct("demo.Signature", &[Value::Bool(true)])
        .unwrap_err();
    assert_eq!(
        err,
        ReflectError::Resolution {
            owner: "demo.Signature".into(),
            member: "<init>".into(),
            shape: "Boolean".into(),
        }
    );
}

#[test]
fn handle_binds_once() {
    let registry = registry();
    let resolver = Resolver::new(&registry);
    let mut handle = Handle::of_type("demo.Signature");
    handle.construct(&resolver, &[Value::from("A")]).unwrap();
    assert!(matches!(
        handle.construct(&resolver, &[Value::from("B")]),
        Err(ReflectError::InvalidState(_))
    ));
    assert_eq!(
        handle.get(&resolver, "mark", &TypeRef::Str).unwrap(),
        Value::from("string")
    );
}
