//! Structural member resolution
//!
//! The resolver never binds members at compile time. It scans the declared
//! constructors or methods of the target type and selects the first one whose
//! parameter shapes accept the runtime types of the supplied arguments.

use tracing::trace;

use crate::error::{ReflectError, Result};
use crate::registry::TypeRegistry;
use crate::types::{TypeDescriptor, TypeRef};
use crate::value::{ArrayValue, Instance, Value};

const CONSTRUCTOR: &str = "<init>";

/// Target of a method invocation
#[derive(Debug)]
pub enum Target<'a> {
    /// Static call on a type
    Type(&'a str),
    /// Call on an instance
    Instance(&'a mut Instance),
}

/// Resolves and performs construction, invocation and field access
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Construct an instance of `type_name` with the first compatible constructor
    pub fn construct(&self, type_name: &str, args: &[Value]) -> Result<Instance> {
        let desc = self.lookup(type_name)?;
        if !desc.is_instantiable() {
            return Err(ReflectError::NotInstantiable(type_name.to_string()));
        }

        let (index, ctor) = desc
            .constructors()
            .iter()
            .enumerate()
            .find(|(_, ctor)| self.matches(ctor.params(), args))
            .ok_or_else(|| ReflectError::resolution(type_name, CONSTRUCTOR, shape_of(args)))?;
        trace!(owner = type_name, index, "constructor resolved");

        let instance = ctor
            .call(args)
            .map_err(|reason| ReflectError::invocation(type_name, CONSTRUCTOR, reason))?;
        if instance.type_name() != type_name {
            return Err(ReflectError::invocation(
                type_name,
                CONSTRUCTOR,
                format!("constructor produced `{}`", instance.type_name()),
            ));
        }
        Ok(instance)
    }

    /// Invoke the first compatible method named `name` declared on the target's type.
    ///
    /// A static method ignores the receiver. An instance method called on a
    /// [`Target::Type`] fails with an invocation error. A non-null result must
    /// conform to `return_type`.
    pub fn invoke(
        &self,
        target: Target<'_>,
        name: &str,
        return_type: &TypeRef,
        args: &[Value],
    ) -> Result<Value> {
        let (owner, receiver) = match target {
            Target::Type(owner) => (owner.to_string(), None),
            Target::Instance(instance) => (instance.type_name().to_string(), Some(instance)),
        };
        let desc = self.lookup(&owner)?;

        let (index, method) = desc
            .methods()
            .iter()
            .enumerate()
            .find(|(_, m)| m.name() == name && self.matches(m.params(), args))
            .ok_or_else(|| ReflectError::resolution(owner.as_str(), name, shape_of(args)))?;
        trace!(owner = %owner, method = name, index, "method resolved");

        let receiver = if method.is_static() {
            None
        } else {
            Some(receiver.ok_or_else(|| {
                ReflectError::invocation(
                    owner.as_str(),
                    name,
                    "instance method invoked without a receiver",
                )
            })?)
        };

        let result = method
            .call(receiver, args)
            .map_err(|reason| ReflectError::invocation(owner.as_str(), name, reason))?;
        if !result.is_null() && !self.accepts(return_type, &result) {
            return Err(ReflectError::TypeMismatch {
                context: format!("return value of `{}::{}`", owner, name),
                expected: return_type.to_string(),
                actual: result.type_label(),
            });
        }
        Ok(result)
    }

    /// Read a declared field, checking the value against `ty`.
    ///
    /// An unset field reads as `Null`.
    pub fn get_field(&self, owner: &Instance, name: &str, ty: &TypeRef) -> Result<Value> {
        let desc = self.lookup(owner.type_name())?;
        if desc.field(name).is_none() {
            return Err(ReflectError::resolution(owner.type_name(), name, "field"));
        }
        let value = owner.field(name).cloned().unwrap_or_default();
        if !value.is_null() && !self.accepts(ty, &value) {
            return Err(ReflectError::TypeMismatch {
                context: format!("field `{}::{}`", owner.type_name(), name),
                expected: ty.to_string(),
                actual: value.type_label(),
            });
        }
        Ok(value)
    }

    /// Write a declared field; the value must be accepted by the declared field type
    pub fn set_field(&self, owner: &mut Instance, name: &str, value: Value) -> Result<()> {
        let desc = self.lookup(owner.type_name())?;
        let field = desc
            .field(name)
            .ok_or_else(|| ReflectError::resolution(owner.type_name(), name, "field"))?;
        if !self.accepts(field.ty(), &value) {
            return Err(ReflectError::TypeMismatch {
                context: format!("field `{}::{}`", owner.type_name(), name),
                expected: field.ty().to_string(),
                actual: value.type_label(),
            });
        }
        owner.insert_field(name, value);
        Ok(())
    }

    /// Build a typed array; every element must be accepted by `component`
    pub fn new_array(&self, component: TypeRef, elements: Vec<Value>) -> Result<Value> {
        if let Some((index, bad)) = elements
            .iter()
            .enumerate()
            .find(|(_, e)| !self.accepts(&component, e))
        {
            return Err(ReflectError::TypeMismatch {
                context: format!("array element {}", index),
                expected: component.to_string(),
                actual: bad.type_label(),
            });
        }
        Ok(Value::Array(ArrayValue::new(component, elements)))
    }

    /// Whether a declared parameter list accepts the arguments
    pub fn matches(&self, params: &[TypeRef], args: &[Value]) -> bool {
        params.len() == args.len()
            && params
                .iter()
                .zip(args)
                .all(|(param, arg)| self.accepts(param, arg))
    }

    /// Whether a slot of type `param` accepts `arg`
    pub fn accepts(&self, param: &TypeRef, arg: &Value) -> bool {
        match arg.runtime_type() {
            None => !param.is_primitive(),
            Some(runtime) => {
                self.registry.is_assignable(param, &runtime)
                    || matches!(
                        (param, &runtime),
                        (TypeRef::Primitive(p), TypeRef::Boxed(b)) if p == b
                    )
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&'r TypeDescriptor> {
        self.registry
            .get(name)
            .map(|desc| desc.as_ref())
            .ok_or_else(|| ReflectError::UnknownType(name.to_string()))
    }
}

fn shape_of(args: &[Value]) -> String {
    args.iter()
        .map(Value::type_label)
        .collect::<Vec<_>>()
        .join(", ")
}
