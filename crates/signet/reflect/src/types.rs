//! Runtime type descriptions
//!
//! A [`TypeDescriptor`] lists the members a type declares, in declaration
//! order. Order matters: the resolver picks the first compatible member.

use std::fmt;
use std::sync::Arc;

use crate::value::{Instance, PrimitiveKind, Value};

/// Reference to a type as it appears in a parameter, field or return position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A non-nullable primitive (`int`)
    Primitive(PrimitiveKind),
    /// A boxed primitive (`Integer`)
    Boxed(PrimitiveKind),
    /// The built-in string type
    Str,
    /// A registered type, by fully qualified name
    Named(String),
    /// An array of the component type
    Array(Box<TypeRef>),
    /// The root reference type; accepts every non-primitive
    Any,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn array_of(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{}", kind.name()),
            Self::Boxed(kind) => write!(f, "{}", kind.boxed_name()),
            Self::Str => write!(f, "String"),
            Self::Named(name) => write!(f, "{}", name),
            Self::Array(component) => write!(f, "{}[]", component),
            Self::Any => write!(f, "Object"),
        }
    }
}

/// Kind of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Abstract,
    Interface,
}

/// Constructor body: receives the matched arguments, returns the new instance
pub type ConstructorFn = Arc<dyn Fn(&[Value]) -> Result<Instance, String> + Send + Sync>;

/// Method body: receives the receiver (absent for static calls) and the arguments
pub type MethodFn =
    Arc<dyn Fn(Option<&mut Instance>, &[Value]) -> Result<Value, String> + Send + Sync>;

fn method_fn<F>(body: F) -> MethodFn
where
    F: Fn(Option<&mut Instance>, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
{
    Arc::new(body)
}

/// A declared constructor
#[derive(Clone)]
pub struct ConstructorDescriptor {
    params: Vec<TypeRef>,
    body: ConstructorFn,
}

impl ConstructorDescriptor {
    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    pub(crate) fn call(&self, args: &[Value]) -> Result<Instance, String> {
        (self.body)(args)
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A declared method
#[derive(Clone)]
pub struct MethodDescriptor {
    name: String,
    params: Vec<TypeRef>,
    returns: TypeRef,
    is_static: bool,
    body: MethodFn,
}

impl MethodDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    pub fn returns(&self) -> &TypeRef {
        &self.returns
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub(crate) fn call(
        &self,
        receiver: Option<&mut Instance>,
        args: &[Value],
    ) -> Result<Value, String> {
        (self.body)(receiver, args)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("is_static", &self.is_static)
            .finish_non_exhaustive()
    }
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    ty: TypeRef,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }
}

/// Runtime description of one type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    superclass: Option<String>,
    interfaces: Vec<String>,
    constructors: Vec<ConstructorDescriptor>,
    methods: Vec<MethodDescriptor>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Start describing a concrete class
    pub fn class(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name, TypeKind::Class)
    }

    /// Start describing an abstract class
    pub fn abstract_class(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name, TypeKind::Abstract)
    }

    /// Start describing an interface
    pub fn interface(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name, TypeKind::Interface)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Declared constructors, in declaration order
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Declared methods, in declaration order
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == TypeKind::Class
    }
}

/// Builder for [`TypeDescriptor`]
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            descriptor: TypeDescriptor {
                name: name.into(),
                kind,
                superclass: None,
                interfaces: Vec::new(),
                constructors: Vec::new(),
                methods: Vec::new(),
                fields: Vec::new(),
            },
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.descriptor.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.descriptor.interfaces.push(interface.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.descriptor.fields.push(FieldDescriptor {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn constructor<F>(mut self, params: Vec<TypeRef>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Instance, String> + Send + Sync + 'static,
    {
        self.descriptor.constructors.push(ConstructorDescriptor {
            params,
            body: Arc::new(body),
        });
        self
    }

    pub fn method<F>(
        mut self,
        name: impl Into<String>,
        params: Vec<TypeRef>,
        returns: TypeRef,
        body: F,
    ) -> Self
    where
        F: Fn(Option<&mut Instance>, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.descriptor.methods.push(MethodDescriptor {
            name: name.into(),
            params,
            returns,
            is_static: false,
            body: method_fn(body),
        });
        self
    }

    pub fn static_method<F>(
        mut self,
        name: impl Into<String>,
        params: Vec<TypeRef>,
        returns: TypeRef,
        body: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.descriptor.methods.push(MethodDescriptor {
            name: name.into(),
            params,
            returns,
            is_static: true,
            body: method_fn(move |_receiver, args| body(args)),
        });
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}
