//! Dynamic values carried through the resolver

use std::collections::BTreeMap;
use std::fmt;

use crate::types::TypeRef;

/// Primitive kinds of the reflected data model.
///
/// A primitive parameter never accepts `Null`, and accepts the boxed value of
/// its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Name of the primitive form (`int`)
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Name of the boxed form (`Integer`)
    pub fn boxed_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Char => "Character",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
        }
    }
}

/// A runtime value.
///
/// Values that carry a primitive payload report the *boxed* kind as their
/// runtime type, since they always travel through an erased argument list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// A primitive `byte[]`
    Bytes(Vec<u8>),
    Object(Instance),
    Array(ArrayValue),
}

impl Value {
    /// Runtime type of the value, `None` for `Null`
    pub fn runtime_type(&self) -> Option<TypeRef> {
        let ty = match self {
            Self::Null => return None,
            Self::Bool(_) => TypeRef::Boxed(PrimitiveKind::Boolean),
            Self::Byte(_) => TypeRef::Boxed(PrimitiveKind::Byte),
            Self::Short(_) => TypeRef::Boxed(PrimitiveKind::Short),
            Self::Char(_) => TypeRef::Boxed(PrimitiveKind::Char),
            Self::Int(_) => TypeRef::Boxed(PrimitiveKind::Int),
            Self::Long(_) => TypeRef::Boxed(PrimitiveKind::Long),
            Self::Float(_) => TypeRef::Boxed(PrimitiveKind::Float),
            Self::Double(_) => TypeRef::Boxed(PrimitiveKind::Double),
            Self::Str(_) => TypeRef::Str,
            Self::Bytes(_) => TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Byte)),
            Self::Object(instance) => TypeRef::named(instance.type_name()),
            Self::Array(array) => TypeRef::array_of(array.component().clone()),
        };
        Some(ty)
    }

    /// Human-readable name of the runtime type, `null` for `Null`
    pub fn type_label(&self) -> String {
        self.runtime_type()
            .map_or_else(|| "null".to_string(), |ty| ty.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Self::Object(instance) => Some(instance),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Self::Object(value)
    }
}

impl From<ArrayValue> for Value {
    fn from(value: ArrayValue) -> Self {
        Self::Array(value)
    }
}

/// An object of a registered type.
///
/// Fields are stored by name. Constructor bodies populate them directly with
/// [`Instance::with_field`]; callers outside a type's own members go through
/// [`Resolver::set_field`](crate::Resolver::set_field), which checks the
/// declared field type.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Set a field while building the instance
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Raw field write, returning the previous value
    pub fn insert_field(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A typed array.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    component: TypeRef,
    elements: Vec<Value>,
}

impl ArrayValue {
    /// Create an array without checking element types.
    ///
    /// [`Resolver::new_array`](crate::Resolver::new_array) is the checked path.
    pub fn new(component: TypeRef, elements: Vec<Value>) -> Self {
        Self {
            component,
            elements,
        }
    }

    pub fn component(&self) -> &TypeRef {
        &self.component
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Byte(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "'{}'", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}L", v),
            Self::Float(v) => write!(f, "{}f", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Str(v) => write!(f, "{:?}", v),
            Self::Bytes(v) => write!(f, "byte[{}]", v.len()),
            Self::Object(instance) => write!(f, "{}@{{..}}", instance.type_name()),
            Self::Array(array) => write!(f, "{}[{}]", array.component(), array.len()),
        }
    }
}
