//! # signet-reflect
//!
//! Structural invocation over a data model whose shape is only known at runtime.
//!
//! Hosts describe the types they carry with [`TypeDescriptor`]s collected in a
//! [`TypeRegistry`]. The [`Resolver`] then constructs instances, invokes methods
//! and reads or writes fields by matching the runtime types of already-realized
//! argument [`Value`]s against the declared parameter shapes.
//!
//! ## Matching
//!
//! A declared member matches when its parameter count equals the argument count
//! and, position by position, one of the following holds:
//!
//! - the parameter type accepts the argument's runtime type,
//! - the argument is [`Value::Null`] and the parameter is not a primitive,
//! - the parameter is a primitive and the argument carries the matching boxed kind.
//!
//! The first declared member that matches wins. Overloads that are ambiguous
//! under these rules resolve by declaration order only, which may differ between
//! deployments of the same type.
//!
//! ## Example
//!
//! ```rust
//! use signet_reflect::{Instance, Resolver, TypeDescriptor, TypeRef, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new().with_type(
//!     TypeDescriptor::class("demo.Label")
//!         .field("text", TypeRef::Str)
//!         .constructor(vec![TypeRef::Str], |args| {
//!             Ok(Instance::new("demo.Label").with_field("text", args[0].clone()))
//!         })
//!         .build(),
//! );
//!
//! let resolver = Resolver::new(&registry);
//! let label = resolver.construct("demo.Label", &[Value::from("hello")]).unwrap();
//! let text = resolver.get_field(&label, "text", &TypeRef::Str).unwrap();
//! assert_eq!(text.as_str(), Some("hello"));
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod handle;
pub mod registry;
pub mod resolver;
pub mod types;
pub mod value;

pub use error::{ReflectError, Result};
pub use handle::Handle;
pub use registry::TypeRegistry;
pub use resolver::{Resolver, Target};
pub use types::{
    ConstructorDescriptor, FieldDescriptor, MethodDescriptor, TypeDescriptor,
    TypeDescriptorBuilder, TypeKind, TypeRef,
};
pub use value::{ArrayValue, Instance, PrimitiveKind, Value};
