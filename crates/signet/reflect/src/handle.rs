//! Resolved handles
//!
//! A handle binds a type and, once constructed, the instance of that type.
//! A class-bound handle promotes to instance-bound exactly once.

use crate::error::{ReflectError, Result};
use crate::resolver::{Resolver, Target};
use crate::types::TypeRef;
use crate::value::{Instance, Value};

/// Binding of a target type and an optional owning instance
#[derive(Debug, Clone, PartialEq)]
pub enum Handle {
    /// No instance yet; static calls only
    ClassBound { ty: String },
    /// Bound to an instance; the binding never changes
    InstanceBound { ty: String, instance: Instance },
}

impl Handle {
    /// Handle over a type, ready to be constructed later
    pub fn of_type(ty: impl Into<String>) -> Self {
        Self::ClassBound { ty: ty.into() }
    }

    /// Handle over an existing instance
    pub fn of_instance(instance: Instance) -> Self {
        Self::InstanceBound {
            ty: instance.type_name().to_string(),
            instance,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::ClassBound { ty } | Self::InstanceBound { ty, .. } => ty,
        }
    }

    pub fn is_instance_bound(&self) -> bool {
        matches!(self, Self::InstanceBound { .. })
    }

    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Self::ClassBound { .. } => None,
            Self::InstanceBound { instance, .. } => Some(instance),
        }
    }

    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Self::ClassBound { .. } => None,
            Self::InstanceBound { instance, .. } => Some(instance),
        }
    }

    /// Construct the bound type and promote the handle.
    ///
    /// Fails with [`ReflectError::InvalidState`] on an instance-bound handle. On
    /// a construction failure the handle stays class-bound.
    pub fn construct(&mut self, resolver: &Resolver<'_>, args: &[Value]) -> Result<&Instance> {
        let ty = match self {
            Self::InstanceBound { ty, .. } => {
                return Err(ReflectError::InvalidState(format!(
                    "handle for `{}` is already bound to an instance",
                    ty
                )))
            }
            Self::ClassBound { ty } => std::mem::take(ty),
        };

        match resolver.construct(&ty, args) {
            Ok(instance) => {
                *self = Self::InstanceBound { ty, instance };
                self.instance().ok_or_else(|| {
                    ReflectError::InvalidState("handle lost its instance".to_string())
                })
            }
            Err(err) => {
                *self = Self::ClassBound { ty };
                Err(err)
            }
        }
    }

    /// Invoke a method: static on a class-bound handle, on the instance otherwise
    pub fn invoke(
        &mut self,
        resolver: &Resolver<'_>,
        name: &str,
        return_type: &TypeRef,
        args: &[Value],
    ) -> Result<Value> {
        let target = match self {
            Self::ClassBound { ty } => Target::Type(ty),
            Self::InstanceBound { instance, .. } => Target::Instance(instance),
        };
        resolver.invoke(target, name, return_type, args)
    }

    pub fn get(&self, resolver: &Resolver<'_>, name: &str, ty: &TypeRef) -> Result<Value> {
        let instance = self.bound("read a field")?;
        resolver.get_field(instance, name, ty)
    }

    pub fn set(&mut self, resolver: &Resolver<'_>, name: &str, value: Value) -> Result<()> {
        match self {
            Self::ClassBound { ty } => Err(ReflectError::InvalidState(format!(
                "cannot write a field through class-bound handle `{}`",
                ty
            ))),
            Self::InstanceBound { instance, .. } => resolver.set_field(instance, name, value),
        }
    }

    fn bound(&self, action: &str) -> Result<&Instance> {
        self.instance().ok_or_else(|| {
            ReflectError::InvalidState(format!(
                "cannot {} through class-bound handle `{}`",
                action,
                self.type_name()
            ))
        })
    }
}
