//! # signet-model
//!
//! Builds signing identities for whichever version of the identity data model
//! the host carries. The version is probed once from the host's
//! [`TypeRegistry`](signet_reflect::TypeRegistry); every later construction goes
//! through the structural resolver using that version's [`SchemaTable`].

#![deny(unsafe_code)]

pub mod adapter;
pub mod error;
pub mod platform;
pub mod version;

pub use adapter::{IdentityModelAdapter, ResolvingAdapter};
pub use error::{ModelError, Result};
pub use version::{DetailsSchema, DetailsShape, ModelVersion, SchemaTable};
