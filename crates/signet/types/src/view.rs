//! Read-only view over an identity record
//!
//! The policy gates never touch a record directly. They consult a
//! [`PackageView`], which answers capability membership from a set built once.

use std::collections::BTreeSet;

use crate::flags::QueryFlags;
use crate::metadata::{Metadata, MetadataValue};
use crate::record::IdentityRecord;

/// State of a declaration under one metadata key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationState<'a> {
    /// No metadata, or no entry under the key
    Missing,
    /// Entry present with a null value
    Null,
    /// Entry present with a non-string value
    NotAString(&'static str),
    Valid(&'a str),
}

impl DeclarationState<'_> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Borrowed view of the fields the gates need
#[derive(Debug, Clone)]
pub struct PackageView<'a> {
    record: &'a IdentityRecord,
    flags: QueryFlags,
    capabilities: Option<BTreeSet<&'a str>>,
}

impl<'a> PackageView<'a> {
    pub fn new(record: &'a IdentityRecord, flags: QueryFlags) -> Self {
        let capabilities = match (&record.requested_capabilities, &record.grant_flags) {
            (Some(names), Some(_)) => Some(names.iter().map(String::as_str).collect()),
            _ => None,
        };
        Self {
            record,
            flags,
            capabilities,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    pub fn flags(&self) -> QueryFlags {
        self.flags
    }

    pub fn requested_capabilities(&self) -> Option<&'a [String]> {
        self.record.requested_capabilities.as_deref()
    }

    pub fn grant_flags(&self) -> Option<&'a [i32]> {
        self.record.grant_flags.as_deref()
    }

    pub fn metadata(&self) -> Option<&'a Metadata> {
        self.record.declared_metadata.as_ref()
    }

    /// Both the requested list and the grant list are present
    pub fn has_capability_sections(&self) -> bool {
        self.capabilities.is_some()
    }

    /// Requested capability names, or `None` when either paired list is absent
    pub fn capability_set(&self) -> Option<&BTreeSet<&'a str>> {
        self.capabilities.as_ref()
    }

    /// Exact, case-sensitive membership; false when either paired list is absent
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|set| set.contains(name))
    }

    /// Whether the paired lists have equal length. False when either is absent.
    pub fn lengths_match(&self) -> bool {
        match (self.requested_capabilities(), self.grant_flags()) {
            (Some(names), Some(grants)) => names.len() == grants.len(),
            _ => false,
        }
    }

    /// Grant entries paired with every occurrence of `name`
    pub fn grants_for(&self, name: &'a str) -> impl Iterator<Item = i32> + 'a {
        let names = self.requested_capabilities().unwrap_or_default();
        let grants = self.grant_flags().unwrap_or_default();
        names
            .iter()
            .zip(grants.iter())
            .filter(move |(n, _)| n.as_str() == name)
            .map(|(_, g)| *g)
    }

    pub fn declaration(&self, key: &str) -> DeclarationState<'a> {
        match self.metadata().and_then(|m| m.get(key)) {
            None => DeclarationState::Missing,
            Some(MetadataValue::Null) => DeclarationState::Null,
            Some(MetadataValue::Str(value)) => DeclarationState::Valid(value),
            Some(other) => DeclarationState::NotAString(other.kind()),
        }
    }
}
