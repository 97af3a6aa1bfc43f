//! Strategies shared by the property tests.

use proptest::prelude::*;
use signet_reflect::Value;
use signet_types::{
    IdentityRecord, InstallLocationClass, InstallationRequest, Metadata, MetadataValue,
    PackageDescriptor, QueryFlags, ScanResult, UserHandle, PROPAGATION_CAPABILITY,
    SUBSTITUTION_CAPABILITY,
};

// ---------------------------------------------------------------------------
// Identity records
// ---------------------------------------------------------------------------

/// What the record carries under the declaration key
#[derive(Debug, Clone)]
pub enum Declaration {
    NoMetadata,
    MissingKey,
    Text(String),
    Int(i32),
    Null,
}

pub fn arb_declaration() -> impl Strategy<Value = Declaration> {
    prop_oneof![
        Just(Declaration::NoMetadata),
        Just(Declaration::MissingKey),
        arb_hex().prop_map(Declaration::Text),
        any::<i32>().prop_map(Declaration::Int),
        Just(Declaration::Null),
    ]
}

/// Even-length hex text, possibly empty
pub fn arb_hex() -> impl Strategy<Value = String> {
    "([A-Fa-f0-9]{2}){0,5}"
}

/// Which capability sections are present
#[derive(Debug, Clone, Copy)]
pub enum Sections {
    Both,
    NoRequested,
    NoGrants,
}

pub fn arb_sections() -> impl Strategy<Value = Sections> {
    prop_oneof![
        6 => Just(Sections::Both),
        1 => Just(Sections::NoRequested),
        1 => Just(Sections::NoGrants),
    ]
}

fn arb_other_entry() -> impl Strategy<Value = (String, i32)> {
    (
        prop_oneof![
            Just("android.permission.INTERNET".to_string()),
            Just("android.permission.CAMERA".to_string()),
            Just(SUBSTITUTION_CAPABILITY.to_lowercase()),
            "[a-z]{2,6}\\.[a-z]{2,6}",
        ],
        0i32..4,
    )
}

/// Records with equal-length paired sections whenever both are present
pub fn arb_record() -> impl Strategy<Value = IdentityRecord> {
    arb_record_with_skew(Just(0i32))
}

/// Records whose grant section length differs from the requested one by `skew`
pub fn arb_record_with_skew(
    skew: impl Strategy<Value = i32>,
) -> impl Strategy<Value = IdentityRecord> {
    (
        "[a-z]{3,8}\\.[a-z]{3,8}",
        arb_sections(),
        prop::collection::vec(arb_other_entry(), 0..4),
        prop::collection::vec(0i32..4, 0..3),
        arb_declaration(),
        skew,
    )
        .prop_map(|(name, sections, others, capability_grants, declaration, skew)| {
            let mut entries = others;
            entries.extend(
                capability_grants
                    .into_iter()
                    .map(|grant| (SUBSTITUTION_CAPABILITY.to_string(), grant)),
            );
            let mut record = IdentityRecord::new(name)
                .with_requested(entries)
                .with_signing_identity(signet_tests::original_identity());

            if skew < 0 {
                // an extra name without a grant entry
                if let Some(names) = record.requested_capabilities.as_mut() {
                    names.push("android.permission.VIBRATE".to_string());
                }
            } else if skew > 0 {
                if let Some(grants) = record.grant_flags.as_mut() {
                    grants.push(2);
                }
            }

            match sections {
                Sections::Both => {}
                Sections::NoRequested => record.requested_capabilities = None,
                Sections::NoGrants => record.grant_flags = None,
            }

            record.declared_metadata = match declaration {
                Declaration::NoMetadata => None,
                Declaration::MissingKey => Some(Metadata::new().with("other", "x")),
                Declaration::Text(text) => {
                    Some(Metadata::new().with("fake-signature", MetadataValue::Str(text)))
                }
                Declaration::Int(v) => Some(Metadata::new().with("fake-signature", v)),
                Declaration::Null => {
                    Some(Metadata::new().with("fake-signature", MetadataValue::Null))
                }
            };
            record
        })
}

/// Records that pass every gate
pub fn arb_eligible_record() -> impl Strategy<Value = IdentityRecord> {
    (
        "[a-z]{3,8}\\.[a-z]{3,8}",
        prop::collection::vec(arb_other_entry(), 0..4),
        prop::collection::vec(prop_oneof![Just(2i32), Just(3i32)], 1..3),
        arb_hex(),
    )
        .prop_map(|(name, others, grants, declared)| {
            let mut entries = others;
            entries.extend(
                grants
                    .into_iter()
                    .map(|grant| (SUBSTITUTION_CAPABILITY.to_string(), grant)),
            );
            IdentityRecord::new(name)
                .with_requested(entries)
                .with_metadata(Metadata::new().with("fake-signature", MetadataValue::Str(declared)))
                .with_signing_identity(signet_tests::original_identity())
        })
}

pub fn arb_flags() -> impl Strategy<Value = QueryFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(signatures, certificates, permissions, other)| {
            let mut flags = QueryFlags::empty();
            flags.set(QueryFlags::GET_SIGNATURES, signatures);
            flags.set(QueryFlags::GET_SIGNING_CERTIFICATES, certificates);
            flags.set(QueryFlags::GET_PERMISSIONS, permissions);
            if other {
                flags |= QueryFlags::from_raw(0x80);
            }
            flags
        },
    )
}

// ---------------------------------------------------------------------------
// Installation batches
// ---------------------------------------------------------------------------

pub fn arb_location() -> impl Strategy<Value = InstallLocationClass> {
    prop_oneof![
        Just(InstallLocationClass::Core),
        Just(InstallLocationClass::System),
        Just(InstallLocationClass::SystemExt),
        Just(InstallLocationClass::Product),
        Just(InstallLocationClass::Vendor),
        Just(InstallLocationClass::Data),
    ]
}

/// A non-reference request; the name never equals the platform package
pub fn arb_request() -> impl Strategy<Value = InstallationRequest> {
    (
        "com\\.[a-z]{2,8}",
        arb_location(),
        prop_oneof![Just("own"), Just("other"), Just("platform")],
        any::<bool>(),
        any::<bool>(),
        any::<u32>(),
        0u32..4,
    )
        .prop_map(
            |(name, location, identity, declares, platform_signed, flags, user)| {
                let mut package = PackageDescriptor::new(name, location)
                    .with_signing_identity(Value::from(identity))
                    .signed_with_platform_key(platform_signed);
                if declares {
                    package = package.with_capability(PROPAGATION_CAPABILITY);
                }
                let mut request = InstallationRequest::new(package);
                request.parse_flags = flags;
                request.scan_flags = flags.rotate_left(7);
                request.user = UserHandle(user);
                request.scan_result = ScanResult(Value::Int(user as i32));
                request
            },
        )
}

pub fn arb_batch() -> impl Strategy<Value = Vec<InstallationRequest>> {
    prop::collection::vec(arb_request(), 0..8)
}

/// The reference request for the default platform package
pub fn reference_request() -> InstallationRequest {
    signet_tests::install_request("android", InstallLocationClass::Core, "platform", &[])
}
