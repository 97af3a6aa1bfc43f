//! Shared fixtures for the signet cross-crate tests.
//!
//! A table-backed identity producer that behaves like the host's, a recording
//! reconciler, record and batch builders, and a log capture for asserting on
//! emitted warnings.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use signet_model::ModelVersion;
use signet_policy::BaseIdentityProducer;
use signet_propagation::{ReconcileFailure, Reconciler};
use signet_reflect::Value;
use signet_runtime::SignetRuntime;
use signet_types::{
    IdentityRecord, InstallLocationClass, InstallationRequest, Metadata, MetadataValue,
    PackageDescriptor, QueryFlags, SignetConfig, SigningIdentity, UserHandle,
    PROPAGATION_CAPABILITY, SUBSTITUTION_CAPABILITY,
};
use tracing_subscriber::fmt::MakeWriter;

/// Runtime over the reference schemas of `version`, default configuration
pub fn reference_runtime(version: ModelVersion) -> SignetRuntime {
    match SignetRuntime::with_reference_platform(SignetConfig::default(), version) {
        Ok(runtime) => runtime,
        Err(e) => panic!("reference platform must bootstrap: {}", e),
    }
}

/// Signing identity as the host would report it before substitution
pub fn original_identity() -> SigningIdentity {
    SigningIdentity::new(Value::from("original"), Some(Value::from("original-info")))
}

/// A record requesting and holding the substitution capability, declaring `declared`
pub fn candidate(name: &str, declared: MetadataValue) -> IdentityRecord {
    IdentityRecord::new(name)
        .with_defined([format!("{}.permission.C2D", name)])
        .with_requested([
            ("android.permission.INTERNET", 2),
            (SUBSTITUTION_CAPABILITY, 2),
        ])
        .with_metadata(Metadata::new().with("fake-signature", declared))
        .with_signing_identity(original_identity())
}

/// Base producer over a fixed table of records.
///
/// Like the host, it fills the capability sections only when asked, and the
/// signing identity only when either signing bit is set.
#[derive(Debug, Default)]
pub struct FixtureProducer {
    records: BTreeMap<String, IdentityRecord>,
    queries: RefCell<Vec<QueryFlags>>,
}

impl FixtureProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, record: IdentityRecord) -> Self {
        self.records.insert(record.name.clone(), record);
        self
    }

    /// Flags the producer was called with, in order
    pub fn queries(&self) -> Vec<QueryFlags> {
        self.queries.borrow().clone()
    }
}

impl BaseIdentityProducer for FixtureProducer {
    type Descriptor = String;

    fn produce(
        &self,
        descriptor: &String,
        flags: QueryFlags,
        _user: UserHandle,
    ) -> Option<IdentityRecord> {
        self.queries.borrow_mut().push(flags);
        let mut record = self.records.get(descriptor)?.clone();
        if !flags.requests_capabilities() {
            record.clear_capability_sections();
        }
        if !flags.requests_signing_identity() {
            record.signing_identity = SigningIdentity::default();
        }
        Some(record)
    }
}

/// Request builder for propagation batches
pub fn install_request(
    name: &str,
    location: InstallLocationClass,
    identity: &str,
    capabilities: &[&str],
) -> InstallationRequest {
    let package = capabilities.iter().fold(
        PackageDescriptor::new(name, location).with_signing_identity(Value::from(identity)),
        |package, capability| package.with_capability(*capability),
    );
    InstallationRequest::new(package)
}

/// Reference request plus a qualifying core package, a qualifying vendor
/// package, a user-installed package and a package without the capability
pub fn platform_batch() -> Vec<InstallationRequest> {
    vec![
        install_request("com.android.shell", InstallLocationClass::Core, "shell", &[]),
        install_request("android", InstallLocationClass::Core, "platform", &[]),
        install_request(
            "com.core.settings",
            InstallLocationClass::Core,
            "settings",
            &[PROPAGATION_CAPABILITY],
        ),
        install_request(
            "com.vendor.tool",
            InstallLocationClass::Vendor,
            "vendor",
            &[PROPAGATION_CAPABILITY],
        ),
        install_request(
            "com.user.app",
            InstallLocationClass::Data,
            "user",
            &[PROPAGATION_CAPABILITY],
        ),
    ]
}

/// Downstream reconciler recording every batch it receives
#[derive(Debug, Default)]
pub struct RecordingReconciler {
    batches: RefCell<Vec<Vec<InstallationRequest>>>,
    failure: Option<ReconcileFailure>,
}

impl RecordingReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciler that records the batch, then fails with `failure`
    pub fn failing(failure: ReconcileFailure) -> Self {
        Self {
            batches: RefCell::default(),
            failure: Some(failure),
        }
    }

    pub fn batches(&self) -> Vec<Vec<InstallationRequest>> {
        self.batches.borrow().clone()
    }
}

impl Reconciler for RecordingReconciler {
    type Context = ();
    type Output = (String, Value);

    fn reconcile(
        &self,
        requests: Vec<InstallationRequest>,
        _context: &(),
    ) -> Result<Vec<(String, Value)>, ReconcileFailure> {
        self.batches.borrow_mut().push(requests.clone());
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(requests
            .into_iter()
            .map(|r| (r.package.name, r.package.signing_identity))
            .collect())
    }
}

/// Captures formatted log output of everything run under [`CapturedLogs::capture`]
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with a subscriber writing into this capture
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Lines emitted at `level` (`"WARN"`, `"ERROR"`, ...)
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_string)
            .collect()
    }
}

/// Writer handed out by [`CapturedLogs`]
#[derive(Debug)]
pub struct CapturedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buffer: self.buffer.clone(),
        }
    }
}
