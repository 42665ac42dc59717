//! Execution-target selection
//!
//! A [`BackendRegistry`] holds the simulated execution targets a training
//! call can run on. Selection mirrors a least-busy policy: operational
//! targets with enough qubit capacity, lowest pending-job count first,
//! earliest registration on ties. Acquiring a [`Session`] bumps the target's
//! pending-job count and the guard releases it on drop, whether or not the
//! training call succeeded.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};

/// One execution target
#[derive(Debug)]
pub struct Backend {
    name: String,
    num_qubits: usize,
    operational: bool,
    pending_jobs: AtomicUsize,
}

impl Backend {
    pub fn new(name: impl Into<String>, num_qubits: usize, operational: bool) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            operational,
            pending_jobs: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn is_operational(&self) -> bool {
        self.operational
    }

    /// Jobs currently holding a session on this target
    pub fn pending_jobs(&self) -> usize {
        self.pending_jobs.load(Ordering::SeqCst)
    }
}

/// Scoped session on one backend
///
/// Holds the pending-job slot for the duration of a training call; the slot
/// is released on drop regardless of how the call ended.
#[derive(Debug)]
pub struct Session<'a> {
    backend: &'a Backend,
}

impl<'a> Session<'a> {
    fn open(backend: &'a Backend) -> Self {
        backend.pending_jobs.fetch_add(1, Ordering::SeqCst);
        Self { backend }
    }

    pub fn backend(&self) -> &Backend {
        self.backend
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.backend.pending_jobs.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Registry of available execution targets
#[derive(Debug, Default)]
pub struct BackendRegistry {
    backends: Vec<Backend>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default simulator fleet the run command uses
    pub fn with_default_simulators() -> Self {
        let mut registry = Self::new();
        registry.register(Backend::new("simulator_statevector", 32, true));
        registry.register(Backend::new("simulator_mps", 100, true));
        registry.register(Backend::new("simulator_stabilizer", 5000, false));
        registry
    }

    pub fn register(&mut self, backend: Backend) {
        self.backends.push(backend);
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    /// Least-busy operational target with at least `min_num_qubits` capacity
    ///
    /// Ties on pending-job count go to the earliest-registered target.
    pub fn least_busy(&self, min_num_qubits: usize) -> Result<&Backend> {
        self.backends
            .iter()
            .filter(|b| b.is_operational() && b.num_qubits() >= min_num_qubits)
            .min_by_key(|b| b.pending_jobs())
            .ok_or_else(|| {
                Error::BackendUnavailable(format!(
                    "no operational target with at least {min_num_qubits} qubits"
                ))
            })
    }

    /// Open a scoped session on `backend`
    pub fn open_session<'a>(&'a self, backend: &'a Backend) -> Session<'a> {
        Session::open(backend)
    }
}
