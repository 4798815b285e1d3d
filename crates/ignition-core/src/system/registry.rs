//! # System Registry
//!
//! Ordered collection of global systems.
//!
//! ## Ordering
//!
//! Initialization order is registration order. A system's declared
//! dependencies must already be registered when it is added, so the list is
//! always a valid topological order and can be inspected with [`SystemRegistry::names`].
//!
//! ## Failure Policy
//!
//! `initialize_all` stops at the first failing system and returns its error
//! unchanged. Systems after it stay [`SystemState::Pending`]. The registry
//! runs once; a second run is rejected.

use super::GlobalSystem;
use crate::{BootstrapContext, BootstrapError};

/// Lifecycle state of one registered system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemState {
    /// Not initialized yet (or never reached because an earlier system failed).
    Pending,
    /// `initialize()` returned successfully.
    Initialized,
    /// `initialize()` returned an error.
    Failed,
}

struct Entry {
    system: Box<dyn GlobalSystem>,
    state: SystemState,
}

/// Explicit, ordered registry of global systems.
#[derive(Default)]
pub struct SystemRegistry {
    entries: Vec<Entry>,
    ran: bool,
}

impl std::fmt::Debug for SystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemRegistry")
            .field("systems", &self.names())
            .field("ran", &self.ran)
            .finish()
    }
}

impl SystemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system to the initialization order.
    ///
    /// Rejects duplicate names, dependencies that are not registered yet,
    /// and registration after the registry ran.
    pub fn register<S>(&mut self, system: S) -> Result<(), BootstrapError>
    where
        S: GlobalSystem + 'static,
    {
        if self.ran {
            return Err(BootstrapError::RegistryAlreadyRan);
        }
        let name = system.name();
        if self.contains(name) {
            return Err(BootstrapError::DuplicateSystem(name));
        }
        if let Some(missing) = system
            .dependencies()
            .iter()
            .find(|dependency| !self.contains(dependency))
        {
            return Err(BootstrapError::UnmetDependency {
                system: name,
                dependency: *missing,
            });
        }

        tracing::debug!(system = name, position = self.entries.len(), "registered system");
        self.entries.push(Entry {
            system: Box::new(system),
            state: SystemState::Pending,
        });
        Ok(())
    }

    /// Initialize every system once, in registration order.
    pub fn initialize_all(&mut self, context: &mut BootstrapContext) -> Result<(), BootstrapError> {
        if self.ran {
            return Err(BootstrapError::RegistryAlreadyRan);
        }
        self.ran = true;

        for entry in &mut self.entries {
            let name = entry.system.name();
            tracing::debug!(system = name, "initializing system");

            match entry.system.initialize(context) {
                Ok(()) => {
                    entry.state = SystemState::Initialized;
                    tracing::info!(system = name, "system initialized");
                }
                Err(e) => {
                    entry.state = SystemState::Failed;
                    tracing::error!(system = name, error = %e, "system failed to initialize");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Whether a system with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.system.name() == name)
    }

    /// State of a registered system, if any.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<SystemState> {
        self.entries
            .iter()
            .find(|entry| entry.system.name() == name)
            .map(|entry| entry.state)
    }

    /// Registered names, in initialization order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.system.name()).collect()
    }

    /// Whether `initialize_all` has been called.
    #[must_use]
    pub fn has_run(&self) -> bool {
        self.ran
    }

    /// Number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no system is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
