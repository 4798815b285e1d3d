//! # Command Line System
//!
//! The global system bridging captured process arguments and the flag handler.
//!
//! `initialize` registers a descriptor for every [`ArgumentId`], then parses
//! the captured arguments. Afterwards every identifier resolves to either its
//! command-line value or its default. Parse errors are returned unchanged;
//! whether they halt the process is the caller's decision.

use crate::flags::ArgumentId;
use crate::system::GlobalSystem;
use crate::{BootstrapContext, BootstrapError};

/// Registry name of the command line system.
pub const COMMANDLINE_SYSTEM: &str = "commandline";

/// Registers the recognized flags and parses the captured arguments.
#[derive(Debug, Default)]
pub struct CommandLineSystem {
    identity: Option<(&'static str, &'static str)>,
    initialized: bool,
}

impl CommandLineSystem {
    /// Create an uninitialized system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system that names the program and answers `--version`.
    #[must_use]
    pub fn with_identity(name: &'static str, version: &'static str) -> Self {
        Self {
            identity: Some((name, version)),
            initialized: false,
        }
    }

    /// Whether `initialize` completed successfully.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl GlobalSystem for CommandLineSystem {
    fn name(&self) -> &'static str {
        COMMANDLINE_SYSTEM
    }

    fn initialize(&mut self, context: &mut BootstrapContext) -> Result<(), BootstrapError> {
        if self.initialized {
            return Err(BootstrapError::SystemAlreadyInitialized(COMMANDLINE_SYSTEM));
        }

        let (arguments, flags) = context.split_mut();
        if !arguments.is_captured() {
            return Err(BootstrapError::ArgumentsNotCaptured);
        }

        if let Some((name, version)) = self.identity {
            flags.set_identity(name, version)?;
        }
        for id in ArgumentId::ALL {
            flags.register(id.descriptor())?;
        }
        flags.parse(arguments.as_slice())?;

        self.initialized = true;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
