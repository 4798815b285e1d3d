//! # Bootstrap Context
//!
//! The single owned object holding process-wide startup state.
//!
//! Constructed once by the binary, populated during bootstrap through `&mut`,
//! and only read afterwards. Every global system receives it explicitly, so a
//! test can build a fresh context per case instead of sharing hidden globals.

use crate::arguments::ArgumentVector;
use crate::handler::FlagHandler;

/// Startup state shared by all global systems.
#[derive(Debug, Default)]
pub struct BootstrapContext {
    arguments: ArgumentVector,
    flags: FlagHandler,
}

impl BootstrapContext {
    /// Create a context with nothing captured and no flags registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured process arguments.
    #[must_use]
    pub fn arguments(&self) -> &ArgumentVector {
        &self.arguments
    }

    /// Mutable access for the capture routine.
    pub fn arguments_mut(&mut self) -> &mut ArgumentVector {
        &mut self.arguments
    }

    /// The shared flag handler.
    #[must_use]
    pub fn flags(&self) -> &FlagHandler {
        &self.flags
    }

    /// Mutable access for systems that register flags.
    pub fn flags_mut(&mut self) -> &mut FlagHandler {
        &mut self.flags
    }

    /// Split borrow: read the arguments while mutating the flag handler.
    pub fn split_mut(&mut self) -> (&ArgumentVector, &mut FlagHandler) {
        (&self.arguments, &mut self.flags)
    }
}

// =============================================================================
// TESTS
// =============================================================================
