//! # System Module
//!
//! The global-system lifecycle contract and the ordered registry that drives it.
//!
//! A global system is any type implementing [`GlobalSystem`]. Systems are
//! registered with a [`SystemRegistry`] in dependency order; the registry
//! initializes each exactly once, in that order, and halts on the first
//! failure.

mod registry;

pub use registry::*;

use crate::{BootstrapContext, BootstrapError};

/// A subsystem with a single-shot, process-wide initialization.
pub trait GlobalSystem {
    /// Unique name, used as the registry key and in dependency lists.
    fn name(&self) -> &'static str;

    /// Names of systems that must be registered (and so initialized) first.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// Run the system's one-time initialization.
    ///
    /// Called at most once by the registry. Implementations may reject a
    /// second direct call with [`BootstrapError::SystemAlreadyInitialized`].
    fn initialize(&mut self, context: &mut BootstrapContext) -> Result<(), BootstrapError>;
}
