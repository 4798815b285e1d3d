//! # ignition-core
//!
//! Ordered bootstrap of global systems, with typed command-line flags - THE LOGIC.
//!
//! A global system is a subsystem with a single-shot, process-wide
//! initialization. Systems are registered in an explicit order with a
//! [`SystemRegistry`] and initialized against one owned [`BootstrapContext`].
//!
//! ## Startup Sequence
//!
//! ```text
//! capture argv ──► CommandLineSystem::initialize ──► later systems read flags
//!  (ArgumentVector)   (register + parse, FlagHandler)   (by ArgumentId)
//! ```
//!
//! ## Architectural Constraints
//!
//! - No ambient globals: all startup state lives in the context
//! - Write once, read many: capture and parsing each happen exactly once
//! - No panics: every failure is a [`BootstrapError`]

// =============================================================================
// MODULES
// =============================================================================

pub mod arguments;
pub mod commandline;
pub mod context;
pub mod error;
pub mod flags;
pub mod handler;
pub mod system;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use arguments::ArgumentVector;
pub use commandline::{COMMANDLINE_SYSTEM, CommandLineSystem};
pub use context::BootstrapContext;
pub use error::BootstrapError;
pub use flags::{
    ArgumentId, DEFAULT_VERBOSITY, FlagDescriptor, FlagKind, FlagSource, FlagValue, MAX_VERBOSITY,
    ResolvedFlag,
};
pub use handler::{DEFAULT_PROGRAM_NAME, FlagHandler};
pub use system::{GlobalSystem, SystemRegistry, SystemState};
