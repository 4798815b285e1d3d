//! # Error Types
//!
//! Every fallible operation in the bootstrap returns `Result<T, BootstrapError>`.
//!
//! ## Error Classes
//!
//! - **Precondition violations**: programmer errors in the startup sequence
//!   (capturing twice, initializing before capture, registering late).
//!   Not recoverable; the caller is expected to halt.
//! - **Parse failures**: a supplied argument does not match the shape its
//!   flag expects. Propagated unchanged so the caller decides the policy.
//! - **Environment failures**: configuration, I/O, or a subsystem that could
//!   not finish its own initialization.

use crate::flags::ArgumentId;
use thiserror::Error;

/// Errors that can occur while bootstrapping global systems.
///
/// - No silent failures
/// - The core never panics; every failure is reported through this type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    // =========================================================================
    // ARGUMENT CAPTURE
    // =========================================================================
    /// The argument vector was already populated for this context.
    #[error("Process arguments were already captured")]
    ArgumentsAlreadyCaptured,

    /// A system needed the argument vector before it was captured.
    #[error("Process arguments have not been captured")]
    ArgumentsNotCaptured,

    /// The declared argument count exceeds the tokens supplied.
    #[error("Argument count {declared} exceeds the {available} tokens supplied")]
    ArgumentCountMismatch {
        /// Count the caller declared.
        declared: usize,
        /// Tokens actually available.
        available: usize,
    },

    /// A process argument is not valid Unicode.
    #[error("Process argument at index {index} is not valid Unicode")]
    NonUnicodeArgument {
        /// Position of the offending token in argv.
        index: usize,
    },

    // =========================================================================
    // SYSTEM LIFECYCLE
    // =========================================================================
    /// `initialize()` was invoked on a system that already ran.
    #[error("System '{0}' is already initialized")]
    SystemAlreadyInitialized(&'static str),

    /// Two systems were registered under the same name.
    #[error("System '{0}' is already registered")]
    DuplicateSystem(&'static str),

    /// A system declared a dependency that is not registered before it.
    #[error("System '{system}' depends on '{dependency}', which is not registered before it")]
    UnmetDependency {
        /// The system being registered.
        system: &'static str,
        /// The missing dependency.
        dependency: &'static str,
    },

    /// The registry was asked to change or run again after it already ran.
    #[error("System registry has already run")]
    RegistryAlreadyRan,

    /// A system could not complete its own initialization.
    #[error("System '{system}' failed: {reason}")]
    SystemFailed {
        /// Name of the failing system.
        system: &'static str,
        /// Human readable cause.
        reason: String,
    },

    // =========================================================================
    // FLAG HANDLING
    // =========================================================================
    /// The same flag identifier was registered twice.
    #[error("Flag '{0}' is already registered")]
    FlagAlreadyRegistered(ArgumentId),

    /// The flag handler was modified or parsed after parsing completed.
    #[error("Flags have already been parsed")]
    FlagsAlreadyParsed,

    /// A flag value was requested before parsing.
    #[error("Flags have not been parsed")]
    FlagsNotParsed,

    /// A flag value was requested for an identifier nobody registered.
    #[error("Flag '{0}' is not registered")]
    FlagNotRegistered(ArgumentId),

    /// A typed accessor was used on a flag of another kind.
    #[error("Flag '{flag}' is not of kind {expected}")]
    FlagTypeMismatch {
        /// The flag that was queried.
        flag: ArgumentId,
        /// The kind the accessor expected.
        expected: &'static str,
    },

    /// A value was supplied for a flag but does not satisfy its kind.
    #[error("Invalid value '{value}' for flag '{flag}': {reason}")]
    InvalidFlagValue {
        /// The flag the value belongs to.
        flag: ArgumentId,
        /// The raw token as given on the command line.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The command line could not be parsed (unknown flag, missing value, ...).
    #[error("Command line error: {0}")]
    Parse(String),

    /// The command line asked for help or version output instead of running.
    ///
    /// Carries the rendered text; callers usually print it and exit cleanly.
    #[error("{0}")]
    DisplayRequested(String),

    // =========================================================================
    // ENVIRONMENT
    // =========================================================================
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl BootstrapError {
    /// Whether this error is a violation of the startup sequence contract.
    ///
    /// These indicate a programming error in how the bootstrap was driven,
    /// as opposed to bad user input or a hostile environment.
    #[must_use]
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::ArgumentsAlreadyCaptured
                | Self::ArgumentsNotCaptured
                | Self::ArgumentCountMismatch { .. }
                | Self::NonUnicodeArgument { .. }
                | Self::SystemAlreadyInitialized(_)
                | Self::DuplicateSystem(_)
                | Self::UnmetDependency { .. }
                | Self::RegistryAlreadyRan
                | Self::FlagAlreadyRegistered(_)
                | Self::FlagsAlreadyParsed
                | Self::FlagsNotParsed
                | Self::FlagNotRegistered(_)
                | Self::FlagTypeMismatch { .. }
        )
    }

    /// Whether this error came from user-supplied command-line input.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidFlagValue { .. } | Self::Parse(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
