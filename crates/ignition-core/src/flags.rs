//! # Flag Identifiers and Descriptors
//!
//! The closed set of command-line flags the bootstrap recognizes, and the
//! static metadata the flag handler needs to register them.
//!
//! ## Recognized Flags
//!
//! | Identifier         | Command line             | Kind           | Default |
//! |--------------------|--------------------------|----------------|---------|
//! | `LoggerVerbosity`  | `--logger-verbosity <N>` | integer, 0..=4 | 2       |
//! | `LoggerVerbose`    | `--logger-verbose`       | switch         | off     |
//! | `LoggerEnableFile` | `--logger-enable-file`   | switch         | off     |
//! | `LoggerAppendFile` | `--logger-append-file`   | switch         | off     |
//!
//! Consumers query values by [`ArgumentId`], never by string.

use std::fmt;

// =============================================================================
// VERBOSITY BOUNDS
// =============================================================================

/// Highest accepted value for `--logger-verbosity`.
pub const MAX_VERBOSITY: u32 = 4;

/// Verbosity used when `--logger-verbosity` is not given.
pub const DEFAULT_VERBOSITY: u32 = 2;

// =============================================================================
// ARGUMENT IDENTIFIER
// =============================================================================

/// Stable identifier of a recognized command-line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArgumentId {
    /// Logger verbosity level.
    LoggerVerbosity,
    /// Verbose logging toggle.
    LoggerVerbose,
    /// Write logs to a file.
    LoggerEnableFile,
    /// Append to the log file instead of truncating it.
    LoggerAppendFile,
}

impl ArgumentId {
    /// Every identifier, in registration order.
    pub const ALL: [ArgumentId; 4] = [
        ArgumentId::LoggerVerbosity,
        ArgumentId::LoggerVerbose,
        ArgumentId::LoggerEnableFile,
        ArgumentId::LoggerAppendFile,
    ];

    /// Long flag name, without the leading dashes.
    #[must_use]
    pub const fn long_name(self) -> &'static str {
        match self {
            ArgumentId::LoggerVerbosity => "logger-verbosity",
            ArgumentId::LoggerVerbose => "logger-verbose",
            ArgumentId::LoggerEnableFile => "logger-enable-file",
            ArgumentId::LoggerAppendFile => "logger-append-file",
        }
    }

    /// The kind of value this flag carries.
    #[must_use]
    pub const fn kind(self) -> FlagKind {
        match self {
            ArgumentId::LoggerVerbosity => FlagKind::Integer { max: MAX_VERBOSITY },
            ArgumentId::LoggerVerbose
            | ArgumentId::LoggerEnableFile
            | ArgumentId::LoggerAppendFile => FlagKind::Switch,
        }
    }

    /// The value a flag resolves to when absent from the command line.
    #[must_use]
    pub const fn default_value(self) -> FlagValue {
        match self {
            ArgumentId::LoggerVerbosity => FlagValue::Integer(DEFAULT_VERBOSITY),
            ArgumentId::LoggerVerbose
            | ArgumentId::LoggerEnableFile
            | ArgumentId::LoggerAppendFile => FlagValue::Switch(false),
        }
    }

    const fn help(self) -> &'static str {
        match self {
            ArgumentId::LoggerVerbosity => {
                "Logger verbosity: 0 error, 1 warn, 2 info, 3 debug, 4 trace"
            }
            ArgumentId::LoggerVerbose => "Log everything, regardless of verbosity",
            ArgumentId::LoggerEnableFile => "Also write logs to the configured log file",
            ArgumentId::LoggerAppendFile => "Append to the log file instead of truncating it",
        }
    }

    /// Build the descriptor registered with the flag handler.
    #[must_use]
    pub const fn descriptor(self) -> FlagDescriptor {
        FlagDescriptor {
            id: self,
            long: self.long_name(),
            help: self.help(),
            kind: self.kind(),
            default: self.default_value(),
        }
    }
}

impl fmt::Display for ArgumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

// =============================================================================
// FLAG KIND & VALUE
// =============================================================================

/// Shape of the value a flag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// A non-negative integer taking one value token, bounded by `max`.
    Integer {
        /// Largest accepted value (inclusive).
        max: u32,
    },
    /// A presence toggle; no value token.
    Switch,
}

impl FlagKind {
    /// Check a raw value token against this kind.
    ///
    /// Returns the typed value, or the reason the token was rejected.
    pub fn validate(self, raw: &str) -> Result<FlagValue, String> {
        match self {
            FlagKind::Integer { max } => {
                // Digits only: no sign, no surrounding whitespace.
                if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err("expected a non-negative integer".to_string());
                }
                let value: u32 = raw
                    .parse()
                    .map_err(|_| format!("must be at most {}", max))?;
                if value > max {
                    return Err(format!("must be at most {}", max));
                }
                Ok(FlagValue::Integer(value))
            }
            FlagKind::Switch => Err("switch flags take no value".to_string()),
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagKind::Integer { .. } => f.write_str("integer"),
            FlagKind::Switch => f.write_str("switch"),
        }
    }
}

/// A typed flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagValue {
    /// Value of an integer flag.
    Integer(u32),
    /// Value of a switch flag.
    Switch(bool),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Integer(v) => write!(f, "{}", v),
            FlagValue::Switch(v) => write!(f, "{}", v),
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagSource {
    /// Given explicitly on the command line.
    CommandLine,
    /// Absent from the command line; the descriptor default applies.
    Default,
}

/// A flag value after parsing, with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFlag {
    /// The typed value.
    pub value: FlagValue,
    /// Where it came from.
    pub source: FlagSource,
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Everything the flag handler needs to know to register one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDescriptor {
    /// Identifier consumers query by.
    pub id: ArgumentId,
    /// Long flag name, without dashes.
    pub long: &'static str,
    /// One-line help text.
    pub help: &'static str,
    /// Accepted value shape.
    pub kind: FlagKind,
    /// Value when absent.
    pub default: FlagValue,
}

// =============================================================================
// TESTS
// =============================================================================
