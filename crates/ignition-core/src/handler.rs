//! # Flag Handler
//!
//! Registry of flag descriptors and storage for their parsed values.
//!
//! Parsing is delegated to `clap`: the handler builds a `clap::Command` from
//! the registered descriptors, lets clap deal with syntax (`--flag N`,
//! `--flag=N`, unknown flags, `--help`), then validates raw values against
//! each descriptor's [`FlagKind`]. `--version` is only recognized once a
//! version was given through [`FlagHandler::set_identity`].
//!
//! ## Lifecycle
//!
//! ```text
//! collecting ──register()*──► collecting ──parse()──► parsed (terminal)
//! ```
//!
//! Values are only readable once parsed; registration is only possible before.

use crate::BootstrapError;
use crate::flags::{ArgumentId, FlagDescriptor, FlagKind, FlagSource, FlagValue, ResolvedFlag};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeMap;

/// Command name used when no identity was set.
pub const DEFAULT_PROGRAM_NAME: &str = "program";

/// Flag descriptor registry plus parsed values.
#[derive(Debug, Default)]
pub struct FlagHandler {
    /// Program name and version shown by `--help` / `--version`.
    identity: Option<(&'static str, &'static str)>,
    /// Registered descriptors, keyed by identifier.
    descriptors: BTreeMap<ArgumentId, FlagDescriptor>,
    /// Resolved values; `None` until `parse` succeeds.
    resolved: Option<BTreeMap<ArgumentId, ResolvedFlag>>,
}

impl FlagHandler {
    /// Create an empty handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Name the program and enable `--version`.
    ///
    /// Usage lines still use the file name of the first argument token.
    pub fn set_identity(
        &mut self,
        name: &'static str,
        version: &'static str,
    ) -> Result<(), BootstrapError> {
        if self.is_parsed() {
            return Err(BootstrapError::FlagsAlreadyParsed);
        }
        self.identity = Some((name, version));
        Ok(())
    }

    /// Register a flag descriptor.
    pub fn register(&mut self, descriptor: FlagDescriptor) -> Result<(), BootstrapError> {
        if self.is_parsed() {
            return Err(BootstrapError::FlagsAlreadyParsed);
        }
        if self.descriptors.contains_key(&descriptor.id) {
            return Err(BootstrapError::FlagAlreadyRegistered(descriptor.id));
        }
        tracing::debug!(flag = %descriptor.id, kind = %descriptor.kind, "registered flag");
        self.descriptors.insert(descriptor.id, descriptor);
        Ok(())
    }

    /// Whether a descriptor exists for `id`.
    #[must_use]
    pub fn is_registered(&self, id: ArgumentId) -> bool {
        self.descriptors.contains_key(&id)
    }

    /// Registered descriptors, in identifier order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FlagDescriptor> {
        self.descriptors.values()
    }

    // =========================================================================
    // PARSING
    // =========================================================================

    /// Parse the raw argument tokens against the registered descriptors.
    ///
    /// The first token is the program name. On success every registered flag
    /// resolves to a value; on failure nothing is stored.
    pub fn parse(&mut self, args: &[String]) -> Result<(), BootstrapError> {
        if self.is_parsed() {
            return Err(BootstrapError::FlagsAlreadyParsed);
        }

        let matches = self
            .command()
            .try_get_matches_from(args.iter())
            .map_err(|err| match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    BootstrapError::DisplayRequested(err.render().to_string())
                }
                _ => BootstrapError::Parse(err.render().to_string().trim_end().to_string()),
            })?;

        let mut resolved = BTreeMap::new();
        for descriptor in self.descriptors.values() {
            resolved.insert(descriptor.id, resolve(&matches, descriptor)?);
        }

        tracing::debug!(count = resolved.len(), "parsed command line flags");
        self.resolved = Some(resolved);
        Ok(())
    }

    /// Whether `parse` has completed successfully.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.resolved.is_some()
    }

    fn command(&self) -> Command {
        let command = match self.identity {
            Some((name, version)) => Command::new(name).version(version),
            None => Command::new(DEFAULT_PROGRAM_NAME),
        };
        self.descriptors.values().fold(command, |command, descriptor| {
            let arg = Arg::new(descriptor.long)
                .long(descriptor.long)
                .help(descriptor.help);
            let arg = match descriptor.kind {
                FlagKind::Integer { .. } => arg
                    .value_name("N")
                    .num_args(1)
                    // `-1` reaches validation; `--other-flag` stays a flag.
                    .allow_negative_numbers(true)
                    .value_parser(clap::value_parser!(String))
                    .action(ArgAction::Set),
                FlagKind::Switch => arg.action(ArgAction::SetTrue),
            };
            command.arg(arg)
        })
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// The resolved value and origin of a flag.
    pub fn get(&self, id: ArgumentId) -> Result<&ResolvedFlag, BootstrapError> {
        self.resolved
            .as_ref()
            .ok_or(BootstrapError::FlagsNotParsed)?
            .get(&id)
            .ok_or(BootstrapError::FlagNotRegistered(id))
    }

    /// Value of an integer flag.
    pub fn integer(&self, id: ArgumentId) -> Result<u32, BootstrapError> {
        match self.get(id)?.value {
            FlagValue::Integer(value) => Ok(value),
            FlagValue::Switch(_) => Err(BootstrapError::FlagTypeMismatch {
                flag: id,
                expected: "integer",
            }),
        }
    }

    /// Value of a switch flag.
    pub fn switch(&self, id: ArgumentId) -> Result<bool, BootstrapError> {
        match self.get(id)?.value {
            FlagValue::Switch(value) => Ok(value),
            FlagValue::Integer(_) => Err(BootstrapError::FlagTypeMismatch {
                flag: id,
                expected: "switch",
            }),
        }
    }

    /// All resolved flags, in identifier order. Empty before parsing.
    pub fn resolved(&self) -> impl Iterator<Item = (ArgumentId, &ResolvedFlag)> {
        self.resolved
            .iter()
            .flat_map(|values| values.iter().map(|(id, flag)| (*id, flag)))
    }
}

/// Resolve one descriptor from clap's matches.
fn resolve(matches: &ArgMatches, descriptor: &FlagDescriptor) -> Result<ResolvedFlag, BootstrapError> {
    let engine_error = |err: clap::parser::MatchesError| {
        BootstrapError::Parse(format!("flag '{}': {}", descriptor.id, err))
    };
    let source = match matches.value_source(descriptor.long) {
        Some(ValueSource::CommandLine) => FlagSource::CommandLine,
        _ => FlagSource::Default,
    };

    let value = match descriptor.kind {
        FlagKind::Integer { .. } => match matches
            .try_get_one::<String>(descriptor.long)
            .map_err(engine_error)?
        {
            Some(raw) => {
                descriptor
                    .kind
                    .validate(raw)
                    .map_err(|reason| BootstrapError::InvalidFlagValue {
                        flag: descriptor.id,
                        value: raw.clone(),
                        reason,
                    })?
            }
            None => descriptor.default,
        },
        FlagKind::Switch => {
            let present = matches
                .try_get_one::<bool>(descriptor.long)
                .map_err(engine_error)?
                .copied()
                .unwrap_or(false);
            if source == FlagSource::CommandLine {
                FlagValue::Switch(present)
            } else {
                descriptor.default
            }
        }
    };

    Ok(ResolvedFlag { value, source })
}

// =============================================================================
// TESTS
// =============================================================================
