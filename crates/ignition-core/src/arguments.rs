//! # Argument Vector
//!
//! The unmodified process argument vector, captured once at startup.
//!
//! The vector starts empty and is populated exactly once, either from the
//! real process (`capture_process`) or from caller-supplied tokens. Any later
//! capture is rejected and leaves the stored tokens untouched.

use crate::BootstrapError;
use std::ffi::OsString;

/// Process startup tokens, in argv order.
#[derive(Debug, Clone, Default)]
pub struct ArgumentVector {
    tokens: Option<Vec<String>>,
}

impl ArgumentVector {
    /// Create an empty, not yet captured vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from an argc/argv style pair.
    ///
    /// Copies the first `count` tokens. Fails if fewer than `count` tokens
    /// are supplied or if the vector was already populated.
    pub fn populate_arguments<S: AsRef<str>>(
        &mut self,
        count: usize,
        tokens: &[S],
    ) -> Result<(), BootstrapError> {
        if tokens.len() < count {
            return Err(BootstrapError::ArgumentCountMismatch {
                declared: count,
                available: tokens.len(),
            });
        }
        self.store(
            tokens[..count]
                .iter()
                .map(|t| t.as_ref().to_string())
                .collect(),
        )
    }

    /// Populate from every token of an iterator.
    pub fn capture<I, S>(&mut self, tokens: I) -> Result<(), BootstrapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store(tokens.into_iter().map(Into::into).collect())
    }

    /// Populate from the arguments this process was started with.
    pub fn capture_process(&mut self) -> Result<(), BootstrapError> {
        self.capture_os(std::env::args_os())
    }

    /// Populate from platform strings, such as `std::env::args_os()`.
    ///
    /// Tokens are stored verbatim; a token that is not valid Unicode is
    /// rejected rather than converted lossily, and nothing is stored.
    pub fn capture_os<I>(&mut self, tokens: I) -> Result<(), BootstrapError>
    where
        I: IntoIterator<Item = OsString>,
    {
        if self.is_captured() {
            return Err(BootstrapError::ArgumentsAlreadyCaptured);
        }
        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                token
                    .into_string()
                    .map_err(|_| BootstrapError::NonUnicodeArgument { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.store(tokens)
    }

    fn store(&mut self, tokens: Vec<String>) -> Result<(), BootstrapError> {
        if self.is_captured() {
            return Err(BootstrapError::ArgumentsAlreadyCaptured);
        }
        tracing::debug!(count = tokens.len(), "captured process arguments");
        self.tokens = Some(tokens);
        Ok(())
    }

    /// Whether a capture has happened.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.tokens.is_some()
    }

    /// The captured tokens; empty before capture.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        self.tokens.as_deref().unwrap_or(&[])
    }

    /// Iterate over the captured tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.as_slice().iter()
    }

    /// Number of captured tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether no tokens are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The first token, conventionally the program name.
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.as_slice().first().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ArgumentVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
