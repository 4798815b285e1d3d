//! # Ignition
//!
//! Captures the process arguments, initializes the global systems in order,
//! and reports the flags every later subsystem will see.
//!
//! ## Usage
//!
//! ```bash
//! ignition --logger-verbosity 3
//! ignition --version
//! ignition --logger-verbose --logger-enable-file --logger-append-file
//! IGNITION_LOG_FORMAT=json ignition
//! ```

use ignition::AppConfig;
use ignition_core::{BootstrapContext, BootstrapError};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    match run() {
        Ok(()) => {}
        Err(BootstrapError::DisplayRequested(text)) => {
            print!("{}", text);
        }
        Err(e) => {
            eprintln!("ignition: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), BootstrapError> {
    let mut context = BootstrapContext::new();
    context.arguments_mut().capture_process()?;

    let registry = ignition::bootstrap(&mut context, AppConfig::load)?;

    for (id, flag) in context.flags().resolved() {
        tracing::info!(flag = %id, value = %flag.value, source = ?flag.source, "flag resolved");
    }
    tracing::info!(
        systems = ?registry.names(),
        version = ignition::PROGRAM_VERSION,
        "startup complete"
    );
    Ok(())
}
