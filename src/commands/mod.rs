//! Command implementations for the Plinth CLI

pub mod build;
pub mod deploy;
pub mod diff;
pub mod init;
pub mod page;
pub mod serve;
pub mod watch;

use plinth::ConfigWarning;

// Unknown config keys are worth a nudge but never fatal
pub(crate) fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    if json {
        return;
    }
    for warning in warnings {
        println!(
            "⚠ Unknown configuration key '{}' in {}",
            warning.key,
            warning.file.display()
        );
    }
}
