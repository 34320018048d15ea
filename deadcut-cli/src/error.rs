// ============================================================================
// deadcut-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types for the CLI
//
// The CLI adds no error kinds of its own; every failure is a CoreError and
// main.rs turns it into an error line and exit code 1.

use deadcut_core::CoreResult;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;
