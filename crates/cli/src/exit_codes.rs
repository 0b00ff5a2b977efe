//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract — scripts rely on them.

/// Success - command completed and the run found no discrepancies.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Data could not be loaded, or the run itself failed.
pub const EXIT_RUNTIME: u8 = 4;

/// The run completed and found discrepancies (unmatched materials,
/// vendor mismatches, or baseline-higher consumption).
pub const EXIT_FINDINGS: u8 = 5;
