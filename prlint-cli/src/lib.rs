// All rule evaluation lives in prlint-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod input;
pub mod logging;

// Re-export core types for convenience
pub use prlint_core::*;

// Re-export CLI utilities
pub use input::{load_manifest_diff, read_change_list, ManifestSources};
pub use logging::init_logging;
