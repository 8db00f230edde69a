//! Output formatting
//!
//! Child process output is streamed through untouched, so this module only
//! covers the driver's own status lines and final error display.

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}

/// Print a top-level error in a consistent format
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error:#}", status::ERROR);
}
