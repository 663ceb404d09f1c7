//=========================================================================
// Display Errors
//=========================================================================

use std::fmt;

/// Reportable display-manager failures. The manager is unchanged when one
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    NotInitialized,
    AlreadyInitialized,
    UnknownDisplay(String),
    DuplicateDisplay(String),
    UnknownDisplayType(String),
    /// The operation would remove the active display.
    ActiveDisplay(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "Display manager is not initialized"),
            Self::AlreadyInitialized => write!(f, "Display manager is already initialized"),
            Self::UnknownDisplay(name) => write!(f, "No display named '{}'", name),
            Self::DuplicateDisplay(name) => write!(f, "A display named '{}' is already registered", name),
            Self::UnknownDisplayType(name) => write!(f, "No display type '{}' in the factory", name),
            Self::ActiveDisplay(name) => write!(f, "Display '{}' is active", name),
        }
    }
}

impl std::error::Error for DisplayError {}
