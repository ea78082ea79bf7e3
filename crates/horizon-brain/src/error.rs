//! Error types for Horizon Brain components.

use thiserror::Error;

/// Errors raised while assembling or driving an accordion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccordionError {
    /// A binding was constructed without the ancestor it requires.
    #[error("{binding} can only be used inside {ancestor}; add {ancestor} to an ancestor")]
    MissingAncestor {
        /// The binding being constructed.
        binding: &'static str,
        /// The ancestor that could not be found.
        ancestor: &'static str,
    },

    /// A trigger was paired with an item owned by a different accordion.
    #[error("AccordionTrigger's item belongs to a different Accordion")]
    ForeignItem,

    /// The trigger handle is not registered with the navigator.
    #[error("trigger handle is not registered with this accordion")]
    InvalidHandle,
}

/// Result type for accordion operations.
pub type Result<T> = std::result::Result<T, AccordionError>;
