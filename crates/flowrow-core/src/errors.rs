//! Error types for flow layout.

use thiserror::Error;

use crate::types::ItemId;

/// Top-level error type for flow layout.
#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Malformed configuration, rejected at the boundary.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised by the layout engines when the host breaks the item contract.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Item {0} is not attached to this layout")]
    UnknownItem(ItemId),

    #[error("Item {0} appears more than once in the same layout pass")]
    DuplicateItem(ItemId),
}
