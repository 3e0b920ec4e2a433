//! Flow configuration.

use crate::animation::Animation;
use crate::errors::ConfigError;
use crate::types::{HorizontalAlignment, VerticalAlignment};

/// Default spacing between items and between rows.
pub const DEFAULT_SPACING: f64 = 8.0;

/// Configuration of a flow layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowConfig {
    /// Gap between items in a row
    pub horizontal_spacing: f64,
    /// Gap between rows
    pub vertical_spacing: f64,
    /// Position of each row within the container
    pub horizontal_alignment: HorizontalAlignment,
    /// Position of each item within its row
    pub vertical_alignment: VerticalAlignment,
    /// Maximum number of visible rows (`None` = unbounded)
    pub max_lines: Option<usize>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_SPACING,
            vertical_spacing: DEFAULT_SPACING,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            max_lines: None,
        }
    }
}

impl FlowConfig {
    /// Set both spacings.
    pub fn with_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Cap the number of visible rows.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    /// Remove the visible row cap.
    pub fn unbounded_lines(mut self) -> Self {
        self.max_lines = None;
        self
    }

    /// Reject configurations that would produce undefined layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_spacing("horizontal_spacing", self.horizontal_spacing)?;
        validate_spacing("vertical_spacing", self.vertical_spacing)?;
        if self.max_lines == Some(0) {
            return Err(ConfigError::invalid("max_lines", "must be at least 1"));
        }
        Ok(())
    }
}

fn validate_spacing(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(field, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

/// Context passed down to engines explicitly, in place of ambient
/// environment state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutContext {
    /// Transition applied to height changes; `None` applies them immediately
    pub animation: Option<Animation>,
}

impl LayoutContext {
    pub fn animated(animation: Animation) -> Self {
        Self {
            animation: Some(animation),
        }
    }
}
