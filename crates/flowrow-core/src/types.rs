//! Core value types for flow layout.

use std::fmt;

use glam::DVec2;

/// Stable identity of an item, unique within one layout pass.
///
/// Identity must survive re-layouts triggered by resizing or content
/// changes, since measured sizes and positions are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u64);

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a size, clamping negative and NaN components to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Re-apply the clamping of [`Size::new`] to a size built field by field.
    pub fn sanitized(self) -> Self {
        Self::new(self.width, self.height)
    }

    /// Limit the width to `max_width`, leaving the height untouched.
    pub fn clamp_width(self, max_width: f64) -> Self {
        if self.width > max_width {
            Self { width: max_width, ..self }
        } else {
            self
        }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Axis-aligned rectangle, origin at the top-left of the flow container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create bounds from an origin and a size.
    pub fn from_origin(origin: DVec2, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Centre point, for hosts that position children by their centre.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// How each row is positioned relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// How items are positioned within the height of their row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Width constraint proposed by the host's layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerWidth {
    Bounded(f64),
    /// No constraint: every item fits on the first row.
    #[default]
    Unbounded,
}

impl ContainerWidth {
    /// Width budget used for packing. Negative and NaN widths clamp to zero.
    pub fn budget(self) -> f64 {
        match self {
            ContainerWidth::Bounded(w) if w.is_nan() => 0.0,
            ContainerWidth::Bounded(w) => w.max(0.0),
            ContainerWidth::Unbounded => f64::INFINITY,
        }
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, ContainerWidth::Bounded(_))
    }
}

impl From<Option<f64>> for ContainerWidth {
    fn from(width: Option<f64>) -> Self {
        match width {
            Some(w) if w.is_finite() => ContainerWidth::Bounded(w),
            _ => ContainerWidth::Unbounded,
        }
    }
}

impl From<f64> for ContainerWidth {
    fn from(width: f64) -> Self {
        Some(width).into()
    }
}
