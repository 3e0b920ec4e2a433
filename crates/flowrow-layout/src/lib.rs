//! Reflow layout for rows of items.
//!
//! Items are arranged left to right and wrap to a new row when the current
//! row would overflow the container width. The number of visible rows can
//! be capped while the true row count of the full item set is still
//! reported to the host.
//!
//! # Architecture
//!
//! 1. **Size resolution**: intrinsic sizes are queried synchronously, or
//!    reported asynchronously and retained per item
//! 2. **Row packing**: items are partitioned into rows that fit the width
//! 3. **Placement**: explicit positions from alignment and spacing
//! 4. **Visibility clamp**: the visible rows and the total row count
//!
//! Two engines share the pipeline. [`ImmediateEngine`] serves hosts that
//! can query sizes synchronously; [`MeasuredEngine`] serves hosts that must
//! render an item before its size is known. [`FlowRow`] picks one from the
//! host's [`HostCapability`].
//!
//! # Example
//!
//! ```ignore
//! use flowrow_layout::{compute_layout, FlowConfig, ContainerWidth};
//!
//! let result = compute_layout(&ids, &sizes, ContainerWidth::Bounded(320.0), &FlowConfig::default())?;
//!
//! for placement in result.placements() {
//!     println!("{}: {:?}", placement.id, placement.bounds);
//! }
//! ```

mod binding;
mod clamp;
mod compute;
mod engine;
mod flow;
mod immediate;
mod measured;
mod packer;
mod placement;
mod resolver;
mod transition;

pub use binding::Binding;
pub use clamp::{clamp, visible_height, Clamp};
pub use compute::{compute_layout, size_that_fits, LayoutResult};
pub use engine::{LayoutEngine, MeasureMode, Trigger};
pub use flow::{FlowRow, HostCapability, NoIntrinsicSize};
pub use immediate::ImmediateEngine;
pub use measured::MeasuredEngine;
pub use packer::{pack, Row, RowItem};
pub use placement::{place, Placed, Placement};
pub use resolver::{MeasureState, SizeCache, SizeResolver};
pub use transition::HeightTransition;

pub use flowrow_core::{
    Animation, Bounds, ConfigError, ContainerWidth, Curve, FlowConfig, FlowError,
    HorizontalAlignment, ItemId, LayoutContext, LayoutError, Size, VerticalAlignment,
};
