//! Core types, configuration, and errors for the FlowRow reflow layout.
//!
//! This crate provides the foundational types shared by the layout engine
//! and its hosts:
//! - Item identity and geometry (`ItemId`, `Size`, `Bounds`)
//! - Alignment and container width descriptions
//! - Flow configuration and the explicit animation context
//! - Error types

pub mod animation;
pub mod config;
pub mod errors;
pub mod types;

pub use animation::*;
pub use config::*;
pub use errors::*;
pub use types::*;

pub use glam::DVec2;
