//! Hanami Core - Foundational types for the Hanami animation layer
//!
//! This crate provides the types every other Hanami crate depends on:
//! - `Color`, `Hsl` - palette and gradient colors
//! - `Viewport` - host viewport size and pixel ratio
//! - `HanamiConfig` - static configuration tables, loadable from TOML
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{FieldConfig, HanamiConfig, PetalConfig, MOBILE_BREAKPOINT_PX};
pub use error::{HanamiError, Result};
pub use types::{Color, Hsl, Viewport};
