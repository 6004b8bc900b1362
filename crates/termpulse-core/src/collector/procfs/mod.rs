//! Resource sampling from the Linux `/proc` filesystem.
//!
//! This module provides parsers for the `/proc` files the resource panel
//! needs and the collector that turns consecutive reads into rates.

pub mod parser;
mod resource;

pub use parser::ParseError;
pub use resource::{CollectError, ResourceCollector, ResourceContext};
