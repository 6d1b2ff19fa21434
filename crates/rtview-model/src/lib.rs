#![forbid(unsafe_code)]

//! Right-triangle model for rtview.
//!
//! This crate provides:
//! - [`Attribute`] naming the independently settable sides
//! - [`RightTriangle`], the contract a numeric view binds against
//! - [`TriangleModel`], the shared, observable implementation of that contract
//! - [`ModelConfig`] for bounds and initial sides (TOML loading behind the
//!   `config` feature)

pub mod attribute;
pub mod config;
pub mod triangle;

pub use attribute::{Attribute, ParseAttributeError};
pub use config::{ConfigError, ModelConfig};
pub use triangle::{MAX_SIDE, MIN_SIDE, RightTriangle, SideBounds, TriangleModel};
