//! Core abstractions for diagram processing
//!
//! This module defines the traits every dialect plugin implements, the
//! shared geometry types, and the graph algorithms layouts build on.

pub mod chumsky_utils;
mod database;
mod detector;
mod diagram;
mod error;
mod geometry;
pub mod graph;
mod layout;
pub mod logging;
mod parser;
mod svg;
mod types;

pub use database::*;
pub use detector::*;
pub use diagram::*;
pub use error::*;
pub use geometry::*;
pub use layout::*;
pub use logging::*;
pub use parser::*;
pub use svg::*;
pub use types::*;
