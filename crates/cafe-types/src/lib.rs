//! Cafe Types - Pure type definitions for the cafe catalog
//!
//! This crate contains only plain data types and their conversions, with no
//! runtime, storage or web dependencies.

pub mod cafe;
pub mod choice;
pub mod text;

pub use cafe::*;
pub use choice::*;
pub use text::title_case;
