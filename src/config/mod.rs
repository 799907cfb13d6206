//! Configuration for named spritesheets
//!
//! Provides types and loading for the `sheets.toml` project file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
