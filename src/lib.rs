//! # hierdoc
//!
//! Renders the class hierarchy pages of a documentation set from a pre-built
//! class tree: nested lists of superclasses and subclasses, annotated with the
//! interfaces each type implements or extends.

pub mod config;
pub mod model;
pub mod renderer;
pub mod resources;
pub mod source;

pub use config::*;
pub use model::*;
pub use renderer::*;
pub use resources::*;
pub use source::*;

#[cfg(test)]
mod tests;
