pub mod components;
pub mod markup;
pub mod pages;
pub mod traits;
pub mod tree_writer;

pub use components::*;
pub use markup::*;
pub use pages::*;
pub use traits::*;
pub use tree_writer::*;
