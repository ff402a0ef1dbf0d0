// Public library interface for tmview-rs
// The CLI and the debug-layout tool are thin wrappers around these modules

pub mod codec;
pub mod error;
pub mod layout;
pub mod render;
pub mod scanner;
pub mod tree;

pub use error::{CodecError, LayoutError};
pub use layout::{layout, Model, Rect, RectBuffer, Stats};
pub use tree::{organize, Item, ItemId};
