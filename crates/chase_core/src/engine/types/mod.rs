//! Shared geometry types.

mod rect;

pub use rect::Rect;
